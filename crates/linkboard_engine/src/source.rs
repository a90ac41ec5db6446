use std::sync::Arc;
use std::time::Duration;

use engine_logging::{engine_debug, engine_info, engine_warn};

use crate::cache::{CachedDocument, DocumentCache};
use crate::decode::decode_text;
use crate::fetch::{Fetcher, ProgressSink};
use crate::{DocumentOrigin, FailureKind, FetchError};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SourceError {
    #[error("document unavailable and no cached copy exists: {reason}")]
    Unavailable { reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    pub text: String,
    pub origin: DocumentOrigin,
}

/// Remote document with an on-disk fallback.
///
/// A cached copy younger than `revalidate` is served without a request. A
/// failed fetch falls back to the cache of any age; only when both are
/// missing is the load an error.
pub struct DocumentSource {
    url: String,
    fetcher: Arc<dyn Fetcher>,
    cache: DocumentCache,
    revalidate: Duration,
}

impl DocumentSource {
    pub fn new(
        url: impl Into<String>,
        fetcher: Arc<dyn Fetcher>,
        cache: DocumentCache,
        revalidate: Duration,
    ) -> Self {
        Self {
            url: url.into(),
            fetcher,
            cache,
            revalidate,
        }
    }

    pub async fn load(&self, sink: &dyn ProgressSink) -> Result<SourceDocument, SourceError> {
        let cached = self.cache.read().filter(|doc| !doc.text.is_empty());
        if let Some(doc) = cached.as_ref().filter(|doc| doc.is_fresh(self.revalidate)) {
            engine_debug!("Serving {} from cache (age {:?})", self.url, doc.age);
            return Ok(SourceDocument {
                text: doc.text.clone(),
                origin: DocumentOrigin::FreshCache,
            });
        }

        match self.fetch_text(sink).await {
            Ok(text) => {
                engine_info!("Fetched {} ({} bytes)", self.url, text.len());
                if let Err(err) = self.cache.write(&text) {
                    engine_warn!("Failed to write cache {:?}: {}", self.cache.path(), err);
                }
                Ok(SourceDocument {
                    text,
                    origin: DocumentOrigin::Network,
                })
            }
            Err(err) => {
                engine_warn!("Failed to fetch {}: {}", self.url, err);
                match cached {
                    Some(CachedDocument { text, age }) => {
                        engine_info!("Falling back to cached document (age {:?})", age);
                        Ok(SourceDocument {
                            text,
                            origin: DocumentOrigin::StaleCache,
                        })
                    }
                    None => Err(SourceError::Unavailable {
                        reason: err.to_string(),
                    }),
                }
            }
        }
    }

    async fn fetch_text(&self, sink: &dyn ProgressSink) -> Result<String, FetchError> {
        let output = self.fetcher.fetch(&self.url, sink).await?;
        if output.final_url != self.url {
            engine_debug!("{} redirected to {}", self.url, output.final_url);
        }
        let decoded = decode_text(&output.bytes, output.content_type.as_deref())
            .map_err(|err| FetchError::new(FailureKind::Decode, err.to_string()))?;
        if decoded.text.trim().is_empty() {
            return Err(FetchError::new(FailureKind::EmptyBody, "document is empty"));
        }
        Ok(decoded.text)
    }
}
