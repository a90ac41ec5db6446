use std::fs;
use std::io;
use std::path::PathBuf;
use std::time::{Duration, SystemTime};

use engine_logging::engine_warn;
use sha2::{Digest, Sha256};

use crate::persist::{AtomicFileWriter, PersistError};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedDocument {
    pub text: String,
    /// `None` when the file time is unavailable or in the future.
    pub age: Option<Duration>,
}

impl CachedDocument {
    pub fn is_fresh(&self, max_age: Duration) -> bool {
        self.age.is_some_and(|age| age < max_age)
    }
}

/// Last good copy of the source document, one file per source URL.
#[derive(Debug, Clone)]
pub struct DocumentCache {
    writer: AtomicFileWriter,
    filename: String,
}

impl DocumentCache {
    pub fn new(dir: PathBuf, source_url: &str) -> Self {
        Self {
            writer: AtomicFileWriter::new(dir),
            filename: cache_filename(source_url),
        }
    }

    pub fn path(&self) -> PathBuf {
        self.writer.dir().join(&self.filename)
    }

    pub fn read(&self) -> Option<CachedDocument> {
        let path = self.path();
        let text = match fs::read_to_string(&path) {
            Ok(text) => text,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return None,
            Err(err) => {
                engine_warn!("Failed to read cached document {:?}: {}", path, err);
                return None;
            }
        };
        let age = fs::metadata(&path)
            .and_then(|meta| meta.modified())
            .ok()
            .and_then(|modified| SystemTime::now().duration_since(modified).ok());
        Some(CachedDocument { text, age })
    }

    pub fn write(&self, text: &str) -> Result<PathBuf, PersistError> {
        self.writer.write(&self.filename, text)
    }
}

/// `document-{short_hash(url)}.md`
pub fn cache_filename(source_url: &str) -> String {
    format!("document-{}.md", short_hash(source_url))
}

fn short_hash(input: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(input.as_bytes());
    let digest = hasher.finalize();
    let mut hex = String::with_capacity(8);
    for byte in digest.iter().take(4) {
        use std::fmt::Write;
        let _ = write!(&mut hex, "{byte:02x}");
    }
    hex
}
