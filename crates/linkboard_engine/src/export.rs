use std::path::{Path, PathBuf};

use engine_logging::engine_info;
use linkboard_core::ExportLink;

use crate::persist::{AtomicFileWriter, PersistError};
use crate::ExportSummary;

#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("nothing to export")]
    Empty,
    #[error("failed to serialize export: {0}")]
    Serialize(#[from] serde_json::Error),
    #[error("persist error: {0}")]
    Persist(#[from] PersistError),
    #[error("invalid output path {0:?}")]
    InvalidOutputPath(PathBuf),
    #[error("export task interrupted: {0}")]
    Interrupted(String),
}

/// Turns the selected `{name, url}` pairs into a downloadable byte stream.
pub trait Exporter: Send + Sync {
    fn export(&self, links: &[ExportLink]) -> Result<Vec<u8>, ExportError>;
}

/// Pretty-printed JSON array of `{"name", "url"}` objects.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonExporter;

impl Exporter for JsonExporter {
    fn export(&self, links: &[ExportLink]) -> Result<Vec<u8>, ExportError> {
        let mut bytes = serde_json::to_vec_pretty(links)?;
        bytes.push(b'\n');
        Ok(bytes)
    }
}

/// One `name<TAB>url` line per link.
#[derive(Debug, Default, Clone, Copy)]
pub struct TextExporter;

impl Exporter for TextExporter {
    fn export(&self, links: &[ExportLink]) -> Result<Vec<u8>, ExportError> {
        let mut buffer = String::new();
        for link in links {
            buffer.push_str(&link.name);
            buffer.push('\t');
            buffer.push_str(&link.url);
            buffer.push('\n');
        }
        Ok(buffer.into_bytes())
    }
}

/// Run `exporter` and atomically write its output to `output`.
pub fn export_to_file(
    exporter: &dyn Exporter,
    links: &[ExportLink],
    output: &Path,
) -> Result<ExportSummary, ExportError> {
    if links.is_empty() {
        return Err(ExportError::Empty);
    }
    let (writer, filename) = AtomicFileWriter::for_path(output)
        .ok_or_else(|| ExportError::InvalidOutputPath(output.to_path_buf()))?;

    let bytes = exporter.export(links)?;
    let output_path = writer.write(&filename, &bytes)?;
    engine_info!("Exported {} links to {:?}", links.len(), output_path);

    Ok(ExportSummary {
        link_count: links.len(),
        byte_len: bytes.len() as u64,
        output_path,
    })
}
