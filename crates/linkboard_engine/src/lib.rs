//! Linkboard engine: document retrieval, selection storage, export and the
//! background effect executor.
mod cache;
mod decode;
mod engine;
mod export;
mod fetch;
mod payload;
mod persist;
mod source;
mod store;
mod types;

pub use cache::{cache_filename, CachedDocument, DocumentCache};
pub use decode::{decode_text, DecodeError, DecodedText};
pub use engine::{load_groups, EngineConfig, EngineHandle, LoadError};
pub use export::{export_to_file, ExportError, Exporter, JsonExporter, TextExporter};
pub use fetch::{ChannelProgressSink, FetchSettings, Fetcher, NullProgressSink, ProgressSink, ReqwestFetcher};
pub use payload::{parse_selection_payload, parse_selection_payload_str, PayloadError};
pub use persist::{ensure_dir, AtomicFileWriter, PersistError};
pub use source::{DocumentSource, SourceDocument, SourceError};
pub use store::{FileSelectionStore, MemorySelectionStore, SelectionStore, StoreError, SELECTION_FILENAME};
pub use types::{
    DocumentOrigin, EngineEvent, ExportSummary, FailureKind, FetchError, FetchOutput,
    FetchProgress, LoadedGroups,
};
