use std::path::PathBuf;
use std::sync::{mpsc, Arc};
use std::thread;

use engine_logging::{engine_error, engine_info, engine_warn};
use linkboard_core::{apply_selection, parse_document, ExportLink};

use crate::export::{export_to_file, ExportError, Exporter};
use crate::fetch::{ChannelProgressSink, ProgressSink};
use crate::source::{DocumentSource, SourceError};
use crate::store::{SelectionStore, StoreError};
use crate::{EngineEvent, ExportSummary, LoadedGroups};

#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("failed to read selection: {0}")]
    Store(#[from] StoreError),
}

/// Everything the engine needs to serve loads, writes and exports.
#[derive(Clone)]
pub struct EngineConfig {
    pub source: Arc<DocumentSource>,
    pub store: Arc<dyn SelectionStore>,
    pub exporter: Arc<dyn Exporter>,
}

/// Fetch (or reuse) the document, parse and dedupe it, then project the
/// stored selection onto it.
pub async fn load_groups(
    source: &DocumentSource,
    store: &dyn SelectionStore,
    sink: &dyn ProgressSink,
) -> Result<LoadedGroups, LoadError> {
    let document = source.load(sink).await?;
    let selection = store.load()?;
    let groups = apply_selection(&parse_document(&document.text), &selection);
    engine_info!(
        "Loaded {} groups ({} links, {} selected urls) from {:?}",
        groups.len(),
        groups.iter().map(|g| g.links.len()).sum::<usize>(),
        selection.len(),
        document.origin
    );
    Ok(LoadedGroups {
        groups,
        origin: document.origin,
    })
}

enum EngineCommand {
    Load,
    PersistSelection { urls: Vec<String> },
    Export { links: Vec<ExportLink>, output: PathBuf },
}

/// Runs IO on a background runtime; results come back as [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(config: EngineConfig) -> std::io::Result<Self> {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();
        let runtime = tokio::runtime::Runtime::new()?;

        thread::spawn(move || {
            while let Ok(command) = cmd_rx.recv() {
                let config = config.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(&config, command, event_tx).await;
                });
            }
        });

        Ok(Self { cmd_tx, event_rx })
    }

    pub fn load(&self) {
        self.send(EngineCommand::Load);
    }

    pub fn persist_selection(&self, urls: Vec<String>) {
        self.send(EngineCommand::PersistSelection { urls });
    }

    pub fn export(&self, links: Vec<ExportLink>, output: PathBuf) {
        self.send(EngineCommand::Export { links, output });
    }

    /// Blocks until the next event; `None` once the engine thread is gone.
    pub fn recv(&self) -> Option<EngineEvent> {
        self.event_rx.recv().ok()
    }

    fn send(&self, command: EngineCommand) {
        if self.cmd_tx.send(command).is_err() {
            engine_error!("Engine thread is gone; command dropped");
        }
    }
}

async fn handle_command(
    config: &EngineConfig,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    let event = match command {
        EngineCommand::Load => {
            let sink = ChannelProgressSink::new(event_tx.clone());
            let result = load_groups(&config.source, config.store.as_ref(), &sink).await;
            if let Err(err) = &result {
                engine_warn!("Load failed: {}", err);
            }
            EngineEvent::GroupsLoaded(result.map_err(|err| err.to_string()))
        }
        EngineCommand::PersistSelection { urls } => {
            let store = config.store.clone();
            let result = tokio::task::spawn_blocking(move || {
                let count = urls.len();
                store.replace(&urls).map(|()| count)
            })
            .await
            .unwrap_or_else(|err| Err(StoreError::Unavailable(err.to_string())));
            if let Err(err) = &result {
                engine_warn!("Selection write failed: {}", err);
            }
            EngineEvent::SelectionPersisted(result.map_err(|err| err.to_string()))
        }
        EngineCommand::Export { links, output } => {
            let exporter = config.exporter.clone();
            let result: Result<ExportSummary, ExportError> = tokio::task::spawn_blocking(
                move || export_to_file(exporter.as_ref(), &links, &output),
            )
            .await
            .unwrap_or_else(|err| Err(ExportError::Interrupted(err.to_string())));
            if let Err(err) = &result {
                engine_warn!("Export failed: {}", err);
            }
            EngineEvent::ExportFinished(result.map_err(|err| err.to_string()))
        }
    };
    let _ = event_tx.send(event);
}
