use std::io::{self, Read};
use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use engine_logging::engine_info;
use linkboard_core::{LoadState, Msg, Notice};
use linkboard_engine::{
    parse_selection_payload_str, DocumentCache, DocumentSource, EngineConfig, EngineHandle,
    Exporter, FileSelectionStore, JsonExporter, ReqwestFetcher, SelectionStore, TextExporter,
};

use crate::cli::{ExportArgs, ExportFormat, ListArgs, SaveArgs, ToggleArgs};
use crate::config::Config;
use crate::effects::Session;
use crate::render::{describe_notice, render_json, render_text};

fn start_engine(config: &Config, exporter: Arc<dyn Exporter>) -> Result<EngineHandle> {
    let source = DocumentSource::new(
        config.source_url.clone(),
        Arc::new(ReqwestFetcher::new(config.fetch_settings())?),
        DocumentCache::new(config.cache_dir(), &config.source_url),
        config.revalidate(),
    );
    EngineHandle::new(EngineConfig {
        source: Arc::new(source),
        store: Arc::new(FileSelectionStore::new(config.state_dir())),
        exporter,
    })
    .context("failed to start engine")
}

fn load(session: &mut Session) -> Result<()> {
    session.dispatch(Msg::RefreshRequested);
    session.settle()?;
    match session.view().load {
        LoadState::Failed(reason) => Err(anyhow!("could not load document: {reason}")),
        _ => Ok(()),
    }
}

pub fn list(config: &Config, args: ListArgs) -> Result<()> {
    let mut session = Session::new(start_engine(config, Arc::new(JsonExporter))?);
    load(&mut session)?;

    if let Some(filter) = args.filter {
        session.dispatch(Msg::FilterChanged(filter));
    }
    if args.selected_only {
        session.dispatch(Msg::SelectedOnlyToggled);
    }

    let view = session.view();
    if args.json {
        println!("{}", render_json(&view)?);
    } else {
        print!("{}", render_text(&view));
    }
    Ok(())
}

/// Toggles are applied one at a time, each waiting for its write to land.
pub fn toggle(config: &Config, args: ToggleArgs) -> Result<()> {
    let mut session = Session::new(start_engine(config, Arc::new(JsonExporter))?);
    load(&mut session)?;

    let mut unknown = Vec::new();
    for url in args.urls {
        session.dispatch(Msg::LinkToggled { url: url.clone() });
        session.settle()?;
        match session.view().notice {
            None => {}
            Some(Notice::UnknownUrl(_)) => unknown.push(url),
            Some(notice) => bail!(describe_notice(&notice)),
        }
        session.dispatch(Msg::NoticeDismissed);
    }

    let view = session.view();
    println!(
        "{} of {} links selected",
        view.selected_count, view.total_links
    );
    if !unknown.is_empty() {
        bail!("no link with url: {}", unknown.join(", "));
    }
    Ok(())
}

/// Replace the stored selection wholesale; the document is not consulted.
pub fn save(config: &Config, args: SaveArgs) -> Result<()> {
    let raw = if args.payload.as_os_str() == "-" {
        let mut buffer = String::new();
        io::stdin()
            .read_to_string(&mut buffer)
            .context("failed to read payload from stdin")?;
        buffer
    } else {
        std::fs::read_to_string(&args.payload)
            .with_context(|| format!("failed to read payload {:?}", args.payload))?
    };

    let selection = parse_selection_payload_str(&raw)?;
    let store = FileSelectionStore::new(config.state_dir());
    store.replace(selection.as_slice())?;
    engine_info!("Saved {} urls to {:?}", selection.len(), store.path());
    println!("saved {} selected urls", selection.len());
    Ok(())
}

pub fn export(config: &Config, args: ExportArgs) -> Result<()> {
    let exporter: Arc<dyn Exporter> = match args.format {
        ExportFormat::Json => Arc::new(JsonExporter),
        ExportFormat::Text => Arc::new(TextExporter),
    };
    let mut session =
        Session::new(start_engine(config, exporter)?).with_export_output(args.output);
    load(&mut session)?;

    session.dispatch(Msg::ExportClicked);
    if let Some(notice) = session.view().notice {
        bail!(describe_notice(&notice));
    }
    session.settle()?;

    let summary = session
        .take_export()
        .context("export did not run")?
        .map_err(|reason| anyhow!("export failed: {reason}"))?;
    println!(
        "exported {} links ({} bytes) to {}",
        summary.link_count,
        summary.byte_len,
        summary.output_path.display()
    );
    Ok(())
}
