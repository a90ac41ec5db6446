use std::path::PathBuf;

use anyhow::{Context, Result};
use engine_logging::{engine_debug, engine_info, engine_warn};
use linkboard_core::{update, AppState, AppViewModel, Effect, Msg};
use linkboard_engine::{EngineEvent, EngineHandle, ExportSummary};

/// Forwards core effects to the engine and counts the replies still owed.
pub struct EffectRunner {
    engine: EngineHandle,
    export_output: Option<PathBuf>,
    in_flight: usize,
}

/// What an engine event means to the session.
enum Outcome {
    Msg(Msg),
    Exported(Result<ExportSummary, String>),
    Progress,
}

impl EffectRunner {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            engine,
            export_output: None,
            in_flight: 0,
        }
    }

    pub fn enqueue(&mut self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::LoadGroups => {
                    engine_info!("LoadGroups");
                    self.engine.load();
                }
                Effect::PersistSelection { urls } => {
                    engine_info!("PersistSelection url_count={}", urls.len());
                    self.engine.persist_selection(urls);
                }
                Effect::Export { links } => {
                    let Some(output) = self.export_output.clone() else {
                        engine_warn!("Export of {} links dropped: no output path", links.len());
                        continue;
                    };
                    engine_info!("Export link_count={} output={:?}", links.len(), output);
                    self.engine.export(links, output);
                }
            }
            self.in_flight += 1;
        }
    }

    fn next_outcome(&mut self) -> Option<Outcome> {
        let outcome = map_event(self.engine.recv()?);
        if !matches!(outcome, Outcome::Progress) {
            self.in_flight = self.in_flight.saturating_sub(1);
        }
        Some(outcome)
    }
}

fn map_event(event: EngineEvent) -> Outcome {
    match event {
        EngineEvent::Progress(progress) => {
            engine_debug!("Downloaded {} of {:?} bytes", progress.bytes, progress.total);
            Outcome::Progress
        }
        EngineEvent::GroupsLoaded(Ok(loaded)) => {
            engine_info!("Document served from {:?}", loaded.origin);
            Outcome::Msg(Msg::GroupsLoaded(loaded.groups))
        }
        EngineEvent::GroupsLoaded(Err(reason)) => Outcome::Msg(Msg::LoadFailed(reason)),
        EngineEvent::SelectionPersisted(Ok(_)) => Outcome::Msg(Msg::SelectionPersisted),
        EngineEvent::SelectionPersisted(Err(reason)) => {
            engine_warn!("Rolling back toggle: {}", reason);
            Outcome::Msg(Msg::SelectionPersistFailed(reason))
        }
        EngineEvent::ExportFinished(result) => Outcome::Exported(result),
    }
}

/// One user session: core state plus the engine that serves its effects.
pub struct Session {
    state: AppState,
    runner: EffectRunner,
    last_export: Option<Result<ExportSummary, String>>,
}

impl Session {
    pub fn new(engine: EngineHandle) -> Self {
        Self {
            state: AppState::new(),
            runner: EffectRunner::new(engine),
            last_export: None,
        }
    }

    pub fn with_export_output(mut self, output: PathBuf) -> Self {
        self.runner.export_output = Some(output);
        self
    }

    pub fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (mut state, effects) = update(state, msg);
        if state.consume_dirty() {
            engine_debug!("Session state changed");
        }
        self.state = state;
        self.runner.enqueue(effects);
    }

    /// Block until every effect dispatched so far has reported back.
    pub fn settle(&mut self) -> Result<()> {
        while self.runner.in_flight > 0 {
            let outcome = self
                .runner
                .next_outcome()
                .context("engine stopped before answering")?;
            match outcome {
                Outcome::Msg(msg) => self.dispatch(msg),
                Outcome::Exported(result) => self.last_export = Some(result),
                Outcome::Progress => {}
            }
        }
        Ok(())
    }

    pub fn view(&self) -> AppViewModel {
        self.state.view()
    }

    pub fn take_export(&mut self) -> Option<Result<ExportSummary, String>> {
        self.last_export.take()
    }
}
