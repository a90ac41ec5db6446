use crate::{AppState, Effect, Msg, Notice};

/// Pure update function: applies a message to state and returns any effects.
pub fn update(mut state: AppState, msg: Msg) -> (AppState, Vec<Effect>) {
    let effects = match msg {
        Msg::RefreshRequested => {
            if state.begin_load() {
                vec![Effect::LoadGroups]
            } else {
                Vec::new()
            }
        }
        Msg::GroupsLoaded(groups) => {
            state.finish_load(groups);
            Vec::new()
        }
        Msg::LoadFailed(reason) => {
            state.fail_load(reason);
            Vec::new()
        }
        Msg::LinkToggled { url } => match state.toggle(&url) {
            Some(urls) => vec![Effect::PersistSelection { urls }],
            None => Vec::new(),
        },
        Msg::SelectionPersisted => {
            state.commit_write();
            Vec::new()
        }
        Msg::SelectionPersistFailed(reason) => {
            state.rollback_write(reason);
            Vec::new()
        }
        Msg::FilterChanged(filter) => {
            state.set_filter(filter);
            Vec::new()
        }
        Msg::SelectedOnlyToggled => {
            state.flip_selected_only();
            Vec::new()
        }
        Msg::ExportClicked => {
            let links = state.export_links();
            if links.is_empty() {
                state.set_notice(Notice::NothingSelected);
                Vec::new()
            } else {
                vec![Effect::Export { links }]
            }
        }
        Msg::NoticeDismissed => {
            state.clear_notice();
            Vec::new()
        }
        Msg::NoOp => Vec::new(),
    };

    (state, effects)
}
