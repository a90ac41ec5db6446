use std::sync::Once;

use linkboard_core::{
    apply_selection, parse_document, update, AppState, Effect, ExportLink, LoadState, Msg, Notice,
    SelectionSet,
};
use pretty_assertions::assert_eq;

const DOCUMENT: &str = "\
| Apple |
|---|
| [Apple](http://apple) [iCloud](http://icloud) |

| Google |
|---|
| [Google](http://google) [YouTube](http://youtube) |
| [Apple mirror](http://apple) |
";

fn init_logging() {
    static INIT: Once = Once::new();
    INIT.call_once(engine_logging::initialize_for_tests);
}

fn loaded(selected: &[&str]) -> AppState {
    let set: SelectionSet = selected.iter().copied().collect();
    let groups = apply_selection(&parse_document(DOCUMENT), &set);
    let (state, _) = update(AppState::new(), Msg::RefreshRequested);
    let (mut state, _) = update(state, Msg::GroupsLoaded(groups));
    state.consume_dirty();
    state
}

fn toggle(state: AppState, url: &str) -> (AppState, Vec<Effect>) {
    update(
        state,
        Msg::LinkToggled {
            url: url.to_string(),
        },
    )
}

#[test]
fn refresh_emits_single_load() {
    init_logging();
    let (state, effects) = update(AppState::new(), Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::LoadGroups]);
    assert_eq!(state.load_state(), &LoadState::Loading);

    let (_state, effects) = update(state, Msg::RefreshRequested);
    assert!(effects.is_empty());
}

#[test]
fn load_failure_is_reported() {
    init_logging();
    let (state, _) = update(AppState::new(), Msg::RefreshRequested);
    let (state, effects) = update(state, Msg::LoadFailed("source unavailable".into()));

    assert!(effects.is_empty());
    let view = state.view();
    assert_eq!(view.load, LoadState::Failed("source unavailable".into()));
    assert_eq!(
        view.notice,
        Some(Notice::LoadFailed("source unavailable".into()))
    );
}

#[test]
fn toggle_emits_full_replacement_set() {
    init_logging();
    let state = loaded(&["http://apple"]);

    let (mut state, effects) = toggle(state, "http://google");

    assert_eq!(
        effects,
        vec![Effect::PersistSelection {
            urls: vec!["http://apple".to_string(), "http://google".to_string()],
        }]
    );
    assert!(state.is_saving());
    assert!(state.consume_dirty());
    assert_eq!(state.view().selected_count, 3);
}

#[test]
fn persisted_write_keeps_optimistic_state() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://youtube");
    let (state, effects) = update(state, Msg::SelectionPersisted);

    assert!(effects.is_empty());
    assert!(!state.is_saving());
    assert_eq!(state.view().selected_count, 1);
}

#[test]
fn failed_write_rolls_back_to_pre_toggle_snapshot() {
    init_logging();
    let before = loaded(&["http://apple"]);
    let original_groups = before.groups().to_vec();

    let (state, _) = toggle(before, "http://apple");
    assert_eq!(state.view().selected_count, 0);

    let (state, effects) = update(state, Msg::SelectionPersistFailed("disk full".into()));

    assert!(effects.is_empty());
    assert_eq!(state.groups(), original_groups.as_slice());
    assert!(!state.is_saving());
    assert_eq!(state.view().notice, Some(Notice::SaveFailed("disk full".into())));
}

#[test]
fn only_one_write_in_flight() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://google");
    let groups_during_write = state.groups().to_vec();

    let (state, effects) = toggle(state, "http://youtube");

    assert!(effects.is_empty());
    assert_eq!(state.groups(), groups_during_write.as_slice());
    assert_eq!(state.view().notice, Some(Notice::WriteInFlight));

    let (state, _) = update(state, Msg::SelectionPersisted);
    let (_state, effects) = toggle(state, "http://youtube");
    assert_eq!(
        effects,
        vec![Effect::PersistSelection {
            urls: vec!["http://google".to_string(), "http://youtube".to_string()],
        }]
    );
}

#[test]
fn shared_url_selects_every_copy() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://apple");
    let view = state.view();

    assert_eq!(view.selected_count, 2);
    assert_eq!(view.groups[0].selected_count, 1);
    assert_eq!(view.groups[1].selected_count, 1);
}

#[test]
fn unknown_url_is_not_persisted() {
    init_logging();
    let (state, effects) = toggle(loaded(&[]), "http://missing");
    assert!(effects.is_empty());
    assert!(!state.is_saving());
    assert_eq!(
        state.view().notice,
        Some(Notice::UnknownUrl("http://missing".into()))
    );
}

#[test]
fn filter_matches_name_or_url_case_insensitively() {
    init_logging();
    let (state, _) = update(loaded(&[]), Msg::FilterChanged("YOU".into()));
    let view = state.view();

    assert_eq!(view.total_links, 5);
    assert_eq!(view.visible_links, 1);
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].name, "Google");
    assert_eq!(view.groups[0].links[0].name, "YouTube");

    let (state, _) = update(state, Msg::FilterChanged("icloud".into()));
    assert_eq!(state.view().groups[0].name, "Apple");
}

#[test]
fn blank_filter_shows_everything_and_padding_is_kept() {
    init_logging();
    let (state, _) = update(loaded(&[]), Msg::FilterChanged("   ".into()));
    assert_eq!(state.view().visible_links, 5);

    let (state, _) = update(state, Msg::FilterChanged(" you".into()));
    assert_eq!(state.view().visible_links, 0);
}

#[test]
fn selected_only_hides_unselected_and_empty_groups() {
    init_logging();
    let (state, _) = update(loaded(&["http://icloud"]), Msg::SelectedOnlyToggled);
    let view = state.view();

    assert!(view.selected_only);
    assert_eq!(view.groups.len(), 1);
    assert_eq!(view.groups[0].links.len(), 1);
    assert_eq!(view.groups[0].links[0].url, "http://icloud");
}

#[test]
fn export_requires_a_selection() {
    init_logging();
    let (state, effects) = update(loaded(&[]), Msg::ExportClicked);
    assert!(effects.is_empty());
    assert_eq!(state.view().notice, Some(Notice::NothingSelected));

    let (state, _) = update(state, Msg::NoticeDismissed);
    assert_eq!(state.view().notice, None);
}

#[test]
fn export_lists_selected_pairs_in_display_order() {
    init_logging();
    let (_state, effects) = update(loaded(&["http://youtube", "http://apple"]), Msg::ExportClicked);

    assert_eq!(
        effects,
        vec![Effect::Export {
            links: vec![
                ExportLink {
                    name: "Apple".into(),
                    url: "http://apple".into(),
                },
                ExportLink {
                    name: "YouTube".into(),
                    url: "http://youtube".into(),
                },
                ExportLink {
                    name: "Apple mirror".into(),
                    url: "http://apple".into(),
                },
            ],
        }]
    );
}

#[test]
fn reload_reapplies_fresh_groups() {
    init_logging();
    let state = loaded(&["http://apple"]);
    let fresh = parse_document("| Other |\n|---|\n| [o](http://o) |\n");
    let (state, _) = update(state, Msg::RefreshRequested);
    let (state, _) = update(state, Msg::GroupsLoaded(fresh));

    let view = state.view();
    assert_eq!(view.load, LoadState::Ready);
    assert_eq!(view.total_links, 1);
    assert_eq!(view.selected_count, 0);
}

fn names(state: &AppState) -> Vec<String> {
    state.groups().iter().map(|group| group.name.clone()).collect()
}

#[test]
fn rollback_after_reload_keeps_the_new_document() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://apple");
    let (state, effects) = update(state, Msg::RefreshRequested);
    assert_eq!(effects, vec![Effect::LoadGroups]);

    let reloaded = parse_document("| Bing |\n|---|\n| [Bing](http://bing) |\n");
    let (state, _) = update(state, Msg::GroupsLoaded(reloaded));
    assert_eq!(names(&state), vec!["Bing"]);
    assert!(state.is_saving());

    let (state, _) = update(state, Msg::SelectionPersistFailed("disk full".into()));
    assert_eq!(names(&state), vec!["Bing"]);
    assert!(!state.is_saving());
    assert_eq!(state.view().notice, Some(Notice::SaveFailed("disk full".into())));
}

#[test]
fn reload_during_write_keeps_pending_toggle_visible() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://apple");
    let (state, _) = update(state, Msg::RefreshRequested);

    // store read before the write landed
    let stale = apply_selection(&parse_document(DOCUMENT), &SelectionSet::new());
    let (state, _) = update(state, Msg::GroupsLoaded(stale));
    assert_eq!(state.view().selected_count, 2);

    let (state, _) = update(state, Msg::SelectionPersistFailed("disk full".into()));
    assert_eq!(state.view().selected_count, 0);
    assert_eq!(names(&state), vec!["Apple", "Google"]);
}

#[test]
fn reload_after_write_landed_keeps_toggle() {
    init_logging();
    let (state, _) = toggle(loaded(&[]), "http://apple");
    let (state, _) = update(state, Msg::RefreshRequested);

    let written: SelectionSet = ["http://apple"].into_iter().collect();
    let fresh = apply_selection(&parse_document(DOCUMENT), &written);
    let (state, _) = update(state, Msg::GroupsLoaded(fresh));
    let (state, _) = update(state, Msg::SelectionPersisted);

    assert!(!state.is_saving());
    assert_eq!(state.view().selected_count, 2);
}
