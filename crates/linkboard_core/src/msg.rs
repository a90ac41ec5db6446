#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User asked for a (re)load of the document.
    RefreshRequested,
    /// Engine finished loading: parsed, deduped groups with selection applied.
    GroupsLoaded(Vec<crate::Group>),
    /// Engine could not produce a document.
    LoadFailed(String),
    /// User clicked a link card.
    LinkToggled { url: String },
    /// The selection write issued for the last toggle landed.
    SelectionPersisted,
    /// The selection write issued for the last toggle failed.
    SelectionPersistFailed(String),
    /// User edited the search box.
    FilterChanged(String),
    /// User flipped the "selected only" switch.
    SelectedOnlyToggled,
    /// User clicked Export.
    ExportClicked,
    /// User dismissed the current notice.
    NoticeDismissed,
    /// Fallback for placeholder wiring.
    NoOp,
}
