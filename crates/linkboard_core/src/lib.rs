//! Linkboard core: table-to-link parsing, selection reconciliation and the
//! pure session state machine.
mod dedupe;
mod effect;
mod extract;
mod model;
mod msg;
mod parser;
mod selection;
mod state;
mod update;
mod view_model;

pub use dedupe::dedupe_links;
pub use effect::Effect;
pub use extract::{extract_links, CellLink, CellLinks};
pub use model::{ExportLink, Group, Link, SelectionSet};
pub use msg::Msg;
pub use parser::{parse_document, parse_tables};
pub use selection::{apply_selection, contains_url, selected_urls, toggle_url, Toggled};
pub use state::{AppState, LoadState, Notice};
pub use update::update;
pub use view_model::{AppViewModel, GroupView};
