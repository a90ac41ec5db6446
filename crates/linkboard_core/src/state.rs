use crate::dedupe::dedupe_links;
use crate::selection::{contains_url, set_url_selected, toggle_url};
use crate::view_model::{build_view, AppViewModel};
use crate::{ExportLink, Group, Link};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    Idle,
    Loading,
    Ready,
    Failed(String),
}

/// Something the user should be told about; replaced by the next one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    LoadFailed(String),
    /// The optimistic toggle was rolled back.
    SaveFailed(String),
    /// A toggle arrived while the previous write was still pending.
    WriteInFlight,
    UnknownUrl(String),
    NothingSelected,
}

/// Pre-toggle snapshot kept while a selection write is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingWrite {
    previous: Vec<Group>,
    url: String,
    /// State the toggle moved `url` to.
    selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppState {
    groups: Vec<Group>,
    load: LoadState,
    pending_write: Option<PendingWrite>,
    filter: String,
    selected_only: bool,
    notice: Option<Notice>,
    dirty: bool,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn view(&self) -> AppViewModel {
        build_view(
            &self.groups,
            &self.load,
            &self.filter,
            self.selected_only,
            self.pending_write.is_some(),
            self.notice.clone(),
            self.dirty,
        )
    }

    pub fn groups(&self) -> &[Group] {
        &self.groups
    }

    pub fn load_state(&self) -> &LoadState {
        &self.load
    }

    pub fn is_saving(&self) -> bool {
        self.pending_write.is_some()
    }

    /// Returns whether anything changed since the last call and clears the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn mark_dirty(&mut self) {
        self.dirty = true;
    }

    pub(crate) fn set_notice(&mut self, notice: Notice) {
        self.notice = Some(notice);
        self.mark_dirty();
    }

    pub(crate) fn clear_notice(&mut self) {
        if self.notice.take().is_some() {
            self.mark_dirty();
        }
    }

    /// Returns `false` when a load is already running.
    pub(crate) fn begin_load(&mut self) -> bool {
        if self.load == LoadState::Loading {
            return false;
        }
        self.load = LoadState::Loading;
        self.mark_dirty();
        true
    }

    /// A load landing mid-write replaces the rollback snapshot and keeps the
    /// pending toggle visible, whichever side of the write the store was read.
    pub(crate) fn finish_load(&mut self, groups: Vec<Group>) {
        self.groups = match self.pending_write.as_mut() {
            Some(pending) => {
                pending.previous = set_url_selected(&groups, &pending.url, !pending.selected);
                set_url_selected(&groups, &pending.url, pending.selected)
            }
            None => groups,
        };
        self.load = LoadState::Ready;
        self.mark_dirty();
    }

    pub(crate) fn fail_load(&mut self, reason: String) {
        self.load = LoadState::Failed(reason.clone());
        self.set_notice(Notice::LoadFailed(reason));
    }

    /// Optimistically flip `url` and return the full set to persist.
    pub(crate) fn toggle(&mut self, url: &str) -> Option<Vec<String>> {
        if self.pending_write.is_some() {
            self.set_notice(Notice::WriteInFlight);
            return None;
        }
        if !contains_url(&self.groups, url) {
            self.set_notice(Notice::UnknownUrl(url.to_string()));
            return None;
        }
        let toggled = toggle_url(&self.groups, url);
        let previous = std::mem::replace(&mut self.groups, toggled.groups);
        self.pending_write = Some(PendingWrite {
            previous,
            url: url.to_string(),
            selected: toggled.selection.contains(url),
        });
        self.clear_notice();
        self.mark_dirty();
        Some(toggled.selection.into_vec())
    }

    pub(crate) fn commit_write(&mut self) {
        if self.pending_write.take().is_some() {
            self.mark_dirty();
        }
    }

    pub(crate) fn rollback_write(&mut self, reason: String) {
        if let Some(pending) = self.pending_write.take() {
            self.groups = pending.previous;
        }
        self.set_notice(Notice::SaveFailed(reason));
    }

    pub(crate) fn set_filter(&mut self, filter: String) {
        if self.filter != filter {
            self.filter = filter;
            self.mark_dirty();
        }
    }

    pub(crate) fn flip_selected_only(&mut self) {
        self.selected_only = !self.selected_only;
        self.mark_dirty();
    }

    /// Selected links in display order, each `(name, url)` pair once.
    pub(crate) fn export_links(&self) -> Vec<ExportLink> {
        let selected: Vec<Link> = self
            .groups
            .iter()
            .flat_map(|group| group.links.iter())
            .filter(|link| link.selected)
            .cloned()
            .collect();
        dedupe_links(&selected).iter().map(ExportLink::from).collect()
    }
}
