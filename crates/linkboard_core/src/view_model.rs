use serde::Serialize;

use crate::{Group, Link, LoadState, Notice};

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub load: LoadState,
    /// Groups after filtering; groups left without links are omitted.
    pub groups: Vec<GroupView>,
    pub total_links: usize,
    pub selected_count: usize,
    pub visible_links: usize,
    pub filter: String,
    pub selected_only: bool,
    pub saving: bool,
    pub notice: Option<Notice>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GroupView {
    pub name: String,
    pub links: Vec<Link>,
    pub selected_count: usize,
}

pub(crate) fn build_view(
    groups: &[Group],
    load: &LoadState,
    filter: &str,
    selected_only: bool,
    saving: bool,
    notice: Option<Notice>,
    dirty: bool,
) -> AppViewModel {
    // whitespace-only disables the filter; otherwise the query is used as typed
    let query = if filter.trim().is_empty() {
        String::new()
    } else {
        filter.to_lowercase()
    };
    let visible: Vec<GroupView> = groups
        .iter()
        .filter_map(|group| {
            let links: Vec<Link> = group
                .links
                .iter()
                .filter(|link| !selected_only || link.selected)
                .filter(|link| query.is_empty() || matches_query(link, &query))
                .cloned()
                .collect();
            if links.is_empty() {
                return None;
            }
            let selected_count = links.iter().filter(|link| link.selected).count();
            Some(GroupView {
                name: group.name.clone(),
                links,
                selected_count,
            })
        })
        .collect();

    AppViewModel {
        load: load.clone(),
        total_links: groups.iter().map(|group| group.links.len()).sum(),
        selected_count: groups.iter().map(Group::selected_count).sum(),
        visible_links: visible.iter().map(|group| group.links.len()).sum(),
        groups: visible,
        filter: filter.to_string(),
        selected_only,
        saving,
        notice,
        dirty,
    }
}

fn matches_query(link: &Link, query: &str) -> bool {
    link.name.to_lowercase().contains(query) || link.url.to_lowercase().contains(query)
}
