use crate::{Group, SelectionSet};

/// Project `selection` onto `groups`: a link is selected iff its URL is in the set.
pub fn apply_selection(groups: &[Group], selection: &SelectionSet) -> Vec<Group> {
    groups
        .iter()
        .map(|group| Group {
            name: group.name.clone(),
            links: group
                .links
                .iter()
                .map(|link| {
                    let mut link = link.clone();
                    link.selected = selection.contains(&link.url);
                    link
                })
                .collect(),
        })
        .collect()
}

/// Every selected URL across all groups, unique, in first-seen order.
pub fn selected_urls(groups: &[Group]) -> SelectionSet {
    groups
        .iter()
        .flat_map(|group| group.links.iter())
        .filter(|link| link.selected)
        .map(|link| link.url.as_str())
        .collect()
}

/// Result of flipping one URL: the new groups and the full set to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toggled {
    pub groups: Vec<Group>,
    pub selection: SelectionSet,
}

/// Invert `selected` on every link whose URL is `url`.
///
/// Links sharing a URL share selection state, so they all flip together. The
/// returned selection is derived from the complete new snapshot and is meant
/// to replace the stored set wholesale.
pub fn toggle_url(groups: &[Group], url: &str) -> Toggled {
    let groups: Vec<Group> = groups
        .iter()
        .map(|group| Group {
            name: group.name.clone(),
            links: group
                .links
                .iter()
                .map(|link| {
                    let mut link = link.clone();
                    if link.url == url {
                        link.selected = !link.selected;
                    }
                    link
                })
                .collect(),
        })
        .collect();
    let selection = selected_urls(&groups);
    Toggled { groups, selection }
}

/// Force every link whose URL is `url` to `selected`.
pub(crate) fn set_url_selected(groups: &[Group], url: &str, selected: bool) -> Vec<Group> {
    groups
        .iter()
        .map(|group| Group {
            name: group.name.clone(),
            links: group
                .links
                .iter()
                .map(|link| {
                    let mut link = link.clone();
                    if link.url == url {
                        link.selected = selected;
                    }
                    link
                })
                .collect(),
        })
        .collect()
}

pub fn contains_url(groups: &[Group], url: &str) -> bool {
    groups
        .iter()
        .any(|group| group.links.iter().any(|link| link.url == url))
}
