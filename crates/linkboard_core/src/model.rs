use std::collections::HashSet;

use serde::{Deserialize, Serialize};

/// A named hyperlink pulled out of a table cell.
///
/// `selected` is a projection of the current [`SelectionSet`]; it is never
/// persisted on its own.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Link {
    pub name: String,
    pub url: String,
    #[serde(default)]
    pub selected: bool,
}

impl Link {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            selected: false,
        }
    }
}

/// The links of one source table, named after its first header cell.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub name: String,
    pub links: Vec<Link>,
}

impl Group {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            links: Vec::new(),
        }
    }

    pub fn selected_count(&self) -> usize {
        self.links.iter().filter(|link| link.selected).count()
    }
}

/// The `{name, url}` pair handed to an exporter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportLink {
    pub name: String,
    pub url: String,
}

impl From<&Link> for ExportLink {
    fn from(link: &Link) -> Self {
        Self {
            name: link.name.clone(),
            url: link.url.clone(),
        }
    }
}

/// Set of selected URLs. Keeps first-insertion order so the persisted blob is
/// stable across writes; equality ignores order.
#[derive(Debug, Clone, Default)]
pub struct SelectionSet {
    urls: Vec<String>,
    index: HashSet<String>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the URL was already present.
    pub fn insert(&mut self, url: impl Into<String>) -> bool {
        let url = url.into();
        if self.index.contains(&url) {
            return false;
        }
        self.index.insert(url.clone());
        self.urls.push(url);
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.index.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.urls.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }

    pub fn into_vec(self) -> Vec<String> {
        self.urls
    }
}

impl PartialEq for SelectionSet {
    fn eq(&self, other: &Self) -> bool {
        self.index == other.index
    }
}

impl Eq for SelectionSet {}

impl<S: Into<String>> FromIterator<S> for SelectionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = SelectionSet::new();
        for url in iter {
            set.insert(url);
        }
        set
    }
}

impl<S: Into<String>> Extend<S> for SelectionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for url in iter {
            self.insert(url);
        }
    }
}
