use crate::ExportLink;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch the document, parse it and apply the stored selection.
    LoadGroups,
    /// Replace the stored selection with exactly these URLs.
    PersistSelection { urls: Vec<String> },
    /// Hand the selected links to the exporter.
    Export { links: Vec<ExportLink> },
}
