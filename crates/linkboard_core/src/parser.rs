//! Line scanner turning pipe tables into link groups.
//!
//! One table per group: the first header cell names the group, a GFM divider
//! row opens the body, and every `[name](url)` found in body cells is
//! collected. Irregular markup is skipped, never reported.

use crate::dedupe::dedupe_links;
use crate::extract::extract_links;
use crate::{Group, Link};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum TableState {
    /// Not inside any table.
    Outside,
    /// A header row was seen; waiting for the divider row.
    AwaitingSeparator,
    /// Divider seen; rows are data rows until a blank line.
    InBody,
}

#[derive(Debug, PartialEq, Eq)]
enum Line<'a> {
    Blank,
    Prose,
    Separator,
    Row(Vec<&'a str>),
}

fn classify(raw: &str) -> Line<'_> {
    let line = raw.trim();
    if line.is_empty() {
        return Line::Blank;
    }
    if !(line.starts_with('|') && line.ends_with('|')) {
        return Line::Prose;
    }
    let cells = split_cells(line);
    if cells.iter().all(|cell| is_separator_cell(cell)) {
        Line::Separator
    } else {
        Line::Row(cells)
    }
}

/// `line` must start and end with `|`. A lone `|` has no cells.
fn split_cells(line: &str) -> Vec<&str> {
    let mut pieces: Vec<&str> = line.split('|').map(str::trim).collect();
    pieces.pop();
    if !pieces.is_empty() {
        pieces.remove(0);
    }
    pieces
}

fn is_separator_cell(cell: &str) -> bool {
    !cell.is_empty()
        && cell
            .chars()
            .all(|ch| ch == '-' || ch == ':' || ch.is_whitespace())
}

struct TableScanner {
    state: TableState,
    current: Option<Group>,
    groups: Vec<Group>,
}

impl TableScanner {
    fn new() -> Self {
        Self {
            state: TableState::Outside,
            current: None,
            groups: Vec::new(),
        }
    }

    fn feed(&mut self, raw: &str) {
        match (self.state, classify(raw)) {
            (_, Line::Separator) => self.state = TableState::InBody,
            (TableState::InBody, Line::Blank) => self.state = TableState::Outside,
            (_, Line::Blank) | (_, Line::Prose) => {}
            (TableState::InBody, Line::Row(cells)) => self.append_row(&cells),
            (TableState::Outside | TableState::AwaitingSeparator, Line::Row(cells)) => {
                self.start_group(cells.first().copied().unwrap_or_default());
            }
        }
    }

    fn start_group(&mut self, name: &str) {
        self.flush();
        self.current = (!name.is_empty()).then(|| Group::new(name));
        self.state = TableState::AwaitingSeparator;
    }

    fn append_row(&mut self, cells: &[&str]) {
        // rows under an unnamed header are dropped
        let Some(group) = self.current.as_mut() else {
            return;
        };
        for cell in cells {
            group
                .links
                .extend(extract_links(cell).map(|link| Link::new(link.name, link.url)));
        }
    }

    fn flush(&mut self) {
        if let Some(group) = self.current.take() {
            if !group.links.is_empty() {
                self.groups.push(group);
            }
        }
    }

    fn finish(mut self) -> Vec<Group> {
        self.flush();
        self.groups
    }
}

/// Scan `markdown` and return its link groups in table order, links in
/// extraction order. Repeated links are kept; see [`parse_document`].
pub fn parse_tables(markdown: &str) -> Vec<Group> {
    let mut scanner = TableScanner::new();
    for line in markdown.lines() {
        scanner.feed(line);
    }
    scanner.finish()
}

/// [`parse_tables`] followed by per-group deduplication.
pub fn parse_document(markdown: &str) -> Vec<Group> {
    parse_tables(markdown)
        .into_iter()
        .map(|group| Group {
            links: dedupe_links(&group.links),
            name: group.name,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_rows() {
        assert_eq!(classify("   "), Line::Blank);
        assert_eq!(classify("# Title"), Line::Prose);
        assert_eq!(classify("| a | b"), Line::Prose);
        assert_eq!(classify("|:---|---:|"), Line::Separator);
        assert_eq!(classify(" | A | [x](u) | "), Line::Row(vec!["A", "[x](u)"]));
    }

    #[test]
    fn empty_cells_are_not_separator_cells() {
        assert_eq!(classify("|  |"), Line::Row(vec![""]));
        assert_eq!(classify("|---| |"), Line::Row(vec!["---", ""]));
    }

    #[test]
    fn lone_pipe_has_no_cells() {
        assert!(split_cells("|").is_empty());
        assert_eq!(classify("|"), Line::Separator);
        assert_eq!(split_cells("||"), vec![""]);
    }
}
