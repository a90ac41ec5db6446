use std::sync::LazyLock;

use regex::{CaptureMatches, Regex};

/// `[label](target)` where the label holds no `]` and the target no `)`.
static LINK_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("link pattern compiles"));

/// A `[name](url)` occurrence borrowed from the cell it was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellLink<'a> {
    pub name: &'a str,
    pub url: &'a str,
}

/// Iterator over the links of one table cell, left to right.
pub struct CellLinks<'a> {
    captures: CaptureMatches<'static, 'a>,
}

impl<'a> Iterator for CellLinks<'a> {
    type Item = CellLink<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        for caps in self.captures.by_ref() {
            let (Some(name), Some(url)) = (caps.get(1), caps.get(2)) else {
                continue;
            };
            let name = name.as_str().trim();
            let url = url.as_str().trim();
            if name.is_empty() || url.is_empty() {
                continue;
            }
            return Some(CellLink { name, url });
        }
        None
    }
}

/// Extract every `[name](url)` pair from a single cell.
///
/// Matches never overlap. Unterminated brackets or whitespace-only captures
/// are skipped rather than reported. Calling this again on the same text
/// yields the same sequence.
pub fn extract_links(cell: &str) -> CellLinks<'_> {
    CellLinks {
        captures: LINK_PATTERN.captures_iter(cell),
    }
}
