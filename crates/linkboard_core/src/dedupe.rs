use std::collections::HashSet;

use crate::Link;

/// Keep the first occurrence of every `(name, url)` pair, preserving order.
pub fn dedupe_links(links: &[Link]) -> Vec<Link> {
    let mut seen: HashSet<(&str, &str)> = HashSet::with_capacity(links.len());
    links
        .iter()
        .filter(|link| seen.insert((link.name.as_str(), link.url.as_str())))
        .cloned()
        .collect()
}
