use std::fmt::Write as _;

use linkboard_core::{AppViewModel, GroupView, Notice};
use serde::Serialize;

#[derive(Debug, Serialize)]
struct ListReport<'a> {
    total_links: usize,
    selected_count: usize,
    visible_links: usize,
    groups: &'a [GroupView],
}

pub fn render_json(view: &AppViewModel) -> serde_json::Result<String> {
    serde_json::to_string_pretty(&ListReport {
        total_links: view.total_links,
        selected_count: view.selected_count,
        visible_links: view.visible_links,
        groups: &view.groups,
    })
}

pub fn render_text(view: &AppViewModel) -> String {
    let mut out = String::new();
    for group in &view.groups {
        let _ = writeln!(
            out,
            "{} ({}/{} selected)",
            group.name,
            group.selected_count,
            group.links.len()
        );
        let width = group
            .links
            .iter()
            .map(|link| link.name.chars().count())
            .max()
            .unwrap_or(0);
        for link in &group.links {
            let mark = if link.selected { 'x' } else { ' ' };
            let _ = writeln!(out, "  [{mark}] {:<width$}  {}", link.name, link.url);
        }
        out.push('\n');
    }
    let _ = writeln!(
        out,
        "{} shown, {} of {} links selected",
        view.visible_links, view.selected_count, view.total_links
    );
    out
}

pub fn describe_notice(notice: &Notice) -> String {
    match notice {
        Notice::LoadFailed(reason) => format!("could not load document: {reason}"),
        Notice::SaveFailed(reason) => format!("selection not saved: {reason}"),
        Notice::WriteInFlight => "a selection write is still pending".to_string(),
        Notice::UnknownUrl(url) => format!("no link with url {url}"),
        Notice::NothingSelected => "nothing selected to export".to_string(),
    }
}
