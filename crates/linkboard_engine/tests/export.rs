use linkboard_core::ExportLink;
use linkboard_engine::{export_to_file, ExportError, Exporter, JsonExporter, TextExporter};
use pretty_assertions::assert_eq;
use tempfile::TempDir;

fn links() -> Vec<ExportLink> {
    vec![
        ExportLink {
            name: "Apple".into(),
            url: "https://example.com/Apple.list".into(),
        },
        ExportLink {
            name: "Google".into(),
            url: "https://example.com/Google.list".into(),
        },
    ]
}

#[test]
fn json_export_is_an_array_of_pairs() {
    let bytes = JsonExporter.export(&links()).unwrap();
    let parsed: Vec<ExportLink> = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(parsed, links());
}

#[test]
fn text_export_has_one_line_per_link() {
    let bytes = TextExporter.export(&links()).unwrap();
    assert_eq!(
        String::from_utf8(bytes).unwrap(),
        "Apple\thttps://example.com/Apple.list\nGoogle\thttps://example.com/Google.list\n"
    );
}

#[test]
fn export_to_file_writes_bytes_and_reports_summary() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("out").join("links.json");

    let summary = export_to_file(&JsonExporter, &links(), &output).unwrap();

    assert_eq!(summary.link_count, 2);
    assert_eq!(summary.output_path, output);
    let written = std::fs::read(&output).unwrap();
    assert_eq!(written.len() as u64, summary.byte_len);
}

#[test]
fn export_to_file_refuses_empty_selection() {
    let temp = TempDir::new().unwrap();
    let output = temp.path().join("links.json");

    let err = export_to_file(&JsonExporter, &[], &output).unwrap_err();

    assert!(matches!(err, ExportError::Empty));
    assert!(!output.exists());
}
