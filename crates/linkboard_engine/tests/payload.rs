use linkboard_engine::{parse_selection_payload, parse_selection_payload_str, PayloadError};
use serde_json::json;

#[test]
fn urls_key_is_accepted() {
    let set = parse_selection_payload(&json!({ "urls": ["http://a", "http://b"] })).unwrap();
    assert_eq!(set.as_slice(), ["http://a", "http://b"]);
}

#[test]
fn alternate_keys_are_tried_in_order() {
    let set = parse_selection_payload(&json!({ "selectedUrls": ["http://s"], "selected": ["http://x"] }))
        .unwrap();
    assert_eq!(set.as_slice(), ["http://s"]);

    let set = parse_selection_payload(&json!({ "selected": ["http://x"] })).unwrap();
    assert_eq!(set.as_slice(), ["http://x"]);
}

#[test]
fn non_array_key_falls_through_to_next() {
    let set = parse_selection_payload(&json!({ "urls": "http://a", "selected": ["http://b"] })).unwrap();
    assert_eq!(set.as_slice(), ["http://b"]);
}

#[test]
fn non_string_entries_are_filtered() {
    let set = parse_selection_payload(&json!({ "urls": ["http://a", 1, {"u": 2}, null, "http://b"] }))
        .unwrap();
    assert_eq!(set.as_slice(), ["http://a", "http://b"]);
}

#[test]
fn bare_array_is_accepted() {
    let set = parse_selection_payload(&json!(["http://a"])).unwrap();
    assert_eq!(set.len(), 1);
}

#[test]
fn empty_array_clears_selection() {
    let set = parse_selection_payload(&json!({ "urls": [] })).unwrap();
    assert!(set.is_empty());
}

#[test]
fn missing_urls_is_rejected() {
    assert_eq!(
        parse_selection_payload(&json!({ "links": ["http://a"] })),
        Err(PayloadError::MissingUrls)
    );
    assert_eq!(
        parse_selection_payload(&json!("http://a")),
        Err(PayloadError::MissingUrls)
    );
}

#[test]
fn malformed_json_is_rejected() {
    assert!(matches!(
        parse_selection_payload_str("{ urls: "),
        Err(PayloadError::InvalidJson(_))
    ));
}
