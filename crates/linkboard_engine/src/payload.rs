use linkboard_core::SelectionSet;
use serde_json::Value;

/// Keys a selection write may carry its URL array under, in precedence order.
const PAYLOAD_KEYS: [&str; 3] = ["urls", "selectedUrls", "selected"];

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PayloadError {
    #[error("payload is not valid json: {0}")]
    InvalidJson(String),
    #[error("payload must contain a `urls` array")]
    MissingUrls,
}

/// Validate a selection write.
///
/// Accepts a bare array or an object with one of `urls`, `selectedUrls` or
/// `selected` holding an array; the first such key wins. Non-string entries
/// are dropped rather than failing the write.
pub fn parse_selection_payload(value: &Value) -> Result<SelectionSet, PayloadError> {
    let entries = match value {
        Value::Array(entries) => entries,
        Value::Object(map) => PAYLOAD_KEYS
            .iter()
            .find_map(|key| map.get(*key).and_then(Value::as_array))
            .ok_or(PayloadError::MissingUrls)?,
        _ => return Err(PayloadError::MissingUrls),
    };
    Ok(string_entries(entries))
}

pub fn parse_selection_payload_str(raw: &str) -> Result<SelectionSet, PayloadError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|err| PayloadError::InvalidJson(err.to_string()))?;
    parse_selection_payload(&value)
}

/// Read a stored selection blob: a bare array, or an object with a
/// `selected` array. Anything else reads as `None`.
pub(crate) fn parse_stored_selection(value: &Value) -> Option<SelectionSet> {
    match value {
        Value::Array(entries) => Some(string_entries(entries)),
        Value::Object(map) => map.get("selected").and_then(Value::as_array).map(|e| string_entries(e)),
        _ => None,
    }
}

fn string_entries(entries: &[Value]) -> SelectionSet {
    entries.iter().filter_map(Value::as_str).collect()
}
