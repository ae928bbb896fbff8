//! Graceful navigation over the nested archive document.
//!
//! Archive exports nest section lists several objects deep, and any level may
//! be absent. These helpers walk a path of keys and report absence as `None`
//! at the first missing segment, so callers treat "no data" and "section not
//! exported" identically.

use serde_json::Value;

/// Walk `path` through nested JSON objects.
///
/// Returns `None` the first time a segment is missing or the current value is
/// not an object; never an error.
pub fn lookup_path<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a Value> {
    let mut current = doc;
    for key in path {
        current = current.get(key)?;
    }
    Some(current)
}

/// Walk `path` and return the record list at its end.
///
/// `None` when any segment is missing or the final value is not an array.
/// The returned slice may be empty; emptiness checks stay with the caller.
pub fn lookup_list<'a>(doc: &'a Value, path: &[&str]) -> Option<&'a [Value]> {
    lookup_path(doc, path).and_then(|v| v.as_array()).map(|v| v.as_slice())
}

/// Number of records under `path`, `0` when the list is absent.
pub fn list_len(doc: &Value, path: &[&str]) -> usize {
    lookup_list(doc, path).map(|list| list.len()).unwrap_or(0)
}

/// A record's string field, `None` when absent or not a string.
pub fn record_str<'a>(record: &'a Value, key: &str) -> Option<&'a str> {
    record.get(key).and_then(|v| v.as_str())
}

// ── Tests ─────────────────────────────────────────────────────────────────────
