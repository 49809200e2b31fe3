//! Field resolution across coexisting schema versions.
//!
//! Several historical request schemas are still in flight, so one
//! logical field may live under any of several keys: the current
//! top-level key, a legacy alias, or the generic `additionalProperties`
//! bag. Each logical field is resolved through an ordered list of
//! accessors evaluated first-match-wins; the order encodes precedence,
//! and callers must never assume a single canonical key exists.

use serde_json::Value;

use crate::RequestDoc;

/// Stringify a scalar JSON value. JSON `null` and containers are
/// treated as absent so resolution falls through to the next accessor.
fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Null | Value::Array(_) | Value::Object(_) => None,
    }
}

fn additional_properties(doc: &RequestDoc) -> Option<&serde_json::Map<String, Value>> {
    doc.get("additionalProperties")?.as_object()
}

fn top_level(doc: &RequestDoc, key: &str) -> Option<String> {
    doc.get(key).and_then(value_as_string)
}

fn in_additional_properties(doc: &RequestDoc, key: &str) -> Option<String> {
    additional_properties(doc)?.get(key).and_then(value_as_string)
}

/// Resolve the request identifier.
///
/// Lookup order: top-level `requestId`, top-level `igoRequestId`, then
/// `requestId` and `igoRequestId` inside `additionalProperties`. The
/// first hit wins even when its value is all-blank; a blank winner
/// yields `None` rather than falling through, so a blank
/// current-schema key shadows a populated legacy alias.
pub fn resolve_request_id(doc: &RequestDoc) -> Option<String> {
    let accessors: &[fn(&RequestDoc) -> Option<String>] = &[
        |doc| top_level(doc, "requestId"),
        |doc| top_level(doc, "igoRequestId"),
        |doc| in_additional_properties(doc, "requestId"),
        |doc| in_additional_properties(doc, "igoRequestId"),
    ];
    let hit = accessors.iter().find_map(|accessor| accessor(doc))?;
    if hit.trim().is_empty() { None } else { Some(hit) }
}

/// Classify the request as CMO or non-CMO.
///
/// Reads top-level `isCmoRequest`, falling back to `isCmoSample`
/// inside `additionalProperties`. JSON `true` or the case-insensitive
/// string `"true"` classify the request as CMO; anything else,
/// including an absent field, classifies it as non-CMO.
pub fn is_cmo_request(doc: &RequestDoc) -> bool {
    let raw = doc
        .get("isCmoRequest")
        .or_else(|| additional_properties(doc).and_then(|props| props.get("isCmoSample")));
    match raw {
        Some(Value::Bool(flag)) => *flag,
        Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
        _ => false,
    }
}
