//! Shape checks for submitted log payloads.

use super::DATETIME_FORMAT;
use crate::models::log::level::Level;
use chrono::NaiveDateTime;
use serde_json::{Map, Value};

/// Check whether `data` is a well-formed log submission.
///
/// Checks run in a fixed order and the first failure ends validation. The
/// caller decides which error to surface.
pub fn validate_log_data(data: &Value) -> bool {
    let Some(envelope) = data.get("data") else {
        return false;
    };

    if envelope.get("type").and_then(Value::as_str) != Some("log") {
        return false;
    }

    let attributes = match envelope.get("attributes") {
        Some(Value::Object(map)) if !map.is_empty() => map,
        _ => return false,
    };

    // emptiness is checked before trimming
    if !is_non_empty_string(attributes.get("source")) {
        return false;
    }
    if !is_non_empty_string(attributes.get("message")) {
        return false;
    }

    if Level::from_code(coerce_level(attributes.get("level"))).is_none() {
        return false;
    }

    if !optional_structured(attributes, "context") {
        return false;
    }

    if let Some(channel) = present(attributes, "channel") {
        if !channel.is_string() {
            return false;
        }
    }

    if !optional_structured(attributes, "extra") {
        return false;
    }

    if let Some(datetime) = present(attributes, "datetime") {
        match datetime.as_str() {
            Some(s) if parse_datetime(s).is_some() => {}
            _ => return false,
        }
    }

    true
}

/// Coerce a submitted level to an integer. Integers pass through, floats
/// truncate, numeric strings are parsed, booleans map to 0/1 and anything
/// else becomes 0 (which is never a valid level).
pub fn coerce_level(value: Option<&Value>) -> i64 {
    match value {
        Some(Value::Number(n)) => n
            .as_i64()
            .or_else(|| n.as_f64().map(|f| f.trunc() as i64))
            .unwrap_or(0),
        Some(Value::String(s)) => {
            let s = s.trim();
            s.parse::<i64>()
                .ok()
                .or_else(|| s.parse::<f64>().ok().map(|f| f.trunc() as i64))
                .unwrap_or(0)
        }
        Some(Value::Bool(b)) => i64::from(*b),
        _ => 0,
    }
}

/// Parse a timestamp in exactly `YYYY-MM-DD HH:MM:SS` form.
pub fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    let parsed = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).ok()?;
    // chrono accepts unpadded fields; require the canonical rendering
    if parsed.format(DATETIME_FORMAT).to_string() != s {
        return None;
    }
    Some(parsed)
}

fn present<'a>(attributes: &'a Map<String, Value>, key: &str) -> Option<&'a Value> {
    attributes.get(key).filter(|v| !v.is_null())
}

fn is_non_empty_string(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.is_empty())
}

fn optional_structured(attributes: &Map<String, Value>, key: &str) -> bool {
    match present(attributes, key) {
        Some(v) => v.is_object() || v.is_array(),
        None => true,
    }
}
