//! Turn a validated payload into storage-ready attributes.

use super::{validate::coerce_level, DATETIME_FORMAT};
use crate::models::log::{level::Level, new_log::NewLog};
use chrono::{Local, NaiveDateTime};
use serde_json::Value;

/// Normalize a payload that already passed [`super::validate_log_data`],
/// defaulting `created_at` to the current local time.
///
/// Returns `None` if the payload does not have the validated shape.
pub fn normalize(data: &Value) -> Option<NewLog> {
    normalize_at(data, Local::now().naive_local())
}

/// Same as [`normalize`] with an explicit fallback timestamp.
pub fn normalize_at(data: &Value, now: NaiveDateTime) -> Option<NewLog> {
    let attributes = data.get("data")?.get("attributes")?.as_object()?;

    let level = Level::from_code(coerce_level(attributes.get("level")))?;
    let source = attributes.get("source")?.as_str()?.trim().to_string();
    let message = attributes.get("message")?.as_str()?.trim().to_string();
    let channel = attributes
        .get("channel")
        .and_then(Value::as_str)
        .map(|c| c.trim().to_string());

    let created_at = match attributes.get("datetime").and_then(Value::as_str) {
        Some(datetime) => datetime.to_string(),
        None => now.format(DATETIME_FORMAT).to_string(),
    };

    Some(NewLog {
        source,
        message,
        level: level.code(),
        level_name: level.name().to_string(),
        channel,
        context: encode_structured(attributes.get("context")),
        extra: encode_structured(attributes.get("extra")),
        created_at,
    })
}

fn encode_structured(value: Option<&Value>) -> Option<String> {
    value.filter(|v| !v.is_null()).map(Value::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use serde_json::json;

    fn fixed_now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 5, 6)
            .unwrap()
            .and_hms_opt(7, 8, 9)
            .unwrap()
    }

    #[test]
    fn trims_and_resolves_level_name() {
        let data = json!({"data": {"type": "log", "attributes": {
            "source": "  shop  ",
            "message": "\tcheckout failed\n",
            "level": "400",
            "channel": " payments ",
        }}});
        let log = normalize_at(&data, fixed_now()).unwrap();
        assert_eq!(log.source, "shop");
        assert_eq!(log.message, "checkout failed");
        assert_eq!(log.channel.as_deref(), Some("payments"));
        assert_eq!(log.level, 400);
        assert_eq!(log.level_name, "error");
    }

    #[test]
    fn ignores_submitted_level_name() {
        let data = json!({"data": {"type": "log", "attributes": {
            "source": "a", "message": "b", "level": 100, "level_name": "emergency",
        }}});
        let log = normalize_at(&data, fixed_now()).unwrap();
        assert_eq!(log.level_name, "debug");
    }

    #[test]
    fn defaults_created_at_to_now() {
        let data = json!({"data": {"type": "log", "attributes": {
            "source": "a", "message": "b", "level": 200,
        }}});
        let log = normalize_at(&data, fixed_now()).unwrap();
        assert_eq!(log.created_at, "2024-05-06 07:08:09");
        assert_eq!(log.channel, None);
        assert_eq!(log.context, None);
        assert_eq!(log.extra, None);
    }

    #[test]
    fn passes_datetime_through_as_created_at() {
        let data = json!({"data": {"type": "log", "attributes": {
            "source": "a", "message": "b", "level": 200, "datetime": "2020-01-02 03:04:05",
        }}});
        let log = normalize_at(&data, fixed_now()).unwrap();
        assert_eq!(log.created_at, "2020-01-02 03:04:05");
        let echoed = serde_json::to_value(&log).unwrap();
        assert!(echoed.get("datetime").is_none());
    }

    #[test]
    fn serializes_structured_fields() {
        let data = json!({"data": {"type": "log", "attributes": {
            "source": "a", "message": "b", "level": 300,
            "context": {"user": {"id": 1}},
            "extra": [],
        }}});
        let log = normalize_at(&data, fixed_now()).unwrap();
        assert_eq!(log.context.as_deref(), Some(r#"{"user":{"id":1}}"#));
        assert_eq!(log.extra.as_deref(), Some("[]"));
    }
}
