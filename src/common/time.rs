//! Timestamp normalization for document payloads.
//!
//! Document stores hand timestamps back in several shapes: RFC 3339 strings,
//! epoch seconds or milliseconds, and `{seconds, nanos}` objects. Every read
//! path goes through this module once, at the store-adapter boundary, instead
//! of re-converting ad hoc per endpoint.

use chrono::{DateTime, Utc};
use serde_json::{Map, Value};

/// Interprets a JSON value as a point in time, if it has a timestamp shape.
pub fn parse_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|dt| dt.with_timezone(&Utc)),
        Value::Number(n) => {
            let n = n.as_i64()?;
            // Magnitudes this large can only be epoch milliseconds.
            if n.abs() >= 100_000_000_000 {
                DateTime::from_timestamp_millis(n)
            } else {
                DateTime::from_timestamp(n, 0)
            }
        }
        Value::Object(map) => timestamp_from_object(map),
        _ => None,
    }
}

/// Rewrites store-native timestamp objects (`{seconds, nanos}` and the
/// underscore-prefixed variant) into RFC 3339 strings, in place. Scalar
/// fields are left untouched; a bare number is ambiguous, an object is not.
pub fn normalize_timestamp_fields(object: &mut Map<String, Value>) {
    for value in object.values_mut() {
        if let Value::Object(map) = value {
            if let Some(ts) = timestamp_from_object(map) {
                *value = Value::String(ts.to_rfc3339());
            }
        }
    }
}

fn timestamp_from_object(map: &Map<String, Value>) -> Option<DateTime<Utc>> {
    let seconds = map
        .get("seconds")
        .or_else(|| map.get("_seconds"))?
        .as_i64()?;
    let nanos = map
        .get("nanos")
        .or_else(|| map.get("_nanoseconds"))
        .and_then(Value::as_i64)
        .unwrap_or(0);
    DateTime::from_timestamp(seconds, u32::try_from(nanos).ok()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_rfc3339_strings() {
        let ts = parse_timestamp(&json!("2026-08-01T12:30:00Z")).unwrap();
        assert_eq!(ts.to_rfc3339(), "2026-08-01T12:30:00+00:00");
    }

    #[test]
    fn parses_epoch_seconds_and_milliseconds() {
        let seconds = parse_timestamp(&json!(1_754_051_400)).unwrap();
        let millis = parse_timestamp(&json!(1_754_051_400_000_i64)).unwrap();
        assert_eq!(seconds, millis);
    }

    #[test]
    fn parses_store_native_objects() {
        let ts = parse_timestamp(&json!({ "seconds": 1_754_051_400, "nanos": 0 })).unwrap();
        assert_eq!(ts.timestamp(), 1_754_051_400);

        let underscored =
            parse_timestamp(&json!({ "_seconds": 1_754_051_400, "_nanoseconds": 500 })).unwrap();
        assert_eq!(underscored.timestamp(), 1_754_051_400);
    }

    #[test]
    fn rejects_non_timestamp_values() {
        assert!(parse_timestamp(&json!(true)).is_none());
        assert!(parse_timestamp(&json!("tomorrow")).is_none());
        assert!(parse_timestamp(&json!({ "nanos": 12 })).is_none());
    }

    #[test]
    fn normalizes_only_object_shaped_fields() {
        let Value::Object(mut object) = json!({
            "name": "Maize seed",
            "quantity": 40,
            "receivedAt": { "seconds": 1_754_051_400, "nanos": 0 },
        }) else {
            unreachable!()
        };

        normalize_timestamp_fields(&mut object);

        assert_eq!(object["quantity"], json!(40));
        assert!(object["receivedAt"].as_str().unwrap().starts_with("2025-08-01T"));
    }
}
