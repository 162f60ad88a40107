// File: vrcweb-common/src/json.rs
//
// Typed field access over the loosely-shaped JSON documents the VRChat API
// returns. Absence of an optional key is never an error; a type mismatch at
// scalar extraction is. Optional date fields use "" and "none" as absent
// sentinels instead of JSON null.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::Error;

/// Look up `key`, treating a missing key and a JSON `null` both as absent.
pub fn field<'a>(json: &'a Value, key: &str) -> Option<&'a Value> {
    match json.get(key) {
        Some(Value::Null) | None => None,
        Some(v) => Some(v),
    }
}

pub fn required_str(json: &Value, key: &str) -> Result<String, Error> {
    match json.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(Value::Null) | None => Err(Error::missing_field(key)),
        Some(_) => Err(Error::field_type(key, "a string")),
    }
}

pub fn optional_str(json: &Value, key: &str) -> Result<Option<String>, Error> {
    match field(json, key) {
        None => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.clone())),
        Some(_) => Err(Error::field_type(key, "a string")),
    }
}

/// Like [`optional_str`], but substitutes `default` when the key is absent.
pub fn str_or(json: &Value, key: &str, default: &str) -> Result<String, Error> {
    Ok(optional_str(json, key)?.unwrap_or_else(|| default.to_string()))
}

pub fn required_bool(json: &Value, key: &str) -> Result<bool, Error> {
    match json.get(key) {
        Some(Value::Bool(b)) => Ok(*b),
        Some(Value::Null) | None => Err(Error::missing_field(key)),
        Some(_) => Err(Error::field_type(key, "a boolean")),
    }
}

pub fn optional_bool(json: &Value, key: &str) -> Result<Option<bool>, Error> {
    match field(json, key) {
        None => Ok(None),
        Some(Value::Bool(b)) => Ok(Some(*b)),
        Some(_) => Err(Error::field_type(key, "a boolean")),
    }
}

pub fn required_u32(json: &Value, key: &str) -> Result<u32, Error> {
    match json.get(key) {
        Some(Value::Null) | None => Err(Error::missing_field(key)),
        Some(v) => coerce_u32(v, key),
    }
}

pub fn optional_u32(json: &Value, key: &str) -> Result<Option<u32>, Error> {
    match field(json, key) {
        None => Ok(None),
        Some(v) => coerce_u32(v, key).map(Some),
    }
}

fn coerce_u32(v: &Value, key: &str) -> Result<u32, Error> {
    v.as_u64()
        .and_then(|n| u32::try_from(n).ok())
        .ok_or_else(|| Error::field_type(key, "a non-negative integer"))
}

/// Optional timestamp. The API writes `""` or `"none"` where it means
/// "no value"; anything else must be RFC 3339.
pub fn optional_datetime(json: &Value, key: &str) -> Result<Option<DateTime<Utc>>, Error> {
    match field(json, key) {
        None => Ok(None),
        Some(Value::String(s)) if s.is_empty() || s == "none" => Ok(None),
        Some(Value::String(s)) => {
            let dt = DateTime::parse_from_rfc3339(s)?;
            Ok(Some(dt.with_timezone(&Utc)))
        }
        Some(_) => Err(Error::field_type(key, "a timestamp string")),
    }
}

/// Ordered string array. A missing key yields an empty list, not an error.
pub fn string_array(json: &Value, key: &str) -> Result<Vec<String>, Error> {
    match field(json, key) {
        None => Ok(Vec::new()),
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| match item {
                Value::String(s) => Ok(s.clone()),
                _ => Err(Error::field_type(key, "an array of strings")),
            })
            .collect(),
        Some(_) => Err(Error::field_type(key, "an array of strings")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn missing_optional_field_is_none() {
        let doc = json!({ "id": "usr_1" });
        assert_eq!(optional_str(&doc, "bio").unwrap(), None);
        assert_eq!(optional_bool(&doc, "featured").unwrap(), None);
        assert_eq!(optional_u32(&doc, "version").unwrap(), None);
        assert_eq!(optional_datetime(&doc, "last_login").unwrap(), None);
    }

    #[test]
    fn null_field_is_none() {
        let doc = json!({ "bio": null });
        assert_eq!(optional_str(&doc, "bio").unwrap(), None);
        assert!(field(&doc, "bio").is_none());
    }

    #[test]
    fn missing_required_field_errors() {
        let doc = json!({});
        let err = required_str(&doc, "id").unwrap_err();
        assert!(matches!(err, Error::MalformedResponse(_)));
    }

    #[test]
    fn type_mismatch_errors() {
        let doc = json!({ "isFriend": "yes" });
        assert!(matches!(
            required_bool(&doc, "isFriend"),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn date_sentinels_map_to_none() {
        let doc = json!({ "last_login": "none", "last_activity": "" });
        assert_eq!(optional_datetime(&doc, "last_login").unwrap(), None);
        assert_eq!(optional_datetime(&doc, "last_activity").unwrap(), None);
    }

    #[test]
    fn rfc3339_date_parses() {
        let doc = json!({ "last_login": "2023-01-01T00:00:00Z" });
        let dt = optional_datetime(&doc, "last_login").unwrap().unwrap();
        assert_eq!(dt.to_rfc3339(), "2023-01-01T00:00:00+00:00");
    }

    #[test]
    fn garbage_date_errors() {
        let doc = json!({ "last_login": "yesterday" });
        assert!(matches!(
            optional_datetime(&doc, "last_login"),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn negative_count_rejected() {
        let doc = json!({ "occupants": -3 });
        assert!(matches!(
            required_u32(&doc, "occupants"),
            Err(Error::MalformedResponse(_))
        ));
    }

    #[test]
    fn string_array_preserves_order_and_defaults_empty() {
        let doc = json!({ "tags": ["b", "a", "c"] });
        assert_eq!(string_array(&doc, "tags").unwrap(), vec!["b", "a", "c"]);
        assert!(string_array(&json!({}), "tags").unwrap().is_empty());
    }

    #[test]
    fn str_or_substitutes_default() {
        let doc = json!({ "name": "Alice" });
        assert_eq!(str_or(&doc, "name", "?").unwrap(), "Alice");
        assert_eq!(str_or(&doc, "nickname", "?").unwrap(), "?");
    }
}
