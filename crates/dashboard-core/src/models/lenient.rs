//! Tolerant field readers for externally supplied records
//!
//! A field with the wrong JSON type is read as absent instead of failing the
//! whole record.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

pub fn float<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(as_f64))
}

pub fn integer<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(|v| match v {
        Value::Number(n) => n.as_i64().or_else(|| as_f64(v).map(|f| f.round() as i64)),
        _ => as_f64(v).map(|f| f.round() as i64),
    }))
}

pub fn unsigned<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(integer(deserializer)?.and_then(|n| u64::try_from(n).ok()))
}

pub fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) if !s.trim().is_empty() => Some(s),
        _ => None,
    })
}

/// Like [`text`], but absent or malformed values read as an empty string
pub fn string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(text(deserializer)?.unwrap_or_default())
}

fn as_f64(value: &Value) -> Option<f64> {
    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    number.filter(|n| n.is_finite())
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;
    use serde_json::json;

    #[derive(Debug, Deserialize)]
    struct Fields {
        #[serde(default, deserialize_with = "super::float")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "super::integer")]
        score: Option<i64>,
        #[serde(default, deserialize_with = "super::unsigned")]
        volume: Option<u64>,
        #[serde(default, deserialize_with = "super::text")]
        note: Option<String>,
        #[serde(default, deserialize_with = "super::string")]
        tag: String,
    }

    fn fields(value: serde_json::Value) -> Fields {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_well_formed_values() {
        let p = fields(json!({"price": 150.25, "score": 82, "volume": 1200, "note": "ok"}));
        assert_eq!(p.price, Some(150.25));
        assert_eq!(p.score, Some(82));
        assert_eq!(p.volume, Some(1200));
        assert_eq!(p.note.as_deref(), Some("ok"));
        assert_eq!(p.tag, "");
    }

    #[test]
    fn test_missing_and_null_are_absent() {
        let p = fields(json!({"price": null}));
        assert_eq!(p.price, None);
        assert_eq!(p.score, None);
        assert_eq!(p.volume, None);
        assert_eq!(p.note, None);
    }

    #[test]
    fn test_numeric_strings_and_floats() {
        let p = fields(json!({"price": " 12.5 ", "score": 71.6, "volume": "300"}));
        assert_eq!(p.price, Some(12.5));
        assert_eq!(p.score, Some(72));
        assert_eq!(p.volume, Some(300));
    }

    #[test]
    fn test_malformed_values_are_absent() {
        let p = fields(json!({"price": "n/a", "score": [1], "volume": -5, "note": 42}));
        assert_eq!(p.price, None);
        assert_eq!(p.score, None);
        assert_eq!(p.volume, None);
        assert_eq!(p.note, None);
    }

    #[test]
    fn test_string_reads_null_and_wrong_types_as_empty() {
        assert_eq!(fields(json!({"tag": "US"})).tag, "US");
        assert_eq!(fields(json!({"tag": null})).tag, "");
        assert_eq!(fields(json!({"tag": 7})).tag, "");
        assert_eq!(fields(json!({"tag": {"code": "US"}})).tag, "");
    }
}
