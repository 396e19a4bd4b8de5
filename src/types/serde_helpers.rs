//! Serde helpers for Coincheck's mixed numeric encodings.
//!
//! Coincheck sends amounts sometimes as JSON strings (`"0.1"`) and sometimes
//! as bare numbers (`131767.22675655`). These helpers read both into
//! [`Decimal`] without passing through `f64`, relying on serde_json's
//! `arbitrary_precision` to hand over the number's original text.

use std::str::FromStr;

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serializer, de};
use serde_json::Value;

fn parse_decimal(text: &str) -> Result<Decimal, String> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|e| format!("invalid decimal {text:?}: {e}"))
}

fn decimal_from_value(value: &Value) -> Result<Option<Decimal>, String> {
    match value {
        Value::Null => Ok(None),
        Value::String(s) if s.trim().is_empty() => Ok(None),
        Value::String(s) => parse_decimal(s).map(Some),
        Value::Number(n) => parse_decimal(&n.to_string()).map(Some),
        other => Err(format!("expected a decimal string or number, got {other}")),
    }
}

/// Serialize a `Decimal` as a string, deserialize from a string or number.
///
/// # Example
///
/// ```rust
/// use rust_decimal::Decimal;
/// use serde::{Deserialize, Serialize};
/// use coincheck_api_client::types::serde_helpers::decimal;
///
/// #[derive(Serialize, Deserialize)]
/// struct Amount {
///     #[serde(with = "decimal")]
///     jpy: Decimal,
/// }
///
/// let from_number: Amount = serde_json::from_str(r#"{"jpy":131767.22675655}"#).unwrap();
/// let from_string: Amount = serde_json::from_str(r#"{"jpy":"131767.22675655"}"#).unwrap();
/// assert_eq!(from_number.jpy, from_string.jpy);
/// assert_eq!(serde_json::to_string(&from_number).unwrap(), r#"{"jpy":"131767.22675655"}"#);
/// ```
pub mod decimal {
    use super::*;

    /// Serialize as a string, keeping the value's scale.
    pub fn serialize<S>(value: &Decimal, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&value.to_string())
    }

    /// Deserialize from a JSON string or number.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Decimal, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value)
            .map_err(de::Error::custom)?
            .ok_or_else(|| de::Error::custom("expected a decimal, got null"))
    }
}

/// Like [`decimal`], but `null`, an empty string or a missing field map to `None`.
///
/// Use together with `#[serde(default)]` so absent fields are accepted.
pub mod option_decimal {
    use super::*;

    /// Serialize `Some` as a string and `None` as `null`.
    pub fn serialize<S>(value: &Option<Decimal>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.to_string()),
            None => serializer.serialize_none(),
        }
    }

    /// Deserialize from a JSON string, number or `null`.
    pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        decimal_from_value(&value).map_err(de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Debug, Serialize, Deserialize)]
    struct Wrapper {
        #[serde(with = "decimal")]
        value: Decimal,
        #[serde(default, with = "option_decimal")]
        maybe: Option<Decimal>,
    }

    #[test]
    fn test_decimal_from_string_keeps_scale() {
        let w: Wrapper = serde_json::from_str(r#"{"value":"30010.0"}"#).unwrap();
        assert_eq!(w.value.to_string(), "30010.0");
        assert!(w.maybe.is_none());
    }

    #[test]
    fn test_decimal_from_number_is_exact() {
        let w: Wrapper = serde_json::from_str(r#"{"value":0.1,"maybe":131767.22675655}"#).unwrap();
        assert_eq!(w.value, Decimal::new(1, 1));
        assert_eq!(w.maybe.unwrap().to_string(), "131767.22675655");
    }

    #[test]
    fn test_decimal_scientific_notation() {
        let w: Wrapper = serde_json::from_str(r#"{"value":"1e-8"}"#).unwrap();
        assert_eq!(w.value, Decimal::new(1, 8));
    }

    #[test]
    fn test_option_decimal_null_and_empty() {
        let w: Wrapper = serde_json::from_str(r#"{"value":"1","maybe":null}"#).unwrap();
        assert!(w.maybe.is_none());
        let w: Wrapper = serde_json::from_str(r#"{"value":"1","maybe":""}"#).unwrap();
        assert!(w.maybe.is_none());
    }

    #[test]
    fn test_decimal_rejects_garbage() {
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":"abc"}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":null}"#).is_err());
        assert!(serde_json::from_str::<Wrapper>(r#"{"value":[1]}"#).is_err());
    }

    #[test]
    fn test_decimal_serializes_as_string() {
        let w = Wrapper {
            value: Decimal::new(13, 1),
            maybe: None,
        };
        assert_eq!(
            serde_json::to_string(&w).unwrap(),
            r#"{"value":"1.3","maybe":null}"#
        );
    }
}
