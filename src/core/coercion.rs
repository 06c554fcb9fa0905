//! Conversion between stored option text and typed values
//!
//! Booleans are written as `True`/`False` and read case-insensitively from
//! `1/yes/true/on` and `0/no/false/off`. Floats are written so that they always
//! read back as floats (`1.0`, never `1`). Lists are joined with `,` and split
//! on `,` with each item trimmed; commas inside items are not escaped, so an
//! item containing a comma comes back as two items.

use crate::domain::{CoercionError, Value, VarKind};

/// Delimiter between list items
pub const LIST_DELIMITER: char = ',';

/// Encodes a value as option text
///
/// Strings pass through unchanged, but option text is trimmed when a file is
/// read, so a string's leading and trailing whitespace does not survive a
/// write and reload.
///
/// # Examples
///
/// ```
/// use app_config::core::coercion::encode;
/// use app_config::domain::Value;
///
/// assert_eq!(encode(&Value::Bool(true)), "True");
/// assert_eq!(encode(&Value::from(vec!["a", "b", "c"])), "a,b,c");
/// ```
pub fn encode(value: &Value) -> String {
    match value {
        Value::Bool(true) => "True".to_string(),
        Value::Bool(false) => "False".to_string(),
        Value::Int(i) => i.to_string(),
        Value::Float(x) => format!("{x:?}"),
        Value::Str(s) => s.clone(),
        Value::List(items) => items.join(&LIST_DELIMITER.to_string()),
    }
}

/// Decodes option text as `kind`
///
/// `raw` is `None` when the option is absent, in which case `fallback` is
/// returned unchanged whatever its kind.
///
/// # Errors
///
/// Returns a [`CoercionError`] when the text is not a valid bool, int or float.
///
/// # Examples
///
/// ```
/// use app_config::core::coercion::decode;
/// use app_config::domain::{Value, VarKind};
///
/// let fallback = Value::Int(7);
/// assert_eq!(decode(Some("42"), VarKind::Int, &fallback).unwrap(), Value::Int(42));
/// assert_eq!(decode(None, VarKind::Int, &fallback).unwrap(), Value::Int(7));
/// assert!(decode(Some("forty"), VarKind::Int, &fallback).is_err());
/// ```
pub fn decode(raw: Option<&str>, kind: VarKind, fallback: &Value) -> Result<Value, CoercionError> {
    let Some(raw) = raw else {
        return Ok(fallback.clone());
    };

    match kind {
        VarKind::Bool => parse_bool(raw)
            .map(Value::Bool)
            .ok_or_else(|| CoercionError::new(kind, raw)),
        VarKind::Int => raw
            .trim()
            .parse::<i64>()
            .map(Value::Int)
            .map_err(|_| CoercionError::new(kind, raw)),
        VarKind::Float => raw
            .trim()
            .parse::<f64>()
            .map(Value::Float)
            .map_err(|_| CoercionError::new(kind, raw)),
        VarKind::Str => Ok(Value::Str(raw.to_string())),
        VarKind::List => Ok(Value::List(split_list(raw))),
    }
}

/// Splits list text into trimmed items. Blank text is the empty list.
pub fn split_list(raw: &str) -> Vec<String> {
    if raw.trim().is_empty() {
        return Vec::new();
    }
    raw.split(LIST_DELIMITER)
        .map(|item| item.trim().to_string())
        .collect()
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "yes" | "true" | "on" => Some(true),
        "0" | "no" | "false" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use test_case::test_case;

    #[test_case("True", true ; "python style")]
    #[test_case("true", true ; "lowercase")]
    #[test_case("YES", true ; "yes")]
    #[test_case("on", true ; "on")]
    #[test_case("1", true ; "one")]
    #[test_case("False", false ; "python style false")]
    #[test_case("no", false ; "no")]
    #[test_case("off", false ; "off")]
    #[test_case("0", false ; "zero")]
    fn test_decode_bool(raw: &str, expected: bool) {
        let value = decode(Some(raw), VarKind::Bool, &Value::Bool(!expected)).unwrap();
        assert_eq!(value, Value::Bool(expected));
    }

    #[test_case(VarKind::Bool, "maybe" ; "bool")]
    #[test_case(VarKind::Int, "3.5" ; "int from float text")]
    #[test_case(VarKind::Int, "" ; "empty int")]
    #[test_case(VarKind::Float, "three" ; "float")]
    fn test_decode_malformed(kind: VarKind, raw: &str) {
        let err = decode(Some(raw), kind, &Value::Int(0)).unwrap_err();
        assert_eq!(err.kind, kind);
        assert_eq!(err.value, raw);
    }

    #[test]
    fn test_decode_missing_returns_fallback_unchanged() {
        let fallback = Value::from(vec!["m2-1", "m2-2"]);
        assert_eq!(decode(None, VarKind::List, &fallback).unwrap(), fallback);
        // the fallback is not re-checked against the kind
        assert_eq!(
            decode(None, VarKind::Float, &Value::Str("x".into())).unwrap(),
            Value::Str("x".into())
        );
    }

    #[test]
    fn test_list_roundtrip() {
        let items = Value::from(vec!["a", "b", "c"]);
        let text = encode(&items);
        assert_eq!(text, "a,b,c");
        assert_eq!(decode(Some(&text), VarKind::List, &Value::List(vec![])).unwrap(), items);
    }

    #[test]
    fn test_list_items_are_trimmed() {
        let value = decode(Some(" a , b,c "), VarKind::List, &Value::List(vec![])).unwrap();
        assert_eq!(value, Value::from(vec!["a", "b", "c"]));
    }

    #[test]
    fn test_blank_list_is_empty() {
        assert_eq!(encode(&Value::List(vec![])), "");
        assert_eq!(split_list("  "), Vec::<String>::new());
    }

    #[test]
    fn test_float_always_reads_back_as_float() {
        assert_eq!(encode(&Value::Float(1.0)), "1.0");
        assert_eq!(encode(&Value::Float(3.4)), "3.4");
        let value = decode(Some("1.0"), VarKind::Float, &Value::Float(0.0)).unwrap();
        assert_eq!(value, Value::Float(1.0));
    }

    #[test]
    fn test_scalar_roundtrips() {
        for value in [
            Value::Bool(false),
            Value::Int(-12),
            Value::Float(0.023),
            Value::Str("textm1".into()),
        ] {
            let decoded = decode(Some(&encode(&value)), value.kind(), &Value::Int(0)).unwrap();
            assert_eq!(decoded, value);
        }
    }

    #[test]
    fn test_string_is_passthrough() {
        let value = decode(Some(" spaced "), VarKind::Str, &Value::Str(String::new())).unwrap();
        assert_eq!(value, Value::Str(" spaced ".into()));
    }
}
