//! Helpers for inspecting runtime values
//!
//! Values are `serde_json::Value`s. Numbers keep their textual form
//! (`arbitrary_precision`), which lets integers of any magnitude be told
//! apart from numbers written with a fraction or an exponent.
//!
//! Copyright (c) 2025 Duckhunt Team
//! Licensed under the Apache-2.0 license

use serde_json::{Number, Value};
use std::cmp::Ordering;

/// Human-readable name of a value's shape, used in error messages
pub fn kind_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(n) if is_integral(n) => "an integer",
        Value::Number(_) => "a float",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// True when the number was written without a fraction or exponent
pub fn is_integral(number: &Number) -> bool {
    if number.is_i64() || number.is_u64() {
        return true;
    }
    !number.to_string().contains(['.', 'e', 'E'])
}

/// True when the value is an integer of any magnitude
pub fn is_integer(value: &Value) -> bool {
    matches!(value, Value::Number(n) if is_integral(n))
}

/// True when the value is a floating-point or decimal number
pub fn is_float(value: &Value) -> bool {
    matches!(value, Value::Number(n) if !is_integral(n))
}

/// Length of a length-bearing value (chars of a string, entries of an array
/// or object)
pub fn length(value: &Value) -> Option<usize> {
    match value {
        Value::String(s) => Some(s.chars().count()),
        Value::Array(items) => Some(items.len()),
        Value::Object(map) => Some(map.len()),
        _ => None,
    }
}

/// Numeric view of a number, exact for integers that fit in `i128`
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Numeric {
    Int(i128),
    Float(f64),
}

impl Numeric {
    /// Convert a JSON number, falling back to `f64` for huge magnitudes
    pub fn from_number(number: &Number) -> Option<Self> {
        if let Some(i) = number.as_i64() {
            return Some(Self::Int(i as i128));
        }
        if let Some(u) = number.as_u64() {
            return Some(Self::Int(u as i128));
        }
        let text = number.to_string();
        if is_integral(number) {
            if let Ok(i) = text.parse::<i128>() {
                return Some(Self::Int(i));
            }
        }
        text.parse::<f64>().ok().map(Self::Float)
    }

    /// Numeric view of a value, if it is a number
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => Self::from_number(n),
            _ => None,
        }
    }

    pub fn as_f64(self) -> f64 {
        match self {
            Self::Int(i) => i as f64,
            Self::Float(f) => f,
        }
    }

    /// Total-enough ordering; `None` only when a NaN is involved
    pub fn compare(self, other: Self) -> Option<Ordering> {
        match (self, other) {
            (Self::Int(a), Self::Int(b)) => Some(a.cmp(&b)),
            (a, b) => a.as_f64().partial_cmp(&b.as_f64()),
        }
    }

    /// Remainder of `self / divisor` is zero. The divisor must be non-zero.
    pub fn is_multiple_of(self, divisor: Self) -> bool {
        match (self, divisor) {
            (Self::Int(a), Self::Int(b)) => a % b == 0,
            (a, b) => (a.as_f64() % b.as_f64()) == 0.0,
        }
    }

    pub fn is_zero(self) -> bool {
        match self {
            Self::Int(i) => i == 0,
            Self::Float(f) => f == 0.0,
        }
    }
}

/// Equality where numbers compare by magnitude (`3 == 3.0`) and everything
/// else by structure
pub fn loose_eq(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Number(x), Value::Number(y)) => {
            match (Numeric::from_number(x), Numeric::from_number(y)) {
                (Some(x), Some(y)) => x.compare(y) == Some(Ordering::Equal),
                _ => x == y,
            }
        }
        _ => a == b,
    }
}

/// Render a configuration value the way it appears in messages: strings
/// without quotes, everything else as JSON
pub fn display(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_integer_and_float_are_disjoint() {
        assert!(is_integer(&json!(3)));
        assert!(!is_float(&json!(3)));
        assert!(is_float(&json!(3.0)));
        assert!(!is_integer(&json!(3.5)));
        assert!(!is_integer(&json!("3")));
    }

    #[test]
    fn test_big_integers_stay_integral() {
        let big: Value = serde_json::from_str("123456789012345678901234567890").unwrap();
        assert!(is_integer(&big));
        let decimal: Value = serde_json::from_str("1.00000000000000000000000001").unwrap();
        assert!(is_float(&decimal));
    }

    #[test]
    fn test_length() {
        assert_eq!(length(&json!("héllo")), Some(5));
        assert_eq!(length(&json!([1, 2])), Some(2));
        assert_eq!(length(&json!({"a": 1})), Some(1));
        assert_eq!(length(&json!(12)), None);
    }

    #[test]
    fn test_numeric_compare() {
        let three = Numeric::from_value(&json!(3)).unwrap();
        let pi = Numeric::from_value(&json!(3.14)).unwrap();
        assert_eq!(three.compare(pi), Some(Ordering::Less));
        assert!(Numeric::Int(9).is_multiple_of(Numeric::Int(3)));
        assert!(Numeric::Float(4.5).is_multiple_of(Numeric::Float(1.5)));
    }

    #[test]
    fn test_loose_eq() {
        assert!(loose_eq(&json!(3), &json!(3.0)));
        assert!(!loose_eq(&json!(3), &json!("3")));
        assert!(loose_eq(&json!(["a"]), &json!(["a"])));
    }
}
