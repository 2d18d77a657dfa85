//! Typed scalar values and token coercion.

use std::fmt;

use serde::Serialize;

/// A decoded value from one insertion statement.
///
/// The empty string is a [`ScalarValue::Text`] and stays distinct from
/// [`ScalarValue::Null`], although both render as an empty CSV field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ScalarValue {
    /// SQL `NULL`.
    Null,
    /// Quoted literal with its outer quotes removed, or any unparseable token.
    Text(String),
    /// Base-10 integer that fits in an `i64`.
    Integer(i64),
    /// Base-10 integer above `i64::MAX` that fits in a `u64` (`BIGINT UNSIGNED`).
    Unsigned(u64),
    /// Base-10 integer outside the `u64` range, kept as its normalized digits.
    /// Serializes to JSON as a string.
    BigInteger(String),
    /// Decimal or exponent-form number. Non-finite values serialize to JSON as `null`.
    Real(f64),
}

impl fmt::Display for ScalarValue {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ScalarValue::Null => Ok(()),
            ScalarValue::Text(s) => f.write_str(s),
            ScalarValue::Integer(n) => write!(f, "{}", n),
            ScalarValue::Unsigned(n) => write!(f, "{}", n),
            ScalarValue::BigInteger(digits) => f.write_str(digits),
            // Debug keeps a fractional digit or an exponent: 5.0, 9.99, 1e20
            ScalarValue::Real(r) => write!(f, "{:?}", r),
        }
    }
}

/// Coerce one raw token into a [`ScalarValue`].
///
/// Precedence, first match wins:
///
/// 1. `null` in any case -> [`ScalarValue::Null`]
/// 2. empty -> empty [`ScalarValue::Text`]
/// 3. starts and ends with `'` -> [`ScalarValue::Text`] with exactly one
///    quote stripped from each end and no unescaping
/// 4. base-10 integer -> [`ScalarValue::Integer`], [`ScalarValue::Unsigned`]
///    or [`ScalarValue::BigInteger`], narrowest first
/// 5. `f64` parse -> [`ScalarValue::Real`]
/// 6. otherwise the trimmed token as [`ScalarValue::Text`]
pub fn coerce(token: &str) -> ScalarValue {
    let token = token.trim();

    if token.eq_ignore_ascii_case("null") {
        return ScalarValue::Null;
    }
    if token.is_empty() {
        return ScalarValue::Text(String::new());
    }
    if token.starts_with('\'') && token.ends_with('\'') {
        // A lone quote both starts and ends the token.
        let inner = token.get(1..token.len() - 1).unwrap_or("");
        return ScalarValue::Text(inner.to_string());
    }
    if let Some(value) = coerce_integer(token) {
        return value;
    }
    if let Ok(r) = token.parse::<f64>() {
        return ScalarValue::Real(r);
    }
    ScalarValue::Text(token.to_string())
}

/// Parse an optionally signed run of ASCII digits without losing precision.
fn coerce_integer(token: &str) -> Option<ScalarValue> {
    if let Ok(n) = token.parse::<i64>() {
        return Some(ScalarValue::Integer(n));
    }
    if let Ok(n) = token.parse::<u64>() {
        return Some(ScalarValue::Unsigned(n));
    }

    let (negative, digits) = match token.as_bytes().first()? {
        b'-' => (true, &token[1..]),
        b'+' => (false, &token[1..]),
        _ => (false, token),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    // Zero always parses as i64, so trimming leading zeros leaves a digit.
    let digits = digits.trim_start_matches('0');
    let sign = if negative { "-" } else { "" };
    Some(ScalarValue::BigInteger(format!("{}{}", sign, digits)))
}
