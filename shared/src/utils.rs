// Value coercion helpers shared by the engine and the client.
// Upstream records are loosely typed, so everything here is total: bad input
// degrades to a safe default instead of an error.

use crate::models::RawAmount;
use serde_json::Value;

/// Anything that can be read as a monetary amount.
///
/// Strings may carry currency symbols, grouping commas or other noise;
/// numbers are taken as-is. Absent values (`None`) read as `0`.
pub trait MonetaryInput {
    fn to_monetary(&self) -> f64;
}

/// Coerces `value` into a finite number, never failing.
///
/// ```
/// use shared::utils::parse_monetary_value;
/// assert_eq!(parse_monetary_value("₦12,345.67"), 12345.67);
/// assert_eq!(parse_monetary_value(&None::<&str>), 0.0);
/// ```
pub fn parse_monetary_value<V: MonetaryInput + ?Sized>(value: &V) -> f64 {
    value.to_monetary()
}

fn finite_or_zero(n: f64) -> f64 {
    if n.is_finite() {
        n
    } else {
        0.0
    }
}

// Keeps digits, dots and a leading minus, then takes the longest decimal
// prefix of what is left ("1.2.3" reads as 1.2, "12-3" as 12). The prefix
// comes back as `(negative, integer digits, fraction digits)`.
fn decimal_prefix(s: &str) -> Option<(bool, String, String)> {
    let cleaned: String = s
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == '.' || *c == '-')
        .collect();

    let mut chars = cleaned.chars().peekable();
    let negative = chars.peek() == Some(&'-');
    if negative {
        chars.next();
    }

    let mut integer = String::new();
    let mut fraction = String::new();
    let mut seen_dot = false;
    for c in chars {
        match c {
            '0'..='9' if seen_dot => fraction.push(c),
            '0'..='9' => integer.push(c),
            '.' if !seen_dot => seen_dot = true,
            _ => break,
        }
    }

    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    Some((negative, integer, fraction))
}

fn parse_monetary_str(s: &str) -> f64 {
    let Some((negative, integer, fraction)) = decimal_prefix(s) else {
        return 0.0;
    };
    let sign = if negative { "-" } else { "" };
    let integer = if integer.is_empty() { "0" } else { integer.as_str() };
    let text = if fraction.is_empty() {
        format!("{}{}", sign, integer)
    } else {
        format!("{}{}.{}", sign, integer, fraction)
    };
    text.parse::<f64>().map(finite_or_zero).unwrap_or(0.0)
}

/// Plain decimal text of a string amount, read with the same cleaning as
/// [`parse_monetary_value`] but without a round trip through `f64`, so long
/// amounts keep every digit. Leading zeros and trailing fraction zeros are
/// dropped. `None` when the text holds no digits.
///
/// ```
/// use shared::utils::monetary_decimal_text;
/// assert_eq!(monetary_decimal_text("₦12,345,678,901,234,567.89").as_deref(), Some("12345678901234567.89"));
/// assert_eq!(monetary_decimal_text("007.50").as_deref(), Some("7.5"));
/// ```
pub fn monetary_decimal_text(s: &str) -> Option<String> {
    let (negative, integer, fraction) = decimal_prefix(s)?;
    let integer = integer.trim_start_matches('0');
    let integer = if integer.is_empty() { "0" } else { integer };
    let fraction = fraction.trim_end_matches('0');

    let magnitude = if fraction.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction)
    };
    if negative && magnitude != "0" {
        Some(format!("-{}", magnitude))
    } else {
        Some(magnitude)
    }
}

impl MonetaryInput for str {
    fn to_monetary(&self) -> f64 {
        parse_monetary_str(self)
    }
}

impl MonetaryInput for String {
    fn to_monetary(&self) -> f64 {
        parse_monetary_str(self)
    }
}

impl MonetaryInput for f64 {
    fn to_monetary(&self) -> f64 {
        finite_or_zero(*self)
    }
}

impl MonetaryInput for f32 {
    fn to_monetary(&self) -> f64 {
        finite_or_zero(f64::from(*self))
    }
}

macro_rules! impl_monetary_for_int {
    ($($t:ty),*) => {
        $(impl MonetaryInput for $t {
            fn to_monetary(&self) -> f64 {
                *self as f64
            }
        })*
    };
}

impl_monetary_for_int!(i32, i64, u32, u64);

impl MonetaryInput for RawAmount {
    fn to_monetary(&self) -> f64 {
        match self {
            RawAmount::Number(n) => finite_or_zero(*n),
            RawAmount::Text(s) => parse_monetary_str(s),
        }
    }
}

impl<T: MonetaryInput> MonetaryInput for Option<T> {
    fn to_monetary(&self) -> f64 {
        self.as_ref().map_or(0.0, MonetaryInput::to_monetary)
    }
}

impl<T: MonetaryInput + ?Sized> MonetaryInput for &T {
    fn to_monetary(&self) -> f64 {
        (**self).to_monetary()
    }
}

/// Reads a loosely typed JSON field as text.
///
/// Strings pass through, numbers are stringified. Blank strings, `null`,
/// booleans, arrays and objects all count as absent.
pub fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Reads a loosely typed JSON field as a raw amount (number or text).
pub fn value_as_amount(value: &Value) -> Option<RawAmount> {
    match value {
        Value::Number(n) => n.as_f64().map(RawAmount::Number),
        Value::String(s) if !s.trim().is_empty() => Some(RawAmount::Text(s.clone())),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_currency_prefixed_string() {
        assert_eq!(parse_monetary_value("₦12,345.67"), 12345.67);
        assert_eq!(parse_monetary_value("$1,000"), 1000.0);
    }

    #[test]
    fn test_parse_absent_and_nan() {
        assert_eq!(parse_monetary_value(&None::<String>), 0.0);
        assert_eq!(parse_monetary_value(&f64::NAN), 0.0);
        assert_eq!(parse_monetary_value(&f64::INFINITY), 0.0);
    }

    #[test]
    fn test_parse_takes_longest_decimal_prefix() {
        assert_eq!(parse_monetary_value("1.2.3"), 1.2);
        assert_eq!(parse_monetary_value("12-3"), 12.0);
        assert_eq!(parse_monetary_value("5."), 5.0);
        assert_eq!(parse_monetary_value(".5"), 0.5);
    }

    #[test]
    fn test_parse_keeps_leading_minus() {
        assert_eq!(parse_monetary_value("-250.5"), -250.5);
        assert_eq!(parse_monetary_value("-.5"), -0.5);
    }

    #[test]
    fn test_parse_garbage_is_zero() {
        for input in ["", "abc", "-", ".", "N/A", "₦"] {
            assert_eq!(parse_monetary_value(input), 0.0, "input {:?}", input);
        }
    }

    #[test]
    fn test_parse_is_always_finite() {
        let huge = "9".repeat(400);
        assert!(parse_monetary_value(huge.as_str()).is_finite());
        for input in ["1e10", "∞", "--5", "0x1F", "12,34,56.7.8"] {
            assert!(parse_monetary_value(input).is_finite(), "input {:?}", input);
        }
    }

    #[test]
    fn test_monetary_decimal_text_keeps_long_amounts() {
        assert_eq!(
            monetary_decimal_text("12345678901234567.89").as_deref(),
            Some("12345678901234567.89")
        );
        assert_eq!(monetary_decimal_text("₦12,345.67").as_deref(), Some("12345.67"));
        assert_eq!(monetary_decimal_text("75000").as_deref(), Some("75000"));
        assert_eq!(monetary_decimal_text("5.").as_deref(), Some("5"));
        assert_eq!(monetary_decimal_text(".50").as_deref(), Some("0.5"));
        assert_eq!(monetary_decimal_text("-250.50").as_deref(), Some("-250.5"));
        assert_eq!(monetary_decimal_text("-0.00").as_deref(), Some("0"));
        assert_eq!(monetary_decimal_text("N/A"), None);
        assert_eq!(monetary_decimal_text("-"), None);
    }

    #[test]
    fn test_parse_raw_amounts() {
        assert_eq!(parse_monetary_value(&RawAmount::Number(42.5)), 42.5);
        assert_eq!(parse_monetary_value(&RawAmount::Text("₦7,500".into())), 7500.0);
        assert_eq!(parse_monetary_value(&Some(RawAmount::Number(f64::NAN))), 0.0);
        assert_eq!(parse_monetary_value(&150_i64), 150.0);
    }

    #[test]
    fn test_value_as_text() {
        assert_eq!(value_as_text(&json!("abc")), Some("abc".to_string()));
        assert_eq!(value_as_text(&json!(17)), Some("17".to_string()));
        assert_eq!(value_as_text(&json!("")), None);
        assert_eq!(value_as_text(&json!("   ")), None);
        assert_eq!(value_as_text(&json!(null)), None);
        assert_eq!(value_as_text(&json!({"a": 1})), None);
        assert_eq!(value_as_text(&json!(true)), None);
    }

    #[test]
    fn test_value_as_amount() {
        assert_eq!(value_as_amount(&json!(10)), Some(RawAmount::Number(10.0)));
        assert_eq!(value_as_amount(&json!("₦10")), Some(RawAmount::Text("₦10".into())));
        assert_eq!(value_as_amount(&json!("")), None);
        assert_eq!(value_as_amount(&json!([1, 2])), None);
    }
}
