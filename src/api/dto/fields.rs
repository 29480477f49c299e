//! Field-level parsing shared by the request DTOs.
//!
//! Every helper records problems into a [`FieldErrors`] instead of failing
//! fast, so one response reports all invalid fields at once.

use bigdecimal::BigDecimal;
use serde_json::Value;
use std::str::FromStr;

use crate::error::FieldErrors;

pub const REQUIRED: &str = "This field is required.";
pub const BLANK: &str = "This field may not be blank.";
pub const INVALID_NUMBER: &str = "A valid number is required.";
pub const INVALID_INTEGER: &str = "A valid integer is required.";
pub const INVALID_URL: &str = "Enter a valid URL.";

pub fn max_length_message(max: usize) -> String {
    format!("Ensure this field has no more than {max} characters.")
}

/// Checks a text field.
///
/// `None` is reported as missing when `required`. A blank value is rejected
/// only when `required`; otherwise it is kept as an empty string.
pub fn text(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<String>,
    required: bool,
    max_len: Option<usize>,
) -> Option<String> {
    let Some(value) = value else {
        if required {
            errors.add(field, REQUIRED);
        }
        return None;
    };

    let value = value.trim().to_string();

    if required && value.is_empty() {
        errors.add(field, BLANK);
        return None;
    }

    if let Some(max) = max_len.filter(|max| value.chars().count() > *max) {
        errors.add(field, max_length_message(max));
        return None;
    }

    Some(value)
}

/// Reads a decimal from a JSON number or a numeric string.
///
/// Numbers go through their shortest decimal representation, so `0.1`
/// becomes exactly `0.1`.
pub fn parse_decimal(value: &Value) -> Option<BigDecimal> {
    match value {
        Value::Number(n) => BigDecimal::from_str(&n.to_string()).ok(),
        Value::String(s) => BigDecimal::from_str(s.trim()).ok(),
        _ => None,
    }
}

/// Parses and range-checks a decimal for a `NUMERIC(max_digits, decimal_places)` column.
pub fn decimal(
    errors: &mut FieldErrors,
    field: &str,
    value: &Value,
    max_digits: u32,
    decimal_places: u32,
) -> Option<BigDecimal> {
    let Some(parsed) = parse_decimal(value) else {
        errors.add(field, INVALID_NUMBER);
        return None;
    };

    let total_message =
        || format!("Ensure that there are no more than {max_digits} digits in total.");

    let Some((digits, decimals)) = precision(&parsed, max_digits) else {
        errors.add(field, total_message());
        return None;
    };
    let whole = digits.saturating_sub(decimals);

    if digits > max_digits {
        errors.add(field, total_message());
        return None;
    }
    if decimals > decimal_places {
        errors.add(
            field,
            format!("Ensure that there are no more than {decimal_places} decimal places."),
        );
        return None;
    }
    if whole > max_digits - decimal_places {
        errors.add(
            field,
            format!(
                "Ensure that there are no more than {} digits before the decimal point.",
                max_digits - decimal_places
            ),
        );
        return None;
    }

    Some(parsed)
}

/// Total significant digits and digits after the point, ignoring trailing zeros.
///
/// Returns `None` when the value has more than `max_digits` digits, before any
/// count can overflow.
fn precision(value: &BigDecimal, max_digits: u32) -> Option<(u32, u32)> {
    let (mantissa, exponent) = value.normalized().as_bigint_and_exponent();
    let limit = i64::from(max_digits);

    // Any exponent beyond the limit already implies too many digits.
    if exponent.unsigned_abs() > u64::from(max_digits) {
        return None;
    }

    let len = i64::try_from(mantissa.magnitude().to_string().len()).ok()?;
    if len > limit {
        return None;
    }

    let (digits, decimals) = if exponent <= 0 {
        (len.checked_sub(exponent)?, 0)
    } else if exponent > len {
        (exponent, exponent)
    } else {
        (len, exponent)
    };

    Some((u32::try_from(digits).ok()?, u32::try_from(decimals).ok()?))
}

/// Optional decimal where `null` and `""` both mean "no value".
pub fn nullable_decimal(
    errors: &mut FieldErrors,
    field: &str,
    value: Option<Value>,
    max_digits: u32,
    decimal_places: u32,
) -> Option<BigDecimal> {
    match value {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) if s.trim().is_empty() => None,
        Some(v) => decimal(errors, field, &v, max_digits, decimal_places),
    }
}

/// Reads an integer id from a JSON number or a numeric string.
pub fn parse_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// True for absolute `http`/`https` URLs with a host.
pub fn is_http_url(value: &str) -> bool {
    url::Url::parse(value)
        .map(|u| matches!(u.scheme(), "http" | "https") && u.has_host())
        .unwrap_or(false)
}
