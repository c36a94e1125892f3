//! Field rules for JSON request bodies
//!
//! Bodies are deserialized loosely (every field as a raw JSON value, `null`
//! when absent) and checked with `#[derive(Validate)]`, so one request
//! reports every bad field at once instead of failing on the first type
//! mismatch. Each rule is paired with a conversion that yields the typed value
//! once validation has passed.

use std::borrow::Cow;

use chrono::{DateTime, NaiveDate, Utc};
use serde_json::Value;
use validator::{Validate, ValidationError};

/// A validated request body that converts into a typed value
pub trait ValidatedPayload: Validate {
    type Output;

    /// `None` only when `validate()` would have failed
    fn into_output(self) -> Option<Self::Output>;
}

fn rule_error(code: &'static str, message: &'static str) -> ValidationError {
    let mut error = ValidationError::new(code);
    error.message = Some(Cow::Borrowed(message));
    error
}

pub fn as_string(value: &Value) -> Option<String> {
    value.as_str().map(str::to_string)
}

/// A JSON integer (including integral floats such as `1.0`) or a string
/// holding a base-10 integer, within `i32` range
pub fn as_int(value: &Value) -> Option<i32> {
    match value {
        Value::Number(n) => match n.as_i64() {
            Some(i) => i32::try_from(i).ok(),
            None => n
                .as_f64()
                .filter(|f| f.fract() == 0.0 && *f >= i32::MIN as f64 && *f <= i32::MAX as f64)
                .map(|f| f as i32),
        },
        Value::String(s) => s.parse::<i32>().ok(),
        _ => None,
    }
}

/// A JSON boolean or one of "true", "false", "1", "0"
pub fn as_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.as_str() {
            "true" | "1" => Some(true),
            "false" | "0" => Some(false),
            _ => None,
        },
        _ => None,
    }
}

pub fn as_date(value: &Value) -> Option<DateTime<Utc>> {
    value.as_str().and_then(normalize_date)
}

pub fn is_string(value: &Value) -> Result<(), ValidationError> {
    as_string(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isString", "must be a string"))
}

pub fn is_int(value: &Value) -> Result<(), ValidationError> {
    as_int(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isInt", "must be an integer"))
}

pub fn is_boolean(value: &Value) -> Result<(), ValidationError> {
    as_bool(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isBoolean", "must be a boolean"))
}

pub fn is_date(value: &Value) -> Result<(), ValidationError> {
    as_date(value)
        .map(|_| ())
        .ok_or_else(|| rule_error("isDate", "must be a valid date"))
}

/// `YYYY-MM-DD` or `YYYY/MM/DD` with two-digit month and day
fn is_date_only_shape(input: &str) -> bool {
    let bytes = input.as_bytes();
    bytes.len() == 10
        && matches!(bytes[4], b'-' | b'/')
        && bytes[7] == bytes[4]
        && bytes
            .iter()
            .enumerate()
            .all(|(i, b)| i == 4 || i == 7 || b.is_ascii_digit())
}

/// Normalize a date input to a UTC timestamp.
///
/// Accepts `YYYY-MM-DD`, `YYYY/MM/DD` (both taken as midnight UTC) and
/// RFC 3339 date-times. Create and update share this step.
pub fn normalize_date(input: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    if !is_date_only_shape(input) {
        return None;
    }

    ["%Y-%m-%d", "%Y/%m/%d"]
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(input, fmt).ok())
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
