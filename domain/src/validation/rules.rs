//! Validation functions and their error type.

use super::argument::{Coordinate, DeviceUdid, Duration, FreeText, Identifier, Label};
use regex::Regex;
use std::sync::LazyLock;
use thiserror::Error;

pub const IDENTIFIER_MAX_CHARS: usize = 256;
pub const LABEL_MAX_CHARS: usize = 512;
pub const FREE_TEXT_MAX_CHARS: usize = 10_000;
pub const DURATION_MAX_SECONDS: f64 = 60.0;

/// Lower bound for screen-space coordinates, in points.
pub const SCREEN_COORDINATE_MIN: f64 = 0.0;
/// Upper bound for screen-space coordinates, in points.
///
/// Larger than any simulated display (the biggest iPad is 1366pt tall)
/// while still rejecting wild values.
pub const SCREEN_COORDINATE_MAX: f64 = 5000.0;

/// Characters that must never appear in labels or free text.
pub const SHELL_METACHARACTERS: &[char] = &[
    ';', '&', '|', '`', '$', '\\', '<', '>', '{', '}', '[', ']', '(', ')', '#', '*', '?', '~',
    '!',
];

pub(crate) const IDENTIFIER_PATTERN: &str = r"^[A-Za-z0-9_.:-]+$";
pub(crate) const DEVICE_ID_PATTERN: &str =
    r"^(?i)[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}$";

static IDENTIFIER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(IDENTIFIER_PATTERN).expect("identifier pattern is valid"));
static DEVICE_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(DEVICE_ID_PATTERN).expect("device id pattern is valid"));

/// A rejected input value.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("{kind} must not be empty")]
    Empty { kind: &'static str },

    #[error("{kind} exceeds {max} characters")]
    TooLong { kind: &'static str, max: usize },

    #[error("{kind} may only contain letters, digits, '_', '.', ':' and '-'")]
    PatternMismatch { kind: &'static str },

    #[error("{kind} contains forbidden character '{found}'")]
    ForbiddenCharacter { kind: &'static str, found: char },

    #[error("{field} must be a finite number")]
    NotANumber { field: String },

    #[error("{field} = {value} is outside [{min}, {max}]")]
    OutOfRange {
        field: String,
        value: f64,
        min: f64,
        max: f64,
    },

    /// The value would be read as a flag where an option value is expected.
    #[error("{kind} must not start with '-'")]
    OptionLike { kind: &'static str },

    #[error("'{0}' is not a valid device UDID")]
    InvalidDeviceId(String),

    #[error("unknown gesture '{0}'")]
    UnknownGesture(String),

    /// The caller supplied an argument combination the operation does not accept.
    #[error("{0}")]
    Contract(String),
}

fn check_length(raw: &str, kind: &'static str, max: usize) -> Result<(), ValidationError> {
    if raw.is_empty() {
        return Err(ValidationError::Empty { kind });
    }
    if raw.chars().count() > max {
        return Err(ValidationError::TooLong { kind, max });
    }
    Ok(())
}

fn check_denylist(raw: &str, kind: &'static str) -> Result<(), ValidationError> {
    match raw.chars().find(|c| SHELL_METACHARACTERS.contains(c)) {
        Some(found) => Err(ValidationError::ForbiddenCharacter { kind, found }),
        None => Ok(()),
    }
}

/// Accept JSON numbers and numeric strings; anything else is not a number.
fn coerce_number(raw: &serde_json::Value) -> Option<f64> {
    match raw {
        serde_json::Value::Number(n) => n.as_f64(),
        serde_json::Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

fn check_range(
    raw: &serde_json::Value,
    field: &str,
    min: f64,
    max: f64,
) -> Result<f64, ValidationError> {
    let value = coerce_number(raw)
        .filter(|v| v.is_finite())
        .ok_or_else(|| ValidationError::NotANumber {
            field: field.to_string(),
        })?;

    if value < min || value > max {
        return Err(ValidationError::OutOfRange {
            field: field.to_string(),
            value,
            min,
            max,
        });
    }
    Ok(value)
}

pub fn validate_identifier(raw: &str) -> Result<Identifier, ValidationError> {
    check_length(raw, "identifier", IDENTIFIER_MAX_CHARS)?;
    if !IDENTIFIER_RE.is_match(raw) {
        return Err(ValidationError::PatternMismatch { kind: "identifier" });
    }
    Ok(Identifier(raw.to_string()))
}

pub fn validate_label(raw: &str) -> Result<Label, ValidationError> {
    check_length(raw, "label", LABEL_MAX_CHARS)?;
    check_denylist(raw, "label")?;
    Ok(Label(raw.to_string()))
}

pub fn validate_free_text(raw: &str) -> Result<FreeText, ValidationError> {
    check_length(raw, "text", FREE_TEXT_MAX_CHARS)?;
    check_denylist(raw, "text")?;
    Ok(FreeText(raw.to_string()))
}

/// Validate a coordinate against caller-supplied bounds.
///
/// Callers targeting the device screen should use
/// [`validate_screen_coordinate`] instead of picking their own bounds.
pub fn validate_coordinate(
    raw: &serde_json::Value,
    axis: &str,
    min: f64,
    max: f64,
) -> Result<Coordinate, ValidationError> {
    let value = check_range(raw, axis, min, max)?;
    Ok(Coordinate { value, min, max })
}

pub fn validate_screen_coordinate(
    raw: &serde_json::Value,
    axis: &str,
) -> Result<Coordinate, ValidationError> {
    validate_coordinate(raw, axis, SCREEN_COORDINATE_MIN, SCREEN_COORDINATE_MAX)
}

pub fn validate_duration(raw: &serde_json::Value) -> Result<Duration, ValidationError> {
    check_range(raw, "duration", 0.0, DURATION_MAX_SECONDS).map(Duration)
}

pub fn validate_device_id(raw: &str) -> Result<DeviceUdid, ValidationError> {
    if !DEVICE_ID_RE.is_match(raw) {
        return Err(ValidationError::InvalidDeviceId(raw.to_string()));
    }
    Ok(DeviceUdid(raw.to_ascii_uppercase()))
}
