//! Input validation: the gate every external value passes before it can
//! reach a spawned process.
//!
//! Each validator converts a raw caller value into one of the typed wrappers
//! in [`argument`] or fails closed with a [`ValidationError`]. Nothing is
//! clamped or truncated: an out-of-bounds value is an error, not a
//! corrected value.
//!
//! | Validator | Admits | Constraint |
//! |-----------|--------|------------|
//! | [`validate_identifier`] | bundle ids, accessibility ids | `[A-Za-z0-9_.:-]+`, ≤256 chars |
//! | [`validate_label`] | accessibility labels | shell denylist, ≤512 chars |
//! | [`validate_free_text`] | text to type | shell denylist, ≤10000 chars |
//! | [`validate_coordinate`] | screen points | finite, within `[min, max]` |
//! | [`validate_duration`] | gesture timing | finite, within `[0, 60]` seconds |
//! | [`validate_device_id`] | simulator UDIDs | 8-4-4-4-12 hex, uppercased |
//!
//! The wrappers have private fields, so the only way to obtain one is
//! through these functions.

pub mod argument;
mod rules;

pub use argument::{
    Constraint, Coordinate, DeviceUdid, Duration, FreeText, Identifier, Label, ValidatedArgument,
};
pub use rules::{
    DURATION_MAX_SECONDS, FREE_TEXT_MAX_CHARS, IDENTIFIER_MAX_CHARS, LABEL_MAX_CHARS,
    SCREEN_COORDINATE_MAX, SCREEN_COORDINATE_MIN, SHELL_METACHARACTERS, ValidationError,
    validate_coordinate, validate_device_id, validate_duration, validate_free_text,
    validate_identifier, validate_label, validate_screen_coordinate,
};
