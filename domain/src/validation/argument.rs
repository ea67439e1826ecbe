//! Validated argument wrappers.
//!
//! Every type here is produced only by a function in
//! [`rules`](super::rules). Fields are private to the `validation` module.

use std::fmt;

/// The constraint class that admitted a value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Constraint {
    /// Matched a fixed character-class pattern.
    Pattern(&'static str),
    /// Free of shell metacharacters and within a character bound.
    Denylist { max_chars: usize },
    /// Finite number inside an inclusive range.
    Range { min: f64, max: f64 },
}

/// Opaque identifier such as a bundle id or accessibility identifier.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier(pub(super) String);

/// Human-readable accessibility label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label(pub(super) String);

/// Arbitrary text destined for the typing primitive.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FreeText(pub(super) String);

/// A screen coordinate on one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinate {
    pub(super) value: f64,
    pub(super) min: f64,
    pub(super) max: f64,
}

/// A duration in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Duration(pub(super) f64);

/// Canonical uppercase simulator UDID.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DeviceUdid(pub(super) String);

impl Identifier {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Label {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FreeText {
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Number of characters (not bytes).
    pub fn char_count(&self) -> usize {
        self.0.chars().count()
    }
}

impl Coordinate {
    pub fn value(&self) -> f64 {
        self.value
    }
}

impl Duration {
    pub fn seconds(&self) -> f64 {
        self.0
    }
}

impl DeviceUdid {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DeviceUdid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Tagged union over every validated value kind.
///
/// This is what a [`CommandInvocation`](crate::command::CommandInvocation)
/// accepts for caller-derived arguments.
#[derive(Debug, Clone, PartialEq)]
pub enum ValidatedArgument {
    Identifier(Identifier),
    Label(Label),
    FreeText(FreeText),
    Coordinate(Coordinate),
    Duration(Duration),
    DeviceUdid(DeviceUdid),
}

impl ValidatedArgument {
    /// Render as a single process argument.
    ///
    /// Numbers use Rust's shortest round-trip decimal form, which never
    /// produces exponent notation for values in the validated ranges
    /// (`100.0` → `"100"`, `0.5` → `"0.5"`).
    pub fn render(&self) -> String {
        match self {
            ValidatedArgument::Identifier(v) => v.0.clone(),
            ValidatedArgument::Label(v) => v.0.clone(),
            ValidatedArgument::FreeText(v) => v.0.clone(),
            ValidatedArgument::Coordinate(v) => format!("{}", v.value),
            ValidatedArgument::Duration(v) => format!("{}", v.0),
            ValidatedArgument::DeviceUdid(v) => v.0.clone(),
        }
    }

    pub fn constraint(&self) -> Constraint {
        match self {
            ValidatedArgument::Identifier(_) => {
                Constraint::Pattern(super::rules::IDENTIFIER_PATTERN)
            }
            ValidatedArgument::DeviceUdid(_) => Constraint::Pattern(super::rules::DEVICE_ID_PATTERN),
            ValidatedArgument::Label(_) => Constraint::Denylist {
                max_chars: super::rules::LABEL_MAX_CHARS,
            },
            ValidatedArgument::FreeText(_) => Constraint::Denylist {
                max_chars: super::rules::FREE_TEXT_MAX_CHARS,
            },
            ValidatedArgument::Coordinate(c) => Constraint::Range {
                min: c.min,
                max: c.max,
            },
            ValidatedArgument::Duration(_) => Constraint::Range {
                min: 0.0,
                max: super::rules::DURATION_MAX_SECONDS,
            },
        }
    }

    /// Short kind name, used by the audit log in place of free-text content.
    pub fn kind(&self) -> &'static str {
        match self {
            ValidatedArgument::Identifier(_) => "identifier",
            ValidatedArgument::Label(_) => "label",
            ValidatedArgument::FreeText(_) => "free_text",
            ValidatedArgument::Coordinate(_) => "coordinate",
            ValidatedArgument::Duration(_) => "duration",
            ValidatedArgument::DeviceUdid(_) => "device_udid",
        }
    }
}

macro_rules! impl_from_validated {
    ($($ty:ident),*) => {
        $(
            impl From<$ty> for ValidatedArgument {
                fn from(value: $ty) -> Self {
                    ValidatedArgument::$ty(value)
                }
            }

            impl From<&$ty> for ValidatedArgument {
                fn from(value: &$ty) -> Self {
                    ValidatedArgument::$ty(value.clone())
                }
            }
        )*
    };
}

impl_from_validated!(Identifier, Label, FreeText, Coordinate, Duration, DeviceUdid);

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::{validate_coordinate, validate_device_id, validate_duration};
    use serde_json::json;

    #[test]
    fn test_render_numbers_as_plain_decimals() {
        let x = validate_coordinate(&json!(100), "x", 0.0, 5000.0).unwrap();
        assert_eq!(ValidatedArgument::from(x).render(), "100");

        let d = validate_duration(&json!(0.5)).unwrap();
        assert_eq!(ValidatedArgument::from(d).render(), "0.5");
    }

    #[test]
    fn test_constraint_reports_admitting_range() {
        let x = validate_coordinate(&json!(10), "x", 0.0, 400.0).unwrap();
        assert_eq!(
            ValidatedArgument::from(x).constraint(),
            Constraint::Range { min: 0.0, max: 400.0 }
        );
    }

    #[test]
    fn test_device_udid_constraint_is_pattern() {
        let udid = validate_device_id("12345678-1234-1234-1234-123456789abc").unwrap();
        let arg = ValidatedArgument::from(&udid);
        assert!(matches!(arg.constraint(), Constraint::Pattern(_)));
        assert_eq!(arg.kind(), "device_udid");
    }
}
