//! Typed UI interaction requests.
//!
//! Tools receive loose argument bags; these constructors turn them into sum
//! types where "exactly one target" holds by construction. Every component
//! is validated as part of construction, so a built [`TapSpec`] or
//! [`SwipeRequest`] is ready to render into an invocation.

use crate::validation::{
    Coordinate, Duration, Identifier, Label, ValidationError, validate_duration,
    validate_identifier, validate_label, validate_screen_coordinate,
};
use std::str::FromStr;

/// What a tap should hit.
#[derive(Debug, Clone, PartialEq)]
pub enum TapSpec {
    Coordinates { x: Coordinate, y: Coordinate },
    ById(Identifier),
    ByLabel(Label),
}

impl TapSpec {
    /// Build from raw tool arguments.
    ///
    /// Exactly one of the `x`/`y` pair, `identifier`, or `label` must be
    /// supplied. A lone `x` or `y` counts as the coordinate group and is
    /// rejected for being incomplete.
    pub fn from_raw(
        x: Option<&serde_json::Value>,
        y: Option<&serde_json::Value>,
        identifier: Option<&str>,
        label: Option<&str>,
    ) -> Result<Self, ValidationError> {
        let has_coordinates = x.is_some() || y.is_some();
        let groups = [has_coordinates, identifier.is_some(), label.is_some()]
            .into_iter()
            .filter(|present| *present)
            .count();

        match groups {
            0 => {
                return Err(ValidationError::Contract(
                    "tap requires coordinates (x and y), an identifier, or a label".to_string(),
                ));
            }
            1 => {}
            _ => {
                return Err(ValidationError::Contract(
                    "tap accepts only one of: coordinates (x and y), identifier, label"
                        .to_string(),
                ));
            }
        }

        if let Some(id) = identifier {
            return Ok(TapSpec::ById(validate_identifier(id)?));
        }
        if let Some(label) = label {
            return Ok(TapSpec::ByLabel(validate_label(label)?));
        }

        match (x, y) {
            (Some(x), Some(y)) => Ok(TapSpec::Coordinates {
                x: validate_screen_coordinate(x, "x")?,
                y: validate_screen_coordinate(y, "y")?,
            }),
            _ => Err(ValidationError::Contract(
                "tap by coordinates requires both x and y".to_string(),
            )),
        }
    }
}

/// A point-to-point swipe.
#[derive(Debug, Clone, PartialEq)]
pub struct SwipeSpec {
    pub start_x: Coordinate,
    pub start_y: Coordinate,
    pub end_x: Coordinate,
    pub end_y: Coordinate,
    pub duration: Option<Duration>,
}

/// Timing options for a preset gesture.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct GestureOptions {
    pub duration: Option<Duration>,
    pub pre_delay: Option<Duration>,
    pub post_delay: Option<Duration>,
}

impl GestureOptions {
    pub fn with_duration(mut self, duration: Duration) -> Self {
        self.duration = Some(duration);
        self
    }
}

/// The fixed set of named gestures the automation tool understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GesturePreset {
    ScrollUp,
    ScrollDown,
    ScrollLeft,
    ScrollRight,
    SwipeFromLeftEdge,
    SwipeFromRightEdge,
    SwipeFromTopEdge,
    SwipeFromBottomEdge,
}

impl GesturePreset {
    pub const ALL: [GesturePreset; 8] = [
        GesturePreset::ScrollUp,
        GesturePreset::ScrollDown,
        GesturePreset::ScrollLeft,
        GesturePreset::ScrollRight,
        GesturePreset::SwipeFromLeftEdge,
        GesturePreset::SwipeFromRightEdge,
        GesturePreset::SwipeFromTopEdge,
        GesturePreset::SwipeFromBottomEdge,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GesturePreset::ScrollUp => "scroll-up",
            GesturePreset::ScrollDown => "scroll-down",
            GesturePreset::ScrollLeft => "scroll-left",
            GesturePreset::ScrollRight => "scroll-right",
            GesturePreset::SwipeFromLeftEdge => "swipe-from-left-edge",
            GesturePreset::SwipeFromRightEdge => "swipe-from-right-edge",
            GesturePreset::SwipeFromTopEdge => "swipe-from-top-edge",
            GesturePreset::SwipeFromBottomEdge => "swipe-from-bottom-edge",
        }
    }
}

impl FromStr for GesturePreset {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        GesturePreset::ALL
            .into_iter()
            .find(|preset| preset.as_str() == s)
            .ok_or_else(|| ValidationError::UnknownGesture(s.to_string()))
    }
}

impl std::fmt::Display for GesturePreset {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Either a named gesture or an explicit swipe.
///
/// The gesture name is kept as given; it is checked against
/// [`GesturePreset`] by the gesture operation itself.
#[derive(Debug, Clone, PartialEq)]
pub enum SwipeRequest {
    Gesture {
        preset: String,
        options: GestureOptions,
    },
    Swipe(SwipeSpec),
}

/// Raw swipe arguments as they arrive from a caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct RawSwipeArgs<'a> {
    pub gesture: Option<&'a str>,
    pub start_x: Option<&'a serde_json::Value>,
    pub start_y: Option<&'a serde_json::Value>,
    pub end_x: Option<&'a serde_json::Value>,
    pub end_y: Option<&'a serde_json::Value>,
    pub duration: Option<&'a serde_json::Value>,
}

impl SwipeRequest {
    pub fn from_raw(raw: RawSwipeArgs<'_>) -> Result<Self, ValidationError> {
        let coordinates = [
            ("start_x", raw.start_x),
            ("start_y", raw.start_y),
            ("end_x", raw.end_x),
            ("end_y", raw.end_y),
        ];
        let any_coordinate = coordinates.iter().any(|(_, v)| v.is_some());
        let duration = raw.duration.map(validate_duration).transpose()?;

        match (raw.gesture, any_coordinate) {
            (Some(_), true) => Err(ValidationError::Contract(
                "swipe accepts either a gesture or coordinates, not both".to_string(),
            )),
            (None, false) => Err(ValidationError::Contract(
                "swipe requires a gesture or start_x, start_y, end_x and end_y".to_string(),
            )),
            (Some(preset), false) => Ok(SwipeRequest::Gesture {
                preset: preset.to_string(),
                options: GestureOptions {
                    duration,
                    ..GestureOptions::default()
                },
            }),
            (None, true) => {
                let missing: Vec<&str> = coordinates
                    .iter()
                    .filter(|(_, v)| v.is_none())
                    .map(|(name, _)| *name)
                    .collect();
                if !missing.is_empty() {
                    return Err(ValidationError::Contract(format!(
                        "swipe is missing {}",
                        missing.join(", ")
                    )));
                }

                let coordinate = |name: &str, value: Option<&serde_json::Value>| match value {
                    Some(v) => validate_screen_coordinate(v, name),
                    None => Err(ValidationError::Contract(format!("swipe is missing {name}"))),
                };

                Ok(SwipeRequest::Swipe(SwipeSpec {
                    start_x: coordinate("start_x", raw.start_x)?,
                    start_y: coordinate("start_y", raw.start_y)?,
                    end_x: coordinate("end_x", raw.end_x)?,
                    end_y: coordinate("end_y", raw.end_y)?,
                    duration,
                }))
            }
        }
    }
}
