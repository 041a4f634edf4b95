//! Easing curves.
//!
//! Each curve maps normalized progress `t` in `[0, 1]` to eased progress.
//! All curves satisfy `f(0) = 0` and `f(1) = 1`; the back curves overshoot
//! in between.

use std::f32::consts::PI;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize, Serializer};
use thiserror::Error;

/// Overshoot amount for the back curves
const BACK_C1: f32 = 1.70158;
const BACK_C2: f32 = BACK_C1 * 1.525;
const BACK_C3: f32 = BACK_C1 + 1.0;

/// Easing function type for tweens.
///
/// Serialized as its display name; deserialized through [`FromStr`], so
/// config files and environment variables accept any spelling the CLI does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum EaseType {
    /// Constant speed interpolation
    #[default]
    Linear,
    /// Slow start following a quarter sine
    EaseInSine,
    /// Slow end following a quarter sine
    EaseOutSine,
    /// Slow start and end, half cosine
    EaseInOutSine,
    /// Pulls back below the start before accelerating
    EaseInBack,
    /// Overshoots the end before settling
    EaseOutBack,
    /// Pulls back at the start and overshoots at the end
    EaseInOutBack,
}

impl EaseType {
    /// Every curve in declaration order.
    pub const ALL: [EaseType; 7] = [
        EaseType::Linear,
        EaseType::EaseInSine,
        EaseType::EaseOutSine,
        EaseType::EaseInOutSine,
        EaseType::EaseInBack,
        EaseType::EaseOutBack,
        EaseType::EaseInOutBack,
    ];

    /// Look up a curve by its position in [`EaseType::ALL`].
    ///
    /// Unknown indices fall back to `Linear`.
    pub fn from_index(index: usize) -> Self {
        Self::ALL.get(index).copied().unwrap_or_default()
    }

    /// Position of this curve in [`EaseType::ALL`].
    pub fn index(self) -> usize {
        self as usize
    }

    /// Display name, e.g. `"EaseOutBack"`.
    pub fn name(self) -> &'static str {
        match self {
            EaseType::Linear => "Linear",
            EaseType::EaseInSine => "EaseInSine",
            EaseType::EaseOutSine => "EaseOutSine",
            EaseType::EaseInOutSine => "EaseInOutSine",
            EaseType::EaseInBack => "EaseInBack",
            EaseType::EaseOutBack => "EaseOutBack",
            EaseType::EaseInOutBack => "EaseInOutBack",
        }
    }

    /// Apply the curve to a normalized time value.
    ///
    /// Callers clamp `t` to `[0, 1]`; values outside that range are
    /// extrapolated by the formula and carry no meaning.
    pub fn apply(self, t: f32) -> f32 {
        match self {
            EaseType::Linear => t,
            EaseType::EaseInSine => 1.0 - (t * PI / 2.0).cos(),
            EaseType::EaseOutSine => (t * PI / 2.0).sin(),
            EaseType::EaseInOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EaseType::EaseInBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            EaseType::EaseOutBack => {
                let u = t - 1.0;
                1.0 + BACK_C3 * u.powi(3) + BACK_C1 * u.powi(2)
            }
            EaseType::EaseInOutBack => {
                if t < 0.5 {
                    let u = 2.0 * t;
                    (u * u * ((BACK_C2 + 1.0) * u - BACK_C2)) / 2.0
                } else {
                    let u = 2.0 * t - 2.0;
                    (u * u * ((BACK_C2 + 1.0) * u + BACK_C2) + 2.0) / 2.0
                }
            }
        }
    }
}

impl fmt::Display for EaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Returned when a curve name does not match any [`EaseType`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown ease type '{0}'")]
pub struct ParseEaseError(pub String);

impl FromStr for EaseType {
    type Err = ParseEaseError;

    /// Accepts the display name or its snake_case form, ignoring case
    /// (`"EaseOutBack"`, `"ease_out_back"`, `"easeoutback"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .flat_map(char::to_lowercase)
            .collect();

        Self::ALL
            .into_iter()
            .find(|ease| ease.name().to_lowercase() == wanted)
            .ok_or_else(|| ParseEaseError(s.to_string()))
    }
}

impl TryFrom<String> for EaseType {
    type Error = ParseEaseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl Serialize for EaseType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}
