//! Similarity scores.
//!
//! The backend reports similarity as a fraction in `[0, 1]`. Historically
//! some producers shipped percentages instead; [`Similarity::from_percent`]
//! is the single conversion point for those, so the rest of the codebase
//! only ever sees the canonical fraction.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// A similarity measure, stored as a fraction in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
pub struct Similarity(f64);

impl Similarity {
    /// Build from a fraction, clamped into `[0, 1]`.
    ///
    /// Non-finite input clamps to zero.
    #[must_use]
    pub fn from_fraction(value: f64) -> Self {
        if value.is_finite() {
            Self(value.clamp(0.0, 1.0))
        } else {
            Self(0.0)
        }
    }

    /// Build from a percentage, clamped into `[0, 100]`.
    #[must_use]
    pub fn from_percent(value: f64) -> Self {
        Self::from_fraction(value / 100.0)
    }

    /// The canonical fraction in `[0, 1]`.
    #[must_use]
    pub fn fraction(&self) -> f64 {
        self.0
    }

    /// The score as a percentage in `[0, 100]`.
    #[must_use]
    pub fn percent(&self) -> f64 {
        self.0 * 100.0
    }

    /// Total ordering (`NaN` cannot occur by construction).
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> std::cmp::Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for Similarity {
    /// Formats as a rounded percentage, e.g. `87%`.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.0}%", self.percent())
    }
}

impl Serialize for Similarity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Similarity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_fraction)
    }
}
