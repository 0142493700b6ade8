//! # Transport mode
//!
//! Speed alone can't tell a fast cyclist from a car stuck in traffic.
//! Variance of acceleration magnitude can: human-powered motion shakes the
//! device irregularly, vehicles move smoothly. Rules are checked top to
//! bottom and the first match wins:
//!
//! | km/h      | variance | mode               |
//! |-----------|----------|--------------------|
//! | < 1.5     | any      | `Stationary`       |
//! | < 6       | > 1.0    | `Walking`          |
//! | < 20      | > 0.5    | `Cycling`          |
//! | < 60      | > 0.3    | `TwoWheeler`       |
//! | < 100     | < 0.3    | `Car`              |
//! | otherwise |          | `PublicTransport`  |
//!
//! Upper bounds are exclusive, a value sitting exactly on a boundary falls to the next row.

use std::{fmt, str::FromStr};

const STATIONARY_MAX_KMPHR: f64 = 1.5;
const WALKING_MAX_KMPHR: f64 = 6.0;
const CYCLING_MAX_KMPHR: f64 = 20.0;
const TWO_WHEELER_MAX_KMPHR: f64 = 60.0;
const CAR_MAX_KMPHR: f64 = 100.0;

const WALKING_MIN_VARIANCE: f64 = 1.0;
const CYCLING_MIN_VARIANCE: f64 = 0.5;
const TWO_WHEELER_MIN_VARIANCE: f64 = 0.3;
const CAR_MAX_VARIANCE: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ActivityLabel {
    Stationary,
    Walking,
    Cycling,
    TwoWheeler,
    Car,
    PublicTransport,
}

impl ActivityLabel {
    pub const ALL: [Self; 6] = [
        Self::Stationary,
        Self::Walking,
        Self::Cycling,
        Self::TwoWheeler,
        Self::Car,
        Self::PublicTransport,
    ];

    /// Classify movement by speed and spread of recent acceleration.
    ///
    /// # Params
    /// - `speed` - ground speed in meters per second
    /// - `accel_variance` - population variance of acceleration magnitude, (m/s²)²
    pub fn classify(speed: f64, accel_variance: f64) -> Self {
        // Comparing in m/s keeps `speed == kmh / 3.6` exactly on the boundary.
        let below = |kmphr: f64| speed < kmphr / 3.6;

        if below(STATIONARY_MAX_KMPHR) {
            return Self::Stationary;
        }

        if below(WALKING_MAX_KMPHR) && accel_variance > WALKING_MIN_VARIANCE {
            return Self::Walking;
        }

        if below(CYCLING_MAX_KMPHR) && accel_variance > CYCLING_MIN_VARIANCE {
            return Self::Cycling;
        }

        if below(TWO_WHEELER_MAX_KMPHR) && accel_variance > TWO_WHEELER_MIN_VARIANCE {
            return Self::TwoWheeler;
        }

        if below(CAR_MAX_KMPHR) && accel_variance < CAR_MAX_VARIANCE {
            return Self::Car;
        }

        Self::PublicTransport
    }

    pub const fn is_moving(self) -> bool {
        !matches!(self, Self::Stationary)
    }

    pub const fn is_human_powered(self) -> bool {
        matches!(self, Self::Walking | Self::Cycling)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Stationary => "stationary",
            Self::Walking => "walking",
            Self::Cycling => "cycling",
            Self::TwoWheeler => "two_wheeler",
            Self::Car => "car",
            Self::PublicTransport => "public_transport",
        }
    }
}

/// Shorthand for [`ActivityLabel::classify`]
#[inline]
pub fn classify(speed: f64, accel_variance: f64) -> ActivityLabel {
    ActivityLabel::classify(speed, accel_variance)
}

impl fmt::Display for ActivityLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown activity label `{0}`")]
pub struct UnknownLabel(pub String);

impl FromStr for ActivityLabel {
    type Err = UnknownLabel;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|this| this.as_str() == s)
            .ok_or_else(|| UnknownLabel(s.to_owned()))
    }
}
