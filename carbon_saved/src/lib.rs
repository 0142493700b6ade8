//! # Carbon saved
//!
//! Every trip is compared against covering the same distance by car:
//!
//! ```notrust
//! saved = (EF_car - EF_mode) x distance
//! points = round(saved x 100)
//! ```
//!
//! Where:
//!
//! - EF - emission factor of a transport mode, kg CO₂ per km
//! - distance - trip length in km
//!
//! The difference is never clamped, a mode dirtier than the baseline yields a
//! negative saving. Points can't go below zero.

use gps::Distance;
use transport_mode::ActivityLabel;

/// Emission factor of the car baseline, kg CO₂ per km
pub const BASELINE_KG_PER_KM: f64 = 0.192;

const POINTS_PER_KG: f64 = 100.0;

/// Emission factor of a transport mode, kg CO₂ per km
pub const fn emission_factor(label: ActivityLabel) -> f64 {
    match label {
        ActivityLabel::Stationary | ActivityLabel::Walking | ActivityLabel::Cycling => 0.0,
        ActivityLabel::TwoWheeler => 0.075,
        ActivityLabel::Car => BASELINE_KG_PER_KM,
        ActivityLabel::PublicTransport => 0.08,
    }
}

/// Carbon saved by choosing `label` over a car for the same distance.
///
/// # Params
/// - `label` - detected transport mode
/// - `distance_km` - trip length in kilometers
#[inline]
pub fn carbon_saved_kg(label: ActivityLabel, distance_km: f64) -> f64 {
    (BASELINE_KG_PER_KM - emission_factor(label)) * distance_km
}

/// Points for the given saving, `round(kg x 100)` floored at zero.
#[inline]
pub fn points_earned(carbon_saved_kg: f64) -> u32 {
    // `as` saturates, NaN and negative values end up as 0
    (carbon_saved_kg * POINTS_PER_KG).round().max(0.0) as u32
}

/// Saving and points for a single trip
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub carbon_saved_kg: f64,
    pub points_earned: u32,
}

impl Footprint {
    pub fn new(label: ActivityLabel, distance: Distance) -> Self {
        let carbon_saved_kg = carbon_saved_kg(label, distance.as_kilometers());

        Self {
            carbon_saved_kg,
            points_earned: points_earned(carbon_saved_kg),
        }
    }
}
