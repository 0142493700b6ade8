//! Distance between coordinates.
//!
//! Great-circle distance uses the Haversine formula in its `atan2` form:
//!
//! ```norust
//! a = sin²(Δφ/2) + cos(φ1)·cos(φ2)·sin²(Δλ/2)
//! c = 2·atan2(√a, √(1−a))
//! d = R·c
//! ```
//!
//! where:
//!
//! - R – Earth's mean radius (R = 6 371 000 m);
//! - φ1, λ1 – First point latitude and longitude;
//! - φ2, λ2 – Second point latitude and longitude;
//! - d – Distance between them along Earth's surface.
//!
//! The `asin` form loses the domain when rounding pushes `a` slightly above `1.0`
//! for antipodal points, `atan2` together with clamping `a` does not.

mod models;

pub use models::*;

/// Radius of Earth in meters
pub const R: f64 = 6_371_000.0;

/// Great-circle distance between two fixes.
pub fn distance(from: &GeoCoordinate, to: &GeoCoordinate) -> Distance {
    Distance::from_meters(haversine(
        from.longitude,
        from.latitude,
        to.longitude,
        to.latitude,
    ))
}

/// Great-circle distance between two fixes in meters.
#[inline]
pub fn distance_meters(from: &GeoCoordinate, to: &GeoCoordinate) -> f64 {
    distance(from, to).as_meters()
}

/// Calculates distance from point A to point B in meters
fn haversine(longitude_1: f64, latitude_1: f64, longitude_2: f64, latitude_2: f64) -> f64 {
    let d_lat = (latitude_2 - latitude_1).to_radians();
    let d_lon = (longitude_2 - longitude_1).to_radians();

    let latitude_1 = latitude_1.to_radians();
    let latitude_2 = latitude_2.to_radians();

    let a = ((d_lat / 2.0).sin().powi(2)
        + (d_lon / 2.0).sin().powi(2) * (latitude_1.cos() * latitude_2.cos()))
    .clamp(0.0, 1.0);

    R * 2.0 * a.sqrt().atan2((1.0 - a).sqrt())
}
