//! Acceleration samples and the sliding window the tracker keeps over them.
//!
//! The window only stores magnitudes, orientation of the device is irrelevant
//! for telling smooth vehicular motion apart from irregular human-powered motion.

mod buffer;

pub use buffer::*;

#[derive(Debug, Clone, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Accelerometer {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl Accelerometer {
    pub fn magnitude(&self) -> f64 {
        (self.x.powi(2) + self.y.powi(2) + self.z.powi(2)).sqrt()
    }
}

/// Acceleration magnitude including gravity, m/s².
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct MotionSample {
    pub magnitude: f64,
}

impl MotionSample {
    pub const fn new(magnitude: f64) -> Self {
        Self { magnitude }
    }
}

impl From<Accelerometer> for MotionSample {
    fn from(value: Accelerometer) -> Self {
        Self {
            magnitude: value.magnitude(),
        }
    }
}

impl From<f64> for MotionSample {
    fn from(magnitude: f64) -> Self {
        Self { magnitude }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn magnitude_from_axes() {
        let sample = MotionSample::from(Accelerometer {
            x: 3.0,
            y: 4.0,
            z: 12.0,
        });

        assert_eq!(sample.magnitude, 13.0);
    }

    #[test]
    fn resting_device_reads_gravity() {
        let sample = MotionSample::from(Accelerometer {
            x: 0.0,
            y: 0.0,
            z: 9.81,
        });

        assert_eq!(sample, MotionSample::new(9.81));
    }
}
