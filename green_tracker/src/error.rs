//! Error taxonomy of the tracker.
//!
//! Only [`ValidationError`] ever stops work outright. Missing sensors degrade
//! the session, sink failures are counted and left to the sink to retry, and a
//! failing position feed detaches only that feed.

use std::fmt;

use thiserror::Error;

use crate::session::Phase;

/// Main error type of the tracker
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TrackerError {
    #[error(transparent)]
    SensorUnavailable(#[from] SensorUnavailable),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Sink(#[from] SinkError),

    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    /// Session lifecycle only moves forward
    #[error("can't move tracking session from {from} to {to}")]
    InvalidTransition { from: Phase, to: Phase },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Sensor {
    Position,
    Motion,
}

impl fmt::Display for Sensor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Sensor::Position => f.write_str("position"),
            Sensor::Motion => f.write_str("motion"),
        }
    }
}

/// Capability is missing or access was denied.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{sensor} sensor is unavailable: {reason}")]
pub struct SensorUnavailable {
    pub sensor: Sensor,
    pub reason: String,
}

impl SensorUnavailable {
    pub fn new(sensor: Sensor, reason: impl Into<String>) -> Self {
        Self {
            sensor,
            reason: reason.into(),
        }
    }
}

/// Manual entry rejected before reaching the sink
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("activity name is empty")]
    EmptyName,

    #[error("points earned must be positive, got {0}")]
    NonPositivePoints(i64),

    #[error("points earned {0} doesn't fit into a points counter")]
    PointsOutOfRange(i64),

    #[error("carbon saved must be a finite number, got {0}")]
    NonFiniteCarbon(f64),
}

/// Downstream persistence failed to take the event
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SinkError {
    #[error("sink queue is full")]
    Full,

    #[error("sink is disconnected")]
    Disconnected,

    #[error("sink rejected event: {0}")]
    Rejected(String),
}

/// Failure reported by the position source itself
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("location permission denied")]
    PermissionDenied,

    #[error("position unavailable")]
    PositionUnavailable,

    #[error("timed out waiting for a position fix")]
    Timeout,

    #[error("geolocation failed: {0}")]
    Other(String),
}
