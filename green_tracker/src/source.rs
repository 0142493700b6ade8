//! Sensor capabilities injected into a tracking session.
//!
//! A source hands out a single subscription, it can't be restarted. Dropping
//! the receiver is how a session unsubscribes.

use crossbeam::channel::{Receiver, Sender, unbounded};
use gps::GeoCoordinate;
use motion::MotionSample;

use crate::{GeolocationError, Sensor, SensorUnavailable};

pub type PositionUpdate = Result<GeoCoordinate, GeolocationError>;

pub trait PositionSource {
    fn watch(&mut self) -> Result<Receiver<PositionUpdate>, SensorUnavailable>;
}

pub trait MotionSource {
    fn watch(&mut self) -> Result<Receiver<MotionSample>, SensorUnavailable>;
}

/// One-shot source wrapping a channel fed by the platform layer
#[derive(Debug)]
pub struct ChannelSource<T> {
    receiver: Option<Receiver<T>>,
}

impl<T> ChannelSource<T> {
    pub fn new(receiver: Receiver<T>) -> Self {
        Self {
            receiver: Some(receiver),
        }
    }

    /// Source plus the sender the platform callbacks push into
    pub fn channel() -> (Sender<T>, Self) {
        let (sender, receiver) = unbounded();

        (sender, Self::new(receiver))
    }

    fn take(&mut self, sensor: Sensor) -> Result<Receiver<T>, SensorUnavailable> {
        self.receiver
            .take()
            .ok_or_else(|| SensorUnavailable::new(sensor, "source was already watched"))
    }
}

impl PositionSource for ChannelSource<PositionUpdate> {
    fn watch(&mut self) -> Result<Receiver<PositionUpdate>, SensorUnavailable> {
        self.take(Sensor::Position)
    }
}

impl MotionSource for ChannelSource<MotionSample> {
    fn watch(&mut self) -> Result<Receiver<MotionSample>, SensorUnavailable> {
        self.take(Sensor::Motion)
    }
}

/// Platform without the capability, e.g. a device with no accelerometer
#[derive(Debug, Clone, Copy, Default)]
pub struct Unsupported;

impl PositionSource for Unsupported {
    fn watch(&mut self) -> Result<Receiver<PositionUpdate>, SensorUnavailable> {
        Err(SensorUnavailable::new(
            Sensor::Position,
            "not supported on this platform",
        ))
    }
}

impl MotionSource for Unsupported {
    fn watch(&mut self) -> Result<Receiver<MotionSample>, SensorUnavailable> {
        Err(SensorUnavailable::new(
            Sensor::Motion,
            "not supported on this platform",
        ))
    }
}
