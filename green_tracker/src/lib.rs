//! # Green activity tracker
//!
//! Turns GPS fixes and accelerometer samples into labeled activities with a
//! carbon saving estimate, and validates manually logged activities.
//!
//! - [`MotionTrackingSession`] fuses a [`PositionSource`] and a [`MotionSource`],
//!   gates fixes by displacement, classifies them with
//!   [`transport_mode::ActivityLabel::classify`] and scores them with
//!   [`carbon_saved::Footprint`];
//! - [`ManualActivityLogger`] builds activities from user input;
//! - both hand finished [`ActivityEvent`]s to an [`ActivitySink`].
//!
//! Persistence, profile totals and rewards live behind the sink.

mod error;
mod event;
mod manual;
mod options;
mod session;
mod sink;
mod source;

pub use self::{error::*, event::*, manual::*, options::*, session::*, sink::*, source::*};

pub use gps::{Distance, GeoCoordinate};
pub use motion::{Accelerometer, MotionSample, MotionSampleBuffer};
pub use transport_mode::ActivityLabel;
