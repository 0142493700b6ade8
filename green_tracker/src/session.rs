//! # Motion tracking session
//!
//! Fuses two asynchronous feeds into activity events:
//!
//! - motion samples only grow the acceleration window;
//! - every position fix is gated by displacement, classified by speed and
//!   window variance, scored and handed to the sink.
//!
//! ```notrust
//! Idle --start--> Active --stop--> Stopped
//! ```
//!
//! A stopped session never becomes active again. Only the last accepted fix is
//! remembered, the fix interval doesn't matter as classification relies on the
//! reported speed and the displacement between accepted fixes.
//!
//! Without an accelerometer the window stays empty and the variance is `0.0`,
//! which biases classification towards car and public transport.

use std::{fmt, time::Duration};

use carbon_saved::Footprint;
use crossbeam::channel::{Receiver, Select, TryRecvError};
use gps::{Distance, GeoCoordinate};
use log::{debug, info, warn};
use motion::{MotionSample, MotionSampleBuffer};
use time::OffsetDateTime;
use transport_mode::ActivityLabel;

use crate::{
    ActivityEvent, ActivitySink, GeolocationError, MotionSource, PositionSource, PositionUpdate,
    SensorUnavailable, SinkError, TrackerError, TrackerOptions,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Idle,
    Active,
    Stopped,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Idle => f.write_str("idle"),
            Phase::Active => f.write_str("active"),
            Phase::Stopped => f.write_str("stopped"),
        }
    }
}

/// What happened to a single position fix
#[derive(Debug, Clone, PartialEq)]
pub enum PositionOutcome {
    /// Session isn't active
    Ignored,
    /// First fix, recorded as the reference point
    Anchored,
    /// Coordinates are not finite or out of range, the fix is dropped
    Invalid,
    /// Moved less than the minimum displacement
    Jitter { distance: Distance },
    /// Passed the displacement gate but classified as not moving
    Stationary { distance: Distance },
    Emitted {
        label: ActivityLabel,
        distance: Distance,
    },
    /// Event was built but the sink refused it, the fix is still recorded
    Undelivered {
        label: ActivityLabel,
        distance: Distance,
        error: SinkError,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SessionStats {
    pub fixes: u64,
    pub motion_samples: u64,
    pub anchors: u64,
    pub invalid: u64,
    pub jitter: u64,
    pub stationary: u64,
    pub emitted: u64,
    pub sink_failures: u64,
}

/// Degradations collected since the session started
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SensorStatus {
    pub position: Option<SensorUnavailable>,
    pub motion: Option<SensorUnavailable>,
    /// Failure reported by the position feed, the feed is detached afterwards
    pub position_error: Option<GeolocationError>,
}

/// State a single session owns while active
#[derive(Debug)]
struct TrackingState {
    last_position: Option<GeoCoordinate>,
    window: MotionSampleBuffer,
}

#[derive(Debug)]
struct Subscriptions {
    position: Option<Receiver<PositionUpdate>>,
    motion: Option<Receiver<MotionSample>>,
}

#[derive(Debug)]
enum Lifecycle {
    Idle,
    Active {
        subscriptions: Subscriptions,
        state: TrackingState,
    },
    Stopped,
}

/// Turns sensor feeds into [`ActivityEvent`]s for a sink.
///
/// Both entry points take `&mut self`, so the last position and the window are
/// always updated together. Hosts delivering callbacks on several threads wrap
/// the whole session in one mutex.
#[derive(Debug)]
pub struct MotionTrackingSession<S> {
    options: TrackerOptions,
    sink: S,
    lifecycle: Lifecycle,
    stats: SessionStats,
    sensors: SensorStatus,
}

impl<S: ActivitySink> MotionTrackingSession<S> {
    pub fn new(options: TrackerOptions, sink: S) -> Self {
        Self {
            options,
            sink,
            lifecycle: Lifecycle::Idle,
            stats: SessionStats::default(),
            sensors: SensorStatus::default(),
        }
    }

    pub fn phase(&self) -> Phase {
        match self.lifecycle {
            Lifecycle::Idle => Phase::Idle,
            Lifecycle::Active { .. } => Phase::Active,
            Lifecycle::Stopped => Phase::Stopped,
        }
    }

    /// Subscribe to both sources and start tracking.
    ///
    /// A missing sensor doesn't fail the start, it is recorded in
    /// [`Self::sensors`]. Without motion the session runs on GPS only, without
    /// position it can't produce events until stopped.
    pub fn start(
        &mut self,
        position: &mut dyn PositionSource,
        motion: &mut dyn MotionSource,
    ) -> Result<(), TrackerError> {
        let from = self.phase();
        if from != Phase::Idle {
            return Err(TrackerError::InvalidTransition {
                from,
                to: Phase::Active,
            });
        }

        let position = match position.watch() {
            Ok(receiver) => Some(receiver),
            Err(e) => {
                warn!("{e}, no activities will be detected");
                self.sensors.position = Some(e);
                None
            }
        };

        let motion = match motion.watch() {
            Ok(receiver) => Some(receiver),
            Err(e) => {
                warn!("{e}, classifying with zero acceleration variance");
                self.sensors.motion = Some(e);
                None
            }
        };

        info!(
            "tracking session started, position: {}, motion: {}",
            position.is_some(),
            motion.is_some()
        );

        self.lifecycle = Lifecycle::Active {
            subscriptions: Subscriptions { position, motion },
            state: TrackingState {
                last_position: None,
                window: MotionSampleBuffer::with_capacity(self.options.window_size),
            },
        };

        Ok(())
    }

    /// Unsubscribe from both sources and drop the tracking state.
    ///
    /// Subscriptions go first, afterwards every entry point ignores its input.
    pub fn stop(&mut self) {
        match std::mem::replace(&mut self.lifecycle, Lifecycle::Stopped) {
            Lifecycle::Active {
                subscriptions: Subscriptions { position, motion },
                ..
            } => {
                drop(position);
                drop(motion);

                info!(
                    "tracking session stopped, emitted {} of {} fixes",
                    self.stats.emitted, self.stats.fixes
                );
            }
            Lifecycle::Idle => info!("tracking session stopped before start"),
            Lifecycle::Stopped => {}
        }
    }

    /// Motion callback.
    ///
    /// Returns `false` when the session isn't active or the sample was dropped
    /// for a non-finite magnitude.
    pub fn on_motion(&mut self, sample: impl Into<MotionSample>) -> bool {
        let Lifecycle::Active { state, .. } = &mut self.lifecycle else {
            return false;
        };

        if !state.window.append(sample) {
            debug!("non-finite motion sample discarded");
            return false;
        }

        self.stats.motion_samples += 1;

        true
    }

    /// Position callback.
    ///
    /// Fixes within the minimum displacement or classified as stationary are
    /// discarded and keep the previous reference point. Once an event is built
    /// the fix becomes the new reference point, whether or not the sink takes it.
    pub fn on_position(&mut self, fix: GeoCoordinate) -> PositionOutcome {
        let Lifecycle::Active { state, .. } = &mut self.lifecycle else {
            return PositionOutcome::Ignored;
        };

        self.stats.fixes += 1;

        if !fix.is_valid() {
            warn!("invalid fix {}, {} discarded", fix.latitude, fix.longitude);
            self.stats.invalid += 1;

            return PositionOutcome::Invalid;
        }

        let Some(last) = state.last_position else {
            debug!("anchored at {}, {}", fix.latitude, fix.longitude);
            state.last_position = Some(fix);
            self.stats.anchors += 1;

            return PositionOutcome::Anchored;
        };

        let distance = gps::distance(&last, &fix);

        let meters = distance.as_meters();

        if !meters.is_finite() || meters < self.options.min_displacement {
            debug!("jitter of {:.1} m discarded", distance.as_meters());
            self.stats.jitter += 1;

            return PositionOutcome::Jitter { distance };
        }

        let variance = state.window.variance();
        let label = ActivityLabel::classify(fix.speed_mps(), variance);

        if !label.is_moving() {
            debug!(
                "stationary after {:.1} m at {:.2} km/h, discarded",
                distance.as_meters(),
                fix.speed_kmh()
            );
            self.stats.stationary += 1;

            return PositionOutcome::Stationary { distance };
        }

        let event = ActivityEvent::tracked(
            label,
            distance,
            Footprint::new(label, distance),
            fix,
            OffsetDateTime::now_utc(),
        );

        state.last_position = Some(fix);

        debug!(
            "{label} over {:.1} m at {:.2} km/h, variance {variance:.3}",
            distance.as_meters(),
            fix.speed_kmh()
        );

        match self.sink.accept(event) {
            Ok(()) => {
                self.stats.emitted += 1;

                PositionOutcome::Emitted { label, distance }
            }
            Err(error) => {
                warn!("{label} activity was not delivered: {error}");
                self.stats.sink_failures += 1;

                PositionOutcome::Undelivered {
                    label,
                    distance,
                    error,
                }
            }
        }
    }

    /// Failure reported by the position feed.
    ///
    /// The feed is detached, the session stays active and keeps taking motion
    /// samples until stopped.
    pub fn on_position_error(&mut self, error: GeolocationError) {
        let Lifecycle::Active { subscriptions, .. } = &mut self.lifecycle else {
            return;
        };

        warn!("position feed failed: {error}");
        subscriptions.position = None;
        self.sensors.position_error = Some(error);
    }

    /// Process everything the sources delivered so far without blocking.
    ///
    /// The two feeds are separate channels, so their relative order within one
    /// batch is lost: every pending motion sample is applied before the pending
    /// fixes, and a fix may be classified with samples that arrived after it.
    /// Hosts that need strict interleaving call [`Self::on_motion`] and
    /// [`Self::on_position`] directly, or poll after every delivery.
    ///
    /// A position failure detaches the feed and is returned after the fixes
    /// that arrived before it were processed.
    pub fn poll(&mut self) -> Result<Vec<PositionOutcome>, TrackerError> {
        let Lifecycle::Active { subscriptions, .. } = &mut self.lifecycle else {
            return Ok(Vec::new());
        };

        let (samples, motion_closed) = drain(subscriptions.motion.as_ref());
        if motion_closed {
            info!("motion feed closed");
            subscriptions.motion = None;
        }

        let (fixes, position_closed) = drain(subscriptions.position.as_ref());
        if position_closed {
            info!("position feed closed");
            subscriptions.position = None;
        }

        for sample in samples {
            self.on_motion(sample);
        }

        let mut outcomes = Vec::with_capacity(fixes.len());

        for update in fixes {
            match update {
                Ok(fix) => outcomes.push(self.on_position(fix)),
                Err(error) => {
                    self.on_position_error(error.clone());

                    return Err(error.into());
                }
            }
        }

        Ok(outcomes)
    }

    /// Block until any source delivers or `timeout` passes, then [`Self::poll`].
    pub fn wait(&mut self, timeout: Duration) -> Result<Vec<PositionOutcome>, TrackerError> {
        let Lifecycle::Active { subscriptions, .. } = &self.lifecycle else {
            return Ok(Vec::new());
        };

        let mut select = Select::new();
        let mut watching = false;

        if let Some(receiver) = &subscriptions.position {
            select.recv(receiver);
            watching = true;
        }

        if let Some(receiver) = &subscriptions.motion {
            select.recv(receiver);
            watching = true;
        }

        if !watching {
            return Ok(Vec::new());
        }

        if select.ready_timeout(timeout).is_err() {
            return Ok(Vec::new());
        }

        drop(select);

        self.poll()
    }

    /// Last fix an event was computed from, or the anchor
    pub fn last_position(&self) -> Option<&GeoCoordinate> {
        match &self.lifecycle {
            Lifecycle::Active { state, .. } => state.last_position.as_ref(),
            _ => None,
        }
    }

    pub fn window(&self) -> Option<&MotionSampleBuffer> {
        match &self.lifecycle {
            Lifecycle::Active { state, .. } => Some(&state.window),
            _ => None,
        }
    }

    pub fn stats(&self) -> SessionStats {
        self.stats
    }

    pub fn sensors(&self) -> &SensorStatus {
        &self.sensors
    }

    pub fn options(&self) -> &TrackerOptions {
        &self.options
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}

/// Everything queued right now plus whether the sender side is gone
fn drain<T>(receiver: Option<&Receiver<T>>) -> (Vec<T>, bool) {
    let Some(receiver) = receiver else {
        return (Vec::new(), false);
    };

    let mut items = Vec::new();

    loop {
        match receiver.try_recv() {
            Ok(item) => items.push(item),
            Err(TryRecvError::Empty) => return (items, false),
            Err(TryRecvError::Disconnected) => return (items, true),
        }
    }
}
