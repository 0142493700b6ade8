use log::{debug, warn};
use time::OffsetDateTime;

use crate::{ActivityEvent, ActivitySink, TrackerError, ValidationError};

/// Build a manual entry.
///
/// Points and carbon are taken as the user typed them, nothing is derived.
/// The name is trimmed, an empty name or non-positive points are rejected.
pub fn manual_event(
    name: &str,
    points_earned: i64,
    carbon_saved_kg: f64,
) -> Result<ActivityEvent, ValidationError> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::EmptyName);
    }

    if points_earned <= 0 {
        return Err(ValidationError::NonPositivePoints(points_earned));
    }

    let points = u32::try_from(points_earned)
        .map_err(|_| ValidationError::PointsOutOfRange(points_earned))?;

    if !carbon_saved_kg.is_finite() {
        return Err(ValidationError::NonFiniteCarbon(carbon_saved_kg));
    }

    Ok(ActivityEvent::manual(
        name.to_owned(),
        points,
        carbon_saved_kg,
        OffsetDateTime::now_utc(),
    ))
}

/// Feeds user-submitted activities into the same sink contract as tracking.
#[derive(Debug)]
pub struct ManualActivityLogger<S> {
    sink: S,
}

impl<S: ActivitySink> ManualActivityLogger<S> {
    pub fn new(sink: S) -> Self {
        Self { sink }
    }

    /// Validate and hand the entry to the sink.
    ///
    /// Invalid entries never reach the sink. The returned event is a copy of
    /// what the sink received.
    pub fn log_manual(
        &mut self,
        name: &str,
        points_earned: i64,
        carbon_saved_kg: f64,
    ) -> Result<ActivityEvent, TrackerError> {
        let event = manual_event(name, points_earned, carbon_saved_kg)
            .inspect_err(|e| debug!("manual entry rejected: {e}"))?;

        self.sink
            .accept(event.clone())
            .inspect_err(|e| warn!("manual entry `{}` was not delivered: {e}", event.name()))?;

        Ok(event)
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn into_sink(self) -> S {
        self.sink
    }
}
