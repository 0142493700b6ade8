use std::fmt;

use carbon_saved::Footprint;
use gps::{Distance, GeoCoordinate};
use time::{OffsetDateTime, format_description::well_known::Rfc3339};
use transport_mode::ActivityLabel;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum SourceType {
    Gps,
    Manual,
}

/// What the user did: a detected transport mode or whatever they typed in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "type", content = "value", rename_all = "snake_case")
)]
pub enum ActivityName {
    Detected(ActivityLabel),
    Custom(String),
}

impl fmt::Display for ActivityName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActivityName::Detected(label) => fmt::Display::fmt(label, f),
            ActivityName::Custom(name) => f.write_str(name),
        }
    }
}

/// Finished activity handed to an [`crate::ActivitySink`].
///
/// Built once and never changed afterwards, fields are read-only.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ActivityEvent {
    name: ActivityName,
    distance_km: f64,
    points_earned: u32,
    carbon_saved_kg: f64,
    #[cfg_attr(feature = "serde", serde(with = "time::serde::rfc3339"))]
    timestamp: OffsetDateTime,
    location: Option<GeoCoordinate>,
    source: SourceType,
}

impl ActivityEvent {
    pub(crate) fn tracked(
        label: ActivityLabel,
        distance: Distance,
        Footprint {
            carbon_saved_kg,
            points_earned,
        }: Footprint,
        location: GeoCoordinate,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            name: ActivityName::Detected(label),
            distance_km: distance.as_kilometers(),
            points_earned,
            carbon_saved_kg,
            timestamp,
            location: Some(location),
            source: SourceType::Gps,
        }
    }

    pub(crate) fn manual(
        name: String,
        points_earned: u32,
        carbon_saved_kg: f64,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            name: ActivityName::Custom(name),
            distance_km: 0.0,
            points_earned,
            carbon_saved_kg,
            timestamp,
            location: None,
            source: SourceType::Manual,
        }
    }

    pub fn name(&self) -> &ActivityName {
        &self.name
    }

    /// Detected transport mode, `None` for manual entries
    pub fn label(&self) -> Option<ActivityLabel> {
        match self.name {
            ActivityName::Detected(label) => Some(label),
            ActivityName::Custom(_) => None,
        }
    }

    pub fn distance(&self) -> Distance {
        Distance::from_kilometers(self.distance_km)
    }

    pub fn distance_km(&self) -> f64 {
        self.distance_km
    }

    pub fn points_earned(&self) -> u32 {
        self.points_earned
    }

    pub fn carbon_saved_kg(&self) -> f64 {
        self.carbon_saved_kg
    }

    pub fn timestamp(&self) -> OffsetDateTime {
        self.timestamp
    }

    /// Timestamp as RFC 3339 text, e.g. `2024-01-01T08:30:00Z`
    pub fn timestamp_iso(&self) -> Result<String, time::error::Format> {
        self.timestamp.format(&Rfc3339)
    }

    pub fn location(&self) -> Option<&GeoCoordinate> {
        self.location.as_ref()
    }

    pub fn source(&self) -> SourceType {
        self.source
    }
}


#[cfg(all(test, feature = "serde"))]
mod serde_tests {
    use super::*;

    use time::macros::datetime;

    #[test]
    fn manual_name_matching_a_label_stays_custom() {
        let event = ActivityEvent::manual(
            "walking".to_owned(),
            5,
            0.5,
            datetime!(2024-01-01 08:30:00 UTC),
        );

        let json = serde_json::to_string(&event).unwrap();
        let actual = serde_json::from_str::<ActivityEvent>(&json).unwrap();

        assert_eq!(actual.label(), None);
        assert_eq!(actual, event);
    }

    #[test]
    fn tracked_event_round_trip() {
        let location = GeoCoordinate::new(12.5, 77.25).with_speed(12.5);
        let distance = Distance::from_meters(250.0);
        let event = ActivityEvent::tracked(
            ActivityLabel::Car,
            distance,
            Footprint::new(ActivityLabel::Car, distance),
            location,
            datetime!(2024-01-01 08:30:00 UTC),
        );

        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["name"]["type"], "detected");
        assert_eq!(json["name"]["value"], "car");
        assert_eq!(json["distance_km"], 0.25);
        assert_eq!(json["timestamp"], "2024-01-01T08:30:00Z");
        assert_eq!(json["source"], "gps");

        let actual = serde_json::from_value::<ActivityEvent>(json).unwrap();

        assert_eq!(actual, event);
        assert_eq!(actual.label(), Some(ActivityLabel::Car));
    }
}
