/// Single fix reported by a position source.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeoCoordinate {
    pub latitude: f64,
    pub longitude: f64,
    /// Ground speed in meters per second as reported by the platform
    pub speed: Option<f64>,
}

impl GeoCoordinate {
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
            speed: None,
        }
    }

    pub const fn with_speed(mut self, speed: f64) -> Self {
        self.speed = Some(speed);
        self
    }

    /// Reported speed with missing, negative and non-finite values mapped to `0.0`.
    ///
    /// Platforms disagree on what they report when speed is unknown
    /// (absent, `-1`, `NaN`), so every consumer should read speed through this.
    pub fn speed_mps(&self) -> f64 {
        match self.speed {
            Some(speed) if speed.is_finite() && speed > 0.0 => speed,
            _ => 0.0,
        }
    }

    pub fn speed_kmh(&self) -> f64 {
        self.speed_mps() * 3.6
    }

    /// Finite latitude within ±90° and finite longitude within ±180°.
    pub fn is_valid(&self) -> bool {
        self.latitude.is_finite()
            && self.longitude.is_finite()
            && (-90.0..=90.0).contains(&self.latitude)
            && (-180.0..=180.0).contains(&self.longitude)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(transparent)
)]
pub struct Distance(f64);

impl Distance {
    pub const fn from_meters(m: f64) -> Self {
        Self(m)
    }

    pub const fn from_kilometers(km: f64) -> Self {
        Self(km * 1000.0)
    }

    pub const fn as_meters(self) -> f64 {
        self.0
    }

    pub const fn as_kilometers(self) -> f64 {
        self.0 / 1000.0
    }
}
