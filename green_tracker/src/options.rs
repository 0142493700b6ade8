/// Minimum displacement between fixes in meters, smaller moves are GPS jitter
const MIN_DISPLACEMENT: f64 = 20.0;

#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(default)
)]
pub struct TrackerOptions {
    /// Fixes closer than this many meters to the last recorded position are discarded
    pub min_displacement: f64,
    /// Number of acceleration samples the variance is computed over
    pub window_size: usize,
}

impl TrackerOptions {
    pub const fn new() -> Self {
        Self {
            min_displacement: MIN_DISPLACEMENT,
            window_size: motion::WINDOW_SIZE,
        }
    }

    pub const fn set_min_displacement(mut self, min_displacement: f64) -> Self {
        self.min_displacement = min_displacement;
        self
    }

    pub const fn set_window_size(mut self, window_size: usize) -> Self {
        self.window_size = window_size;
        self
    }
}

impl Default for TrackerOptions {
    fn default() -> Self {
        Self::new()
    }
}
