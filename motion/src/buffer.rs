use std::collections::VecDeque;

use crate::MotionSample;

/// Number of samples kept in the window
pub const WINDOW_SIZE: usize = 20;

/// Bounded FIFO of the most recent acceleration magnitudes.
///
/// Oldest sample is evicted once the window is full, so the statistics always
/// describe the last [`WINDOW_SIZE`] samples in arrival order.
#[derive(Debug, Clone, PartialEq)]
pub struct MotionSampleBuffer {
    samples: VecDeque<MotionSample>,
    capacity: usize,
}

impl MotionSampleBuffer {
    pub fn new() -> Self {
        Self::with_capacity(WINDOW_SIZE)
    }

    /// Window with custom size. Zero is bumped to one so the window can hold the latest sample.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);

        Self {
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a sample, evicting the oldest one when full.
    ///
    /// Non-finite magnitudes are dropped and `false` is returned, a single
    /// `NaN` would otherwise poison the statistics until it is evicted.
    pub fn append(&mut self, sample: impl Into<MotionSample>) -> bool {
        let sample = sample.into();

        if !sample.magnitude.is_finite() {
            return false;
        }

        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }

        self.samples.push_back(sample);

        true
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples from oldest to newest
    pub fn iter(&self) -> impl Iterator<Item = &MotionSample> + '_ {
        self.samples.iter()
    }

    /// Arithmetic mean of the window, `0.0` when empty.
    pub fn mean(&self) -> f64 {
        if self.samples.is_empty() {
            return 0.0;
        }

        self.samples.iter().map(|this| this.magnitude).sum::<f64>() / self.samples.len() as f64
    }

    /// Population variance of the window, `0.0` with fewer than two samples.
    pub fn variance(&self) -> f64 {
        if self.samples.len() < 2 {
            return 0.0;
        }

        let mean = self.mean();

        self.samples
            .iter()
            .map(|this| (this.magnitude - mean).powi(2))
            .sum::<f64>()
            / self.samples.len() as f64
    }
}

impl Default for MotionSampleBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_last_twenty_in_order() {
        let mut buffer = MotionSampleBuffer::new();

        for i in 0..25 {
            buffer.append(i as f64);
        }

        let expected = (5..25).map(|i| i as f64).collect::<Vec<_>>();
        let actual = buffer.iter().map(|this| this.magnitude).collect::<Vec<_>>();

        assert_eq!(buffer.len(), 20);
        assert_eq!(expected, actual);
    }

    #[test]
    fn empty_window() {
        let buffer = MotionSampleBuffer::new();

        assert!(buffer.is_empty());
        assert_eq!(buffer.mean(), 0.0);
        assert_eq!(buffer.variance(), 0.0);
    }

    #[test]
    fn single_sample_has_no_variance() {
        let mut buffer = MotionSampleBuffer::new();
        buffer.append(12.0);

        assert_eq!(buffer.mean(), 12.0);
        assert_eq!(buffer.variance(), 0.0);
    }

    #[test]
    fn population_variance() {
        let mut buffer = MotionSampleBuffer::new();

        for magnitude in [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0] {
            buffer.append(magnitude);
        }

        assert_eq!(buffer.mean(), 5.0);
        assert_eq!(buffer.variance(), 4.0);
    }

    #[test]
    fn non_finite_samples_are_dropped() {
        let mut buffer = MotionSampleBuffer::new();

        for i in 0..19 {
            assert!(buffer.append(if i % 2 == 0 { 8.0 } else { 11.0 }));
        }

        assert!(!buffer.append(f64::NAN));
        assert!(!buffer.append(f64::INFINITY));
        assert!(!buffer.append(f64::NEG_INFINITY));

        assert_eq!(buffer.len(), 19);
        assert!(buffer.variance().is_finite());
        assert!(buffer.variance() > 2.0);
    }

    #[test]
    fn constant_signal_has_zero_variance() {
        let mut buffer = MotionSampleBuffer::new();

        for _ in 0..30 {
            buffer.append(MotionSample::new(9.81));
        }

        assert!(buffer.variance().abs() < 1e-12);
    }

    #[test]
    fn eviction_updates_statistics() {
        let mut buffer = MotionSampleBuffer::with_capacity(2);

        buffer.append(0.0);
        buffer.append(10.0);
        buffer.append(10.0);

        assert_eq!(buffer.len(), 2);
        assert_eq!(buffer.mean(), 10.0);
        assert_eq!(buffer.variance(), 0.0);
    }

    #[test]
    fn zero_capacity_still_holds_latest() {
        let mut buffer = MotionSampleBuffer::with_capacity(0);

        buffer.append(1.0);
        buffer.append(2.0);

        assert_eq!(buffer.capacity(), 1);
        assert_eq!(buffer.iter().next(), Some(&MotionSample::new(2.0)));
    }
}
