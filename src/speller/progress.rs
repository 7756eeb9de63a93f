use super::types::{ProgressUpdate, RunPhase};

/// Upper bound of the extraction band; checking covers the rest
pub const EXTRACTION_SHARE: f64 = 50.0;

/// Maps phase-local counters onto the overall 0-100 scale.
///
/// Values are clamped into the band of their phase and never go below the
/// last value handed out, so a consumer only ever sees a non-decreasing stream.
#[derive(Debug, Default)]
pub struct ProgressTracker {
    last: f64,
}

impl ProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent value handed out
    pub fn last(&self) -> f64 {
        self.last
    }

    /// `done` of `total` extraction units consumed. `None` when there is nothing to measure.
    pub fn extraction(&mut self, done: usize, total: usize) -> Option<ProgressUpdate> {
        let fraction = Self::fraction(done, total)?;
        let percent = self.advance(fraction * EXTRACTION_SHARE, 0.0, EXTRACTION_SHARE);
        Some(ProgressUpdate {
            phase: RunPhase::Extracting,
            percent,
            current: done,
            total,
        })
    }

    /// `done` of `total` tokens checked
    pub fn checking(&mut self, done: usize, total: usize) -> Option<ProgressUpdate> {
        let fraction = Self::fraction(done, total)?;
        let percent = self.advance(
            EXTRACTION_SHARE + fraction * (100.0 - EXTRACTION_SHARE),
            EXTRACTION_SHARE,
            100.0,
        );
        Some(ProgressUpdate {
            phase: RunPhase::Checking,
            percent,
            current: done,
            total,
        })
    }

    /// Final 100% for a finished run
    pub fn complete(&mut self, total: usize) -> ProgressUpdate {
        let percent = self.advance(100.0, EXTRACTION_SHARE, 100.0);
        ProgressUpdate {
            phase: RunPhase::Checking,
            percent,
            current: total,
            total,
        }
    }

    fn fraction(done: usize, total: usize) -> Option<f64> {
        if total == 0 {
            return None;
        }
        Some((done.min(total) as f64) / (total as f64))
    }

    fn advance(&mut self, value: f64, floor: f64, ceiling: f64) -> f64 {
        let value = value.clamp(floor, ceiling).max(self.last);
        self.last = value;
        value
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_band() {
        let mut tracker = ProgressTracker::new();
        let values: Vec<f64> = (1..=4)
            .filter_map(|i| tracker.extraction(i, 4))
            .map(|p| p.percent)
            .collect();
        assert_eq!(values, vec![12.5, 25.0, 37.5, 50.0]);
    }

    #[test]
    fn test_zero_total_emits_nothing() {
        let mut tracker = ProgressTracker::new();
        assert!(tracker.extraction(0, 0).is_none());
        assert!(tracker.checking(1, 0).is_none());
        assert_eq!(tracker.last(), 0.0);
    }

    #[test]
    fn test_checking_band_starts_at_fifty() {
        let mut tracker = ProgressTracker::new();
        let first = tracker.checking(1, 10).unwrap();
        assert_eq!(first.phase, RunPhase::Checking);
        assert!((first.percent - 55.0).abs() < 1e-9);
        assert_eq!(tracker.checking(10, 10).unwrap().percent, 100.0);
    }

    #[test]
    fn test_never_decreases() {
        let mut tracker = ProgressTracker::new();
        tracker.checking(8, 10);
        let later = tracker.checking(2, 10).unwrap();
        assert!((later.percent - 90.0).abs() < 1e-9);
    }

    #[test]
    fn test_complete_is_one_hundred() {
        let mut tracker = ProgressTracker::new();
        tracker.extraction(1, 2);
        assert_eq!(tracker.complete(0).percent, 100.0);
    }
}
