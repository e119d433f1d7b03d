//! Batch-level heart-rate trend detection.
//!
//! Complements the per-sample deviation check with two slower indicators
//! computed over fixed-size batches of raw readings: a low batch average
//! (absolute floor) and a flat pulse (batch spread below a threshold).
//! Either condition raises a warning; warnings accumulate in a shared
//! counter and enough of them in a row signal drowsiness.

/// Configuration for the batch detector.
#[derive(Debug, Clone)]
pub struct BatchDetectorConfig {
    /// Raw readings collected before a batch is judged.
    pub batch_size: usize,
    /// Absolute floor for the batch average (BPM).
    pub low_average_bpm: f64,
    /// Max-minus-min spread below which the pulse counts as flat (BPM).
    pub flatness_bpm: f64,
    /// Accumulated warnings that signal drowsiness.
    pub warning_limit: u32,
}

impl Default for BatchDetectorConfig {
    fn default() -> Self {
        Self {
            batch_size: 10,
            low_average_bpm: 50.0,
            flatness_bpm: 5.0,
            warning_limit: 3,
        }
    }
}

/// Judgment over one completed batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BatchOutcome {
    /// Whether the warning limit was reached on this batch.
    pub drowsy: bool,
    /// Warning counter after judging this batch (0 again when `drowsy`).
    pub warnings: u32,
}

/// Fixed-batch heart-rate trend detector.
///
/// Readings accumulate until the batch is full, then the batch is judged
/// and cleared. The warning counter persists across batches: a healthy
/// batch average resets it before the flatness check runs, so a normal but
/// flat pulse keeps the counter pinned at one and never signals on its own.
pub struct BatchDetector {
    config: BatchDetectorConfig,
    batch: Vec<u32>,
    warning_counter: u32,
}

impl BatchDetector {
    /// Create a detector with the given configuration.
    #[must_use]
    pub fn new(config: BatchDetectorConfig) -> Self {
        let capacity = config.batch_size;
        Self {
            config,
            batch: Vec::with_capacity(capacity),
            warning_counter: 0,
        }
    }

    /// Create with default configuration (batch 10, floor 50 BPM, spread
    /// 5 BPM, limit 3).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(BatchDetectorConfig::default())
    }

    /// Feed one reading.
    ///
    /// Returns `Some` when this reading completed a batch and the batch was
    /// judged; `None` while the batch is still filling.
    pub fn push(&mut self, bpm: u32) -> Option<BatchOutcome> {
        self.batch.push(bpm);
        if self.batch.len() < self.config.batch_size {
            return None;
        }

        let outcome = self.judge();
        self.batch.clear();
        Some(outcome)
    }

    fn judge(&mut self) -> BatchOutcome {
        if self.batch.len() < 2 {
            return BatchOutcome {
                drowsy: false,
                warnings: self.warning_counter,
            };
        }

        let sum: u64 = self.batch.iter().map(|&v| u64::from(v)).sum();
        let average = sum as f64 / self.batch.len() as f64;

        if average < self.config.low_average_bpm {
            self.warning_counter += 1;
            tracing::warn!(average, "heart rate batch average below floor");
        } else {
            self.warning_counter = 0;
        }

        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for &bpm in &self.batch {
            let bpm = f64::from(bpm);
            min = min.min(bpm);
            max = max.max(bpm);
        }
        if max - min < self.config.flatness_bpm {
            self.warning_counter += 1;
            tracing::warn!(spread = max - min, "heart rate batch has no variation");
        }

        let drowsy = self.warning_counter >= self.config.warning_limit;
        if drowsy {
            self.warning_counter = 0;
        }

        BatchOutcome {
            drowsy,
            warnings: self.warning_counter,
        }
    }

    /// Readings in the currently filling batch.
    #[must_use]
    pub fn pending(&self) -> usize {
        self.batch.len()
    }

    /// Current accumulated warning count.
    #[must_use]
    pub fn warnings(&self) -> u32 {
        self.warning_counter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn feed_batch(detector: &mut BatchDetector, readings: [u32; 10]) -> BatchOutcome {
        let mut outcome = None;
        for bpm in readings {
            outcome = detector.push(bpm);
        }
        outcome.expect("ten readings complete a batch")
    }

    #[test]
    fn batch_judged_only_when_full() {
        let mut detector = BatchDetector::with_defaults();
        for bpm in [70, 71, 72, 70, 69, 71, 70, 72, 71] {
            assert!(detector.push(bpm).is_none());
        }
        assert_eq!(detector.pending(), 9);
        assert!(detector.push(70).is_some());
        assert_eq!(detector.pending(), 0);
    }

    #[test]
    fn healthy_varied_batch_leaves_one_warning_at_most() {
        let mut detector = BatchDetector::with_defaults();
        let outcome = feed_batch(&mut detector, [70, 75, 68, 72, 80, 65, 71, 74, 69, 73]);
        assert!(!outcome.drowsy);
        assert_eq!(outcome.warnings, 0);
    }

    #[test]
    fn low_and_flat_batches_signal_on_second_batch() {
        let mut detector = BatchDetector::with_defaults();
        // Low average and zero spread: two warnings per batch.
        let first = feed_batch(&mut detector, [45; 10]);
        assert!(!first.drowsy);
        assert_eq!(first.warnings, 2);

        let second = feed_batch(&mut detector, [45; 10]);
        assert!(second.drowsy);
        assert_eq!(second.warnings, 0);
    }

    #[test]
    fn healthy_average_resets_low_warnings() {
        let mut detector = BatchDetector::with_defaults();
        let first = feed_batch(&mut detector, [45, 46, 44, 45, 47, 43, 45, 46, 44, 55]);
        assert_eq!(first.warnings, 1);

        // Recovered average clears the counter; wide spread adds nothing.
        let second = feed_batch(&mut detector, [70, 75, 68, 72, 80, 65, 71, 74, 69, 73]);
        assert!(!second.drowsy);
        assert_eq!(second.warnings, 0);
    }

    #[test]
    fn flat_but_healthy_pulse_never_signals_alone() {
        let mut detector = BatchDetector::with_defaults();
        for _ in 0..5 {
            // Average 70 resets the counter each batch before flatness
            // raises it back to one.
            let outcome = feed_batch(&mut detector, [70; 10]);
            assert!(!outcome.drowsy);
            assert_eq!(outcome.warnings, 1);
        }
    }

    #[test]
    fn warnings_accumulate_across_mixed_batches() {
        let mut detector = BatchDetector::with_defaults();
        // Batch 1: low + flat = 2 warnings.
        assert_eq!(feed_batch(&mut detector, [45; 10]).warnings, 2);
        // Batch 2: low average only (wide spread), third warning fires.
        let outcome = feed_batch(&mut detector, [30, 60, 30, 60, 30, 60, 30, 60, 30, 60]);
        assert!(outcome.drowsy);
        assert_eq!(outcome.warnings, 0);
    }
}
