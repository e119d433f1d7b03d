//! Per-sample heart-rate deviation detection.
//!
//! A dropping pulse is an early drowsiness indicator. This classifier
//! compares every incoming reading against the rolling average of the most
//! recent readings and flags samples that fall a fixed margin below it.

/// Configuration for the deviation classifier.
#[derive(Debug, Clone)]
pub struct DeviationClassifierConfig {
    /// Number of recent readings kept in the rolling window.
    pub window: usize,
    /// Margin below the rolling average (BPM) that triggers an alarm.
    pub warning_threshold_bpm: f64,
}

impl Default for DeviationClassifierConfig {
    fn default() -> Self {
        Self {
            window: 10,
            warning_threshold_bpm: 10.0,
        }
    }
}

/// Result of classifying one heart-rate reading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DeviationAssessment {
    /// Whether this reading fell below the deviation margin.
    pub alarmed: bool,
    /// Rolling-window average including this reading.
    pub average: f64,
}

/// Rolling-average deviation classifier.
///
/// Every reading is appended to the window (oldest evicted at capacity)
/// and the average is recomputed over the window contents including the new
/// reading. The alarm condition is per-sample: each qualifying reading
/// fires on its own, and no armed state is carried between samples.
pub struct DeviationClassifier {
    config: DeviationClassifierConfig,
    window: Vec<u32>,
}

impl DeviationClassifier {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: DeviationClassifierConfig) -> Self {
        let capacity = config.window;
        Self {
            config,
            window: Vec::with_capacity(capacity),
        }
    }

    /// Create with default configuration (window 10, margin 10 BPM).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(DeviationClassifierConfig::default())
    }

    /// Classify one heart-rate reading.
    pub fn classify(&mut self, bpm: u32) -> DeviationAssessment {
        self.window.push(bpm);
        if self.window.len() > self.config.window {
            self.window.remove(0);
        }

        let sum: u64 = self.window.iter().map(|&v| u64::from(v)).sum();
        let average = sum as f64 / self.window.len() as f64;
        let alarmed = f64::from(bpm) < average - self.config.warning_threshold_bpm;

        DeviationAssessment { alarmed, average }
    }

    /// Number of readings currently in the window.
    #[must_use]
    pub fn len(&self) -> usize {
        self.window.len()
    }

    /// Whether no readings have been seen yet.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.window.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_classifier() -> DeviationClassifier {
        let mut classifier = DeviationClassifier::with_defaults();
        for bpm in [70, 72, 68, 71, 69, 70, 69, 71, 70, 70] {
            let assessment = classifier.classify(bpm);
            assert!(!assessment.alarmed, "baseline reading {bpm} must not alarm");
        }
        classifier
    }

    #[test]
    fn drop_beyond_margin_alarms() {
        let mut classifier = filled_classifier();
        // Window becomes [72,68,71,69,70,69,71,70,70,58], average 68.8;
        // 68.8 - 58 = 10.8 > 10.
        let assessment = classifier.classify(58);
        assert!(assessment.alarmed);
        assert!((assessment.average - 68.8).abs() < 1e-9);
    }

    #[test]
    fn drop_within_margin_does_not_alarm() {
        let mut classifier = filled_classifier();
        // Window average becomes 69.2; 69.2 - 62 = 7.2 < 10.
        let assessment = classifier.classify(62);
        assert!(!assessment.alarmed);
        assert!((assessment.average - 69.2).abs() < 1e-9);
    }

    #[test]
    fn window_evicts_oldest_at_capacity() {
        let mut classifier = filled_classifier();
        classifier.classify(70);
        assert_eq!(classifier.len(), 10);
    }

    #[test]
    fn first_reading_never_alarms() {
        let mut classifier = DeviationClassifier::with_defaults();
        // A lone reading is its own average.
        let assessment = classifier.classify(40);
        assert!(!assessment.alarmed);
        assert!((assessment.average - 40.0).abs() < f64::EPSILON);
    }

    #[test]
    fn no_state_carried_between_alarms() {
        let mut classifier = filled_classifier();
        assert!(classifier.classify(55).alarmed);
        // A recovered reading right after does not alarm; each sample is
        // judged on its own.
        assert!(!classifier.classify(70).alarmed);
    }
}
