//! EAR classifier with dynamic calibration and frame debounce.

use drowsewatch_core::EyeLandmarks;

use crate::geometry::average_ear;

/// Configuration for the EAR classifier.
#[derive(Debug, Clone)]
pub struct EarClassifierConfig {
    /// Number of warm-up frames used to calibrate the threshold.
    pub warmup_samples: u32,
    /// Fraction of the warm-up mean that becomes the closure threshold.
    pub threshold_scale: f64,
    /// Consecutive below-threshold frames required before arming.
    pub alarm_frames: u32,
}

impl Default for EarClassifierConfig {
    fn default() -> Self {
        Self {
            warmup_samples: 10,
            threshold_scale: 0.8,
            alarm_frames: 5,
        }
    }
}

/// Result of classifying one landmark frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EarAssessment {
    /// Whether the closure alarm is currently armed.
    pub armed: bool,
    /// The frame's averaged eye-aspect ratio.
    pub ear: f64,
    /// The calibrated closure threshold, once fixed.
    pub threshold: Option<f64>,
}

/// Classifier reducing per-frame eye geometry to a drowsiness flag.
///
/// The closure threshold is not hard-coded: the first
/// [`warmup_samples`](EarClassifierConfig::warmup_samples) frames establish
/// the subject's baseline EAR, and the threshold is fixed once as
/// `threshold_scale × mean(baseline)`. No alarm is evaluated until
/// calibration completes.
///
/// After calibration each below-threshold frame extends a run counter and
/// any at-or-above-threshold frame clears it. The alarm arms when the run
/// reaches [`alarm_frames`](EarClassifierConfig::alarm_frames), stays armed
/// while frames remain bad, and disarms on the first good frame; this is
/// re-detection, not a latch.
pub struct EarClassifier {
    config: EarClassifierConfig,
    samples_seen: u32,
    ear_sum: f64,
    threshold: Option<f64>,
    consecutive_closed: u32,
}

impl EarClassifier {
    /// Create a classifier with the given configuration.
    #[must_use]
    pub fn new(config: EarClassifierConfig) -> Self {
        Self {
            config,
            samples_seen: 0,
            ear_sum: 0.0,
            threshold: None,
            consecutive_closed: 0,
        }
    }

    /// Create with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(EarClassifierConfig::default())
    }

    /// Classify one landmark frame.
    ///
    /// Skipped frames (no face detected) must simply not be passed in;
    /// skipping mutates no state.
    pub fn classify(&mut self, landmarks: &EyeLandmarks) -> EarAssessment {
        let ear = average_ear(landmarks);

        let Some(threshold) = self.threshold else {
            self.samples_seen += 1;
            self.ear_sum += ear;
            if self.samples_seen >= self.config.warmup_samples {
                let threshold =
                    self.config.threshold_scale * (self.ear_sum / f64::from(self.samples_seen));
                tracing::info!(threshold, "EAR closure threshold calibrated");
                self.threshold = Some(threshold);
            }
            // Warm-up frames are never evaluated for alarms.
            return EarAssessment {
                armed: false,
                ear,
                threshold: self.threshold,
            };
        };

        if ear < threshold {
            self.consecutive_closed += 1;
        } else {
            self.consecutive_closed = 0;
        }

        EarAssessment {
            armed: self.consecutive_closed >= self.config.alarm_frames,
            ear,
            threshold: Some(threshold),
        }
    }

    /// The calibrated threshold, once warm-up has completed.
    #[must_use]
    pub fn threshold(&self) -> Option<f64> {
        self.threshold
    }

    /// Whether calibration is still collecting warm-up frames.
    #[must_use]
    pub fn is_calibrating(&self) -> bool {
        self.threshold.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drowsewatch_core::EyePoint;

    fn eye_with_ear(ear: f64) -> [EyePoint; 6] {
        [
            EyePoint::new(0.0, 0.0),
            EyePoint::new(0.5, ear),
            EyePoint::new(1.5, ear),
            EyePoint::new(2.0, 0.0),
            EyePoint::new(1.5, -ear),
            EyePoint::new(0.5, -ear),
        ]
    }

    fn frame(ear: f64) -> EyeLandmarks {
        EyeLandmarks::new(eye_with_ear(ear), eye_with_ear(ear))
    }

    /// Calibrate on a 0.25 baseline; the threshold lands on exactly 0.2.
    fn calibrated_classifier() -> EarClassifier {
        let mut classifier = EarClassifier::with_defaults();
        for _ in 0..10 {
            classifier.classify(&frame(0.25));
        }
        assert!(!classifier.is_calibrating());
        classifier
    }

    #[test]
    fn threshold_fixed_at_eighty_percent_of_warmup_mean() {
        let classifier = calibrated_classifier();
        let threshold = classifier.threshold().unwrap();
        assert!((threshold - 0.2).abs() < 1e-12);
    }

    #[test]
    fn no_alarm_during_warmup_even_with_closed_eyes() {
        let mut classifier = EarClassifier::with_defaults();
        for _ in 0..10 {
            let assessment = classifier.classify(&frame(0.01));
            assert!(!assessment.armed);
        }
    }

    #[test]
    fn four_closed_frames_then_one_open_never_arms() {
        let mut classifier = calibrated_classifier();
        for _ in 0..4 {
            assert!(!classifier.classify(&frame(0.1)).armed);
        }
        assert!(!classifier.classify(&frame(0.25)).armed);
        // The interrupted run must start over.
        for _ in 0..4 {
            assert!(!classifier.classify(&frame(0.1)).armed);
        }
    }

    #[test]
    fn five_consecutive_closed_frames_arm() {
        let mut classifier = calibrated_classifier();
        for _ in 0..4 {
            assert!(!classifier.classify(&frame(0.1)).armed);
        }
        assert!(classifier.classify(&frame(0.1)).armed);
    }

    #[test]
    fn stays_armed_while_frames_stay_closed() {
        let mut classifier = calibrated_classifier();
        for _ in 0..5 {
            classifier.classify(&frame(0.1));
        }
        assert!(classifier.classify(&frame(0.1)).armed);
        assert!(classifier.classify(&frame(0.1)).armed);
    }

    #[test]
    fn one_open_frame_disarms_immediately() {
        let mut classifier = calibrated_classifier();
        for _ in 0..6 {
            classifier.classify(&frame(0.1));
        }
        let assessment = classifier.classify(&frame(0.25));
        assert!(!assessment.armed);
    }

    #[test]
    fn at_threshold_counts_as_open() {
        let mut classifier = calibrated_classifier();
        // Threshold is 0.2; a frame at exactly 0.2 is not "below".
        for _ in 0..4 {
            classifier.classify(&frame(0.1));
        }
        assert!(!classifier.classify(&frame(0.2)).armed);
        for _ in 0..4 {
            assert!(!classifier.classify(&frame(0.1)).armed);
        }
    }

    #[test]
    fn assessment_reports_ear_and_threshold() {
        let mut classifier = calibrated_classifier();
        let assessment = classifier.classify(&frame(0.15));
        assert!((assessment.ear - 0.15).abs() < 1e-12);
        assert!((assessment.threshold.unwrap() - 0.2).abs() < 1e-12);
    }
}
