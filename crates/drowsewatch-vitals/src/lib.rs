//! Heart-rate anomaly detection for drowsiness monitoring.
//!
//! Two independently deployable detectors layered on the same raw BPM
//! stream:
//!
//! 1. **Per-sample deviation** ([`DeviationClassifier`]): maintains a
//!    rolling window of recent readings and flags any sample that falls
//!    more than a fixed margin below the window average. Each qualifying
//!    sample fires independently; there is no multi-sample debounce.
//! 2. **Batch trend analysis** ([`BatchDetector`]): collects fixed-size
//!    batches of raw readings and checks each completed batch for a low
//!    average (absolute floor) and for a flat pulse (max-minus-min below a
//!    spread threshold). Warnings from either sub-condition accumulate in a
//!    shared counter; enough consecutive warnings signal drowsiness.
//!
//! Which detector drives alerting is a deployment choice made by the
//! channel worker, not by this crate.
//!
//! Raw serial lines are decoded with [`parse_heart_rate_line`]; non-numeric
//! lines are discarded with no state mutation.
//!
//! # Example
//!
//! ```
//! use drowsewatch_vitals::DeviationClassifier;
//!
//! let mut classifier = DeviationClassifier::with_defaults();
//! for bpm in [70, 72, 68, 71, 69, 70, 69, 71, 70, 70] {
//!     assert!(!classifier.classify(bpm).alarmed);
//! }
//! // 58 BPM is more than 10 below the window average.
//! assert!(classifier.classify(58).alarmed);
//! ```

#![forbid(unsafe_code)]

pub mod batch;
pub mod deviation;
pub mod stream;

pub use batch::{BatchDetector, BatchDetectorConfig, BatchOutcome};
pub use deviation::{DeviationAssessment, DeviationClassifier, DeviationClassifierConfig};
pub use stream::parse_heart_rate_line;
