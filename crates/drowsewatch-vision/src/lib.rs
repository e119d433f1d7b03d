//! Eye-closure drowsiness detection from facial eye landmarks.
//!
//! Reduces per-frame eye-contour geometry to a drowsiness flag in two
//! stages:
//!
//! 1. **Geometry** ([`eye_aspect_ratio`]): the dimensionless eye-aspect
//!    ratio (EAR) from six contour points per eye, averaged over both eyes.
//!    EAR drops toward zero as the eyelid closes.
//! 2. **Classification** ([`EarClassifier`]): dynamic threshold calibration
//!    over a warm-up window, then frame debounce: the alarm arms only when
//!    the EAR stays below the calibrated threshold for a run of consecutive
//!    frames, and disarms the instant one open-eye frame arrives.
//!
//! Frames without a detected face never reach the classifier; the caller
//! simply skips them, which leaves calibration and debounce state untouched.
//!
//! # Example
//!
//! ```
//! use drowsewatch_vision::{EarClassifier, EarClassifierConfig};
//! use drowsewatch_core::{EyeLandmarks, EyePoint};
//!
//! let mut classifier = EarClassifier::with_defaults();
//!
//! // Feed calibration frames (open eyes), then closed-eye frames.
//! let open = EyeLandmarks::new(
//!     [
//!         EyePoint::new(0.0, 0.0),
//!         EyePoint::new(0.5, 0.3),
//!         EyePoint::new(1.5, 0.3),
//!         EyePoint::new(2.0, 0.0),
//!         EyePoint::new(1.5, -0.3),
//!         EyePoint::new(0.5, -0.3),
//!     ],
//!     [
//!         EyePoint::new(0.0, 0.0),
//!         EyePoint::new(0.5, 0.3),
//!         EyePoint::new(1.5, 0.3),
//!         EyePoint::new(2.0, 0.0),
//!         EyePoint::new(1.5, -0.3),
//!         EyePoint::new(0.5, -0.3),
//!     ],
//! );
//!
//! let assessment = classifier.classify(&open);
//! assert!(!assessment.armed);
//! ```

#![forbid(unsafe_code)]

pub mod classifier;
pub mod geometry;

pub use classifier::{EarAssessment, EarClassifier, EarClassifierConfig};
pub use geometry::{average_ear, eye_aspect_ratio};
