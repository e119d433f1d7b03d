//! Eye-aspect-ratio geometry.

use drowsewatch_core::{EyeLandmarks, EyePoint};

/// Compute the eye-aspect ratio for one eye contour.
///
/// With the six contour points ordered p1 (outer corner), p2/p3 (upper
/// lid), p4 (inner corner), p5/p6 (lower lid):
///
/// ```text
/// EAR = (‖p2 − p6‖ + ‖p3 − p5‖) / (2 · ‖p1 − p4‖)
/// ```
///
/// The two vertical lid distances shrink as the eye closes while the
/// horizontal span stays fixed, so EAR falls toward zero on closure.
#[must_use]
pub fn eye_aspect_ratio(eye: &[EyePoint; 6]) -> f64 {
    let vertical_a = eye[1].distance(&eye[5]);
    let vertical_b = eye[2].distance(&eye[4]);
    let horizontal = eye[0].distance(&eye[3]);
    (vertical_a + vertical_b) / (2.0 * horizontal)
}

/// Average EAR over both eyes of a landmark frame.
#[must_use]
pub fn average_ear(landmarks: &EyeLandmarks) -> f64 {
    (eye_aspect_ratio(&landmarks.left) + eye_aspect_ratio(&landmarks.right)) / 2.0
}
