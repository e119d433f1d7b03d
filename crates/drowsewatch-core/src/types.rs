//! Core data types for the drowsewatch system.
//!
//! These types model the data flowing between the external sample sources,
//! the per-channel classifiers, the monitoring store, and the alert
//! dispatcher.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A sensor channel fused by the monitoring system.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Channel {
    /// Facial eye-closure video (eye-aspect-ratio per frame).
    Visual,
    /// Heart-rate pulses in beats per minute.
    HeartRate,
    /// Cabin CO2 concentration in parts per million.
    Co2,
}

impl Channel {
    /// All channels, in snapshot display order.
    pub const ALL: [Channel; 3] = [Channel::Visual, Channel::HeartRate, Channel::Co2];

    /// Stable lowercase name, used in logs and API responses.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Channel::Visual => "visual",
            Channel::HeartRate => "heart_rate",
            Channel::Co2 => "co2",
        }
    }

    /// Unit of the channel's sample values.
    #[must_use]
    pub const fn unit(&self) -> &'static str {
        match self {
            Channel::Visual => "ratio",
            Channel::HeartRate => "bpm",
            Channel::Co2 => "ppm",
        }
    }
}

impl std::fmt::Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// One decoded reading from a sensor channel.
///
/// Value semantics depend on the channel: EAR ratio (visual), beats per
/// minute (heart rate), parts per million (CO2).
#[derive(Debug, Clone, PartialEq)]
pub struct SignalSample {
    /// Channel the sample originated from.
    pub channel: Channel,
    /// Decoded value in the channel's unit.
    pub value: f64,
    /// Time the sample was decoded.
    pub timestamp: DateTime<Utc>,
}

impl SignalSample {
    /// Create a sample stamped with the current time.
    #[must_use]
    pub fn now(channel: Channel, value: f64) -> Self {
        Self {
            channel,
            value,
            timestamp: Utc::now(),
        }
    }
}

/// A single 2D eye-contour point, in pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EyePoint {
    pub x: f64,
    pub y: f64,
}

impl EyePoint {
    /// Create a point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to another point.
    #[must_use]
    pub fn distance(&self, other: &EyePoint) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// Per-frame eye-landmark geometry produced by the external facial-landmark
/// extractor.
///
/// Each eye contributes six contour points in the standard landmark order:
/// p1 (outer corner), p2/p3 (upper lid), p4 (inner corner), p5/p6
/// (lower lid). Frames without a detected face produce no landmarks at all.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EyeLandmarks {
    /// Left-eye contour points p1..p6.
    pub left: [EyePoint; 6],
    /// Right-eye contour points p1..p6.
    pub right: [EyePoint; 6],
}

impl EyeLandmarks {
    /// Create landmarks from both eye contours.
    #[must_use]
    pub const fn new(left: [EyePoint; 6], right: [EyePoint; 6]) -> Self {
        Self { left, right }
    }
}

/// The channel condition that produced an alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AlertReason {
    /// Sustained eye closure on the visual channel.
    Visual,
    /// Heart-rate anomaly.
    HeartRate,
}

impl AlertReason {
    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            AlertReason::Visual => "visual",
            AlertReason::HeartRate => "heart_rate",
        }
    }
}

impl std::fmt::Display for AlertReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

/// Unique identifier for an alert event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AlertId(Uuid);

impl AlertId {
    /// Generate a fresh id.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    /// Access the underlying UUID.
    #[must_use]
    pub const fn as_uuid(&self) -> &Uuid {
        &self.0
    }
}

impl Default for AlertId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for AlertId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

/// An alarm decision emitted by a classifier, consumed by the alert
/// dispatcher.
#[derive(Debug, Clone, PartialEq)]
pub struct AlertEvent {
    /// Unique event id.
    pub id: AlertId,
    /// Which channel condition fired.
    pub reason: AlertReason,
    /// Human-readable warning text, spoken and sent as-is.
    pub message: String,
    /// Time the classifier armed.
    pub timestamp: DateTime<Utc>,
}

impl AlertEvent {
    /// Create an event stamped with a fresh id and the current time.
    #[must_use]
    pub fn new(reason: AlertReason, message: impl Into<String>) -> Self {
        Self {
            id: AlertId::new(),
            reason,
            message: message.into(),
            timestamp: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn channel_names_are_stable() {
        assert_eq!(Channel::Visual.name(), "visual");
        assert_eq!(Channel::HeartRate.name(), "heart_rate");
        assert_eq!(Channel::Co2.name(), "co2");
    }

    #[test]
    fn channel_units() {
        assert_eq!(Channel::Visual.unit(), "ratio");
        assert_eq!(Channel::HeartRate.unit(), "bpm");
        assert_eq!(Channel::Co2.unit(), "ppm");
    }

    #[test]
    fn eye_point_distance() {
        let a = EyePoint::new(0.0, 0.0);
        let b = EyePoint::new(3.0, 4.0);
        assert!((a.distance(&b) - 5.0).abs() < f64::EPSILON);
    }

    #[test]
    fn sample_now_carries_channel_and_value() {
        let sample = SignalSample::now(Channel::HeartRate, 72.0);
        assert_eq!(sample.channel, Channel::HeartRate);
        assert!((sample.value - 72.0).abs() < f64::EPSILON);
    }

    #[test]
    fn alert_events_get_unique_ids() {
        let a = AlertEvent::new(AlertReason::Visual, "warning");
        let b = AlertEvent::new(AlertReason::Visual, "warning");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn alert_reason_display() {
        assert_eq!(AlertReason::HeartRate.to_string(), "heart_rate");
    }
}
