//! Data transfer objects for the command API.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One supported command in the capability listing.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilityDto {
    /// Command name.
    pub command: String,
    /// Human-readable description.
    pub description: String,
}

/// Response for `GET /api/v1/capabilities`.
#[derive(Debug, Clone, Serialize)]
pub struct CapabilitiesResponse {
    /// Service name.
    pub service: String,
    /// Service version.
    pub version: String,
    /// Supported commands.
    pub commands: Vec<CapabilityDto>,
}

/// Per-channel section of the monitoring report.
#[derive(Debug, Clone, Serialize)]
pub struct ChannelReport {
    /// Channel name.
    pub channel: String,
    /// Unit of the channel's values.
    pub unit: String,
    /// Most recent reading.
    pub latest: Option<f64>,
    /// Average over the retained history.
    pub average: Option<f64>,
    /// Number of retained readings.
    pub samples: usize,
    /// Timestamp of the most recent reading.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Response for `GET /api/v1/monitor`.
#[derive(Debug, Clone, Serialize)]
pub struct MonitorResponse {
    /// Whether the system is still running.
    pub running: bool,
    /// Registered alert recipient, if any.
    pub recipient: Option<String>,
    /// Per-channel readings.
    pub channels: Vec<ChannelReport>,
}

/// Request body for `PUT /api/v1/recipient`.
#[derive(Debug, Clone, Deserialize)]
pub struct SetRecipientRequest {
    /// Recipient mobile number.
    pub phone: String,
}

/// Response for `PUT /api/v1/recipient`.
#[derive(Debug, Clone, Serialize)]
pub struct SetRecipientResponse {
    /// The number that was registered.
    pub registered: String,
}

/// Response for `POST /api/v1/shutdown`.
#[derive(Debug, Clone, Serialize)]
pub struct ShutdownResponse {
    /// Always true once the running flag has been cleared.
    pub stopping: bool,
}
