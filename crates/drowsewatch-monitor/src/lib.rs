//! # Drowsewatch Monitor
//!
//! Monitoring core for the drowsewatch driver-drowsiness system: the shared
//! monitoring store, the per-channel worker loops, the alert dispatcher with
//! its voice and SMS sinks, and the remote command API.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                   drowsewatch-monitor                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌──────────┐   ┌──────────────┐   ┌─────────────────┐   │
//! │  │ Channel  │   │  Monitoring  │   │     Alert       │   │
//! │  │ Workers  ├──▶│    Store     │   │   Dispatcher    │   │
//! │  └────┬─────┘   └──────▲───────┘   └────────▲────────┘   │
//! │       │                │                     │            │
//! │       └────────────────┼─────────────────────┘            │
//! │                 ┌──────┴───────┐                          │
//! │                 │ Command API  │                          │
//! │                 └──────────────┘                          │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! One worker runs per sensor channel, blocking on its sample feed with a
//! bounded timeout so the process-wide running flag is observed even when a
//! device goes silent. Workers write every decoded value into the
//! [`MonitorStore`] and hand armed decisions to the [`AlertDispatcher`],
//! which fans out to the configured sinks. The command API reads the store
//! and writes the recipient registration; it never talks to the workers
//! directly.

#![forbid(unsafe_code)]

pub mod alerting;
pub mod api;
pub mod store;
pub mod worker;

pub use alerting::{
    AlertConfig, AlertDispatcher, AlertSink, ConsoleSpeaker, LoggingSmsTransport, SmsAlertSink,
    SmsCredentials, SmsTransport, SpeechEngine, VoiceAlertSink,
};
pub use api::{create_router, ApiError};
pub use store::{ChannelSnapshot, MonitorSnapshot, MonitorStore};
pub use worker::{
    run_cabin_worker, run_heart_rate_worker, run_visual_worker, HeartRateMode, WorkerConfig,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Common result type for monitor operations.
pub type Result<T> = std::result::Result<T, MonitorError>;

/// Unified error type for monitor operations.
#[derive(Debug, thiserror::Error)]
pub enum MonitorError {
    /// Alert sink failure
    #[error("Sink error: {sink}: {message}")]
    Sink {
        /// Name of the failing sink
        sink: String,
        /// Description of the failure
        message: String,
    },

    /// Core domain error
    #[error("Core error: {0}")]
    Core(#[from] drowsewatch_core::CoreError),

    /// Cabin telemetry parse error
    #[error("Telemetry parse error: {0}")]
    Parse(#[from] drowsewatch_cabin::ParseError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl MonitorError {
    /// Creates a new sink error.
    #[must_use]
    pub fn sink(sink: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Sink {
            sink: sink.into(),
            message: message.into(),
        }
    }
}

/// Configuration for the monitoring runtime.
#[derive(Debug, Clone)]
pub struct MonitorConfig {
    /// Bounded history depth kept per channel.
    pub history_per_channel: usize,
    /// Read timeout on every worker's sample feed.
    pub read_timeout: std::time::Duration,
    /// Deployment mode of the heart-rate channel.
    pub heart_rate_mode: HeartRateMode,
    /// Alert dispatch configuration.
    pub alert_config: AlertConfig,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            history_per_channel: 600,
            read_timeout: std::time::Duration::from_millis(500),
            heart_rate_mode: HeartRateMode::Deviation,
            alert_config: AlertConfig::default(),
        }
    }
}

impl MonitorConfig {
    /// Create a new configuration builder.
    #[must_use]
    pub fn builder() -> MonitorConfigBuilder {
        MonitorConfigBuilder::default()
    }

    /// Worker configuration derived from this config.
    #[must_use]
    pub fn worker_config(&self) -> WorkerConfig {
        WorkerConfig {
            read_timeout: self.read_timeout,
        }
    }
}

/// Builder for [`MonitorConfig`].
#[derive(Debug, Default)]
pub struct MonitorConfigBuilder {
    config: MonitorConfig,
}

impl MonitorConfigBuilder {
    /// Set the per-channel history bound (at least one entry).
    #[must_use]
    pub fn history_per_channel(mut self, depth: usize) -> Self {
        self.config.history_per_channel = depth.max(1);
        self
    }

    /// Set the worker read timeout.
    #[must_use]
    pub fn read_timeout(mut self, timeout: std::time::Duration) -> Self {
        self.config.read_timeout = timeout;
        self
    }

    /// Set the heart-rate deployment mode.
    #[must_use]
    pub fn heart_rate_mode(mut self, mode: HeartRateMode) -> Self {
        self.config.heart_rate_mode = mode;
        self
    }

    /// Set the alert dispatch configuration.
    #[must_use]
    pub fn alert_config(mut self, alert_config: AlertConfig) -> Self {
        self.config.alert_config = alert_config;
        self
    }

    /// Build the configuration.
    #[must_use]
    pub fn build(self) -> MonitorConfig {
        self.config
    }
}
