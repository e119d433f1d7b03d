//! Alert dispatching to the configured sinks.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use drowsewatch_core::{AlertEvent, AlertReason, PhoneNumber};

use crate::store::MonitorStore;
use crate::MonitorError;

/// Configuration for alert dispatch.
#[derive(Debug, Clone)]
pub struct AlertConfig {
    /// Optional per-reason cooldown between dispatches.
    ///
    /// The base system dispatches every armed event with no
    /// deduplication window; repeated SMS sends under a sustained alarm
    /// are the documented behavior. Setting a cooldown suppresses
    /// same-reason dispatches inside the window.
    pub dispatch_cooldown: Option<Duration>,
}

impl Default for AlertConfig {
    fn default() -> Self {
        Self {
            dispatch_cooldown: None,
        }
    }
}

/// Handler delivering alerts to one destination.
#[async_trait::async_trait]
pub trait AlertSink: Send + Sync {
    /// Sink name, used in logs.
    fn name(&self) -> &str;

    /// Deliver one alert. `recipient` is the currently registered SMS
    /// destination; sinks that do not address a recipient ignore it.
    async fn deliver(
        &self,
        event: &AlertEvent,
        recipient: Option<&PhoneNumber>,
    ) -> Result<(), MonitorError>;
}

/// Dispatcher fanning armed events out to every configured sink.
///
/// The recipient registration is read from the store at dispatch time, so
/// a recipient registered between two alarms takes effect on the next
/// dispatch without restarting anything.
pub struct AlertDispatcher {
    config: AlertConfig,
    store: MonitorStore,
    sinks: Vec<Box<dyn AlertSink>>,
    last_dispatch: parking_lot::Mutex<HashMap<AlertReason, Instant>>,
}

impl AlertDispatcher {
    /// Create a dispatcher with no sinks attached.
    #[must_use]
    pub fn new(store: MonitorStore, config: AlertConfig) -> Self {
        Self {
            config,
            store,
            sinks: Vec::new(),
            last_dispatch: parking_lot::Mutex::new(HashMap::new()),
        }
    }

    /// Attach an alert sink.
    pub fn add_sink(&mut self, sink: Box<dyn AlertSink>) {
        self.sinks.push(sink);
    }

    /// Number of attached sinks.
    #[must_use]
    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }

    /// Dispatch one armed event to every sink, best effort.
    ///
    /// A sink failure is logged and does not stop delivery to the
    /// remaining sinks or propagate to the calling worker.
    pub async fn dispatch(&self, event: AlertEvent) {
        if self.in_cooldown(event.reason) {
            tracing::debug!(
                alert_id = %event.id,
                reason = %event.reason,
                "Suppressing alert inside dispatch cooldown"
            );
            return;
        }

        let recipient = self.store.recipient();

        tracing::info!(
            alert_id = %event.id,
            reason = %event.reason,
            message = %event.message,
            "Dispatching alert"
        );

        for sink in &self.sinks {
            if let Err(e) = sink.deliver(&event, recipient.as_ref()).await {
                tracing::warn!(
                    alert_id = %event.id,
                    sink = %sink.name(),
                    error = %e,
                    "Sink failed to deliver alert"
                );
            }
        }
    }

    /// Check the cooldown window and, when dispatch proceeds, stamp it.
    fn in_cooldown(&self, reason: AlertReason) -> bool {
        let Some(cooldown) = self.config.dispatch_cooldown else {
            return false;
        };

        let mut last = self.last_dispatch.lock();
        let now = Instant::now();
        if let Some(previous) = last.get(&reason) {
            if now.duration_since(*previous) < cooldown {
                return true;
            }
        }
        last.insert(reason, now);
        false
    }

    /// Get configuration.
    #[must_use]
    pub fn config(&self) -> &AlertConfig {
        &self.config
    }
}
