//! Shared monitoring state store.
//!
//! The process-wide snapshot of the most recent readings per channel, the
//! registered alert recipient, and the running flag. All classifier workers
//! and the command API interact with this state exclusively through the
//! operations here, never through shared bare fields, so the concurrency
//! contract lives in one place.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use drowsewatch_core::{Channel, PhoneNumber, SignalSample};

/// Thread-safe monitoring state store.
///
/// Cheap to clone; all clones share the same state. Readings are appended
/// per channel with a bounded history (oldest evicted), the recipient is a
/// single registered value, and the running flag is the cooperative
/// cancellation signal every worker polls at its loop boundary.
#[derive(Clone)]
pub struct MonitorStore {
    inner: Arc<StoreInner>,
}

struct StoreInner {
    /// Per-channel sample history (most recent last).
    channels: RwLock<HashMap<Channel, Vec<SignalSample>>>,
    /// Registered alert recipient, if any.
    recipient: RwLock<Option<PhoneNumber>>,
    /// Process-wide running flag.
    running: AtomicBool,
    /// Maximum readings retained per channel.
    history_bound: usize,
}

/// Point-in-time view of one channel.
#[derive(Debug, Clone, PartialEq)]
pub struct ChannelSnapshot {
    /// Most recent reading.
    pub latest: Option<f64>,
    /// Average over the retained history.
    pub average: Option<f64>,
    /// Retained reading values, oldest first.
    pub history: Vec<f64>,
    /// Timestamp of the most recent reading.
    pub last_updated: Option<DateTime<Utc>>,
}

/// Point-in-time view of the whole store.
#[derive(Debug, Clone)]
pub struct MonitorSnapshot {
    /// Per-channel views, in [`Channel::ALL`] order.
    pub channels: Vec<(Channel, ChannelSnapshot)>,
    /// Registered alert recipient, if any.
    pub recipient: Option<PhoneNumber>,
    /// Whether the system is still running.
    pub running: bool,
}

impl MonitorStore {
    /// Create a store retaining up to `history_bound` readings per channel.
    #[must_use]
    pub fn new(history_bound: usize) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                channels: RwLock::new(HashMap::new()),
                recipient: RwLock::new(None),
                running: AtomicBool::new(true),
                history_bound: history_bound.max(1),
            }),
        }
    }

    /// Create with the default history bound (600 readings per channel).
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(600)
    }

    /// Record a decoded sample, evicting the oldest at capacity.
    pub fn record(&self, sample: SignalSample) {
        let mut channels = self.inner.channels.write();
        let history = channels.entry(sample.channel).or_default();
        if history.len() >= self.inner.history_bound {
            history.remove(0);
        }
        history.push(sample);
    }

    /// Most recent reading for a channel.
    #[must_use]
    pub fn latest(&self, channel: Channel) -> Option<f64> {
        self.inner
            .channels
            .read()
            .get(&channel)
            .and_then(|h| h.last().map(|s| s.value))
    }

    /// Average over a channel's retained history.
    #[must_use]
    pub fn average(&self, channel: Channel) -> Option<f64> {
        let channels = self.inner.channels.read();
        let history = channels.get(&channel)?;
        if history.is_empty() {
            return None;
        }
        Some(history.iter().map(|s| s.value).sum::<f64>() / history.len() as f64)
    }

    /// Point-in-time view of every channel plus the recipient registration.
    #[must_use]
    pub fn snapshot(&self) -> MonitorSnapshot {
        let channels_guard = self.inner.channels.read();
        let channels = Channel::ALL
            .iter()
            .map(|&channel| {
                let samples = channels_guard.get(&channel);
                let history: Vec<f64> = samples
                    .map(|h| h.iter().map(|s| s.value).collect())
                    .unwrap_or_default();
                let average = if history.is_empty() {
                    None
                } else {
                    Some(history.iter().sum::<f64>() / history.len() as f64)
                };
                (
                    channel,
                    ChannelSnapshot {
                        latest: history.last().copied(),
                        average,
                        last_updated: samples.and_then(|h| h.last().map(|s| s.timestamp)),
                        history,
                    },
                )
            })
            .collect();
        drop(channels_guard);

        MonitorSnapshot {
            channels,
            recipient: self.recipient(),
            running: self.is_running(),
        }
    }

    /// Register the alert recipient.
    pub fn set_recipient(&self, phone: PhoneNumber) {
        *self.inner.recipient.write() = Some(phone);
    }

    /// Clear the alert recipient registration.
    pub fn clear_recipient(&self) {
        *self.inner.recipient.write() = None;
    }

    /// The registered alert recipient, if any.
    #[must_use]
    pub fn recipient(&self) -> Option<PhoneNumber> {
        self.inner.recipient.read().clone()
    }

    /// Request cooperative shutdown of every worker.
    pub fn request_shutdown(&self) {
        self.inner.running.store(false, Ordering::SeqCst);
    }

    /// Whether workers should keep running.
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.inner.running.load(Ordering::SeqCst)
    }

    /// The configured per-channel history bound.
    #[must_use]
    pub fn history_bound(&self) -> usize {
        self.inner.history_bound
    }
}
