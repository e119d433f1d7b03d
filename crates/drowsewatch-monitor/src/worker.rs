//! Per-channel worker loops.
//!
//! One long-running task per sensor channel, fed by an mpsc receiver that
//! the device adapter writes into. Workers are non-cooperative with each
//! other: they share only the [`MonitorStore`] and the dispatcher. Every
//! loop iteration starts by checking the store's running flag, and the
//! sample read is bounded by a timeout so a silent device never wedges
//! that check; on timeout the worker logs at trace level and idles; on a
//! closed feed it exits, ending that channel only.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use drowsewatch_cabin::CabinPacket;
use drowsewatch_core::{AlertEvent, AlertReason, Channel, EyeLandmarks, SignalSample};
use drowsewatch_vision::EarClassifier;
use drowsewatch_vitals::{parse_heart_rate_line, BatchDetector, DeviationClassifier};

use crate::alerting::AlertDispatcher;
use crate::store::MonitorStore;

/// Warning text spoken and sent for a visual-channel alarm.
pub const VISUAL_ALERT_TEXT: &str = "Drowsy driving suspected! Pull over and rest immediately.";

/// Warning text spoken and sent for a heart-rate alarm.
pub const HEART_RATE_ALERT_TEXT: &str =
    "Drowsiness warning: heart rate has dropped below your average.";

/// Deployment mode of the heart-rate channel.
///
/// Both detectors are layered on the same raw stream; which one drives
/// alerting is chosen at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeartRateMode {
    /// Per-sample deviation from the rolling average.
    Deviation,
    /// Batch-level low-average and flat-pulse warnings.
    Batch,
}

/// Configuration shared by all channel workers.
#[derive(Debug, Clone)]
pub struct WorkerConfig {
    /// Bounded timeout on each sample read.
    pub read_timeout: Duration,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            read_timeout: Duration::from_millis(500),
        }
    }
}

/// Visual channel worker.
///
/// Classifies each landmark frame, records the EAR into the store, and
/// dispatches on the rising edge into the armed state: a sustained
/// closure produces one alert, and a fresh alert requires the alarm to
/// disarm first. Frames where no face was found never arrive on the feed,
/// so a skipped frame is "no sample this tick", not an error.
pub async fn run_visual_worker(
    store: MonitorStore,
    dispatcher: Arc<AlertDispatcher>,
    config: WorkerConfig,
    mut samples: mpsc::Receiver<EyeLandmarks>,
) {
    let mut classifier = EarClassifier::with_defaults();
    let mut was_armed = false;

    tracing::info!("visual worker started");
    while store.is_running() {
        let landmarks = match timeout(config.read_timeout, samples.recv()).await {
            Err(_) => {
                tracing::trace!("visual feed idle");
                continue;
            }
            Ok(None) => {
                tracing::warn!("visual feed closed; stopping worker");
                break;
            }
            Ok(Some(landmarks)) => landmarks,
        };

        let assessment = classifier.classify(&landmarks);
        store.record(SignalSample::now(Channel::Visual, assessment.ear));
        tracing::trace!(
            ear = assessment.ear,
            threshold = ?assessment.threshold,
            armed = assessment.armed,
            "classified frame"
        );

        if assessment.armed && !was_armed {
            dispatcher
                .dispatch(AlertEvent::new(AlertReason::Visual, VISUAL_ALERT_TEXT))
                .await;
        }
        was_armed = assessment.armed;
    }
    tracing::info!("visual worker stopped");
}

/// Heart-rate channel worker.
///
/// Parses each serial line, records valid readings, and runs the detector
/// selected by `mode`. Non-numeric lines (sensor banner text, corrupt
/// reads) are discarded with no state mutation. In deviation mode every
/// qualifying sample dispatches independently; in batch mode the detector
/// dispatches when its warning counter trips.
pub async fn run_heart_rate_worker(
    store: MonitorStore,
    dispatcher: Arc<AlertDispatcher>,
    config: WorkerConfig,
    mode: HeartRateMode,
    mut lines: mpsc::Receiver<String>,
) {
    let mut deviation = DeviationClassifier::with_defaults();
    let mut batch = BatchDetector::with_defaults();

    tracing::info!(?mode, "heart rate worker started");
    while store.is_running() {
        let line = match timeout(config.read_timeout, lines.recv()).await {
            Err(_) => {
                tracing::trace!("heart rate feed idle");
                continue;
            }
            Ok(None) => {
                tracing::warn!("heart rate feed closed; stopping worker");
                break;
            }
            Ok(Some(line)) => line,
        };

        let Some(bpm) = parse_heart_rate_line(&line) else {
            tracing::debug!(line = line.trim(), "discarding non-numeric heart rate line");
            continue;
        };

        store.record(SignalSample::now(Channel::HeartRate, f64::from(bpm)));

        match mode {
            HeartRateMode::Deviation => {
                let assessment = deviation.classify(bpm);
                tracing::debug!(bpm, average = assessment.average, "heart rate sample");
                if assessment.alarmed {
                    dispatcher
                        .dispatch(AlertEvent::new(AlertReason::HeartRate, HEART_RATE_ALERT_TEXT))
                        .await;
                }
            }
            HeartRateMode::Batch => {
                if let Some(outcome) = batch.push(bpm) {
                    tracing::debug!(
                        warnings = outcome.warnings,
                        drowsy = outcome.drowsy,
                        "heart rate batch judged"
                    );
                    if outcome.drowsy {
                        dispatcher
                            .dispatch(AlertEvent::new(AlertReason::HeartRate, HEART_RATE_ALERT_TEXT))
                            .await;
                    }
                }
            }
        }
    }
    tracing::info!("heart rate worker stopped");
}

/// Cabin CO2 channel worker.
///
/// Decodes each ten-byte telemetry packet and records CO2 readings into
/// the store. The channel is observational only and never dispatches;
/// non-CO2 message types and parse failures are dropped.
pub async fn run_cabin_worker(
    store: MonitorStore,
    config: WorkerConfig,
    mut packets: mpsc::Receiver<Vec<u8>>,
) {
    tracing::info!("cabin worker started");
    while store.is_running() {
        let bytes = match timeout(config.read_timeout, packets.recv()).await {
            Err(_) => {
                tracing::trace!("cabin feed idle");
                continue;
            }
            Ok(None) => {
                tracing::warn!("cabin feed closed; stopping worker");
                break;
            }
            Ok(Some(bytes)) => bytes,
        };

        match CabinPacket::parse(&bytes) {
            Ok(packet) => {
                if let Some(ppm) = packet.co2_ppm() {
                    store.record(SignalSample::now(Channel::Co2, ppm));
                    tracing::debug!(ppm, sequence = packet.sequence, "CO2 reading");
                } else {
                    tracing::trace!(
                        message_type = packet.message_type,
                        "ignoring non-CO2 telemetry packet"
                    );
                }
            }
            Err(e) => {
                tracing::debug!(error = %e, "discarding malformed telemetry packet");
            }
        }
    }
    tracing::info!("cabin worker stopped");
}
