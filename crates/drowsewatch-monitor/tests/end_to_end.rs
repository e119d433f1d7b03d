//! Integration tests for the full monitoring pipeline.
//!
//! These tests drive a real heart-rate worker with a deterministic sample
//! stream and observe the alert sinks:
//! 1. Serial lines -> worker parses and classifies
//! 2. Deviation alarm -> dispatcher fans out to voice and SMS sinks
//! 3. Recipient registration gates the SMS sink
//!
//! No mocks of the core path; the sinks record what a real deployment
//! would speak and send.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc;

use drowsewatch_core::{Channel, PhoneNumber};
use drowsewatch_monitor::{
    run_heart_rate_worker, AlertConfig, AlertDispatcher, HeartRateMode, MonitorStore,
    SmsAlertSink, SmsTransport, SpeechEngine, VoiceAlertSink, WorkerConfig,
};

/// Speech engine that records what it was asked to say.
struct RecordingSpeaker {
    spoken: Arc<Mutex<Vec<String>>>,
}

impl SpeechEngine for RecordingSpeaker {
    fn speak(&mut self, text: &str) -> std::io::Result<()> {
        self.spoken.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

/// SMS transport that records destination and text.
struct RecordingTransport {
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

#[async_trait::async_trait]
impl SmsTransport for RecordingTransport {
    async fn send(&self, to: &str, text: &str) -> Result<(), drowsewatch_monitor::MonitorError> {
        self.sent.lock().unwrap().push((to.to_string(), text.to_string()));
        Ok(())
    }
}

struct Harness {
    store: MonitorStore,
    dispatcher: Arc<AlertDispatcher>,
    spoken: Arc<Mutex<Vec<String>>>,
    sent: Arc<Mutex<Vec<(String, String)>>>,
}

fn harness() -> Harness {
    let store = MonitorStore::with_defaults();
    let spoken = Arc::new(Mutex::new(Vec::new()));
    let sent = Arc::new(Mutex::new(Vec::new()));

    let mut dispatcher = AlertDispatcher::new(store.clone(), AlertConfig::default());
    dispatcher.add_sink(Box::new(VoiceAlertSink::new(Box::new(RecordingSpeaker {
        spoken: Arc::clone(&spoken),
    }))));
    dispatcher.add_sink(Box::new(SmsAlertSink::new(Box::new(RecordingTransport {
        sent: Arc::clone(&sent),
    }))));

    Harness {
        store,
        dispatcher: Arc::new(dispatcher),
        spoken,
        sent,
    }
}

/// A baseline around 70 BPM followed by a reading more than 10 BPM below
/// the rolling average.
const DEVIATION_STREAM: [&str; 11] = [
    "70", "72", "68", "71", "69", "70", "69", "71", "70", "70", "58",
];

async fn feed_heart_rate(h: &Harness, lines: &[&str]) {
    let (tx, rx) = mpsc::channel(64);
    let handle = tokio::spawn(run_heart_rate_worker(
        h.store.clone(),
        Arc::clone(&h.dispatcher),
        WorkerConfig::default(),
        HeartRateMode::Deviation,
        rx,
    ));

    for line in lines {
        tx.send((*line).to_string()).await.unwrap();
    }
    drop(tx);
    handle.await.unwrap();
}

#[tokio::test]
async fn deviation_alert_without_recipient_speaks_but_sends_nothing() {
    let h = harness();

    feed_heart_rate(&h, &DEVIATION_STREAM).await;

    let spoken = h.spoken.lock().unwrap();
    assert_eq!(spoken.len(), 1, "one deviation alert expected");
    assert!(spoken[0].contains("heart rate"));
    assert!(h.sent.lock().unwrap().is_empty(), "no recipient, no SMS");
}

#[tokio::test]
async fn deviation_alert_with_recipient_speaks_and_sends() {
    let h = harness();
    h.store
        .set_recipient(PhoneNumber::parse("01012345678").unwrap());

    feed_heart_rate(&h, &DEVIATION_STREAM).await;

    assert_eq!(h.spoken.lock().unwrap().len(), 1);

    let sent = h.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "01012345678");
    assert!(sent[0].1.contains("heart rate"));
}

#[tokio::test]
async fn recipient_registered_mid_stream_takes_effect_on_next_alert() {
    let h = harness();

    feed_heart_rate(&h, &DEVIATION_STREAM).await;
    assert!(h.sent.lock().unwrap().is_empty());

    // Register between alarms; the dispatcher reads the registration at
    // dispatch time, so the next identical deviation notifies by SMS too.
    h.store
        .set_recipient(PhoneNumber::parse("01099998888").unwrap());

    feed_heart_rate(&h, &DEVIATION_STREAM).await;

    let sent = h.sent.lock().unwrap();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].0, "01099998888");
    assert_eq!(h.spoken.lock().unwrap().len(), 2);
}

#[tokio::test]
async fn store_reflects_the_processed_stream() {
    let h = harness();

    feed_heart_rate(&h, &DEVIATION_STREAM).await;

    assert_eq!(h.store.latest(Channel::HeartRate), Some(58.0));
    let snapshot = h.store.snapshot();
    let (_, heart) = snapshot
        .channels
        .iter()
        .find(|(c, _)| *c == Channel::HeartRate)
        .unwrap();
    assert_eq!(heart.history.len(), DEVIATION_STREAM.len());
}
