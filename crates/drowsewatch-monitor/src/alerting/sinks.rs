//! Built-in alert sinks: voice playback and SMS.

use drowsewatch_core::{AlertEvent, PhoneNumber};
use tokio::sync::Mutex;

use super::dispatcher::AlertSink;
use crate::MonitorError;

/// Text-to-speech playback engine.
///
/// Implementations wrap whatever synthesis backend the deployment uses;
/// the monitor only needs the one call.
pub trait SpeechEngine: Send {
    /// Speak the given text, blocking until playback completes.
    fn speak(&mut self, text: &str) -> std::io::Result<()>;
}

/// Speech engine that writes to stdout, for deployments without audio.
pub struct ConsoleSpeaker;

impl SpeechEngine for ConsoleSpeaker {
    fn speak(&mut self, text: &str) -> std::io::Result<()> {
        println!("[VOICE] {text}");
        Ok(())
    }
}

/// Voice alert sink.
///
/// The engine sits behind a mutex so concurrent alerts from different
/// channels serialize their playback instead of overlapping.
pub struct VoiceAlertSink {
    engine: Mutex<Box<dyn SpeechEngine>>,
}

impl VoiceAlertSink {
    /// Create a voice sink around a speech engine.
    #[must_use]
    pub fn new(engine: Box<dyn SpeechEngine>) -> Self {
        Self {
            engine: Mutex::new(engine),
        }
    }

    /// Create a voice sink that prints to the console.
    #[must_use]
    pub fn console() -> Self {
        Self::new(Box::new(ConsoleSpeaker))
    }
}

#[async_trait::async_trait]
impl AlertSink for VoiceAlertSink {
    fn name(&self) -> &str {
        "voice"
    }

    async fn deliver(
        &self,
        event: &AlertEvent,
        _recipient: Option<&PhoneNumber>,
    ) -> Result<(), MonitorError> {
        let mut engine = self.engine.lock().await;
        engine
            .speak(&event.message)
            .map_err(|e| MonitorError::sink("voice", e.to_string()))?;
        tracing::debug!(alert_id = %event.id, "Spoke voice alert");
        Ok(())
    }
}

/// Credentials for the SMS gateway.
#[derive(Debug, Clone)]
pub struct SmsCredentials {
    /// Gateway API key.
    pub api_key: String,
    /// Gateway API secret.
    pub api_secret: String,
    /// Sender number the gateway sends from.
    pub from_number: String,
}

impl SmsCredentials {
    /// Read credentials from `DROWSEWATCH_SMS_KEY`, `DROWSEWATCH_SMS_SECRET`,
    /// and `DROWSEWATCH_SMS_FROM`.
    ///
    /// Returns `None` unless all three variables are set.
    #[must_use]
    pub fn from_env() -> Option<Self> {
        Some(Self {
            api_key: std::env::var("DROWSEWATCH_SMS_KEY").ok()?,
            api_secret: std::env::var("DROWSEWATCH_SMS_SECRET").ok()?,
            from_number: std::env::var("DROWSEWATCH_SMS_FROM").ok()?,
        })
    }
}

/// SMS delivery transport.
///
/// Implementations speak to the actual gateway; authentication happens at
/// construction time from [`SmsCredentials`].
#[async_trait::async_trait]
pub trait SmsTransport: Send + Sync {
    /// Send one message to a recipient number.
    async fn send(&self, to: &str, text: &str) -> Result<(), MonitorError>;
}

/// Transport that only logs (placeholder for a gateway integration).
///
/// With credentials attached it logs the send it would perform; without
/// them it notes that no gateway is configured.
#[derive(Default)]
pub struct LoggingSmsTransport {
    credentials: Option<SmsCredentials>,
}

impl LoggingSmsTransport {
    /// Create a transport that logs with gateway credentials attached.
    #[must_use]
    pub fn with_credentials(credentials: SmsCredentials) -> Self {
        Self {
            credentials: Some(credentials),
        }
    }
}

#[async_trait::async_trait]
impl SmsTransport for LoggingSmsTransport {
    async fn send(&self, to: &str, text: &str) -> Result<(), MonitorError> {
        match &self.credentials {
            Some(credentials) => tracing::info!(
                to,
                text,
                from = %credentials.from_number,
                "Would send SMS via gateway"
            ),
            None => tracing::info!(to, text, "SMS gateway not configured; logging only"),
        }
        Ok(())
    }
}

/// SMS alert sink.
///
/// Delivers only when a recipient is registered in the monitoring store;
/// with no registration the event is skipped silently, which is the
/// documented no-recipient behavior, not a failure.
pub struct SmsAlertSink {
    transport: Box<dyn SmsTransport>,
}

impl SmsAlertSink {
    /// Create an SMS sink around a transport.
    #[must_use]
    pub fn new(transport: Box<dyn SmsTransport>) -> Self {
        Self { transport }
    }

    /// Create an SMS sink that only logs.
    #[must_use]
    pub fn logging() -> Self {
        Self::new(Box::new(LoggingSmsTransport::default()))
    }
}

#[async_trait::async_trait]
impl AlertSink for SmsAlertSink {
    fn name(&self) -> &str {
        "sms"
    }

    async fn deliver(
        &self,
        event: &AlertEvent,
        recipient: Option<&PhoneNumber>,
    ) -> Result<(), MonitorError> {
        let Some(to) = recipient else {
            tracing::debug!(alert_id = %event.id, "No recipient registered; skipping SMS");
            return Ok(());
        };

        self.transport.send(to.as_str(), &event.message).await?;
        tracing::info!(alert_id = %event.id, to = %to, "Sent SMS alert");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use drowsewatch_core::AlertReason;
    use std::sync::{Arc, Mutex as StdMutex};

    struct RecordingSpeaker {
        spoken: Arc<StdMutex<Vec<String>>>,
    }

    impl SpeechEngine for RecordingSpeaker {
        fn speak(&mut self, text: &str) -> std::io::Result<()> {
            self.spoken.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    struct RecordingTransport {
        sent: Arc<StdMutex<Vec<(String, String)>>>,
    }

    #[async_trait::async_trait]
    impl SmsTransport for RecordingTransport {
        async fn send(&self, to: &str, text: &str) -> Result<(), MonitorError> {
            self.sent.lock().unwrap().push((to.to_string(), text.to_string()));
            Ok(())
        }
    }

    #[tokio::test]
    async fn voice_sink_speaks_the_event_message() {
        let spoken = Arc::new(StdMutex::new(Vec::new()));
        let sink = VoiceAlertSink::new(Box::new(RecordingSpeaker {
            spoken: Arc::clone(&spoken),
        }));

        let event = AlertEvent::new(AlertReason::Visual, "Drowsy driving suspected!");
        sink.deliver(&event, None).await.unwrap();

        assert_eq!(spoken.lock().unwrap().as_slice(), ["Drowsy driving suspected!"]);
    }

    #[tokio::test]
    async fn sms_sink_skips_without_recipient() {
        let sent = Arc::new(StdMutex::new(Vec::new()));
        let sink = SmsAlertSink::new(Box::new(RecordingTransport {
            sent: Arc::clone(&sent),
        }));

        let event = AlertEvent::new(AlertReason::HeartRate, "warning");
        sink.deliver(&event, None).await.unwrap();

        assert!(sent.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn sms_sink_sends_to_registered_recipient() {
        let sent = Arc::new(StdMutex::new(Vec::new()));
        let sink = SmsAlertSink::new(Box::new(RecordingTransport {
            sent: Arc::clone(&sent),
        }));

        let phone = PhoneNumber::parse("01012345678").unwrap();
        let event = AlertEvent::new(AlertReason::HeartRate, "warning");
        sink.deliver(&event, Some(&phone)).await.unwrap();

        let sent = sent.lock().unwrap();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].0, "01012345678");
        assert_eq!(sent[0].1, "warning");
    }
}
