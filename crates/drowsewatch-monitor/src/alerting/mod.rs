//! Alert dispatch and delivery.
//!
//! Armed decisions from the channel workers arrive here as
//! [`AlertEvent`](drowsewatch_core::AlertEvent)s. The [`AlertDispatcher`]
//! fans each event out to every configured [`AlertSink`]: the voice sink
//! speaks a fixed warning through the cabin speaker, and the SMS sink
//! notifies the registered recipient, if one is registered. Delivery is
//! best effort: a failing sink is logged and never stalls the classifiers
//! or the other sinks.

pub mod dispatcher;
pub mod sinks;

pub use dispatcher::{AlertConfig, AlertDispatcher, AlertSink};
pub use sinks::{
    ConsoleSpeaker, LoggingSmsTransport, SmsAlertSink, SmsCredentials, SmsTransport, SpeechEngine,
    VoiceAlertSink,
};
