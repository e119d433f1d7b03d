//! # Drowsewatch Core
//!
//! Core types, errors, and validation for the drowsewatch driver-drowsiness
//! monitoring system.
//!
//! This crate provides the foundational building blocks used throughout the
//! drowsewatch ecosystem, including:
//!
//! - **Core Data Types**: [`Channel`], [`SignalSample`], [`EyeLandmarks`],
//!   and [`AlertEvent`] for representing sensor readings and alarm decisions.
//!
//! - **Error Types**: Unified error handling via the [`error`] module, with
//!   helper constructors and recoverability classification.
//!
//! - **Recipient Validation**: The [`PhoneNumber`] newtype, which enforces
//!   the fixed recipient-identifier format before an SMS destination can be
//!   registered.
//!
//! ## Example
//!
//! ```rust
//! use drowsewatch_core::{AlertEvent, AlertReason, PhoneNumber};
//!
//! let event = AlertEvent::new(AlertReason::HeartRate, "Heart rate below average");
//! assert_eq!(event.reason, AlertReason::HeartRate);
//!
//! let recipient = PhoneNumber::parse("01012345678").unwrap();
//! assert_eq!(recipient.as_str(), "01012345678");
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod phone;
pub mod types;

// Re-export commonly used types at the crate root
pub use error::{CoreError, CoreResult};
pub use phone::PhoneNumber;
pub use types::{AlertEvent, AlertId, AlertReason, Channel, EyeLandmarks, EyePoint, SignalSample};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Number of sensor channels fused by the system
pub const CHANNEL_COUNT: usize = 3;

/// Prelude module for convenient imports.
///
/// ```rust
/// use drowsewatch_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::phone::PhoneNumber;
    pub use crate::types::{
        AlertEvent, AlertId, AlertReason, Channel, EyeLandmarks, EyePoint, SignalSample,
    };
}
