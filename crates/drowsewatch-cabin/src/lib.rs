//! Cabin CO2 telemetry decoding.
//!
//! The cabin air-quality node streams fixed ten-byte binary packets over a
//! serial link. This crate parses those packets into typed readings for
//! the monitoring snapshot. CO2 is observational telemetry in the base
//! system: readings are decoded and recorded, but never thresholded into
//! an alarm.
//!
//! # Example
//!
//! ```
//! use drowsewatch_cabin::{CabinPacket, CO2_MESSAGE_TYPE};
//!
//! let mut bytes = Vec::new();
//! bytes.extend_from_slice(&1u16.to_be_bytes());      // source id
//! bytes.extend_from_slice(&42u32.to_be_bytes());     // sequence
//! bytes.extend_from_slice(&CO2_MESSAGE_TYPE.to_be_bytes());
//! bytes.extend_from_slice(&2048u16.to_be_bytes());   // raw reading
//!
//! let packet = CabinPacket::parse(&bytes).unwrap();
//! assert_eq!(packet.co2_ppm(), Some(1500.0));
//! ```

#![forbid(unsafe_code)]

pub mod error;
pub mod packet;

pub use error::ParseError;
pub use packet::{raw_to_ppm, CabinPacket, CO2_MESSAGE_TYPE, PACKET_LEN};
