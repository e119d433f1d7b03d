//! Cabin telemetry packet parser.
//!
//! Parses the fixed ten-byte binary packets the CO2 sensor node streams
//! over its serial link.
//!
//! # Packet Binary Format
//!
//! ```text
//! Offset  Size  Field
//! ------  ----  -----
//! 0       2     Source node id (big-endian u16)
//! 2       4     Sequence number (big-endian u32)
//! 6       2     Message type (big-endian u16)
//! 8       2     Raw ADC reading (big-endian u16)
//! ```
//!
//! Only packets with message type [`CO2_MESSAGE_TYPE`] carry a CO2 reading;
//! the node multiplexes other message types onto the same link and those
//! are ignored, not errors. The parser either successfully parses real
//! bytes or returns a specific [`ParseError`]; it never fabricates a
//! reading.

use byteorder::{BigEndian, ReadBytesExt};
use std::io::Cursor;

use crate::error::ParseError;

/// Fixed size of a cabin telemetry packet in bytes.
pub const PACKET_LEN: usize = 10;

/// Message type carrying a CO2 reading.
pub const CO2_MESSAGE_TYPE: u16 = 1;

/// One parsed cabin telemetry packet.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CabinPacket {
    /// Id of the sensor node that produced the packet.
    pub source_id: u16,
    /// Monotonic packet sequence number.
    pub sequence: u32,
    /// Message type discriminator.
    pub message_type: u16,
    /// Raw 12-bit ADC reading.
    pub raw: u16,
}

impl CabinPacket {
    /// Parse a single packet from exactly [`PACKET_LEN`] bytes.
    pub fn parse(data: &[u8]) -> Result<Self, ParseError> {
        if data.len() < PACKET_LEN {
            return Err(ParseError::InsufficientData {
                needed: PACKET_LEN,
                got: data.len(),
            });
        }
        if data.len() > PACKET_LEN {
            return Err(ParseError::TrailingBytes {
                expected: PACKET_LEN,
                got: data.len(),
            });
        }

        let mut cursor = Cursor::new(data);

        let source_id = cursor.read_u16::<BigEndian>().map_err(|_| ParseError::ByteError {
            offset: 0,
            message: "Failed to read source id".into(),
        })?;

        let sequence = cursor.read_u32::<BigEndian>().map_err(|_| ParseError::ByteError {
            offset: 2,
            message: "Failed to read sequence number".into(),
        })?;

        let message_type = cursor.read_u16::<BigEndian>().map_err(|_| ParseError::ByteError {
            offset: 6,
            message: "Failed to read message type".into(),
        })?;

        let raw = cursor.read_u16::<BigEndian>().map_err(|_| ParseError::ByteError {
            offset: 8,
            message: "Failed to read raw data".into(),
        })?;

        Ok(Self {
            source_id,
            sequence,
            message_type,
            raw,
        })
    }

    /// Whether this packet carries a CO2 reading.
    #[must_use]
    pub const fn is_co2(&self) -> bool {
        self.message_type == CO2_MESSAGE_TYPE
    }

    /// The packet's CO2 concentration in parts per million.
    ///
    /// Returns `None` for non-CO2 message types; those packets are
    /// observational noise on this link and are dropped by the caller.
    #[must_use]
    pub fn co2_ppm(&self) -> Option<f64> {
        if self.is_co2() {
            Some(raw_to_ppm(self.raw))
        } else {
            None
        }
    }
}

/// Convert a raw 12-bit ADC reading to parts per million.
///
/// The sensor's transfer function: the ADC reading spans a 1.5 V reference
/// over 4096 counts, and the analog front end maps each volt onto
/// 2000 ppm.
#[must_use]
pub fn raw_to_ppm(raw: u16) -> f64 {
    1.5 * f64::from(raw) / 4096.0 * 2.0 * 1000.0
}
