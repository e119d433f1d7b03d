//! Serial line decoding for the heart-rate channel.

/// Decode one newline-delimited serial line into a BPM reading.
///
/// The pulse sensor firmware writes one ASCII integer per line, but also
/// emits banner text on reset; anything that does not parse as an unsigned
/// integer is discarded by returning `None`.
#[must_use]
pub fn parse_heart_rate_line(line: &str) -> Option<u32> {
    line.trim().parse().ok()
}
