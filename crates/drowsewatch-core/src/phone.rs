//! Recipient identifier validation.
//!
//! Alert recipients are registered by mobile number in the national
//! `010`-prefixed eleven-digit format. Validation happens once, at the
//! command surface, so everything downstream can hold a [`PhoneNumber`]
//! and trust it.

use crate::error::CoreError;

/// Required length of a recipient number.
pub const PHONE_LEN: usize = 11;

/// Required prefix of a recipient number.
pub const PHONE_PREFIX: &str = "010";

/// A validated alert-recipient mobile number.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PhoneNumber(String);

impl PhoneNumber {
    /// Parse and validate a recipient number.
    ///
    /// Accepts exactly [`PHONE_LEN`] ASCII digits starting with
    /// [`PHONE_PREFIX`].
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Validation`] describing the first rule the
    /// input breaks.
    pub fn parse(input: &str) -> Result<Self, CoreError> {
        if input.len() != PHONE_LEN {
            return Err(CoreError::validation(format!(
                "phone number must be {PHONE_LEN} digits, got {}",
                input.len()
            )));
        }
        if !input.bytes().all(|b| b.is_ascii_digit()) {
            return Err(CoreError::validation(
                "phone number must contain only digits",
            ));
        }
        if !input.starts_with(PHONE_PREFIX) {
            return Err(CoreError::validation(format!(
                "phone number must start with {PHONE_PREFIX}"
            )));
        }
        Ok(Self(input.to_string()))
    }

    /// The validated number as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PhoneNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for PhoneNumber {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}
