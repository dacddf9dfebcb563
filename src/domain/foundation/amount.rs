//! Money value object.
//!
//! All monetary values are stored as i64 cents, never floats.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// Positive monetary amount in cents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount(i64);

impl Amount {
    /// Creates an Amount, rejecting zero and negative values.
    pub fn new(cents: i64) -> Result<Self, ValidationError> {
        if cents <= 0 {
            return Err(ValidationError::out_of_range(
                "amount",
                1,
                i64::MAX,
                cents,
            ));
        }
        Ok(Self(cents))
    }

    /// Returns the amount in cents.
    pub fn as_cents(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{:02}", self.0 / 100, self.0 % 100)
    }
}
