//! Guest kind enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Distinguishes individual travelers from agencies booking in bulk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "guest_kind", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum GuestKind {
    /// A single traveler or family.
    Individual,
    /// A travel agency; may create block bookings.
    Agency,
}

impl GuestKind {
    /// Check whether this guest kind may create block bookings.
    pub fn can_block_book(&self) -> bool {
        matches!(self, Self::Agency)
    }

    /// Return the kind as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Individual => "individual",
            Self::Agency => "agency",
        }
    }
}

impl fmt::Display for GuestKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for GuestKind {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "agency" => Ok(Self::Agency),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid guest kind: '{s}'. Expected one of: individual, agency"
            ))),
        }
    }
}
