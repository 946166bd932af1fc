//! Block booking status enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Lifecycle status of a block booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "block_status", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum BlockStatus {
    /// Created, awaiting agency confirmation.
    Pending,
    /// Confirmed by the agency.
    Confirmed,
    /// Canceled; all member reservations are released.
    Canceled,
}

impl BlockStatus {
    /// Check if the block is in a terminal state.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// Return the status as a snake_case string.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Canceled => "canceled",
        }
    }
}

impl fmt::Display for BlockStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for BlockStatus {
    type Err = roomhub_core::AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "confirmed" => Ok(Self::Confirmed),
            "canceled" => Ok(Self::Canceled),
            _ => Err(roomhub_core::AppError::validation(format!(
                "Invalid block status: '{s}'. Expected one of: pending, confirmed, canceled"
            ))),
        }
    }
}
