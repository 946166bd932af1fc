//! Additional charge entity.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// An extra charge posted to a reservation during the stay
/// (room service, minibar, late checkout, ...).
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct AdditionalCharge {
    /// Unique charge identifier.
    pub id: Uuid,
    /// The reservation the charge is posted to.
    pub reservation_id: Uuid,
    /// What the charge is for.
    pub description: String,
    /// Charge amount.
    pub amount: Decimal,
    /// When the charge was posted.
    pub charged_on: DateTime<Utc>,
}
