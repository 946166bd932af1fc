//! Invoice line item entity.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single billed line on an invoice.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct InvoiceLineItem {
    /// Unique line item identifier.
    pub id: Uuid,
    /// The invoice this line belongs to.
    pub invoice_id: Uuid,
    /// What is being billed.
    pub description: String,
    /// Billed amount.
    pub amount: Decimal,
    /// Optional service category (e.g., `"lodging"`, `"room_service"`).
    pub service_type: Option<String>,
}
