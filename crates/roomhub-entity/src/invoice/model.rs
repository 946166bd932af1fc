//! Invoice entity model.

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::reservation::PaymentMethod;

/// The settlement record produced at checkout.
///
/// Invariants enforced before creation: `amount_paid` covers the line
/// item total; card payments carry a transaction id and pay the exact
/// total; cash overpayment is returned as `change_amount`.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Invoice {
    /// Unique invoice identifier.
    pub id: Uuid,
    /// The reservation being settled.
    pub reservation_id: Uuid,
    /// How the balance was paid.
    pub payment_method: PaymentMethod,
    /// Sum of all line items.
    pub total_amount: Decimal,
    /// Amount tendered by the guest.
    pub amount_paid: Decimal,
    /// Change returned (cash only, zero otherwise).
    pub change_amount: Decimal,
    /// Card processor transaction reference.
    pub transaction_id: Option<String>,
    /// Payment due date for invoiced agencies.
    pub due_date: Option<NaiveDate>,
    /// When the invoice was issued.
    pub issued_at: DateTime<Utc>,
}
