//! Guest entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use super::kind::GuestKind;

/// A hotel guest or agency on file.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Guest {
    /// Unique guest identifier.
    pub id: Uuid,
    /// Full name or agency name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Individual traveler or agency.
    pub kind: GuestKind,
    /// User account linked to this guest profile (if any).
    pub user_id: Option<Uuid>,
    /// When the guest record was created.
    pub created_at: DateTime<Utc>,
    /// When the guest record was last updated.
    pub updated_at: DateTime<Utc>,
}

/// Data required to create a new guest record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuest {
    /// Full name or agency name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Individual traveler or agency.
    pub kind: GuestKind,
    /// User account linked to this guest profile.
    pub user_id: Option<Uuid>,
}
