//! Invoice repository implementation.
//!
//! Invoices are created by `sp_checkout_reservation` (see the
//! reservation repository); this repository is read-only.

use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_entity::invoice::{Invoice, InvoiceLineItem};

/// Repository for invoice reads.
#[derive(Debug, Clone)]
pub struct InvoiceRepository {
    pool: PgPool,
}

impl InvoiceRepository {
    /// Create a new invoice repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find an invoice by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find invoice", e))
    }

    /// Find the invoice settling a reservation.
    pub async fn find_by_reservation(&self, reservation_id: Uuid) -> AppResult<Option<Invoice>> {
        sqlx::query_as::<_, Invoice>("SELECT * FROM invoices WHERE reservation_id = $1")
            .bind(reservation_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation invoice", e)
            })
    }

    /// List the billed lines of an invoice.
    pub async fn line_items(&self, invoice_id: Uuid) -> AppResult<Vec<InvoiceLineItem>> {
        sqlx::query_as::<_, InvoiceLineItem>(
            "SELECT * FROM invoice_line_items WHERE invoice_id = $1 ORDER BY id ASC",
        )
        .bind(invoice_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list invoice line items", e)
        })
    }
}
