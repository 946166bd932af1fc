//! Block booking repository implementation.

use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::block::model::{BlockBooking, CreateBlockBooking};
use roomhub_entity::block::BlockStatus;
use roomhub_entity::reservation::model::Reservation;

use super::map_procedure_error;

/// Repository for agency block bookings.
#[derive(Debug, Clone)]
pub struct BlockBookingRepository {
    pool: PgPool,
}

impl BlockBookingRepository {
    /// Create a new block booking repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a block booking by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<BlockBooking>> {
        sqlx::query_as::<_, BlockBooking>("SELECT * FROM block_bookings WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find block booking", e)
            })
    }

    /// List block bookings with optional status and agency filters.
    pub async fn find_all(
        &self,
        status: Option<BlockStatus>,
        agency_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<BlockBooking>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM block_bookings \
             WHERE ($1::block_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR agency_id = $2)",
        )
        .bind(status)
        .bind(agency_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count block bookings", e)
        })?;

        let blocks = sqlx::query_as::<_, BlockBooking>(
            "SELECT * FROM block_bookings \
             WHERE ($1::block_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR agency_id = $2) \
             ORDER BY check_in DESC, created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(status)
        .bind(agency_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list block bookings", e)
        })?;

        Ok(PageResponse::new(
            blocks,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// List the member reservations of a block.
    pub async fn member_reservations(&self, block_id: Uuid) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations WHERE block_id = $1 ORDER BY created_at ASC",
        )
        .bind(block_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list block reservations", e)
        })
    }

    /// Create a block and all member reservations atomically via
    /// `sp_create_block_booking`.
    ///
    /// If any room's range is taken the whole block rolls back and the
    /// error surfaces as a conflict.
    #[allow(clippy::too_many_arguments)]
    pub async fn create(
        &self,
        data: &CreateBlockBooking,
        original_amount: Decimal,
        discount_amount: Decimal,
        final_amount: Decimal,
        discount_percent: Decimal,
    ) -> AppResult<BlockBooking> {
        sqlx::query_as::<_, BlockBooking>(
            "SELECT * FROM sp_create_block_booking($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)",
        )
        .bind(data.agency_id)
        .bind(&data.room_ids)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.guests_per_room)
        .bind(&data.special_requests)
        .bind(original_amount)
        .bind(discount_amount)
        .bind(final_amount)
        .bind(discount_percent)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_procedure_error("Failed to create block booking", e))
    }

    /// Confirm a pending block via `sp_confirm_block_booking`.
    ///
    /// Member reservations are confirmed in the same transaction.
    pub async fn confirm(&self, id: Uuid) -> AppResult<BlockBooking> {
        sqlx::query_as::<_, BlockBooking>("SELECT * FROM sp_confirm_block_booking($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to confirm block booking", e))
    }

    /// Cancel a block via `sp_cancel_block_booking`.
    ///
    /// Member reservations are canceled in the same transaction,
    /// releasing all held rooms at once.
    pub async fn cancel(&self, id: Uuid) -> AppResult<BlockBooking> {
        sqlx::query_as::<_, BlockBooking>("SELECT * FROM sp_cancel_block_booking($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to cancel block booking", e))
    }
}
