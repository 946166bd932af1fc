//! Reservation repository implementation.
//!
//! All booking mutations go through stored procedures; the procedures
//! re-check availability inside their own transaction, so the
//! service-layer overlap check is advisory only.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::StayRange;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::invoice::Invoice;
use roomhub_entity::reservation::model::{CreateReservation, Reservation};
use roomhub_entity::reservation::{AdditionalCharge, PaymentMethod, ReservationStatus};

use super::map_procedure_error;

/// Repository for reservation queries and stored-procedure mutations.
#[derive(Debug, Clone)]
pub struct ReservationRepository {
    pool: PgPool,
}

impl ReservationRepository {
    /// Create a new reservation repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a reservation by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Reservation>> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM reservations WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find reservation", e)
            })
    }

    /// List reservations with optional status and guest filters.
    pub async fn find_all(
        &self,
        status: Option<ReservationStatus>,
        guest_id: Option<Uuid>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Reservation>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM reservations \
             WHERE ($1::reservation_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR guest_id = $2)",
        )
        .bind(status)
        .bind(guest_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count reservations", e)
        })?;

        let reservations = sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE ($1::reservation_status IS NULL OR status = $1) \
               AND ($2::uuid IS NULL OR guest_id = $2) \
             ORDER BY check_in DESC, created_at DESC LIMIT $3 OFFSET $4",
        )
        .bind(status)
        .bind(guest_id)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list reservations", e)
        })?;

        Ok(PageResponse::new(
            reservations,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Find room-holding reservations that overlap the given stay.
    ///
    /// `exclude` omits a reservation from the check, used when updating
    /// an existing booking's dates.
    pub async fn find_overlapping(
        &self,
        room_id: Uuid,
        stay: StayRange,
        exclude: Option<Uuid>,
    ) -> AppResult<Vec<Reservation>> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM reservations \
             WHERE room_id = $1 AND status <> 'canceled' \
               AND check_in < $3 AND check_out > $2 \
               AND ($4::uuid IS NULL OR id <> $4) \
             ORDER BY check_in ASC",
        )
        .bind(room_id)
        .bind(stay.check_in)
        .bind(stay.check_out)
        .bind(exclude)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(
                ErrorKind::Database,
                "Failed to query overlapping reservations",
                e,
            )
        })
    }

    /// Create a reservation atomically via `sp_create_reservation`.
    ///
    /// The procedure re-checks availability under the exclusion
    /// constraint and inserts in one transaction. A taken range
    /// surfaces as a conflict.
    pub async fn create(
        &self,
        data: &CreateReservation,
        total_amount: Decimal,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM sp_create_reservation($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(data.guest_id)
        .bind(data.room_id)
        .bind(data.check_in)
        .bind(data.check_out)
        .bind(data.guests)
        .bind(total_amount)
        .bind(&data.special_requests)
        .bind(data.block_id)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_procedure_error("Failed to create reservation", e))
    }

    /// Move a reservation to new dates via `sp_update_reservation_dates`.
    pub async fn update_dates(
        &self,
        id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
        guests: i32,
        special_requests: Option<&str>,
        total_amount: Decimal,
    ) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>(
            "SELECT * FROM sp_update_reservation_dates($1, $2, $3, $4, $5, $6)",
        )
        .bind(id)
        .bind(check_in)
        .bind(check_out)
        .bind(guests)
        .bind(special_requests)
        .bind(total_amount)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_procedure_error("Failed to update reservation dates", e))
    }

    /// Transition a reservation's status via `sp_set_reservation_status`.
    ///
    /// The procedure re-validates the transition and raises on an
    /// illegal one.
    pub async fn set_status(&self, id: Uuid, status: ReservationStatus) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM sp_set_reservation_status($1, $2)")
            .bind(id)
            .bind(status)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to set reservation status", e))
    }

    /// Mark a reservation as confirmed via `sp_confirm_reservation`.
    pub async fn confirm(&self, id: Uuid) -> AppResult<Reservation> {
        sqlx::query_as::<_, Reservation>("SELECT * FROM sp_confirm_reservation($1)")
            .bind(id)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to confirm reservation", e))
    }

    /// Post an additional charge via `sp_add_reservation_charge`.
    ///
    /// The procedure inserts the charge and bumps the reservation's
    /// total in one transaction.
    pub async fn add_charge(
        &self,
        reservation_id: Uuid,
        description: &str,
        amount: Decimal,
    ) -> AppResult<AdditionalCharge> {
        sqlx::query_as::<_, AdditionalCharge>("SELECT * FROM sp_add_reservation_charge($1, $2, $3)")
            .bind(reservation_id)
            .bind(description)
            .bind(amount)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to add charge", e))
    }

    /// List the additional charges posted to a reservation.
    pub async fn charges(&self, reservation_id: Uuid) -> AppResult<Vec<AdditionalCharge>> {
        sqlx::query_as::<_, AdditionalCharge>(
            "SELECT * FROM reservation_charges WHERE reservation_id = $1 ORDER BY charged_on ASC",
        )
        .bind(reservation_id)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list charges", e))
    }

    /// Settle and check out a reservation via `sp_checkout_reservation`.
    ///
    /// The procedure creates the invoice with its line items, marks the
    /// reservation checked-out and paid, all in one transaction.
    #[allow(clippy::too_many_arguments)]
    pub async fn checkout(
        &self,
        reservation_id: Uuid,
        payment_method: PaymentMethod,
        line_items: &serde_json::Value,
        total_amount: Decimal,
        amount_paid: Decimal,
        change_amount: Decimal,
        transaction_id: Option<&str>,
        due_date: Option<NaiveDate>,
    ) -> AppResult<Invoice> {
        sqlx::query_as::<_, Invoice>(
            "SELECT * FROM sp_checkout_reservation($1, $2, $3, $4, $5, $6, $7, $8)",
        )
        .bind(reservation_id)
        .bind(payment_method)
        .bind(line_items)
        .bind(total_amount)
        .bind(amount_paid)
        .bind(change_amount)
        .bind(transaction_id)
        .bind(due_date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_procedure_error("Failed to check out reservation", e))
    }

    /// Count rooms occupied or held on the given night.
    pub async fn count_occupying(&self, date: NaiveDate) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(DISTINCT room_id) FROM reservations \
             WHERE status IN ('reserved', 'checked_in') \
               AND check_in <= $1 AND check_out > $1",
        )
        .bind(date)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to count occupied rooms", e)
        })
    }

    /// Auto-cancel reservations unconfirmed past the grace period via
    /// `sp_sweep_unconfirmed`. Returns the number of canceled rows.
    pub async fn sweep_unconfirmed(&self, grace_hours: i64) -> AppResult<i64> {
        sqlx::query_scalar::<_, i64>("SELECT sp_sweep_unconfirmed($1)")
            .bind(grace_hours as i32)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| map_procedure_error("Failed to sweep unconfirmed reservations", e))
    }
}
