//! Block booking service — agency bulk reservations.

use std::collections::HashSet;
use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::config::BookingConfig;
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{
    BlockBookingRepository, GuestRepository, ReservationRepository, RoomRepository,
};
use roomhub_entity::block::model::CreateBlockBooking;
use roomhub_entity::block::{BlockBooking, BlockStatus};
use roomhub_entity::reservation::Reservation;

use crate::context::RequestContext;
use crate::reservation::ReservationValidator;

use super::discount::{DiscountBreakdown, DiscountCalculator};

/// Request to create a block booking.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateBlockBookingRequest {
    /// The agency the block is booked for.
    pub agency_id: Uuid,
    /// Rooms to reserve. Must be distinct.
    pub room_ids: Vec<Uuid>,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Occupants per room.
    pub guests: i32,
    /// Requests applied to every member reservation.
    pub special_requests: Option<String>,
}

/// A block together with its pricing breakdown.
#[derive(Debug, Clone, serde::Serialize)]
pub struct BlockBookingResult {
    /// The created block.
    pub block: BlockBooking,
    /// How the final amount was reached.
    pub discount: DiscountBreakdown,
}

/// Handles agency block bookings.
#[derive(Debug, Clone)]
pub struct BlockBookingService {
    /// Block booking repository.
    block_repo: Arc<BlockBookingRepository>,
    /// Reservation repository, used for availability checks.
    reservation_repo: Arc<ReservationRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Guest repository, used to verify the agency.
    guest_repo: Arc<GuestRepository>,
    /// Per-room request validator.
    validator: ReservationValidator,
    /// Discount and cancellation policy.
    discount: DiscountCalculator,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl BlockBookingService {
    /// Creates a new block booking service.
    pub fn new(
        block_repo: Arc<BlockBookingRepository>,
        reservation_repo: Arc<ReservationRepository>,
        room_repo: Arc<RoomRepository>,
        guest_repo: Arc<GuestRepository>,
        rbac: Arc<RbacEnforcer>,
        booking_config: BookingConfig,
    ) -> Self {
        Self {
            block_repo,
            reservation_repo,
            room_repo,
            guest_repo,
            validator: ReservationValidator::new(),
            discount: DiscountCalculator::new(booking_config),
            rbac,
        }
    }

    /// Creates a block booking, reserving every room atomically.
    ///
    /// Each room is checked locally first so a doomed request fails with
    /// a precise message; the stored procedure then re-checks all rooms
    /// inside one transaction. If any room is lost to a race, the whole
    /// block rolls back and the call returns a conflict.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateBlockBookingRequest,
    ) -> Result<BlockBookingResult, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockManage)?;

        let stay = self.validator.validate_stay(req.check_in, req.check_out)?;

        if req.room_ids.is_empty() {
            return Err(AppError::validation("A block booking needs at least one room"));
        }
        let distinct: HashSet<Uuid> = req.room_ids.iter().copied().collect();
        if distinct.len() != req.room_ids.len() {
            return Err(AppError::validation("Room list contains duplicates"));
        }

        let agency = self
            .guest_repo
            .find_by_id(req.agency_id)
            .await?
            .ok_or_else(|| AppError::not_found("Agency not found"))?;
        if !agency.kind.can_block_book() {
            return Err(AppError::validation(format!(
                "Guest '{}' is not an agency and cannot make block bookings",
                agency.full_name
            )));
        }

        let mut original_amount = Decimal::ZERO;
        for room_id in &req.room_ids {
            let room = self
                .room_repo
                .find_by_id(*room_id)
                .await?
                .ok_or_else(|| AppError::not_found(format!("Room {room_id} not found")))?;
            self.validator.validate_room_bookable(&room)?;
            self.validator.validate_guests(req.guests, &room)?;

            let existing = self
                .reservation_repo
                .find_overlapping(room.id, stay, None)
                .await?;
            self.validator.validate_no_overlap(stay, &existing)?;

            original_amount += room.rate_per_night * Decimal::from(stay.nights());
        }

        let breakdown = self
            .discount
            .calculate_discount(req.room_ids.len() as u32, original_amount);

        let block = self
            .block_repo
            .create(
                &CreateBlockBooking {
                    agency_id: agency.id,
                    room_ids: req.room_ids,
                    check_in: req.check_in,
                    check_out: req.check_out,
                    guests_per_room: req.guests,
                    special_requests: req.special_requests,
                },
                original_amount,
                breakdown.discount_amount,
                breakdown.final_amount,
                breakdown.percentage,
            )
            .await?;

        info!(
            block_id = %block.id,
            agency = %agency.full_name,
            rooms = block.rooms_count,
            final_amount = %block.final_amount,
            discount_applied = breakdown.eligible,
            "Block booking created"
        );

        Ok(BlockBookingResult {
            block,
            discount: breakdown,
        })
    }

    /// Gets a block booking by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<BlockBooking, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockRead)?;
        self.load_block(id).await
    }

    /// Lists the member reservations of a block.
    pub async fn members(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<Reservation>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockRead)?;
        self.load_block(id).await?;
        self.block_repo.member_reservations(id).await
    }

    /// Lists block bookings with optional filters.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<BlockStatus>,
        agency_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<BlockBooking>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockRead)?;
        self.block_repo.find_all(status, agency_id, page).await
    }

    /// Confirms a pending block and all of its member reservations.
    pub async fn confirm(&self, ctx: &RequestContext, id: Uuid) -> Result<BlockBooking, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockManage)?;

        self.load_block(id).await?;
        let confirmed = self.block_repo.confirm(id).await?;
        info!(block_id = %id, "Block booking confirmed");
        Ok(confirmed)
    }

    /// Cancels a block, releasing all member rooms at once.
    ///
    /// Cancellation is a domain rule, not an access rule: a block inside
    /// the cutoff window is rejected with a validation error regardless
    /// of who asks.
    pub async fn cancel(&self, ctx: &RequestContext, id: Uuid) -> Result<BlockBooking, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::BlockManage)?;

        let block = self.load_block(id).await?;

        let now = Utc::now();
        if !self.discount.can_cancel(block.check_in, now) {
            let days = self.discount.days_until_check_in(block.check_in, now);
            let min = self.discount.cancellation_min_days();
            return Err(AppError::validation(format!(
                "Block bookings must be canceled at least {min} days before check-in ({days} remaining)"
            )));
        }

        let canceled = self.block_repo.cancel(id).await?;
        info!(block_id = %id, "Block booking canceled");
        Ok(canceled)
    }

    async fn load_block(&self, id: Uuid) -> Result<BlockBooking, AppError> {
        self.block_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Block booking not found"))
    }
}
