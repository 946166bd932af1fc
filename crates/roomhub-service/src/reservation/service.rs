//! Reservation lifecycle service — create, modify, and operate bookings.

use std::sync::Arc;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use tracing::info;
use uuid::Uuid;

use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{GuestRepository, ReservationRepository, RoomRepository};
use roomhub_entity::reservation::model::CreateReservation;
use roomhub_entity::reservation::{AdditionalCharge, Reservation, ReservationStatus};
use roomhub_entity::room::Room;

use crate::context::RequestContext;

use super::validator::ReservationValidator;

/// Request to create a reservation.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateReservationRequest {
    /// Guest the booking is for. Staff must supply it; customers book
    /// for themselves and may omit it.
    pub guest_id: Option<Uuid>,
    /// Room to reserve.
    pub room_id: Uuid,
    /// Arrival date.
    pub check_in: NaiveDate,
    /// Departure date (exclusive).
    pub check_out: NaiveDate,
    /// Number of occupants.
    pub guests: i32,
    /// Free-form requests from the guest.
    pub special_requests: Option<String>,
}

/// Request to modify a reservation's stay.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateReservationRequest {
    /// New arrival date.
    pub check_in: NaiveDate,
    /// New departure date (exclusive).
    pub check_out: NaiveDate,
    /// New occupant count.
    pub guests: i32,
    /// Replacement special requests.
    pub special_requests: Option<String>,
}

/// Handles the reservation lifecycle.
#[derive(Debug, Clone)]
pub struct ReservationService {
    /// Reservation repository.
    reservation_repo: Arc<ReservationRepository>,
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Guest repository.
    guest_repo: Arc<GuestRepository>,
    /// Request validator.
    validator: ReservationValidator,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl ReservationService {
    /// Creates a new reservation service.
    pub fn new(
        reservation_repo: Arc<ReservationRepository>,
        room_repo: Arc<RoomRepository>,
        guest_repo: Arc<GuestRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            reservation_repo,
            room_repo,
            guest_repo,
            validator: ReservationValidator::new(),
            rbac,
        }
    }

    /// Creates a reservation after local validation.
    ///
    /// The stored procedure re-checks availability; a lost race surfaces
    /// as a conflict even when the local check passed.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateReservationRequest,
    ) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationCreate)?;

        let guest_id = self.resolve_guest_id(ctx, req.guest_id).await?;

        let stay = self.validator.validate_stay(req.check_in, req.check_out)?;

        let room = self.load_room(req.room_id).await?;
        self.validator.validate_room_bookable(&room)?;
        self.validator.validate_guests(req.guests, &room)?;

        let existing = self
            .reservation_repo
            .find_overlapping(room.id, stay, None)
            .await?;
        self.validator.validate_no_overlap(stay, &existing)?;

        let total = room.rate_per_night * Decimal::from(stay.nights());

        let reservation = self
            .reservation_repo
            .create(
                &CreateReservation {
                    guest_id,
                    room_id: room.id,
                    check_in: req.check_in,
                    check_out: req.check_out,
                    guests: req.guests,
                    special_requests: req.special_requests,
                    block_id: None,
                },
                total,
            )
            .await?;

        info!(
            reservation_id = %reservation.id,
            room = %room.room_number,
            check_in = %reservation.check_in,
            check_out = %reservation.check_out,
            "Reservation created"
        );

        Ok(reservation)
    }

    /// Gets a reservation, enforcing ownership for customer accounts.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationRead)?;

        let reservation = self.load_reservation(id).await?;
        self.ensure_can_access(ctx, &reservation).await?;
        Ok(reservation)
    }

    /// Lists reservations. Customer accounts only see their own.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<ReservationStatus>,
        guest_id: Option<Uuid>,
        page: &PageRequest,
    ) -> Result<PageResponse<Reservation>, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationRead)?;

        let guest_id = if ctx.is_staff() {
            guest_id
        } else {
            Some(self.own_guest_id(ctx).await?)
        };

        self.reservation_repo.find_all(status, guest_id, page).await
    }

    /// Moves a reservation to new dates, re-validating availability.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateReservationRequest,
    ) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationUpdate)?;

        let reservation = self.load_reservation(id).await?;
        self.ensure_can_access(ctx, &reservation).await?;

        let stay = self.validator.validate_stay(req.check_in, req.check_out)?;

        let room = self.load_room(reservation.room_id).await?;
        self.validator.validate_guests(req.guests, &room)?;

        let existing = self
            .reservation_repo
            .find_overlapping(room.id, stay, Some(reservation.id))
            .await?;
        self.validator.validate_no_overlap(stay, &existing)?;

        // Additional charges already posted survive the move.
        let charges_total: Decimal = self
            .reservation_repo
            .charges(reservation.id)
            .await?
            .iter()
            .map(|c| c.amount)
            .sum();
        let total = room.rate_per_night * Decimal::from(stay.nights()) + charges_total;

        let updated = self
            .reservation_repo
            .update_dates(
                reservation.id,
                req.check_in,
                req.check_out,
                req.guests,
                req.special_requests.as_deref(),
                total,
            )
            .await?;

        info!(reservation_id = %updated.id, "Reservation dates updated");

        Ok(updated)
    }

    /// Confirms a reservation, exempting it from the auto-cancel sweep.
    pub async fn confirm(&self, ctx: &RequestContext, id: Uuid) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationUpdate)?;

        let reservation = self.load_reservation(id).await?;
        self.ensure_can_access(ctx, &reservation).await?;

        let confirmed = self.reservation_repo.confirm(id).await?;
        info!(reservation_id = %id, "Reservation confirmed");
        Ok(confirmed)
    }

    /// Checks a guest in. Front-desk only.
    pub async fn check_in(&self, ctx: &RequestContext, id: Uuid) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationOperate)?;

        let reservation = self
            .reservation_repo
            .set_status(id, ReservationStatus::CheckedIn)
            .await?;
        info!(reservation_id = %id, "Guest checked in");
        Ok(reservation)
    }

    /// Cancels a reservation.
    pub async fn cancel(&self, ctx: &RequestContext, id: Uuid) -> Result<Reservation, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationUpdate)?;

        let reservation = self.load_reservation(id).await?;
        self.ensure_can_access(ctx, &reservation).await?;

        let canceled = self
            .reservation_repo
            .set_status(id, ReservationStatus::Canceled)
            .await?;
        info!(reservation_id = %id, "Reservation canceled");
        Ok(canceled)
    }

    /// Posts an additional charge to an in-house or upcoming stay.
    pub async fn add_charge(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        description: &str,
        amount: Decimal,
    ) -> Result<AdditionalCharge, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::ChargeAdd)?;

        if description.trim().is_empty() {
            return Err(AppError::validation("Charge description cannot be empty"));
        }
        if amount < Decimal::ZERO {
            return Err(AppError::validation("Charge amount must not be negative"));
        }

        let charge = self
            .reservation_repo
            .add_charge(id, description, amount)
            .await?;

        info!(
            reservation_id = %id,
            amount = %amount,
            "Charge posted"
        );

        Ok(charge)
    }

    /// Lists the charges posted to a reservation.
    pub async fn charges(
        &self,
        ctx: &RequestContext,
        id: Uuid,
    ) -> Result<Vec<AdditionalCharge>, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::ReservationRead)?;

        let reservation = self.load_reservation(id).await?;
        self.ensure_can_access(ctx, &reservation).await?;

        self.reservation_repo.charges(id).await
    }

    /// Resolves the guest a booking is for, depending on who is asking.
    async fn resolve_guest_id(
        &self,
        ctx: &RequestContext,
        requested: Option<Uuid>,
    ) -> Result<Uuid, AppError> {
        if ctx.is_staff() {
            return requested
                .ok_or_else(|| AppError::validation("guest_id is required for staff bookings"));
        }

        let own = self.own_guest_id(ctx).await?;
        match requested {
            Some(id) if id != own => Err(AppError::authorization(
                "Customers can only book for themselves",
            )),
            _ => Ok(own),
        }
    }

    /// Finds the guest profile linked to the current user account.
    async fn own_guest_id(&self, ctx: &RequestContext) -> Result<Uuid, AppError> {
        self.guest_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .map(|g| g.id)
            .ok_or_else(|| {
                AppError::not_found("No guest profile is linked to this account")
            })
    }

    /// Staff see everything; customers only their own bookings.
    async fn ensure_can_access(
        &self,
        ctx: &RequestContext,
        reservation: &Reservation,
    ) -> Result<(), AppError> {
        if ctx.is_staff() {
            return Ok(());
        }
        let own = self.own_guest_id(ctx).await?;
        if reservation.guest_id != own {
            return Err(AppError::not_found("Reservation not found"));
        }
        Ok(())
    }

    async fn load_reservation(&self, id: Uuid) -> Result<Reservation, AppError> {
        self.reservation_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Reservation not found"))
    }

    async fn load_room(&self, id: Uuid) -> Result<Room, AppError> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))
    }
}
