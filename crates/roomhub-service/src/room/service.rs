//! Room inventory service.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::error::AppError;
use roomhub_core::types::StayRange;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{ReservationRepository, RoomRepository};
use roomhub_entity::room::model::{CreateRoom, UpdateRoom};
use roomhub_entity::room::{Room, RoomStatus};

use crate::context::RequestContext;

/// Request to register a new room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateRoomRequest {
    /// Human-facing room number.
    pub room_number: String,
    /// Room category.
    pub room_type: String,
    /// Nightly rate.
    pub rate_per_night: Decimal,
    /// Maximum number of guests.
    pub capacity: i32,
}

/// Request to update an existing room.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateRoomRequest {
    /// New room category.
    pub room_type: Option<String>,
    /// New nightly rate.
    pub rate_per_night: Option<Decimal>,
    /// New capacity.
    pub capacity: Option<i32>,
    /// New operational status.
    pub status: Option<RoomStatus>,
}

/// Whether a room is free for a requested stay.
#[derive(Debug, Clone, Serialize)]
pub struct RoomAvailability {
    /// The room checked.
    pub room_id: Uuid,
    /// Requested arrival date.
    pub check_in: NaiveDate,
    /// Requested departure date (exclusive).
    pub check_out: NaiveDate,
    /// Whether the whole range is free.
    pub available: bool,
}

/// Hotel-wide occupancy for a single night.
#[derive(Debug, Clone, Serialize)]
pub struct OccupancyReport {
    /// The night reported on.
    pub date: NaiveDate,
    /// Rooms in inventory.
    pub total_rooms: u64,
    /// Rooms reserved or occupied that night.
    pub occupied_rooms: u64,
    /// Occupied share as a percentage (0 when there is no inventory).
    pub occupancy_percent: Decimal,
}

/// Manages the room inventory.
#[derive(Debug, Clone)]
pub struct RoomService {
    /// Room repository.
    room_repo: Arc<RoomRepository>,
    /// Reservation repository, used for occupancy reporting.
    reservation_repo: Arc<ReservationRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl RoomService {
    /// Creates a new room service.
    pub fn new(
        room_repo: Arc<RoomRepository>,
        reservation_repo: Arc<ReservationRepository>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            room_repo,
            reservation_repo,
            rbac,
        }
    }

    /// Lists rooms with an optional status filter.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        status: Option<RoomStatus>,
        page: &PageRequest,
    ) -> Result<PageResponse<Room>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomRead)?;
        self.room_repo.find_all(status, page).await
    }

    /// Gets a room by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Room, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomRead)?;
        self.load_room(id).await
    }

    /// Checks whether one room is free for the whole requested stay.
    pub async fn availability(
        &self,
        ctx: &RequestContext,
        room_id: Uuid,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<RoomAvailability, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomRead)?;

        let stay = StayRange::new(check_in, check_out)?;
        let room = self.load_room(room_id).await?;
        let available = room.is_bookable() && self.room_repo.is_available(room.id, stay).await?;

        Ok(RoomAvailability {
            room_id: room.id,
            check_in,
            check_out,
            available,
        })
    }

    /// Lists the bookable rooms free for the whole requested stay.
    pub async fn available_rooms(
        &self,
        ctx: &RequestContext,
        check_in: NaiveDate,
        check_out: NaiveDate,
    ) -> Result<Vec<Room>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomRead)?;

        let stay = StayRange::new(check_in, check_out)?;
        self.room_repo.find_available(stay).await
    }

    /// Registers a new room. Room numbers must be unique.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateRoomRequest,
    ) -> Result<Room, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomManage)?;

        if req.room_number.trim().is_empty() {
            return Err(AppError::validation("Room number cannot be empty"));
        }
        if req.rate_per_night <= Decimal::ZERO {
            return Err(AppError::validation("Nightly rate must be positive"));
        }
        if req.capacity < 1 {
            return Err(AppError::validation("Room capacity must be at least 1"));
        }

        let room = self
            .room_repo
            .create(&CreateRoom {
                room_number: req.room_number,
                room_type: req.room_type,
                rate_per_night: req.rate_per_night,
                capacity: req.capacity,
            })
            .await?;

        info!(room_id = %room.id, room = %room.room_number, "Room created");
        Ok(room)
    }

    /// Updates a room's attributes.
    pub async fn update(
        &self,
        ctx: &RequestContext,
        id: Uuid,
        req: UpdateRoomRequest,
    ) -> Result<Room, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomManage)?;

        if let Some(rate) = req.rate_per_night {
            if rate <= Decimal::ZERO {
                return Err(AppError::validation("Nightly rate must be positive"));
            }
        }
        if let Some(capacity) = req.capacity {
            if capacity < 1 {
                return Err(AppError::validation("Room capacity must be at least 1"));
            }
        }

        let room = self
            .room_repo
            .update(&UpdateRoom {
                id,
                room_type: req.room_type,
                rate_per_night: req.rate_per_night,
                capacity: req.capacity,
                status: req.status,
            })
            .await?;

        info!(room_id = %room.id, room = %room.room_number, "Room updated");
        Ok(room)
    }

    /// Reports hotel-wide occupancy for one night. Defaults to today.
    pub async fn occupancy(
        &self,
        ctx: &RequestContext,
        date: Option<NaiveDate>,
    ) -> Result<OccupancyReport, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::RoomManage)?;

        let date = date.unwrap_or_else(|| Utc::now().date_naive());
        let total_rooms = self.room_repo.count().await?;
        let occupied = self.reservation_repo.count_occupying(date).await?.max(0) as u64;

        let occupancy_percent = if total_rooms == 0 {
            Decimal::ZERO
        } else {
            Decimal::from(occupied) * Decimal::from(100) / Decimal::from(total_rooms)
        };

        Ok(OccupancyReport {
            date,
            total_rooms,
            occupied_rooms: occupied,
            occupancy_percent,
        })
    }

    async fn load_room(&self, id: Uuid) -> Result<Room, AppError> {
        self.room_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Room not found"))
    }
}
