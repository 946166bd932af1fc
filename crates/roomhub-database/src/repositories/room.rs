//! Room repository implementation.

use sqlx::PgPool;
use uuid::Uuid;

use roomhub_core::error::{AppError, ErrorKind};
use roomhub_core::result::AppResult;
use roomhub_core::types::StayRange;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_entity::room::model::{CreateRoom, Room, UpdateRoom};
use roomhub_entity::room::RoomStatus;

/// Repository for room inventory queries and maintenance.
#[derive(Debug, Clone)]
pub struct RoomRepository {
    pool: PgPool,
}

impl RoomRepository {
    /// Create a new room repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a room by primary key.
    pub async fn find_by_id(&self, id: Uuid) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find room", e))
    }

    /// Find a room by its human-facing number.
    pub async fn find_by_number(&self, room_number: &str) -> AppResult<Option<Room>> {
        sqlx::query_as::<_, Room>("SELECT * FROM rooms WHERE room_number = $1")
            .bind(room_number)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to find room by number", e)
            })
    }

    /// List rooms with an optional status filter.
    pub async fn find_all(
        &self,
        status: Option<RoomStatus>,
        page: &PageRequest,
    ) -> AppResult<PageResponse<Room>> {
        let total: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM rooms WHERE ($1::room_status IS NULL OR status = $1)",
        )
        .bind(status)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))?;

        let rooms = sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms WHERE ($1::room_status IS NULL OR status = $1) \
             ORDER BY room_number ASC LIMIT $2 OFFSET $3",
        )
        .bind(status)
        .bind(page.limit() as i64)
        .bind(page.offset() as i64)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list rooms", e))?;

        Ok(PageResponse::new(
            rooms,
            page.page,
            page.page_size,
            total as u64,
        ))
    }

    /// Check whether the room is free for the whole stay.
    pub async fn is_available(&self, room_id: Uuid, stay: StayRange) -> AppResult<bool> {
        let taken: bool = sqlx::query_scalar(
            "SELECT EXISTS( \
                SELECT 1 FROM reservations \
                WHERE room_id = $1 AND status <> 'canceled' \
                  AND check_in < $3 AND check_out > $2)",
        )
        .bind(room_id)
        .bind(stay.check_in)
        .bind(stay.check_out)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to check room availability", e)
        })?;

        Ok(!taken)
    }

    /// List bookable rooms free for the whole stay.
    pub async fn find_available(&self, stay: StayRange) -> AppResult<Vec<Room>> {
        sqlx::query_as::<_, Room>(
            "SELECT * FROM rooms r \
             WHERE r.status = 'available' \
               AND NOT EXISTS( \
                 SELECT 1 FROM reservations \
                 WHERE room_id = r.id AND status <> 'canceled' \
                   AND check_in < $2 AND check_out > $1) \
             ORDER BY r.room_number ASC",
        )
        .bind(stay.check_in)
        .bind(stay.check_out)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to list available rooms", e)
        })
    }

    /// Create a new room.
    pub async fn create(&self, data: &CreateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "INSERT INTO rooms (room_number, room_type, rate_per_night, capacity) \
             VALUES ($1, $2, $3, $4) RETURNING *",
        )
        .bind(&data.room_number)
        .bind(&data.room_type)
        .bind(data.rate_per_night)
        .bind(data.capacity)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("rooms_room_number_key") =>
            {
                AppError::conflict(format!("Room number '{}' already exists", data.room_number))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create room", e),
        })
    }

    /// Update a room's attributes.
    pub async fn update(&self, data: &UpdateRoom) -> AppResult<Room> {
        sqlx::query_as::<_, Room>(
            "UPDATE rooms SET room_type = COALESCE($2, room_type), \
                              rate_per_night = COALESCE($3, rate_per_night), \
                              capacity = COALESCE($4, capacity), \
                              status = COALESCE($5, status), \
                              updated_at = NOW() \
             WHERE id = $1 RETURNING *",
        )
        .bind(data.id)
        .bind(&data.room_type)
        .bind(data.rate_per_night)
        .bind(data.capacity)
        .bind(data.status)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to update room", e))?
        .ok_or_else(|| AppError::not_found(format!("Room {} not found", data.id)))
    }

    /// Count total rooms.
    pub async fn count(&self) -> AppResult<u64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM rooms")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to count rooms", e))?;
        Ok(count as u64)
    }
}
