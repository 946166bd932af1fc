//! Guest registry service.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::GuestRepository;
use roomhub_entity::guest::model::CreateGuest;
use roomhub_entity::guest::{Guest, GuestKind};

use crate::context::RequestContext;

/// Request to register a guest or agency.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateGuestRequest {
    /// Full name or agency name.
    pub full_name: String,
    /// Contact email.
    pub email: Option<String>,
    /// Contact phone number.
    pub phone: Option<String>,
    /// Individual traveler or agency.
    pub kind: GuestKind,
    /// User account to link this profile to, if any.
    pub user_id: Option<Uuid>,
}

/// Manages guest and agency records.
#[derive(Debug, Clone)]
pub struct GuestService {
    /// Guest repository.
    guest_repo: Arc<GuestRepository>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl GuestService {
    /// Creates a new guest service.
    pub fn new(guest_repo: Arc<GuestRepository>, rbac: Arc<RbacEnforcer>) -> Self {
        Self { guest_repo, rbac }
    }

    /// Lists guests, paginated.
    pub async fn list(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<Guest>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::GuestRead)?;
        self.guest_repo.find_all(page).await
    }

    /// Gets a guest by id.
    pub async fn get(&self, ctx: &RequestContext, id: Uuid) -> Result<Guest, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::GuestRead)?;
        self.guest_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("Guest not found"))
    }

    /// Gets the guest profile linked to the calling user's account.
    pub async fn own_profile(&self, ctx: &RequestContext) -> Result<Guest, AppError> {
        self.guest_repo
            .find_by_user_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("No guest profile is linked to this account"))
    }

    /// Registers a new guest or agency record.
    pub async fn create(
        &self,
        ctx: &RequestContext,
        req: CreateGuestRequest,
    ) -> Result<Guest, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::GuestManage)?;

        if req.full_name.trim().is_empty() {
            return Err(AppError::validation("Guest name cannot be empty"));
        }

        if let Some(user_id) = req.user_id {
            if self.guest_repo.find_by_user_id(user_id).await?.is_some() {
                return Err(AppError::conflict(
                    "A guest profile is already linked to this user account",
                ));
            }
        }

        let guest = self
            .guest_repo
            .create(&CreateGuest {
                full_name: req.full_name,
                email: req.email,
                phone: req.phone,
                kind: req.kind,
                user_id: req.user_id,
            })
            .await?;

        info!(guest_id = %guest.id, kind = %guest.kind, "Guest registered");
        Ok(guest)
    }
}
