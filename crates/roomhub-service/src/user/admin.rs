//! Admin user management — account creation, role and status changes,
//! password resets.

use std::sync::Arc;

use tracing::info;
use uuid::Uuid;

use roomhub_auth::password::{PasswordHasher, PasswordValidator};
use roomhub_auth::rbac::RbacEnforcer;
use roomhub_auth::rbac::policies::Permission;
use roomhub_core::error::AppError;
use roomhub_core::types::pagination::{PageRequest, PageResponse};
use roomhub_database::repositories::{SessionRepository, UserRepository};
use roomhub_entity::user::model::{CreateUser, UpdateUser};
use roomhub_entity::user::{User, UserRole, UserStatus};

use crate::context::RequestContext;

/// Request to create a new user account.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct CreateUserRequest {
    /// Unique login name.
    pub username: String,
    /// Email address.
    pub email: Option<String>,
    /// Initial password.
    pub password: String,
    /// Display name.
    pub display_name: Option<String>,
    /// Role assignment.
    pub role: UserRole,
}

/// Request to update a user's profile fields.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct AdminUpdateUserRequest {
    /// New display name.
    pub display_name: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Handles administrative user management operations.
#[derive(Debug, Clone)]
pub struct AdminUserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session repository, for revocation on role and status changes.
    session_repo: Arc<SessionRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
    /// RBAC enforcer.
    rbac: Arc<RbacEnforcer>,
}

impl AdminUserService {
    /// Creates a new admin user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        session_repo: Arc<SessionRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
        rbac: Arc<RbacEnforcer>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            hasher,
            validator,
            rbac,
        }
    }

    /// Lists all users with pagination.
    pub async fn list_users(
        &self,
        ctx: &RequestContext,
        page: &PageRequest,
    ) -> Result<PageResponse<User>, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::UserRead)?;
        self.user_repo.find_all(page).await
    }

    /// Gets a single user by id.
    pub async fn get_user(&self, ctx: &RequestContext, user_id: Uuid) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::UserRead)?;
        self.load_user(user_id).await
    }

    /// Creates a new user account.
    pub async fn create_user(
        &self,
        ctx: &RequestContext,
        req: CreateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::UserCreate)?;

        if req.username.trim().is_empty() || req.username.len() < 3 {
            return Err(AppError::validation(
                "Username must be at least 3 characters",
            ));
        }

        if self
            .user_repo
            .find_by_username(&req.username)
            .await?
            .is_some()
        {
            return Err(AppError::conflict("Username is already taken"));
        }

        self.validator.validate(&req.password)?;
        let password_hash = self.hasher.hash_password(&req.password)?;

        let user = self
            .user_repo
            .create(&CreateUser {
                username: req.username,
                email: req.email,
                password_hash,
                display_name: req.display_name,
                role: req.role,
                created_by: Some(ctx.user_id),
            })
            .await?;

        info!(
            admin_id = %ctx.user_id,
            new_user_id = %user.id,
            username = %user.username,
            role = %user.role,
            "User created by admin"
        );

        Ok(user)
    }

    /// Updates a user's profile fields.
    pub async fn update_user(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        req: AdminUpdateUserRequest,
    ) -> Result<User, AppError> {
        self.rbac.require_permission(ctx.role, &Permission::UserUpdate)?;

        self.load_user(user_id).await?;

        let user = self
            .user_repo
            .update(&UpdateUser {
                id: user_id,
                email: req.email,
                display_name: req.display_name,
            })
            .await?;

        info!(admin_id = %ctx.user_id, target_id = %user_id, "User updated by admin");

        Ok(user)
    }

    /// Changes a user's role.
    ///
    /// All of the target's sessions are revoked so that new tokens carry
    /// the new role.
    pub async fn change_role(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_role: UserRole,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::UserChangeRole)?;

        if user_id == ctx.user_id {
            return Err(AppError::authorization("Cannot change your own role"));
        }

        let user = self.load_user(user_id).await?;
        let old_role = user.role;

        let updated = self.user_repo.update_role(user_id, new_role).await?;
        let revoked = self.session_repo.revoke_all_for_user(user_id).await?;

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            old_role = %old_role,
            new_role = %new_role,
            sessions_revoked = revoked,
            "User role changed"
        );

        Ok(updated)
    }

    /// Changes a user's status (active, inactive, locked).
    ///
    /// Deactivating or locking an account revokes every session the
    /// account holds.
    pub async fn change_status(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_status: UserStatus,
    ) -> Result<User, AppError> {
        self.rbac
            .require_permission(ctx.role, &Permission::UserChangeStatus)?;

        if user_id == ctx.user_id {
            return Err(AppError::authorization("Cannot change your own status"));
        }

        self.load_user(user_id).await?;

        let updated = self.user_repo.update_status(user_id, new_status).await?;

        if new_status == UserStatus::Active {
            self.user_repo.reset_failed_attempts(user_id).await?;
            info!(
                admin_id = %ctx.user_id,
                target_id = %user_id,
                "User reactivated"
            );
        } else {
            let revoked = self.session_repo.revoke_all_for_user(user_id).await?;
            info!(
                admin_id = %ctx.user_id,
                target_id = %user_id,
                new_status = %new_status,
                sessions_revoked = revoked,
                "User deactivated"
            );
        }

        Ok(updated)
    }

    /// Resets a user's password.
    ///
    /// All of the target's sessions are revoked afterwards.
    pub async fn reset_password(
        &self,
        ctx: &RequestContext,
        user_id: Uuid,
        new_password: &str,
    ) -> Result<(), AppError> {
        self.rbac.require_permission(ctx.role, &Permission::UserUpdate)?;

        self.load_user(user_id).await?;

        self.validator.validate(new_password)?;
        let hash = self.hasher.hash_password(new_password)?;

        self.user_repo.update_password(user_id, &hash).await?;
        let revoked = self.session_repo.revoke_all_for_user(user_id).await?;

        info!(
            admin_id = %ctx.user_id,
            target_id = %user_id,
            sessions_revoked = revoked,
            "Password reset by admin"
        );

        Ok(())
    }

    async fn load_user(&self, id: Uuid) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }
}
