//! User self-service operations — profile viewing and password changes.

use std::sync::Arc;

use tracing::info;

use roomhub_auth::password::{PasswordHasher, PasswordValidator};
use roomhub_core::error::AppError;
use roomhub_database::repositories::{SessionRepository, UserRepository};
use roomhub_entity::user::User;
use roomhub_entity::user::model::UpdateUser;

use crate::context::RequestContext;

/// Data for updating a user's own profile.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub display_name: Option<String>,
    /// New email.
    pub email: Option<String>,
}

/// Handles user self-service operations.
#[derive(Debug, Clone)]
pub struct UserService {
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Session repository, for revocation after credential changes.
    session_repo: Arc<SessionRepository>,
    /// Password hasher.
    hasher: Arc<PasswordHasher>,
    /// Password validator.
    validator: Arc<PasswordValidator>,
}

impl UserService {
    /// Creates a new user service.
    pub fn new(
        user_repo: Arc<UserRepository>,
        session_repo: Arc<SessionRepository>,
        hasher: Arc<PasswordHasher>,
        validator: Arc<PasswordValidator>,
    ) -> Self {
        Self {
            user_repo,
            session_repo,
            hasher,
            validator,
        }
    }

    /// Gets the current user's full profile.
    pub async fn get_profile(&self, ctx: &RequestContext) -> Result<User, AppError> {
        self.user_repo
            .find_by_id(ctx.user_id)
            .await?
            .ok_or_else(|| AppError::not_found("User not found"))
    }

    /// Updates the current user's profile fields.
    pub async fn update_profile(
        &self,
        ctx: &RequestContext,
        req: UpdateProfileRequest,
    ) -> Result<User, AppError> {
        if let Some(ref display_name) = req.display_name {
            if display_name.trim().is_empty() {
                return Err(AppError::validation("Display name cannot be empty"));
            }
        }
        if let Some(ref email) = req.email {
            if !email.contains('@') || !email.contains('.') {
                return Err(AppError::validation("Invalid email format"));
            }
        }

        let user = self
            .user_repo
            .update(&UpdateUser {
                id: ctx.user_id,
                email: req.email,
                display_name: req.display_name,
            })
            .await?;

        info!(user_id = %ctx.user_id, "Profile updated");

        Ok(user)
    }

    /// Changes the current user's password.
    ///
    /// All sessions are revoked afterwards; the user must log in again
    /// with the new password.
    pub async fn change_password(
        &self,
        ctx: &RequestContext,
        current_password: &str,
        new_password: &str,
    ) -> Result<(), AppError> {
        let user = self.get_profile(ctx).await?;

        let valid = self
            .hasher
            .verify_password(current_password, &user.password_hash)?;
        if !valid {
            return Err(AppError::authentication("Current password is incorrect"));
        }

        self.validator.validate(new_password)?;
        self.validator
            .validate_not_same(current_password, new_password)?;

        let new_hash = self.hasher.hash_password(new_password)?;
        self.user_repo
            .update_password(ctx.user_id, &new_hash)
            .await?;

        let revoked = self.session_repo.revoke_all_for_user(ctx.user_id).await?;

        info!(
            user_id = %ctx.user_id,
            sessions_revoked = revoked,
            "Password changed"
        );

        Ok(())
    }
}
