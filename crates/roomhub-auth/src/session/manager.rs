//! Session lifecycle manager — login, logout, refresh token flows.

use std::sync::Arc;

use chrono::Utc;
use sha2::{Digest, Sha256};
use tracing::{info, warn};
use uuid::Uuid;

use roomhub_core::config::{AuthConfig, SessionConfig};
use roomhub_core::error::AppError;
use roomhub_database::repositories::{SessionRepository, UserRepository};
use roomhub_entity::session::model::{CreateSession, Session};
use roomhub_entity::user::{User, UserStatus};

use crate::jwt::encoder::TokenPair;
use crate::jwt::{JwtDecoder, JwtEncoder};
use crate::password::PasswordHasher;

/// Result of a successful login.
#[derive(Debug, Clone, serde::Serialize)]
pub struct LoginResult {
    /// Generated token pair.
    pub tokens: TokenPair,
    /// Created session.
    pub session: Session,
    /// The authenticated user.
    pub user: User,
}

/// Manages the complete session lifecycle.
#[derive(Clone)]
pub struct SessionManager {
    /// JWT encoder for token generation.
    jwt_encoder: Arc<JwtEncoder>,
    /// JWT decoder for token validation.
    jwt_decoder: Arc<JwtDecoder>,
    /// Session persistence.
    session_repo: Arc<SessionRepository>,
    /// User repository.
    user_repo: Arc<UserRepository>,
    /// Password hasher.
    password_hasher: Arc<PasswordHasher>,
    /// Auth configuration.
    auth_config: AuthConfig,
    /// Session configuration.
    session_config: SessionConfig,
}

impl std::fmt::Debug for SessionManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SessionManager")
            .field("session_config", &self.session_config)
            .finish()
    }
}

impl SessionManager {
    /// Creates a new session manager with all required dependencies.
    pub fn new(
        jwt_encoder: Arc<JwtEncoder>,
        jwt_decoder: Arc<JwtDecoder>,
        session_repo: Arc<SessionRepository>,
        user_repo: Arc<UserRepository>,
        password_hasher: Arc<PasswordHasher>,
        auth_config: AuthConfig,
        session_config: SessionConfig,
    ) -> Self {
        Self {
            jwt_encoder,
            jwt_decoder,
            session_repo,
            user_repo,
            password_hasher,
            auth_config,
            session_config,
        }
    }

    /// Performs the complete login flow:
    ///
    /// 1. Find the user and check account status
    /// 2. Verify the password, tracking failed attempts
    /// 3. Enforce the per-user concurrent session limit
    /// 4. Create the session record and issue a token pair
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        ip_address: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<LoginResult, AppError> {
        let user = self
            .user_repo
            .find_by_username(username)
            .await?
            .ok_or_else(|| AppError::authentication("Invalid username or password"))?;

        self.check_user_status(&user)?;

        let password_valid = self
            .password_hasher
            .verify_password(password, &user.password_hash)?;

        if !password_valid {
            self.handle_failed_login(&user).await?;
            return Err(AppError::authentication("Invalid username or password"));
        }

        if user.failed_login_attempts.unwrap_or(0) > 0 {
            self.user_repo.reset_failed_attempts(user.id).await?;
        }

        let active = self.session_repo.count_active_for_user(user.id).await?;
        if active >= self.session_config.max_sessions_per_user as u64 {
            return Err(AppError::conflict(format!(
                "Maximum concurrent sessions ({}) reached. Log out of another session first.",
                self.session_config.max_sessions_per_user
            )));
        }

        // The session row must exist before tokens can reference it, so the
        // record is created with a throwaway hash and rotated immediately.
        let refresh_exp =
            Utc::now() + chrono::Duration::hours(self.auth_config.jwt_refresh_ttl_hours as i64);
        let placeholder = hash_token(&Uuid::new_v4().to_string());

        let session = self
            .session_repo
            .create(&CreateSession {
                user_id: user.id,
                refresh_token_hash: placeholder,
                ip_address: ip_address.map(str::to_string),
                user_agent: user_agent.map(str::to_string),
                expires_at: refresh_exp,
            })
            .await?;

        let tokens =
            self.jwt_encoder
                .generate_token_pair(user.id, session.id, user.role, &user.username)?;

        let session = self
            .session_repo
            .rotate_refresh(
                session.id,
                &hash_token(&tokens.refresh_token),
                tokens.refresh_expires_at,
            )
            .await?;

        self.user_repo.update_last_login(user.id).await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            "Login successful"
        );

        Ok(LoginResult {
            tokens,
            session,
            user,
        })
    }

    /// Refreshes a token pair using a valid refresh token.
    ///
    /// The presented token must hash to a live session row, which makes
    /// rotation single-use: a replayed refresh token no longer matches
    /// and is rejected.
    pub async fn refresh(&self, refresh_token: &str) -> Result<TokenPair, AppError> {
        let claims = self.jwt_decoder.decode_refresh_token(refresh_token)?;

        let session = self
            .session_repo
            .find_by_refresh_hash(&hash_token(refresh_token))
            .await?
            .ok_or_else(|| AppError::authentication("Session no longer active"))?;

        if session.id != claims.session_id() {
            warn!(
                session_id = %session.id,
                "Refresh token session mismatch"
            );
            return Err(AppError::authentication("Session no longer active"));
        }

        // Role may have changed since issuance; re-read the user.
        let user = self
            .user_repo
            .find_by_id(claims.user_id())
            .await?
            .ok_or_else(|| AppError::authentication("User not found"))?;

        self.check_user_status(&user)?;

        let tokens =
            self.jwt_encoder
                .generate_token_pair(user.id, session.id, user.role, &user.username)?;

        self.session_repo
            .rotate_refresh(
                session.id,
                &hash_token(&tokens.refresh_token),
                tokens.refresh_expires_at,
            )
            .await?;

        info!(
            user_id = %user.id,
            session_id = %session.id,
            "Token refreshed"
        );

        Ok(tokens)
    }

    /// Logs out by revoking the session referenced by the access token.
    pub async fn logout(&self, session_id: Uuid) -> Result<(), AppError> {
        let revoked = self.session_repo.revoke(session_id).await?;
        if !revoked {
            warn!(session_id = %session_id, "Logout for already-revoked session");
        }
        info!(session_id = %session_id, "Logout completed");
        Ok(())
    }

    /// Revokes every session a user holds, e.g. after a password reset.
    pub async fn revoke_all_for_user(&self, user_id: Uuid) -> Result<u64, AppError> {
        let revoked = self.session_repo.revoke_all_for_user(user_id).await?;
        info!(user_id = %user_id, revoked, "Revoked all user sessions");
        Ok(revoked)
    }

    /// Validates that the given session is live and within its idle window.
    ///
    /// Idle sessions are revoked on sight.
    pub async fn validate_session(&self, session_id: Uuid) -> Result<Session, AppError> {
        let session = self
            .session_repo
            .find_by_id(session_id)
            .await?
            .ok_or_else(|| AppError::authentication("Session not found"))?;

        if !session.is_active() {
            return Err(AppError::authentication("Session no longer active"));
        }

        let idle_cutoff = Utc::now()
            - chrono::Duration::minutes(self.session_config.idle_timeout_minutes as i64);
        if session.last_activity < idle_cutoff {
            self.session_repo.revoke(session.id).await?;
            return Err(AppError::authentication(
                "Session expired due to inactivity",
            ));
        }

        self.session_repo.touch(session.id).await?;

        Ok(session)
    }

    /// Checks user status and lockout state.
    fn check_user_status(&self, user: &User) -> Result<(), AppError> {
        match user.status {
            UserStatus::Inactive => Err(AppError::authorization(
                "Account is deactivated. Contact an administrator.",
            )),
            UserStatus::Locked => {
                if let Some(locked_until) = user.locked_until {
                    if locked_until > Utc::now() {
                        return Err(AppError::authorization(format!(
                            "Account is locked until {}",
                            locked_until.format("%Y-%m-%d %H:%M:%S UTC")
                        )));
                    }
                    // Lock window elapsed; allow the attempt through.
                    Ok(())
                } else {
                    Err(AppError::authorization(
                        "Account is locked. Contact an administrator.",
                    ))
                }
            }
            UserStatus::Active => Ok(()),
        }
    }

    /// Handles a failed login attempt, locking the account at the limit.
    async fn handle_failed_login(&self, user: &User) -> Result<(), AppError> {
        let attempts = self.user_repo.increment_failed_attempts(user.id).await?;

        if attempts >= self.auth_config.max_failed_attempts {
            let locked_until = Utc::now()
                + chrono::Duration::minutes(self.auth_config.lockout_duration_minutes as i64);

            self.user_repo.lock_until(user.id, locked_until).await?;

            warn!(
                user_id = %user.id,
                username = %user.username,
                attempts,
                locked_until = %locked_until,
                "Account locked after repeated failed logins"
            );
        }

        Ok(())
    }
}

/// Computes the SHA-256 hex digest of a token for at-rest storage.
pub fn hash_token(token: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(token.as_bytes());
    format!("{:x}", hasher.finalize())
}

#[cfg(test)]
mod tests {
    use super::hash_token;

    #[test]
    fn token_hash_is_stable_hex() {
        let a = hash_token("some-refresh-token");
        let b = hash_token("some-refresh-token");
        assert_eq!(a, b);
        assert_eq!(a.len(), 64);
        assert!(a.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn distinct_tokens_hash_differently() {
        assert_ne!(hash_token("token-a"), hash_token("token-b"));
    }
}
