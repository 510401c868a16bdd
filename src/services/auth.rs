//! Authentication service
//!
//! Credentials live in the `usuarios` worksheet and are compared as plain
//! text, exactly as the shop's spreadsheet stores them. Hashing, lockout
//! and rate limiting would be a security redesign of the tool, which this
//! server deliberately does not undertake.

use chrono::Utc;

use crate::{
    config::AuthConfig,
    error::{AppError, AppResult},
    models::user::{Role, UserAccount, UserClaims},
    store::{Store, SHEET_USERS},
};

#[derive(Clone)]
pub struct AuthService {
    store: Store,
    config: AuthConfig,
}

impl AuthService {
    pub fn new(store: Store, config: AuthConfig) -> Self {
        Self { store, config }
    }

    /// Check submitted credentials against the users table and issue a
    /// session token. Username comparison is case-sensitive, first match
    /// wins, and the role comes back case-folded. No match is a user-facing
    /// rejection, not an internal error.
    pub async fn authenticate(&self, username: &str, password: &str) -> AppResult<(String, UserClaims)> {
        let role = self
            .match_credentials(username, password)
            .await?
            .ok_or_else(|| {
                AppError::Authentication("Invalid username or password".to_string())
            })?;

        let now = Utc::now().timestamp();
        let claims = UserClaims {
            sub: username.to_string(),
            role,
            exp: now + self.config.jwt_expiration_hours as i64 * 3600,
            iat: now,
        };
        let token = claims
            .create_token(&self.config.jwt_secret)
            .map_err(|err| AppError::Internal(format!("Failed to create token: {}", err)))?;

        tracing::info!("Session opened for '{}' ({})", username, claims.role);
        Ok((token, claims))
    }

    /// Matched role for the submitted credentials, or `None`. Rows with
    /// missing columns or unknown roles are skipped with a warning.
    pub async fn match_credentials(&self, username: &str, password: &str) -> AppResult<Option<Role>> {
        let rows = self.store.load(SHEET_USERS).await?;
        for row in &rows {
            let account = match UserAccount::from_row(row) {
                Ok(account) => account,
                Err(err) => {
                    tracing::warn!("Skipping user row: {}", err);
                    continue;
                }
            };
            if account.username == username && account.password == password {
                return Ok(Some(account.role));
            }
        }
        Ok(None)
    }

    /// Decode a bearer token back into the session context
    pub fn validate_token(&self, token: &str) -> AppResult<UserClaims> {
        UserClaims::from_token(token, &self.config.jwt_secret)
            .map_err(|err| AppError::Authentication(err.to_string()))
    }
}
