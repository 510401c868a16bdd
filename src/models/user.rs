//! User model, roles and session claims

use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::{AppError, AppResult},
    store::{row_string, SheetRow},
};

/// Column names of the `usuarios` worksheet
pub const COL_USERNAME: &str = "usuario";
pub const COL_PASSWORD: &str = "clave";
pub const COL_ROLE: &str = "rol";

/// Account role. Gates visibility of the finance and settings views;
/// no other authorization rule exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Owner,
    Admin,
    Tecnico,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Owner => "owner",
            Role::Admin => "admin",
            Role::Tecnico => "tecnico",
        }
    }

    /// Whether this role may see the finance and settings views.
    pub fn is_back_office(&self) -> bool {
        matches!(self, Role::Owner | Role::Admin)
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = String;

    /// Roles are compared case-insensitively, as stored in the sheet.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "owner" => Ok(Role::Owner),
            "admin" => Ok(Role::Admin),
            "tecnico" => Ok(Role::Tecnico),
            other => Err(format!("unknown role '{}'", other)),
        }
    }
}

/// A credential row from the `usuarios` worksheet. The password is stored
/// and compared as plain text; hashing it would be a security redesign of
/// the original tool, which this server deliberately does not do.
#[derive(Debug, Clone)]
pub struct UserAccount {
    pub username: String,
    pub password: String,
    pub role: Role,
}

impl UserAccount {
    /// Build an account from a named-column row. Missing columns and
    /// unknown roles are malformed; the caller decides whether to skip.
    pub fn from_row(row: &SheetRow) -> AppResult<Self> {
        let username = row_string(row, COL_USERNAME).ok_or_else(|| AppError::MalformedRow {
            worksheet: crate::store::SHEET_USERS.to_string(),
            reason: format!("missing column '{}'", COL_USERNAME),
        })?;
        let password = row_string(row, COL_PASSWORD).ok_or_else(|| AppError::MalformedRow {
            worksheet: crate::store::SHEET_USERS.to_string(),
            reason: format!("missing column '{}'", COL_PASSWORD),
        })?;
        let role = row_string(row, COL_ROLE)
            .ok_or_else(|| AppError::MalformedRow {
                worksheet: crate::store::SHEET_USERS.to_string(),
                reason: format!("missing column '{}'", COL_ROLE),
            })?
            .parse::<Role>()
            .map_err(|reason| AppError::MalformedRow {
                worksheet: crate::store::SHEET_USERS.to_string(),
                reason,
            })?;

        Ok(Self {
            username,
            password,
            role,
        })
    }
}

/// Session context carried by the JWT. This is the explicit replacement for
/// the original tool's ambient logged-in globals: every protected operation
/// receives it instead of consulting shared state.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UserClaims {
    /// Username (subject)
    pub sub: String,
    /// Account role
    pub role: Role,
    /// Expiration time (unix timestamp)
    pub exp: i64,
    /// Issued at (unix timestamp)
    pub iat: i64,
}

impl UserClaims {
    /// Encode these claims as a signed JWT
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Decode and validate a JWT back into claims
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        let data = decode::<UserClaims>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(data.claims)
    }

    /// Require an owner or admin session (finance and settings views).
    pub fn require_back_office(&self) -> AppResult<()> {
        if self.role.is_back_office() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "This view requires an owner or admin account".to_string(),
            ))
        }
    }
}
