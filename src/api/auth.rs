//! Authentication endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use validator::Validate;

use crate::{
    error::AppResult,
    models::user::{Role, UserClaims},
    AppState,
};

use super::AuthenticatedUser;

/// Login request
#[derive(Deserialize, Validate, ToSchema)]
pub struct LoginRequest {
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

/// Login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
    pub token_type: String,
    pub username: String,
    pub role: Role,
}

/// Current session response
#[derive(Serialize, ToSchema)]
pub struct MeResponse {
    pub username: String,
    pub role: Role,
}

/// Open a session with the shop's user table
#[utoipa::path(
    post,
    path = "/auth/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token", body = LoginResponse),
        (status = 401, description = "Invalid credentials")
    )
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> AppResult<Json<LoginResponse>> {
    payload.validate()?;

    let (token, claims) = state
        .services
        .auth
        .authenticate(&payload.username, &payload.password)
        .await?;

    Ok(Json(LoginResponse {
        token,
        token_type: "Bearer".to_string(),
        username: claims.sub,
        role: claims.role,
    }))
}

/// Current session context
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Session claims", body = MeResponse),
        (status = 401, description = "Missing or invalid token")
    )
)]
pub async fn me(AuthenticatedUser(claims): AuthenticatedUser) -> Json<MeResponse> {
    let UserClaims { sub, role, .. } = claims;
    Json(MeResponse {
        username: sub,
        role,
    })
}
