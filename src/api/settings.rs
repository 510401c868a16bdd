//! Settings endpoints (owner/admin only)

use axum::{extract::State, Json};
use validator::Validate;

use crate::{error::AppResult, models::shop::ShopConfig, AppState};

use super::AuthenticatedUser;

/// Current shop settings
#[utoipa::path(
    get,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Shop settings", body = ShopConfig),
        (status = 403, description = "Requires owner or admin role")
    )
)]
pub async fn get_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<ShopConfig>> {
    claims.require_back_office()?;

    let settings = state.services.settings.get().await?;
    Ok(Json(settings))
}

/// Replace the shop settings wholesale
#[utoipa::path(
    put,
    path = "/settings",
    tag = "settings",
    security(("bearer_auth" = [])),
    request_body = ShopConfig,
    responses(
        (status = 200, description = "Updated settings", body = ShopConfig),
        (status = 403, description = "Requires owner or admin role")
    )
)]
pub async fn update_settings(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Json(payload): Json<ShopConfig>,
) -> AppResult<Json<ShopConfig>> {
    claims.require_back_office()?;
    payload.validate()?;

    let updated = state.services.settings.update(payload).await?;
    Ok(Json(updated))
}
