//! Finance endpoint (owner/admin only)

use axum::{extract::State, Json};

use crate::{error::AppResult, services::finance::FinanceSummary, AppState};

use super::AuthenticatedUser;

/// Finance totals over the full ticket table
#[utoipa::path(
    get,
    path = "/finance/summary",
    tag = "finance",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Totals", body = FinanceSummary),
        (status = 403, description = "Requires owner or admin role")
    )
)]
pub async fn finance_summary(
    State(state): State<AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
) -> AppResult<Json<FinanceSummary>> {
    claims.require_back_office()?;

    let summary = state.services.finance.summary().await?;
    Ok(Json(summary))
}
