//! Warranty lookup endpoint

use axum::{
    extract::{Path, State},
    Json,
};

use crate::{error::AppResult, services::warranty::WarrantyReport, AppState};

use super::AuthenticatedUser;

/// Warranty status for one ticket
#[utoipa::path(
    get,
    path = "/warranty/{folio}",
    tag = "warranty",
    security(("bearer_auth" = [])),
    params(("folio" = String, Path, description = "Ticket folio, e.g. T-007")),
    responses(
        (status = 200, description = "Warranty report", body = WarrantyReport),
        (status = 404, description = "No ticket with this folio")
    )
)]
pub async fn lookup_warranty(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Path(folio): Path<String>,
) -> AppResult<Json<WarrantyReport>> {
    let report = state.services.warranty.lookup(&folio).await?;
    Ok(Json(report))
}
