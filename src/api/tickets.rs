//! Ticket endpoints: registration, the active grid and history search

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use crate::{
    error::AppResult,
    models::ticket::{NewTicket, Ticket},
    services::tickets::ReconcileSummary,
    AppState,
};

use super::AuthenticatedUser;

/// History search parameters
#[derive(Deserialize, IntoParams)]
pub struct SearchParams {
    /// Term matched against folio and customer name, case-insensitive
    pub q: String,
}

/// Grid save request: the full edited active subset. Row deletion is
/// unsupported; folios must never be removed from the submitted grid.
#[derive(Deserialize, ToSchema)]
pub struct SaveActiveRequest {
    pub tickets: Vec<Ticket>,
}

/// Register a new repair order
#[utoipa::path(
    post,
    path = "/tickets",
    tag = "tickets",
    security(("bearer_auth" = [])),
    request_body = NewTicket,
    responses(
        (status = 200, description = "Registered ticket with its folio", body = Ticket),
        (status = 400, description = "Invalid fields")
    )
)]
pub async fn register_ticket(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(payload): Json<NewTicket>,
) -> AppResult<Json<Ticket>> {
    payload.validate()?;
    let ticket = state.services.tickets.register(payload).await?;
    Ok(Json(ticket))
}

/// Active tickets for the grid editor
#[utoipa::path(
    get,
    path = "/tickets/active",
    tag = "tickets",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Tickets not yet delivered", body = [Ticket])
    )
)]
pub async fn list_active(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = state.services.tickets.list_active().await?;
    Ok(Json(tickets))
}

/// Save the edited grid, merging it back with the archived tickets
#[utoipa::path(
    put,
    path = "/tickets/active",
    tag = "tickets",
    security(("bearer_auth" = [])),
    request_body = SaveActiveRequest,
    responses(
        (status = 200, description = "Merge outcome", body = ReconcileSummary)
    )
)]
pub async fn save_active(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Json(payload): Json<SaveActiveRequest>,
) -> AppResult<Json<ReconcileSummary>> {
    let summary = state.services.tickets.save_active(payload.tickets).await?;
    Ok(Json(summary))
}

/// Search the full ticket history
#[utoipa::path(
    get,
    path = "/tickets/search",
    tag = "tickets",
    security(("bearer_auth" = [])),
    params(SearchParams),
    responses(
        (status = 200, description = "Matching tickets", body = [Ticket])
    )
)]
pub async fn search_tickets(
    State(state): State<AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
    Query(params): Query<SearchParams>,
) -> AppResult<Json<Vec<Ticket>>> {
    let tickets = state.services.tickets.search(&params.q).await?;
    Ok(Json(tickets))
}
