//! OpenAPI documentation

use axum::Router;
use utoipa::openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme};
use utoipa::{Modify, OpenApi};
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{auth, finance, health, settings, tickets, warranty};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Taller API",
        version = "1.0.0",
        description = "Repair Shop Management REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    modifiers(&BearerAuth),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Auth
        auth::login,
        auth::me,
        // Tickets
        tickets::register_ticket,
        tickets::list_active,
        tickets::save_active,
        tickets::search_tickets,
        // Warranty
        warranty::lookup_warranty,
        // Finance
        finance::finance_summary,
        // Settings
        settings::get_settings,
        settings::update_settings,
    ),
    components(
        schemas(
            // Auth
            auth::LoginRequest,
            auth::LoginResponse,
            auth::MeResponse,
            crate::models::user::Role,
            crate::models::user::UserClaims,
            // Tickets
            crate::models::ticket::Ticket,
            crate::models::ticket::NewTicket,
            tickets::SaveActiveRequest,
            crate::services::tickets::ReconcileSummary,
            // Warranty
            crate::services::warranty::WarrantyStatus,
            crate::services::warranty::WarrantyReport,
            // Finance
            crate::services::finance::FinanceSummary,
            // Settings
            crate::models::shop::ShopConfig,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "auth", description = "Authentication endpoints"),
        (name = "tickets", description = "Ticket registration and grid editing"),
        (name = "warranty", description = "Warranty lookup"),
        (name = "finance", description = "Finance totals"),
        (name = "settings", description = "Shop settings")
    )
)]
pub struct ApiDoc;

/// Register the Bearer JWT security scheme
struct BearerAuth;

impl Modify for BearerAuth {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .build(),
                ),
            );
        }
    }
}

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
