//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{health, items, profiles, requests};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "LendHub API",
        version = "0.3.0",
        description = "Peer-to-Peer Item Lending Marketplace REST API",
        license(name = "AGPL-3.0", url = "https://www.gnu.org/licenses/agpl-3.0.html")
    ),
    servers(
        (url = "/api/v1", description = "API v1")
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Items
        items::list_items,
        items::get_item,
        items::create_item,
        items::update_item,
        items::delete_item,
        items::borrow_item,
        items::return_item,
        items::upload_item_picture,
        // Requests
        requests::create_request,
        requests::get_request,
        requests::owner_inbox,
        requests::respond_request,
        // Profiles
        profiles::list_profiles,
        profiles::get_profile,
        profiles::create_profile,
        profiles::update_profile,
        profiles::delete_profile,
        profiles::upload_profile_picture,
    ),
    components(
        schemas(
            // Items
            crate::models::item::Item,
            crate::models::item::CreateItem,
            crate::models::item::UpdateItem,
            crate::models::item::BorrowItem,
            // Requests
            crate::models::request::BorrowRequest,
            crate::models::request::CreateRequest,
            crate::models::request::RespondRequest,
            crate::models::request::RequestDetails,
            crate::models::request::RequestStatus,
            requests::RespondResponse,
            // Profiles
            crate::models::profile::Profile,
            crate::models::profile::CreateProfile,
            crate::models::profile::UpdateProfile,
            // Health
            health::HealthResponse,
            // Errors
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "items", description = "Item listing management and lending transitions"),
        (name = "requests", description = "Borrow request lifecycle"),
        (name = "profiles", description = "Profile management")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
