use utoipa::OpenApi;
use utoipa::openapi::security::{SecurityScheme, HttpAuthScheme, HttpBuilder};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Bistro Service API",
        version = "1.0.0",
        description = "Restaurant backend: menu, reviews, carts, reservations and users.\n\n**Authentication:** owner-scoped lists and admin routes require a bearer token obtained from `POST /jwt`."
    ),
    paths(
        // Health
        crate::api::health::greeting,
        crate::api::health::health_check,

        // Auth
        crate::api::jwt::issue_token,

        // Users
        crate::api::users::list_users,
        crate::api::users::create_user,
        crate::api::users::promote_user,
        crate::api::users::delete_user,
        crate::api::users::admin_status,

        // Menu
        crate::api::menu::list_menu,
        crate::api::menu::create_menu_item,
        crate::api::menu::delete_menu_item,

        // Reservation
        crate::api::reservation::create_reservation,
        crate::api::reservation::list_reservations,
        crate::api::reservation::delete_reservation,

        // Reviews
        crate::api::reviews::list_reviews,
        crate::api::reviews::create_review,

        // Carts
        crate::api::carts::add_to_cart,
        crate::api::carts::list_cart,
        crate::api::carts::remove_from_cart,
    ),
    components(
        schemas(
            crate::api::health::HealthResponse,
            crate::models::TokenResponse,
            crate::models::AdminStatus,
            crate::models::MessageResponse,
            crate::database::InsertOutcome,
            crate::database::UpdateOutcome,
            crate::database::DeleteOutcome,
        )
    ),
    tags(
        (name = "Health", description = "Liveness endpoints."),
        (name = "Auth", description = "Access token issuance."),
        (name = "Users", description = "User registration and admin role management."),
        (name = "Menu", description = "Menu items."),
        (name = "Reservation", description = "Table reservations, listed per owner."),
        (name = "Reviews", description = "Customer reviews; public wall or per owner."),
        (name = "Carts", description = "Cart entries, listed per owner."),
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(components) = openapi.components.as_mut() {
            components.add_security_scheme(
                "bearer_auth",
                SecurityScheme::Http(
                    HttpBuilder::new()
                        .scheme(HttpAuthScheme::Bearer)
                        .bearer_format("JWT")
                        .description(Some("Token from POST /jwt"))
                        .build()
                ),
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_openapi_lists_routes() {
        let doc = ApiDoc::openapi();
        for path in ["/jwt", "/users", "/users/admin/{id}", "/menu/{id}", "/carts", "/reviews", "/reservation"] {
            assert!(doc.paths.paths.contains_key(path), "missing {}", path);
        }
    }
}
