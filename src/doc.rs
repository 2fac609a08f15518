//! OpenAPI document served by Swagger UI at `/swagger-ui/`.

use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::handlers::{admin, auth, catalog, media, orders, profile, response};

/// Bearer tokens: a user access token on `/profile`, the admin secret on `/admin`.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);
        components.add_security_scheme(
            "bearer",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(title = "Mock shop API", description = "Catalog browsing, ordering and account management."),
    paths(
        auth::sign_up,
        auth::confirm_email,
        auth::sign_in,
        auth::password_recovery,
        auth::password_update,
        profile::get_profile,
        profile::update_profile,
        profile::delete_profile,
        orders::create_order,
        orders::list_orders,
        orders::get_order,
        catalog::list_categories,
        catalog::get_category,
        catalog::list_category_products,
        catalog::list_products,
        catalog::get_product,
        admin::create_category,
        admin::update_category,
        admin::create_product,
        admin::update_product,
        media::get_media,
    ),
    components(schemas(
        response::EnvelopeSchema,
        response::IdResponse,
        response::TokenResponse,
        auth::SignUpRequest,
        auth::ConfirmEmailRequest,
        auth::SignInRequest,
        auth::PasswordRecoveryRequest,
        auth::PasswordUpdateRequest,
        profile::ProfileResponse,
        profile::DeleteProfileRequest,
        orders::CreateOrderRequest,
        orders::OrderProductRequest,
        orders::OrderResponse,
        orders::OrderedProductResponse,
        catalog::CategoryResponse,
        catalog::ProductResponse,
    )),
    tags(
        (name = "auth", description = "Sign-up, sign-in and password recovery"),
        (name = "profile", description = "The signed-in user's account"),
        (name = "orders", description = "Placing and reading the signed-in user's orders"),
        (name = "catalog", description = "Public catalog browsing"),
        (name = "admin", description = "Catalog management, admin secret required"),
        (name = "media", description = "Uploaded images"),
    )
)]
pub struct ApiDoc;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_routes_are_documented() {
        let doc = ApiDoc::openapi();
        assert!(doc.paths.paths.contains_key("/profile/orders"));
        assert!(doc.paths.paths.contains_key("/profile/orders/{id}"));
    }

    #[test]
    fn bearer_scheme_is_registered() {
        let doc = ApiDoc::openapi();
        let components = doc.components.expect("components");
        assert!(components.security_schemes.contains_key("bearer"));
    }
}
