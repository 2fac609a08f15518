pub mod admin;
pub mod auth;
pub mod catalog;
pub mod extractors;
pub mod media;
pub mod orders;
pub mod profile;
pub mod response;
pub mod validation;

#[cfg(test)]
pub(crate) mod test_support;

use actix_multipart::form::MultipartFormConfig;
use actix_web::web;

use crate::errors::AppError;

const UPLOAD_LIMIT: usize = 20 * 1024 * 1024;

/// Register every route. Extractor failures are reported in the same
/// envelope as handler errors.
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::QueryConfig::default()
            .error_handler(|err, _| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _| AppError::bad_request(err.to_string()).into()),
    )
    .app_data(
        MultipartFormConfig::default()
            .total_limit(UPLOAD_LIMIT)
            .memory_limit(UPLOAD_LIMIT)
            .error_handler(|err, _| AppError::bad_request(err.to_string()).into()),
    )
    .service(
        web::scope("/auth")
            .route("/sign-up", web::post().to(auth::sign_up))
            .route("/confirm-email", web::post().to(auth::confirm_email))
            .route("/sign-in", web::post().to(auth::sign_in))
            .route("/password-recovery", web::post().to(auth::password_recovery))
            .route("/password-update", web::put().to(auth::password_update)),
    )
    .service(
        web::scope("/profile")
            .route("", web::get().to(profile::get_profile))
            .route("", web::put().to(profile::update_profile))
            .route("", web::delete().to(profile::delete_profile))
            .route("/orders", web::post().to(orders::create_order))
            .route("/orders", web::get().to(orders::list_orders))
            .route("/orders/{id}", web::get().to(orders::get_order)),
    )
    .service(
        web::scope("/api")
            .route("/categories", web::get().to(catalog::list_categories))
            .route("/categories/{id}", web::get().to(catalog::get_category))
            .route(
                "/categories/{id}/products",
                web::get().to(catalog::list_category_products),
            )
            .route("/products", web::get().to(catalog::list_products))
            .route("/products/{id}", web::get().to(catalog::get_product)),
    )
    .service(
        web::scope("/admin")
            .route("/categories", web::post().to(admin::create_category))
            .route("/categories/{id}", web::put().to(admin::update_category))
            .route("/products", web::post().to(admin::create_product))
            .route("/products/{id}", web::put().to(admin::update_product)),
    )
    .route("/media/{kind}/{id}/{file}", web::get().to(media::get_media));
}
