pub mod application;
pub mod config;
pub mod db;
pub mod doc;
pub mod domain;
pub mod errors;
pub mod handlers;
pub mod infrastructure;
pub mod schema;

use std::sync::Arc;

use actix_web::{middleware::Logger, web, App, HttpServer};
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use application::{AuthService, CatalogService, OrderService, ProfileService, TokenIssuer};
use config::AppConfig;
use doc::ApiDoc;
use domain::errors::DomainError;
use domain::ports::{ImageStorage, Mailer};
use infrastructure::{
    DieselCategoryRepository, DieselOrderRepository, DieselProductRepository,
    DieselUserRepository,
};

pub use db::{create_pool, DbPool};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Run any pending Diesel migrations against the pool's database.
pub fn run_migrations(pool: &DbPool) -> Result<(), DomainError> {
    let mut conn = pool.get()?;
    conn.run_pending_migrations(MIGRATIONS)
        .map_err(|e| DomainError::internal(format!("migrations failed: {e}")))?;
    Ok(())
}

/// Services shared by every worker.
pub struct AppState {
    pub auth: AuthService,
    pub profile: ProfileService,
    pub orders: OrderService,
    pub catalog: CatalogService,
    pub admin_secret: String,
}

impl AppState {
    /// Wire the Diesel repositories, image storage and mailer into services.
    pub fn new(
        config: &AppConfig,
        pool: DbPool,
        storage: Arc<dyn ImageStorage>,
        mailer: Arc<dyn Mailer>,
    ) -> Self {
        let users = Arc::new(DieselUserRepository::new(pool.clone(), storage.clone()));
        let categories = Arc::new(DieselCategoryRepository::new(pool.clone(), storage.clone()));
        let products = Arc::new(DieselProductRepository::new(pool.clone(), storage.clone()));
        let orders = Arc::new(DieselOrderRepository::new(pool));

        Self {
            auth: AuthService::new(
                users.clone(),
                mailer,
                TokenIssuer::new(&config.tokens),
                config.client.clone(),
            ),
            profile: ProfileService::new(users),
            orders: OrderService::new(orders),
            catalog: CatalogService::new(categories, products, storage),
            admin_secret: config.admin_secret.clone(),
        }
    }
}

/// Build and return an actix-web `Server` bound to `host:port`.
///
/// The caller is responsible for `.await`-ing (or `tokio::spawn`-ing) the
/// returned server.
pub fn build_server(
    state: web::Data<AppState>,
    host: &str,
    port: u16,
) -> std::io::Result<actix_web::dev::Server> {
    Ok(HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(Logger::default())
            .configure(handlers::routes)
            .service(
                SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-docs/openapi.json", ApiDoc::openapi()),
            )
    })
    .bind((host.to_string(), port))?
    .run())
}
