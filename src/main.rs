use std::io;
use std::sync::Arc;

use actix_web::web;
use dotenvy::dotenv;
use mock_shop::config::AppConfig;
use mock_shop::infrastructure::{DiskImageStorage, SmtpMailer};
use mock_shop::{build_server, create_pool, run_migrations, AppState};

#[actix_web::main]
async fn main() -> io::Result<()> {
    dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(io::Error::other)?;

    let pool = create_pool(&config.database_url).map_err(io::Error::other)?;
    run_migrations(&pool).map_err(io::Error::other)?;

    let storage = Arc::new(DiskImageStorage::new(&config.media));
    let mailer = Arc::new(SmtpMailer::new(&config.smtp).map_err(io::Error::other)?);
    let state = web::Data::new(AppState::new(&config, pool, storage, mailer));

    log::info!(
        "Starting server at http://{}:{}",
        config.server.host,
        config.server.port
    );

    build_server(state, &config.server.host, config.server.port)?.await
}
