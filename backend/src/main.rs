use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App, HttpServer};
use backend::catalog::ConfigCatalog;
use backend::config::AppConfig;
use backend::{auth, AppState};
use env_logger::Env;
use log::{error, info};
use std::io;

#[actix_web::main]
async fn main() -> io::Result<()> {
    env_logger::init_from_env(Env::default().default_filter_or("info"));

    let config = AppConfig::from_env().map_err(|e| {
        error!("configuration error: {}", e);
        io::Error::new(io::ErrorKind::InvalidInput, e)
    })?;
    let catalog = ConfigCatalog::embedded().map_err(|e| {
        error!("config catalog error: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;
    info!("loaded {} document configs", catalog.len());

    let state = web::Data::new(AppState::new(config, catalog));
    state.init_storage().map_err(|e| {
        error!("database error: {}", e);
        io::Error::other(e)
    })?;

    let (host, port) = (state.config.host.clone(), state.config.port);
    info!("Server running at http://{}:{}", host, port);

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(from_fn(auth::require_password))
            .wrap(Logger::default())
            .configure(backend::configure)
    })
    .bind((host, port))?
    .run()
    .await
}
