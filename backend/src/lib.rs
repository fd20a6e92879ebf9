//! BAFA document service: generates consulting documents from templates and
//! keeps them up to date through update zones.

pub mod auth;
pub mod catalog;
pub mod config;
pub mod db;
pub mod engine;
pub mod error;
pub mod services;
pub mod store;

use crate::catalog::ConfigCatalog;
use crate::config::AppConfig;
use crate::engine::materialize::DocumentUrls;
use crate::error::ServiceError;
use actix_web::web;
use rusqlite::Connection;

/// Largest accepted JSON body.
pub const JSON_LIMIT: usize = 10 * 1024 * 1024; // 10 MB

/// Process-wide, read-only state shared by all workers.
pub struct AppState {
    pub config: AppConfig,
    pub catalog: ConfigCatalog,
    pub urls: DocumentUrls,
}

impl AppState {
    pub fn new(config: AppConfig, catalog: ConfigCatalog) -> Self {
        let urls = DocumentUrls::new(config.editor_url.clone());
        Self {
            config,
            catalog,
            urls,
        }
    }

    /// Opens a connection to the configured database.
    pub fn connection(&self) -> Result<Connection, ServiceError> {
        Ok(db::open(&self.config.db_path)?)
    }

    /// Creates the schema if needed.
    pub fn init_storage(&self) -> Result<(), ServiceError> {
        let conn = self.connection()?;
        db::init_schema(&conn)?;
        Ok(())
    }
}

/// Registers every API route. Malformed JSON bodies answer with the regular
/// error shape.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::JsonConfig::default().limit(JSON_LIMIT).error_handler(
        |err, _req| ServiceError::BadRequest(err.to_string()).into(),
    ))
    .service(services::status::configure_routes())
    .service(services::configs::configure_routes())
    .service(services::customers::configure_routes())
    .service(services::documents::configure_routes())
    .service(services::templates::configure_routes());
}
