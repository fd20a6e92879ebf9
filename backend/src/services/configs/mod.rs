//! # Config Service Module
//!
//! Read-only access to the embedded BAFA document configs.
//!
//! ## Registered Routes:
//! *   **`GET /api/configs`**: summaries of every config, in id order.
//! *   **`GET /api/configs/{config_id}`**: one full config, looked up by id or
//!     by its short slug.

mod get;
mod list;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/configs";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("/{config_id}", get().to(get::process))
}
