mod get;

use actix_web::web::{get, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/status";

/// `GET /api/status`: liveness check, reachable without password.
pub fn configure_routes() -> Scope {
    scope(API_PATH).route("", get().to(get::process))
}
