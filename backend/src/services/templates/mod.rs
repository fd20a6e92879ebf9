//! # Template Service Module
//!
//! Routes under `/api/templates` let administrators load and inspect the
//! source templates documents are generated from.
//!
//! ## Registered Routes:
//!
//! *   **`GET /{template_id}`**:
//!     - **Handler**: `get::process`
//!     - **Description**: returns the template as text, one line per
//!       paragraph.
//!
//! *   **`PUT /{template_id}`**:
//!     - **Handler**: `save::process`
//!     - **Description**: creates or replaces a template from `{ "text": ... }`.
//!       Templates with malformed update-zone markers are refused.

mod get;
mod save;

use actix_web::web::{get, put, scope};
use actix_web::Scope;

/// The base path for all template-related API endpoints.
const API_PATH: &str = "/api/templates";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("/{template_id}", get().to(get::process))
        .route("/{template_id}", put().to(save::process))
}
