//! # Document Service Module
//!
//! Generation, update and cleanup of customer documents.
//!
//! ## Registered Routes:
//! *   **`POST /api/documents`**: generate a document from a config and form
//!     input.
//! *   **`GET /api/documents/{document_id}`**: body, version and leftover
//!     tokens of a document.
//! *   **`POST /api/documents/{document_id}/update`**: regenerate the update
//!     zones; `mode: cleanupOnly` only strips leftover tokens.
//! *   **`POST /api/documents/{document_id}/cleanup`**: strip leftover tokens.

mod cleanup;
mod generate;
mod get;
mod update;

use actix_web::web::{get, post, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/documents";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", post().to(generate::process))
        .route("/{document_id}", get().to(get::process))
        .route("/{document_id}/update", post().to(update::process))
        .route("/{document_id}/cleanup", post().to(cleanup::process))
}
