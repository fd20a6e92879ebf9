//! # Customer Service Module
//!
//! Routes under `/api/customers`: the customer directory, logos, company
//! profiles (FirmenDaten) and the documents generated for a customer.
//!
//! ## Registered Routes:
//! *   **`GET /`** and **`POST /`**: list and create customers.
//! *   **`GET /{kunde_id}`**: one customer.
//! *   **`POST /{kunde_id}/logo`**: multipart upload, field `logo`.
//! *   **`GET /{kunde_id}/logo`**: the stored logo image. Public, so it can be
//!     embedded in documents.
//! *   **`GET|PUT /{kunde_id}/firmendaten`**: read or merge the company profile.
//! *   **`GET /{kunde_id}/documents`**: records of generated documents.
//! *   **`POST /{kunde_id}/documents/all`**: generate every missing document.

mod create;
mod create_all;
mod documents;
mod firmendaten;
mod get;
mod list;
mod logo;

use actix_web::web::{get, post, put, scope};
use actix_web::Scope;

const API_PATH: &str = "/api/customers";

pub fn configure_routes() -> Scope {
    scope(API_PATH)
        .route("", get().to(list::process))
        .route("", post().to(create::process))
        .route("/{kunde_id}", get().to(get::process))
        .route("/{kunde_id}/logo", post().to(logo::upload))
        .route("/{kunde_id}/logo", get().to(logo::serve))
        .route("/{kunde_id}/firmendaten", get().to(firmendaten::get))
        .route("/{kunde_id}/firmendaten", put().to(firmendaten::save))
        .route("/{kunde_id}/documents", get().to(documents::process))
        .route("/{kunde_id}/documents/all", post().to(create_all::process))
}
