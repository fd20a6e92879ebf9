//! SQLite-backed collaborators of the template engine.
//!
//! Each store borrows a connection opened for the current request, following
//! the one-connection-per-request pattern used across the services.

pub mod customers;
pub mod documents;
pub mod firmendaten;
pub mod logos;
pub mod records;

pub use customers::CustomerDirectory;
pub use documents::{DocumentStore, SqliteDocumentStore};
pub use firmendaten::FirmenDatenStore;
pub use logos::LogoStore;
pub use records::RecordStore;
