//! HTTP layer. Each area lives in its own module exposing `configure_routes`,
//! with one file per handler.

pub mod configs;
pub mod customers;
pub mod documents;
pub mod status;
pub mod templates;

use crate::engine::materialize::Materializer;
use crate::error::ServiceError;
use crate::store::SqliteDocumentStore;
use crate::AppState;
use actix_web::web;
use chrono::Local;
use rusqlite::Connection;

/// Runs `work` on a blocking worker with a fresh database connection.
pub(crate) async fn with_connection<T, F>(
    state: web::Data<AppState>,
    work: F,
) -> Result<T, ServiceError>
where
    F: FnOnce(&AppState, &Connection) -> Result<T, ServiceError> + Send + 'static,
    T: Send + 'static,
{
    web::block(move || {
        let conn = state.connection()?;
        work(state.get_ref(), &conn)
    })
    .await?
}

/// The materializer for one request, dated today in local time.
pub(crate) fn materializer<'a>(
    state: &'a AppState,
    conn: &'a Connection,
) -> Materializer<'a, SqliteDocumentStore<'a>> {
    Materializer::new(
        conn,
        &state.catalog,
        &state.urls,
        SqliteDocumentStore::new(conn),
        Local::now().date_naive(),
    )
}
