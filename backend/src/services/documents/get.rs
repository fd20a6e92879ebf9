use crate::engine::tokens;
use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::{DocumentStore, SqliteDocumentStore};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::DocumentView;

pub async fn process(
    state: web::Data<AppState>,
    document_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let document_id = document_id.into_inner();
    let stored = with_connection(state, move |_, conn| {
        SqliteDocumentStore::new(conn).fetch(&document_id)
    })
    .await?;

    Ok(HttpResponse::Ok().json(DocumentView {
        unresolved_tokens: tokens::scan_unresolved(&stored.body),
        document_id: stored.id,
        version: stored.version,
        updated_at: stored.updated_at,
        body: stored.body,
    }))
}
