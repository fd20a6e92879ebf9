use crate::error::ServiceError;
use crate::services::{materializer, with_connection};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::requests::{UpdateMode, UpdateRequest};

/// Regenerates the zones of a document, or only strips its leftover tokens
/// when `mode` is `cleanupOnly`.
pub async fn process(
    state: web::Data<AppState>,
    document_id: web::Path<String>,
    payload: web::Json<UpdateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let document_id = document_id.into_inner();
    let request = payload.into_inner();

    if request.mode == UpdateMode::CleanupOnly {
        let response = with_connection(state, move |state, conn| {
            materializer(state, conn).cleanup(&document_id)
        })
        .await?;
        return Ok(HttpResponse::Ok().json(response));
    }

    let response = with_connection(state, move |state, conn| {
        materializer(state, conn).update(
            &document_id,
            &request.config_id,
            &request.input_data,
            request.mode,
            request.expected_version,
        )
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
