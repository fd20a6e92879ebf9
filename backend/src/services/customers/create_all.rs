use crate::error::ServiceError;
use crate::services::{materializer, with_connection};
use crate::AppState;
use actix_web::{web, HttpResponse};

/// Generates every document the customer is still missing. Per-config
/// failures are reported in the body; the request itself succeeds.
pub async fn process(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let response = with_connection(state, move |state, conn| {
        materializer(state, conn).create_all(&kunde_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
