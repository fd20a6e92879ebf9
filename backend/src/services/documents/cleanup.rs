use crate::error::ServiceError;
use crate::services::{materializer, with_connection};
use crate::AppState;
use actix_web::{web, HttpResponse};

pub async fn process(
    state: web::Data<AppState>,
    document_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let document_id = document_id.into_inner();
    let response = with_connection(state, move |state, conn| {
        materializer(state, conn).cleanup(&document_id)
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
