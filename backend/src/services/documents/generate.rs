use crate::error::ServiceError;
use crate::services::{materializer, with_connection};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::requests::GenerateRequest;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<GenerateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = payload.into_inner();
    let response = with_connection(state, move |state, conn| {
        materializer(state, conn).create(
            &request.customer_id,
            &request.config_id,
            &request.input_data,
        )
    })
    .await?;
    Ok(HttpResponse::Created().json(response))
}
