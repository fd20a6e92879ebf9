use crate::error::ServiceError;
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::ConfigResponse;

pub async fn process(
    state: web::Data<AppState>,
    config_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let config = state.catalog.get(&config_id)?.clone();
    Ok(HttpResponse::Ok().json(ConfigResponse { config }))
}
