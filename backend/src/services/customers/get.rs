use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::CustomerDirectory;
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::CustomerResponse;

pub async fn process(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let customer =
        with_connection(state, move |_, conn| CustomerDirectory::new(conn).get(&kunde_id)).await?;
    Ok(HttpResponse::Ok().json(CustomerResponse { customer }))
}
