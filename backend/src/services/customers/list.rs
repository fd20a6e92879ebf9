use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::CustomerDirectory;
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::CustomerList;

/// Customers ordered by company name.
pub async fn process(state: web::Data<AppState>) -> Result<HttpResponse, ServiceError> {
    let customers =
        with_connection(state, |_, conn| CustomerDirectory::new(conn).list()).await?;
    Ok(HttpResponse::Ok().json(CustomerList { customers }))
}
