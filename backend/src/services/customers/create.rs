use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::CustomerDirectory;
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::requests::CreateCustomerRequest;
use common::responses::CustomerResponse;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    payload: web::Json<CreateCustomerRequest>,
) -> Result<HttpResponse, ServiceError> {
    let request = payload.into_inner();
    let customer = with_connection(state, move |_, conn| {
        CustomerDirectory::new(conn)
            .create(&request.company_name, request.parent_folder_id.as_deref())
    })
    .await?;

    info!("created customer {} ({})", customer.kunde_id, customer.company_name);
    Ok(HttpResponse::Created().json(CustomerResponse { customer }))
}
