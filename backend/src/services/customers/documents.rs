use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::{CustomerDirectory, RecordStore};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::CustomerDocuments;

/// Documents generated for a customer, oldest first.
pub async fn process(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let response = with_connection(state, move |_, conn| {
        CustomerDirectory::new(conn).get(&kunde_id)?;
        let documents = RecordStore::new(conn).list_by_customer(&kunde_id)?;
        Ok(CustomerDocuments {
            count: documents.len(),
            kunde_id,
            documents,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
