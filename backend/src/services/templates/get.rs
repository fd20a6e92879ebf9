use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::{DocumentStore, SqliteDocumentStore};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::model::template::Template;

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    let template = with_connection(state, move |_, conn| {
        let body = SqliteDocumentStore::new(conn).template(&id)?;
        Ok(Template {
            text: body.to_text(),
            id,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(template))
}
