use crate::engine::zones;
use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::{DocumentStore, SqliteDocumentStore};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::model::document::DocumentBody;
use common::model::template::Template;
use common::requests::SaveTemplateRequest;
use log::info;

pub async fn process(
    state: web::Data<AppState>,
    template_id: web::Path<String>,
    payload: web::Json<SaveTemplateRequest>,
) -> Result<HttpResponse, ServiceError> {
    let id = template_id.into_inner();
    if id.trim().is_empty() {
        return Err(ServiceError::BadRequest("template id must not be empty".to_string()));
    }

    let body = DocumentBody::from_text(&payload.text);
    let zone_names =
        zones::zone_names(&body).map_err(|e| ServiceError::BadRequest(e.to_string()))?;

    let template = with_connection(state, move |_, conn| {
        SqliteDocumentStore::new(conn).save_template(&id, &body)?;
        info!("saved template {} ({} zones)", id, zone_names.len());
        Ok(Template {
            text: body.to_text(),
            id,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(template))
}
