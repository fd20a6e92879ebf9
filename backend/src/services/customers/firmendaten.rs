use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::{CustomerDirectory, FirmenDatenStore};
use crate::AppState;
use actix_web::{web, HttpResponse};
use common::model::firmendaten::FirmenDaten;
use common::responses::FirmenDatenResponse;

/// The stored company profile; empty if none was saved yet.
pub async fn get(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let response = with_connection(state, move |_, conn| {
        CustomerDirectory::new(conn).get(&kunde_id)?;
        let firmendaten = FirmenDatenStore::new(conn).get(&kunde_id)?;
        Ok(FirmenDatenResponse {
            kunde_id,
            firmendaten,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}

/// Merges the posted fields over the stored profile.
pub async fn save(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
    payload: web::Json<FirmenDaten>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let fields = payload.into_inner();
    let response = with_connection(state, move |_, conn| {
        CustomerDirectory::new(conn).get(&kunde_id)?;
        let firmendaten = FirmenDatenStore::new(conn).save(&kunde_id, fields)?;
        Ok(FirmenDatenResponse {
            kunde_id,
            firmendaten,
        })
    })
    .await?;
    Ok(HttpResponse::Ok().json(response))
}
