use crate::AppState;
use actix_web::{web, HttpResponse};
use common::responses::ConfigList;

pub async fn process(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(ConfigList {
        configs: state.catalog.list(),
    })
}
