use actix_web::HttpResponse;
use chrono::Utc;
use common::responses::StatusResponse;

pub const SYSTEM_NAME: &str = "BAFA Dokumentengenerator";

pub async fn process() -> HttpResponse {
    HttpResponse::Ok().json(StatusResponse {
        status: "online".to_string(),
        system: SYSTEM_NAME.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: Utc::now(),
    })
}
