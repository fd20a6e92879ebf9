//! Shared-password check in front of every API route.
//!
//! Clients send the password in the `X-Api-Password` header. The status route
//! and the logo route stay open: the latter is embedded as a plain `<img>` in
//! generated documents and cannot carry headers.

use crate::error::ServiceError;
use crate::AppState;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::http::Method;
use actix_web::middleware::Next;
use actix_web::{web, ResponseError};
use log::warn;

pub const PASSWORD_HEADER: &str = "X-Api-Password";

fn is_public(method: &Method, path: &str) -> bool {
    path == "/api/status"
        || (*method == Method::GET && path.starts_with("/api/customers/") && path.ends_with("/logo"))
}

fn has_password(req: &ServiceRequest) -> bool {
    let expected = req
        .app_data::<web::Data<AppState>>()
        .map(|state| state.config.api_password.as_str());
    let given = req
        .headers()
        .get(PASSWORD_HEADER)
        .and_then(|value| value.to_str().ok());

    matches!((expected, given), (Some(expected), Some(given)) if expected == given)
}

/// Rejects requests without the right password with a 401 in the regular
/// error shape.
pub async fn require_password(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    if is_public(req.method(), req.path()) || has_password(&req) {
        next.call(req).await.map(ServiceResponse::map_into_left_body)
    } else {
        warn!("rejected {} {}: wrong or missing password", req.method(), req.path());
        let response = ServiceError::Unauthorized.error_response();
        Ok(req.into_response(response).map_into_right_body())
    }
}
