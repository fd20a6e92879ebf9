//! # Customer Logo Service
//!
//! ## Upload Workflow
//!
//! 1.  **Multipart**: the `logo` field is read chunk by chunk and hashed with
//!     md5 as it arrives. Uploads over [`MAX_LOGO_BYTES`] are refused.
//!
//! 2.  **Validation**: the image format is sniffed from the bytes; only PNG
//!     and JPEG are accepted, and the image must decode.
//!
//! 3.  **Storage**: the image is kept base64-encoded next to its fingerprint,
//!     and the customer's `logoUrl` is pointed at the serve route with the
//!     fingerprint as cache buster.

use crate::error::ServiceError;
use crate::services::with_connection;
use crate::store::logos::StoredLogo;
use crate::store::{CustomerDirectory, LogoStore};
use crate::AppState;
use actix_multipart::Multipart;
use actix_web::http::header::{CacheControl, CacheDirective};
use actix_web::{web, HttpResponse};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use common::responses::LogoUploadResponse;
use futures_util::StreamExt;
use image::ImageFormat;
use log::info;
use md5::Context;

pub const LOGO_FIELD: &str = "logo";
pub const MAX_LOGO_BYTES: usize = 5 * 1024 * 1024; // 5 MB

/// Checks that `bytes` hold a PNG or JPEG image and returns its MIME type.
fn sniff_image(bytes: &[u8]) -> Result<&'static str, ServiceError> {
    let format = image::guess_format(bytes)
        .map_err(|_| ServiceError::BadRequest("logo is not a recognised image".to_string()))?;
    if !matches!(format, ImageFormat::Png | ImageFormat::Jpeg) {
        return Err(ServiceError::BadRequest(format!(
            "logo must be PNG or JPEG, got {:?}",
            format
        )));
    }
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| ServiceError::BadRequest(format!("logo cannot be decoded: {}", e)))?;
    Ok(format.to_mime_type())
}

pub async fn upload(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
    mut payload: Multipart,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let mut logo: Option<(Vec<u8>, String)> = None;

    while let Some(item) = payload.next().await {
        let mut field = item.map_err(|e| ServiceError::BadRequest(e.to_string()))?;
        let name = field
            .content_disposition()
            .and_then(|cd| cd.get_name().map(|n| n.to_string()));

        let mut bytes = Vec::new();
        let mut hasher = Context::new();
        while let Some(chunk) = field.next().await {
            let chunk = chunk.map_err(|e| ServiceError::BadRequest(e.to_string()))?;
            if name.as_deref() != Some(LOGO_FIELD) {
                continue;
            }
            if bytes.len() + chunk.len() > MAX_LOGO_BYTES {
                return Err(ServiceError::BadRequest(format!(
                    "logo exceeds {} bytes",
                    MAX_LOGO_BYTES
                )));
            }
            hasher.consume(&chunk);
            bytes.extend_from_slice(&chunk);
        }

        if name.as_deref() == Some(LOGO_FIELD) {
            logo = Some((bytes, format!("{:x}", hasher.finalize())));
        }
    }

    let (bytes, md5) = logo
        .filter(|(bytes, _)| !bytes.is_empty())
        .ok_or_else(|| ServiceError::BadRequest(format!("multipart field `{}` is missing", LOGO_FIELD)))?;

    let logo_url = with_connection(state, move |state, conn| {
        let customers = CustomerDirectory::new(conn);
        customers.get(&kunde_id)?;

        let content_type = sniff_image(&bytes)?;
        LogoStore::new(conn).save(
            &kunde_id,
            &StoredLogo {
                md5: md5.clone(),
                content_type: content_type.to_string(),
                base64: BASE64.encode(&bytes),
            },
        )?;

        let logo_url = format!(
            "{}/api/customers/{}/logo?v={}",
            state.config.public_url, kunde_id, md5
        );
        customers.set_logo_url(&kunde_id, &logo_url)?;
        info!("stored logo for {} ({} bytes, {})", kunde_id, bytes.len(), content_type);
        Ok(logo_url)
    })
    .await?;

    Ok(HttpResponse::Ok().json(LogoUploadResponse { logo_url }))
}

pub async fn serve(
    state: web::Data<AppState>,
    kunde_id: web::Path<String>,
) -> Result<HttpResponse, ServiceError> {
    let kunde_id = kunde_id.into_inner();
    let logo = with_connection(state, move |_, conn| LogoStore::new(conn).get(&kunde_id)).await?;
    let bytes = BASE64
        .decode(logo.base64.as_bytes())
        .map_err(|e| ServiceError::Upstream(format!("stored logo is corrupt: {}", e)))?;

    Ok(HttpResponse::Ok()
        .content_type(logo.content_type)
        .insert_header(CacheControl(vec![CacheDirective::Public, CacheDirective::MaxAge(86400)]))
        .body(bytes))
}
