use actix_web::http::{header, StatusCode};
use actix_web::middleware::from_fn;
use actix_web::{test, web, App};
use backend::auth::{self, PASSWORD_HEADER};
use backend::catalog::ConfigCatalog;
use backend::config::AppConfig;
use backend::AppState;
use common::responses::{
    CleanupResponse, ConfigList, ConfigResponse, CustomerResponse, DocumentView, ErrorResponse,
    GenerationResponse, LogoUploadResponse,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::io::Cursor;
use tempfile::TempDir;

const PASSWORD: &str = "geheim";
const REVIEW_TEMPLATE_ID: &str = "1bjcsPKMBu4YbUm64UgwkEgLMDrMxxnGgc1bORYpv_jk";

fn state(dir: &TempDir) -> web::Data<AppState> {
    let config = AppConfig::new(dir.path().join("bafa.sqlite"), PASSWORD);
    let state = AppState::new(config, ConfigCatalog::embedded().unwrap());
    state.init_storage().unwrap();
    web::Data::new(state)
}

macro_rules! app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state.clone())
                .wrap(from_fn(auth::require_password))
                .configure(backend::configure),
        )
        .await
    };
}

fn review_input(teilnehmer: &str, themen: &str) -> serde_json::Value {
    json!({
        "placeholders": {
            "BEWERTUNGSDATUM": "2024-05-01",
            "TEILNEHMER": teilnehmer,
            "BEWERTUNGSZEITRAUM": "Q1 2024"
        },
        "tables": { "themen": themen }
    })
}

#[actix_web::test]
async fn status_is_public_and_the_rest_is_not() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let resp = test::call_service(&app, test::TestRequest::get().uri("/api/status").to_request()).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["status"], "online");

    let resp =
        test::call_service(&app, test::TestRequest::get().uri("/api/configs").to_request()).await;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "Unauthorized");

    let req = test::TestRequest::get()
        .uri("/api/configs")
        .insert_header((PASSWORD_HEADER, "falsch"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::UNAUTHORIZED);

    let req = test::TestRequest::get()
        .uri("/api/configs")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let configs: ConfigList = test::call_and_read_body_json(&app, req).await;
    assert_eq!(configs.configs.len(), 14);
}

#[actix_web::test]
async fn configs_resolve_by_slug_and_unknown_ones_are_404() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::get()
        .uri("/api/configs/managementbewertung")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let found: ConfigResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.config.id, "bafa_04_managementbewertung");

    let req = test::TestRequest::get()
        .uri("/api/configs/gibt_es_nicht")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "NotFoundError");
}

#[actix_web::test]
async fn malformed_json_is_a_bad_request() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload("{ kein json")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "BadRequest");
}

#[actix_web::test]
async fn documents_are_generated_updated_and_cleaned() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::put()
        .uri(&format!("/api/templates/{REVIEW_TEMPLATE_ID}"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({
            "text": "Teilnehmer: {{TEILNEHMER}}\n{{TABLE_themen}}\n[[BAFA_ZONE:FAZIT]]\n{{GESAMTBEWERTUNG}}\n[[/BAFA_ZONE:FAZIT]]"
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({ "companyName": "Muster GmbH" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let customer: CustomerResponse = test::read_body_json(resp).await;
    let kunde_id = customer.customer.kunde_id;

    // Missing required field.
    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({
            "customerId": kunde_id,
            "configId": "bafa_04_managementbewertung",
            "inputData": review_input("", "X")
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: ErrorResponse = test::read_body_json(resp).await;
    assert_eq!(body.error, "ValidationError");
    assert_eq!(body.message, "missing required fields: Teilnehmer");

    let req = test::TestRequest::post()
        .uri("/api/documents")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({
            "customerId": kunde_id,
            "configId": "bafa_04_managementbewertung",
            "inputData": review_input("A, B", "X")
        }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created: GenerationResponse = test::read_body_json(resp).await;
    assert_eq!(created.unresolved_tokens, vec!["{{GESAMTBEWERTUNG}}".to_string()]);
    let id = created.document_id.clone();

    let req = test::TestRequest::post()
        .uri(&format!("/api/documents/{id}/update"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({
            "configId": "bafa_04_managementbewertung",
            "inputData": review_input("A, B", "Y"),
            "mode": "append",
            "expectedVersion": created.version - 1
        }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::CONFLICT);

    let req = test::TestRequest::post()
        .uri(&format!("/api/documents/{id}/update"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({
            "configId": "bafa_04_managementbewertung",
            "inputData": review_input("A, B", "Y"),
            "expectedVersion": created.version
        }))
        .to_request();
    let updated: GenerationResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(updated.version, created.version + 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/documents/{id}"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let view: DocumentView = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        view.body.table_rows("themen"),
        Some(&["X".to_string(), "Y".to_string()][..])
    );
    assert_eq!(view.version, updated.version);

    let req = test::TestRequest::post()
        .uri(&format!("/api/documents/{id}/update"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({ "configId": "bafa_04_managementbewertung", "mode": "cleanupOnly" }))
        .to_request();
    let cleaned: CleanupResponse = test::call_and_read_body_json(&app, req).await;
    assert!(cleaned.changed);

    let req = test::TestRequest::post()
        .uri(&format!("/api/documents/{id}/cleanup"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let again: CleanupResponse = test::call_and_read_body_json(&app, req).await;
    assert!(!again.changed);
    assert_eq!(again.version, cleaned.version);

    let req = test::TestRequest::get()
        .uri(&format!("/api/customers/{kunde_id}/documents"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let documents: serde_json::Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(documents["count"], 1);
    assert_eq!(documents["documents"][0]["googleDocId"], id.as_str());
}

#[actix_web::test]
async fn logos_are_uploaded_and_served_publicly() {
    let dir = TempDir::new().unwrap();
    let state = state(&dir);
    let app = app!(state);

    let req = test::TestRequest::post()
        .uri("/api/customers")
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .set_json(json!({ "companyName": "Muster GmbH" }))
        .to_request();
    let customer: CustomerResponse = test::call_and_read_body_json(&app, req).await;
    let kunde_id = customer.customer.kunde_id;

    let mut png = Cursor::new(Vec::new());
    image::RgbaImage::new(2, 2)
        .write_to(&mut png, image::ImageFormat::Png)
        .unwrap();
    let png = png.into_inner();

    let boundary = "bafa-boundary";
    let mut body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"logo\"; filename=\"logo.png\"\r\nContent-Type: image/png\r\n\r\n"
    )
    .into_bytes();
    body.extend_from_slice(&png);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let req = test::TestRequest::post()
        .uri(&format!("/api/customers/{kunde_id}/logo"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .insert_header((
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        ))
        .set_payload(body)
        .to_request();
    let uploaded: LogoUploadResponse = test::call_and_read_body_json(&app, req).await;
    assert!(uploaded
        .logo_url
        .starts_with(&format!("http://127.0.0.1:8080/api/customers/{kunde_id}/logo?v=")));

    let req = test::TestRequest::get()
        .uri(&format!("/api/customers/{kunde_id}/logo"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get(header::CONTENT_TYPE).unwrap(), "image/png");
    assert_eq!(test::read_body(resp).await.to_vec(), png);

    let req = test::TestRequest::get()
        .uri(&format!("/api/customers/{kunde_id}"))
        .insert_header((PASSWORD_HEADER, PASSWORD))
        .to_request();
    let customer: CustomerResponse = test::call_and_read_body_json(&app, req).await;
    assert_eq!(customer.customer.logo_url, Some(uploaded.logo_url));
}
