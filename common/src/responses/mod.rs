use crate::model::config::{ConfigSummary, DocumentConfig};
use crate::model::customer::Customer;
use crate::model::document::{DocumentBody, DocumentRecord};
use crate::model::firmendaten::FirmenDaten;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Result of a completed create or update.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationResponse {
    pub document_id: String,
    pub document_url: String,
    pub document_name: String,
    /// `{{…}}` tokens still present in the final document, in order of first
    /// appearance.
    pub unresolved_tokens: Vec<String>,
    pub version: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CleanupResponse {
    pub document_id: String,
    pub removed_tokens: Vec<String>,
    pub changed: bool,
    pub version: i64,
}

/// Error body for every non-2xx response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatusResponse {
    pub status: String,
    pub system: String,
    pub version: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerList {
    pub customers: Vec<Customer>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomerResponse {
    pub customer: Customer,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LogoUploadResponse {
    pub logo_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmenDatenResponse {
    pub kunde_id: String,
    pub firmendaten: FirmenDaten,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigList {
    pub configs: Vec<ConfigSummary>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigResponse {
    pub config: DocumentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomerDocuments {
    pub kunde_id: String,
    pub documents: Vec<DocumentRecord>,
    pub count: usize,
}

/// Outcome of `POST /api/customers/{kunde_id}/documents/all`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAllResponse {
    pub kunde_id: String,
    pub created: Vec<CreatedDocument>,
    /// Config ids skipped because the customer already has the document or
    /// the config has no template.
    pub skipped: Vec<String>,
    pub failed: Vec<FailedDocument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatedDocument {
    pub config_id: String,
    #[serde(flatten)]
    pub result: GenerationResponse,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FailedDocument {
    pub config_id: String,
    pub message: String,
}

/// Body of `GET /api/documents/{document_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentView {
    pub document_id: String,
    pub version: i64,
    pub updated_at: DateTime<Utc>,
    pub body: DocumentBody,
    pub unresolved_tokens: Vec<String>,
}
