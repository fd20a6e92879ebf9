use crate::model::input::InputData;
use serde::{Deserialize, Serialize};

/// Body of `POST /api/documents`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub customer_id: String,
    pub config_id: String,
    #[serde(default)]
    pub input_data: InputData,
}

/// Body of `POST /api/documents/{document_id}/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateRequest {
    pub config_id: String,
    #[serde(default)]
    pub input_data: InputData,
    #[serde(default)]
    pub mode: UpdateMode,
    /// When set, the update is refused if the stored document has moved on.
    #[serde(default)]
    pub expected_version: Option<i64>,
}

/// How table input is applied to a document that already has rows.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum UpdateMode {
    #[default]
    Append,
    Replace,
    /// Skip regeneration and only strip leftover `{{…}}` tokens.
    CleanupOnly,
}

/// Body of `POST /api/customers`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCustomerRequest {
    pub company_name: String,
    #[serde(default)]
    pub parent_folder_id: Option<String>,
}

/// Body of `PUT /api/templates/{template_id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveTemplateRequest {
    pub text: String,
}
