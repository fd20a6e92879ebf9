use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Entry of the customer directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub kunde_id: String,
    pub company_name: String,
    pub folder_id: String,
    #[serde(default)]
    pub logo_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
