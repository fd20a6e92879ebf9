use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Form data submitted with a generation or update request.
///
/// `tables` holds the raw multi-line text of each table input field; splitting
/// it into rows happens on the backend.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputData {
    #[serde(default)]
    pub placeholders: HashMap<String, String>,
    #[serde(default)]
    pub tables: HashMap<String, String>,
}
