use serde::{Deserialize, Serialize};

/// A named token (`{{KEY}}`) declared by a document config.
///
/// Resolution order for a placeholder is: the value typed in by the user, then
/// the company profile field named by `source`, then today's date for
/// `auto_today` date fields. Anything still empty is left unresolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlaceholderDef {
    /// Token key as written in the template, without the braces.
    pub key: String,
    /// Human readable label, also used in validation messages.
    pub label: String,
    #[serde(rename = "type", default)]
    pub placeholder_type: PlaceholderType,
    #[serde(default)]
    pub required: bool,
    /// Dotted path such as `firmendaten.webpage`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default)]
    pub auto_today: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaceholderType {
    #[default]
    Text,
    Date,
    Textarea,
}
