use serde::{Deserialize, Serialize};

/// Source template as authored by an administrator: plain text, one
/// paragraph per line, with `{{KEY}}` tokens, `{{TABLE_name}}` anchors and
/// optional `[[BAFA_ZONE:NAME]]` … `[[/BAFA_ZONE:NAME]]` update zones.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    pub id: String,
    pub text: String,
}
