use crate::model::place_holder::PlaceholderDef;
use serde::{Deserialize, Serialize};

/// Static description of one BAFA document type.
///
/// Configs are authored by an administrator and embedded into the backend at
/// build time; they never change while the process runs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentConfig {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
    /// Handle of the source template in the template store. Empty when the
    /// template has not been prepared yet.
    #[serde(default)]
    pub template_id: String,
    #[serde(default)]
    pub template_type: TemplateType,
    #[serde(default)]
    pub placeholders: Vec<PlaceholderDef>,
    #[serde(default)]
    pub tables: Vec<TableDef>,
}

impl DocumentConfig {
    pub fn has_template(&self) -> bool {
        !self.template_id.trim().is_empty()
    }

    pub fn summary(&self) -> ConfigSummary {
        ConfigSummary {
            id: self.id.clone(),
            name: self.name.clone(),
            description: self.description.clone(),
            template_id: self.template_id.clone(),
            note: self.note.clone(),
            template_type: self.template_type,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemplateType {
    #[default]
    #[serde(alias = "doc")]
    Document,
    #[serde(alias = "sheet")]
    Spreadsheet,
}

impl TemplateType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemplateType::Document => "document",
            TemplateType::Spreadsheet => "spreadsheet",
        }
    }
}

/// A named list input rendered at the `{{TABLE_<name>}}` anchor of a template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableDef {
    pub name: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub input_label: Option<String>,
    /// Example input shown in the form, e.g. `Thema | Status | Maßnahme`.
    #[serde(default)]
    pub input_placeholder: String,
}

/// The paragraph text that marks where table `name` goes in a template.
pub fn table_anchor(name: &str) -> String {
    format!("{{{{TABLE_{}}}}}", name)
}

/// What `GET /api/configs` returns per config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfigSummary {
    pub id: String,
    pub name: String,
    pub description: String,
    pub template_id: String,
    pub note: Option<String>,
    pub template_type: TemplateType,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::place_holder::PlaceholderType;
    use pretty_assertions::assert_eq;

    #[test]
    fn legacy_template_type_spellings_are_accepted() {
        let sheet: TemplateType = serde_json::from_str("\"sheet\"").unwrap();
        let doc: TemplateType = serde_json::from_str("\"doc\"").unwrap();
        assert_eq!(sheet, TemplateType::Spreadsheet);
        assert_eq!(doc, TemplateType::Document);
    }

    #[test]
    fn placeholder_defaults_apply() {
        let config: DocumentConfig = serde_json::from_str(
            r#"{
                "id": "bafa_99_test",
                "name": "Test",
                "placeholders": [{ "key": "DATUM", "label": "Datum" }]
            }"#,
        )
        .unwrap();

        let def = &config.placeholders[0];
        assert_eq!(def.placeholder_type, PlaceholderType::Text);
        assert!(!def.required);
        assert!(!def.auto_today);
        assert_eq!(def.source, None);
        assert!(!config.has_template());
        assert_eq!(config.template_type, TemplateType::Document);
    }

    #[test]
    fn table_anchor_uses_token_syntax() {
        assert_eq!(table_anchor("themen"), "{{TABLE_themen}}");
    }
}
