//! Read-only registry of BAFA document configs.
//!
//! The configs are declared as JSON files under `backend/configs/` and
//! embedded into the binary, mirroring how static assets are bundled with
//! `include_dir`. The registry is built once at start-up and only ever read.

use crate::error::ServiceError;
use common::model::config::{ConfigSummary, DocumentConfig};
use include_dir::{include_dir, Dir};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

static CONFIG_DIR: Dir = include_dir!("$CARGO_MANIFEST_DIR/configs");

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("config file {file} is not valid: {source}")]
    Parse {
        file: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("config id {0} is declared twice")]
    DuplicateId(String),
    #[error("config {config} declares placeholder {key} twice")]
    DuplicatePlaceholder { config: String, key: String },
    #[error("config {config} declares table {name} twice")]
    DuplicateTable { config: String, name: String },
    #[error("config {0} has an empty placeholder key or table name")]
    EmptyName(String),
}

#[derive(Debug)]
pub struct ConfigCatalog {
    configs: Vec<DocumentConfig>,
    by_id: HashMap<String, usize>,
    by_slug: HashMap<String, usize>,
}

impl ConfigCatalog {
    /// Loads the configs bundled with the binary.
    pub fn embedded() -> Result<Self, CatalogError> {
        let mut entries = Vec::new();
        for file in CONFIG_DIR.files() {
            let path = file.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let slug = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or_default()
                .to_string();
            let config: DocumentConfig =
                serde_json::from_slice(file.contents()).map_err(|source| CatalogError::Parse {
                    file: path.display().to_string(),
                    source,
                })?;
            entries.push((slug, config));
        }
        Self::new(entries)
    }

    /// Builds a catalog from `(slug, config)` pairs. Configs are listed in id
    /// order.
    pub fn new(mut entries: Vec<(String, DocumentConfig)>) -> Result<Self, CatalogError> {
        entries.sort_by(|a, b| a.1.id.cmp(&b.1.id));

        let mut configs = Vec::with_capacity(entries.len());
        let mut by_id = HashMap::new();
        let mut by_slug = HashMap::new();

        for (index, (slug, config)) in entries.into_iter().enumerate() {
            validate(&config)?;
            if by_id.insert(config.id.clone(), index).is_some() {
                return Err(CatalogError::DuplicateId(config.id));
            }
            if !slug.is_empty() {
                by_slug.insert(slug, index);
            }
            configs.push(config);
        }

        Ok(Self {
            configs,
            by_id,
            by_slug,
        })
    }

    /// Looks a config up by id, falling back to its short slug
    /// (`managementbewertung` for `bafa_04_managementbewertung`).
    pub fn get(&self, config_id: &str) -> Result<&DocumentConfig, ServiceError> {
        self.by_id
            .get(config_id)
            .or_else(|| self.by_slug.get(config_id))
            .map(|&index| &self.configs[index])
            .ok_or_else(|| ServiceError::not_found("config", config_id))
    }

    pub fn list(&self) -> Vec<ConfigSummary> {
        self.configs.iter().map(DocumentConfig::summary).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &DocumentConfig> {
        self.configs.iter()
    }

    pub fn len(&self) -> usize {
        self.configs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.configs.is_empty()
    }
}

fn validate(config: &DocumentConfig) -> Result<(), CatalogError> {
    let mut keys = HashSet::new();
    for def in &config.placeholders {
        if def.key.trim().is_empty() {
            return Err(CatalogError::EmptyName(config.id.clone()));
        }
        if !keys.insert(def.key.as_str()) {
            return Err(CatalogError::DuplicatePlaceholder {
                config: config.id.clone(),
                key: def.key.clone(),
            });
        }
    }

    let mut names = HashSet::new();
    for table in &config.tables {
        if table.name.trim().is_empty() {
            return Err(CatalogError::EmptyName(config.id.clone()));
        }
        if !names.insert(table.name.as_str()) {
            return Err(CatalogError::DuplicateTable {
                config: config.id.clone(),
                name: table.name.clone(),
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::model::config::TemplateType;
    use pretty_assertions::assert_eq;

    fn config(id: &str) -> DocumentConfig {
        serde_json::from_value(serde_json::json!({ "id": id, "name": id })).unwrap()
    }

    #[test]
    fn embedded_catalog_ships_all_bafa_configs() {
        let catalog = ConfigCatalog::embedded().unwrap();
        assert_eq!(catalog.len(), 14);

        let ids: Vec<String> = catalog.list().into_iter().map(|c| c.id).collect();
        assert_eq!(ids.first().map(String::as_str), Some("bafa_01_beraterbewertung"));
        assert_eq!(ids.last().map(String::as_str), Some("bafa_14_ausfuellanleitung"));
    }

    #[test]
    fn lookup_by_id_and_by_slug() {
        let catalog = ConfigCatalog::embedded().unwrap();
        let by_id = catalog.get("bafa_04_managementbewertung").unwrap();
        let by_slug = catalog.get("managementbewertung").unwrap();
        assert_eq!(by_id, by_slug);
        assert_eq!(by_id.tables[0].name, "themen");

        let plan = catalog.get("bafa_05_massnahmenplan").unwrap();
        assert_eq!(plan.template_type, TemplateType::Spreadsheet);
    }

    #[test]
    fn unknown_config_is_not_found() {
        let catalog = ConfigCatalog::embedded().unwrap();
        assert!(matches!(
            catalog.get("bafa_99_unbekannt"),
            Err(ServiceError::NotFound { kind: "config", .. })
        ));
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let result = ConfigCatalog::new(vec![
            ("a".to_string(), config("bafa_01_x")),
            ("b".to_string(), config("bafa_01_x")),
        ]);
        assert!(matches!(result, Err(CatalogError::DuplicateId(id)) if id == "bafa_01_x"));
    }

    #[test]
    fn duplicate_placeholder_keys_are_rejected() {
        let config: DocumentConfig = serde_json::from_value(serde_json::json!({
            "id": "bafa_01_x",
            "name": "x",
            "placeholders": [
                { "key": "DATUM", "label": "Datum" },
                { "key": "DATUM", "label": "Nochmal" }
            ]
        }))
        .unwrap();
        let result = ConfigCatalog::new(vec![("x".to_string(), config)]);
        assert!(matches!(
            result,
            Err(CatalogError::DuplicatePlaceholder { key, .. }) if key == "DATUM"
        ));
    }
}
