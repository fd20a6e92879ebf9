//! Turns a config's placeholder declarations plus form input into the final
//! key → value map used for substitution.

use crate::engine::aliases;
use crate::engine::tokens::TokenMap;
use crate::error::ServiceError;
use chrono::NaiveDate;
use common::model::firmendaten::FirmenDaten;
use common::model::place_holder::{PlaceholderDef, PlaceholderType};
use std::collections::HashMap;

/// Format of `autoToday` defaults, matching HTML date inputs.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Resolves every declared placeholder.
///
/// Precedence per placeholder: non-blank input value, then the company profile
/// field named by `source`, then `today` for `autoToday` date fields. Keys that
/// stay unresolved are absent from the result. If any of them is required the
/// whole call fails with one error naming every missing label.
pub fn resolve_placeholders(
    defs: &[PlaceholderDef],
    input: &HashMap<String, String>,
    firmendaten: Option<&FirmenDaten>,
    today: Option<NaiveDate>,
) -> Result<TokenMap, ServiceError> {
    let mut resolved = TokenMap::new();
    let mut missing = Vec::new();

    for def in defs {
        match resolve_one(def, input, firmendaten, today) {
            Some(value) => {
                resolved.insert(def.key.clone(), value);
            }
            None if def.required => missing.push(def.label.clone()),
            None => {}
        }
    }

    if missing.is_empty() {
        Ok(resolved)
    } else {
        Err(ServiceError::Validation { missing })
    }
}

fn resolve_one(
    def: &PlaceholderDef,
    input: &HashMap<String, String>,
    firmendaten: Option<&FirmenDaten>,
    today: Option<NaiveDate>,
) -> Option<String> {
    if let Some(value) = input.get(&def.key).map(|v| v.trim()).filter(|v| !v.is_empty()) {
        return Some(value.to_string());
    }

    if let (Some(source), Some(fd)) = (def.source.as_deref(), firmendaten) {
        if let Some(value) = aliases::resolve_source(source, fd) {
            return Some(value);
        }
    }

    if def.auto_today && def.placeholder_type == PlaceholderType::Date {
        return today.map(|date| date.format(DATE_FORMAT).to_string());
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn def(key: &str, label: &str, required: bool) -> PlaceholderDef {
        PlaceholderDef {
            key: key.to_string(),
            label: label.to_string(),
            placeholder_type: PlaceholderType::Text,
            required,
            source: None,
            auto_today: false,
        }
    }

    fn input(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn today() -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(2024, 5, 1)
    }

    #[test]
    fn explicit_input_is_trimmed_and_used() {
        let defs = vec![def("TEILNEHMER", "Teilnehmer", true)];
        let resolved =
            resolve_placeholders(&defs, &input(&[("TEILNEHMER", "  A, B ")]), None, None).unwrap();
        assert_eq!(resolved.get("TEILNEHMER").map(String::as_str), Some("A, B"));
    }

    #[test]
    fn every_missing_required_label_is_reported_once() {
        let defs = vec![
            def("A", "Erstes Feld", true),
            def("B", "Optional", false),
            def("C", "Drittes Feld", true),
        ];
        let err = resolve_placeholders(&defs, &input(&[("A", "   ")]), None, today()).unwrap_err();
        match err {
            ServiceError::Validation { missing } => {
                assert_eq!(missing, vec!["Erstes Feld".to_string(), "Drittes Feld".to_string()])
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn source_resolves_through_aliases() {
        let mut webpage = def("WEBPAGE", "Webseite", true);
        webpage.source = Some("firmendaten.webpage".to_string());
        let fd = json!({ "homepage": "https://muster.de" });

        let resolved = resolve_placeholders(
            &[webpage],
            &HashMap::new(),
            fd.as_object(),
            None,
        )
        .unwrap();
        assert_eq!(resolved.get("WEBPAGE").map(String::as_str), Some("https://muster.de"));
    }

    #[test]
    fn input_takes_precedence_over_source() {
        let mut name = def("FIRMENNAME", "Firmenname", true);
        name.source = Some("firmendaten.firmenname".to_string());
        let fd = json!({ "firmenname": "Aus Profil" });

        let resolved = resolve_placeholders(
            &[name],
            &input(&[("FIRMENNAME", "Aus Formular")]),
            fd.as_object(),
            None,
        )
        .unwrap();
        assert_eq!(resolved.get("FIRMENNAME").map(String::as_str), Some("Aus Formular"));
    }

    #[test]
    fn auto_today_only_applies_to_date_fields() {
        let mut date = def("AUDITDATUM", "Auditdatum", true);
        date.placeholder_type = PlaceholderType::Date;
        date.auto_today = true;
        let mut text = def("NOTIZ", "Notiz", false);
        text.auto_today = true;

        let resolved =
            resolve_placeholders(&[date, text], &HashMap::new(), None, today()).unwrap();
        assert_eq!(resolved.get("AUDITDATUM").map(String::as_str), Some("2024-05-01"));
        assert!(!resolved.contains_key("NOTIZ"));
    }

    #[test]
    fn missing_profile_leaves_sourced_required_field_unresolved() {
        let mut name = def("KUNDE_NAME", "Name des Kunden", true);
        name.source = Some("firmendaten.firmenname".to_string());

        let err = resolve_placeholders(&[name], &HashMap::new(), None, today()).unwrap_err();
        assert_eq!(err.to_string(), "missing required fields: Name des Kunden");
    }
}
