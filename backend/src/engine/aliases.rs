//! Historical field names of the company profile.
//!
//! Profiles saved by older frontends store some fields under different names
//! (`homepage` instead of `webpage`, `mitarbeiterAnzahl` instead of
//! `anzahlMitarbeiter`, ...). A lookup tries the canonical name first and then
//! each alias in the order listed here.

use common::model::firmendaten::{field_text, FirmenDaten};

const ALIASES: &[(&str, &[&str])] = &[
    ("firmenname", &["firmenname", "companyName", "name"]),
    ("webpage", &["webpage", "homepage", "website", "webseite"]),
    (
        "anzahlMitarbeiter",
        &["anzahlMitarbeiter", "mitarbeiterAnzahl", "mitarbeiter", "mitarbeiterzahl"],
    ),
    ("gruendungsdatum", &["gruendungsdatum", "gruendungsjahr", "gruendung"]),
    ("strasse", &["strasse", "straße", "street"]),
    ("plz", &["plz", "zip", "postleitzahl"]),
    ("ort", &["ort", "stadt", "city"]),
    ("email", &["email", "eMail", "mail"]),
    (
        "geschaeftsfuehrer",
        &["geschaeftsfuehrer", "geschäftsfuehrer", "geschaeftsfuehrung"],
    ),
    ("qmb", &["qmb"]),
    ("anwendbarkeit", &["anwendbarkeit", "anwendbar", "applicability"]),
];

/// Prefix of placeholder sources that point into the company profile.
pub const FIRMENDATEN_PREFIX: &str = "firmendaten.";

/// Keys to try for `key`, in priority order.
pub fn candidates(key: &str) -> Vec<&str> {
    match ALIASES.iter().find(|(canonical, _)| *canonical == key) {
        Some((_, names)) => names.to_vec(),
        None => vec![key],
    }
}

/// First non-empty value stored under `key` or one of its aliases.
pub fn lookup(firmendaten: &FirmenDaten, key: &str) -> Option<String> {
    candidates(key)
        .into_iter()
        .find_map(|name| firmendaten.get(name).and_then(field_text))
}

/// Resolves a placeholder `source` such as `firmendaten.webpage`. Sources with
/// any other prefix resolve to nothing.
pub fn resolve_source(source: &str, firmendaten: &FirmenDaten) -> Option<String> {
    let key = source.strip_prefix(FIRMENDATEN_PREFIX)?;
    lookup(firmendaten, key)
}

/// Fills in the directory's company name when the profile carries none under
/// any `firmenname` spelling.
pub fn with_company_fallback(mut firmendaten: FirmenDaten, company_name: &str) -> FirmenDaten {
    if lookup(&firmendaten, "firmenname").is_none() && !company_name.trim().is_empty() {
        firmendaten.insert(
            "companyName".to_string(),
            serde_json::Value::String(company_name.to_string()),
        );
    }
    firmendaten
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn profile(value: serde_json::Value) -> FirmenDaten {
        match value {
            serde_json::Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn alias_is_used_when_canonical_key_is_missing() {
        let fd = profile(json!({ "homepage": "https://muster.de" }));
        assert_eq!(
            resolve_source("firmendaten.webpage", &fd),
            Some("https://muster.de".to_string())
        );
    }

    #[test]
    fn canonical_key_wins_over_aliases() {
        let fd = profile(json!({ "mitarbeiterAnzahl": 12, "anzahlMitarbeiter": 15 }));
        assert_eq!(lookup(&fd, "anzahlMitarbeiter"), Some("15".to_string()));
    }

    #[test]
    fn blank_canonical_value_falls_through_to_alias() {
        let fd = profile(json!({ "webpage": "  ", "website": "muster.de" }));
        assert_eq!(lookup(&fd, "webpage"), Some("muster.de".to_string()));
    }

    #[test]
    fn unknown_keys_only_match_themselves() {
        let fd = profile(json!({ "zielgruppe": "KMU" }));
        assert_eq!(candidates("zielgruppe"), vec!["zielgruppe"]);
        assert_eq!(resolve_source("firmendaten.zielgruppe", &fd), Some("KMU".to_string()));
        assert_eq!(resolve_source("kunde.zielgruppe", &fd), None);
    }

    #[test]
    fn company_fallback_only_fills_gaps() {
        let empty = with_company_fallback(FirmenDaten::new(), "Muster GmbH");
        assert_eq!(lookup(&empty, "firmenname"), Some("Muster GmbH".to_string()));

        let named = with_company_fallback(profile(json!({ "firmenname": "Echt AG" })), "Muster GmbH");
        assert_eq!(lookup(&named, "firmenname"), Some("Echt AG".to_string()));
        assert!(!named.contains_key("companyName"));
    }
}
