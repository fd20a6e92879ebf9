//! `{{KEY}}` token handling: substitution, scanning and cleanup.

use common::model::document::{Block, DocumentBody};
use regex::{Captures, Regex};
use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

/// Resolved placeholder values keyed by placeholder key (without braces).
pub type TokenMap = HashMap<String, String>;

// Anything between double braces that is not itself a brace.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("token pattern compiles"));

/// Replaces every token whose key is in `tokens`. Unknown tokens stay
/// verbatim. Values are inserted literally, so a value containing `{{X}}`
/// is not substituted again.
pub fn substitute_text(text: &str, tokens: &TokenMap) -> (String, usize) {
    let mut replaced = 0;
    let out = TOKEN_RE.replace_all(text, |caps: &Captures| {
        let key = &caps[1];
        match tokens.get(key).or_else(|| tokens.get(key.trim())) {
            Some(value) => {
                replaced += 1;
                value.clone()
            }
            None => caps[0].to_string(),
        }
    });
    (out.into_owned(), replaced)
}

/// Substitutes tokens in every paragraph of `body`. Table rows are user input
/// and are left alone. Returns the number of replaced occurrences.
pub fn substitute(body: &mut DocumentBody, tokens: &TokenMap) -> usize {
    let mut total = 0;
    for block in &mut body.blocks {
        if let Block::Paragraph { text } = block {
            let (out, replaced) = substitute_text(text, tokens);
            if replaced > 0 {
                *text = out;
                total += replaced;
            }
        }
    }
    total
}

/// Every `{{…}}` token left in `body`, paragraphs and table rows alike, in
/// order of first appearance and without repeats.
pub fn scan_unresolved(body: &DocumentBody) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut found = Vec::new();
    for block in &body.blocks {
        match block {
            Block::Paragraph { text } => collect_tokens(text, &mut seen, &mut found),
            Block::Table { rows, .. } => {
                for row in rows {
                    collect_tokens(row, &mut seen, &mut found);
                }
            }
        }
    }
    found
}

fn collect_tokens<'a>(text: &'a str, seen: &mut HashSet<&'a str>, found: &mut Vec<String>) {
    for m in TOKEN_RE.find_iter(text) {
        if seen.insert(m.as_str()) {
            found.push(m.as_str().to_string());
        }
    }
}

/// Strips every `{{…}}` token from `body` and returns what was removed (as
/// [`scan_unresolved`] would list it). Everything else, empty paragraphs
/// included, is kept as is.
pub fn remove_unresolved(body: &mut DocumentBody) -> Vec<String> {
    let removed = scan_unresolved(body);
    if removed.is_empty() {
        return removed;
    }

    for block in &mut body.blocks {
        match block {
            Block::Paragraph { text } => strip_tokens(text),
            Block::Table { rows, .. } => rows.iter_mut().for_each(strip_tokens),
        }
    }
    removed
}

fn strip_tokens(text: &mut String) {
    if TOKEN_RE.is_match(text) {
        *text = TOKEN_RE.replace_all(text, "").into_owned();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn tokens(pairs: &[(&str, &str)]) -> TokenMap {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn substitutes_known_tokens_and_keeps_unknown_ones() {
        let (out, replaced) = substitute_text(
            "Am {{DATUM}} mit {{TEILNEHMER}}: {{GESAMTBEWERTUNG}}",
            &tokens(&[("DATUM", "2024-05-01"), ("TEILNEHMER", "A, B")]),
        );
        assert_eq!(out, "Am 2024-05-01 mit A, B: {{GESAMTBEWERTUNG}}");
        assert_eq!(replaced, 2);
    }

    #[test]
    fn keys_with_spaces_are_tokens() {
        let (out, _) = substitute_text(
            "{{POSITIVE FESTSTELLUNGEN}}",
            &tokens(&[("POSITIVE FESTSTELLUNGEN", "Gut dokumentiert")]),
        );
        assert_eq!(out, "Gut dokumentiert");
    }

    #[test]
    fn values_are_not_substituted_twice() {
        let (out, _) = substitute_text("{{A}}", &tokens(&[("A", "{{B}}"), ("B", "x")]));
        assert_eq!(out, "{{B}}");
    }

    #[test]
    fn scan_lists_each_token_once_in_order() {
        let body = DocumentBody::new(vec![
            Block::paragraph("{{B}} und {{A}}"),
            Block::table("t", vec!["{{C}} | {{B}}".to_string()]),
            Block::paragraph("[[BAFA_ZONE:X]] ist kein Token"),
        ]);
        assert_eq!(scan_unresolved(&body), vec!["{{B}}", "{{A}}", "{{C}}"]);
    }

    #[test]
    fn cleanup_removes_tokens_only() {
        let mut body = DocumentBody::new(vec![
            Block::paragraph("Ergebnis: {{GESAMTBEWERTUNG}}."),
            Block::paragraph("{{TABLE_unbekannt}}"),
            Block::paragraph("Bleibt"),
        ]);
        let removed = remove_unresolved(&mut body);
        assert_eq!(removed, vec!["{{GESAMTBEWERTUNG}}", "{{TABLE_unbekannt}}"]);
        assert_eq!(
            body.blocks,
            vec![
                Block::paragraph("Ergebnis: ."),
                Block::paragraph(""),
                Block::paragraph("Bleibt"),
            ]
        );
    }

    #[test]
    fn cleanup_of_clean_body_is_a_no_op() {
        let original = DocumentBody::from_text("Kein Platzhalter\n\n  Einrückung bleibt  ");
        let mut body = original.clone();
        assert!(remove_unresolved(&mut body).is_empty());
        assert_eq!(body, original);
        assert!(remove_unresolved(&mut body).is_empty());
    }
}
