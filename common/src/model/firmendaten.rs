use serde_json::{Map, Value};

/// Free-form company profile of one customer (name, address, contacts,
/// policy texts). Field names are not fixed; several historical spellings
/// of the same field coexist in stored profiles.
pub type FirmenDaten = Map<String, Value>;

/// Renders a profile value as placeholder text. Blank strings and `null`
/// count as absent.
pub fn field_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::Null => return None,
        Value::String(s) => s.trim().to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::Array(_) | Value::Object(_) => return None,
    };
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn blank_and_null_values_are_absent() {
        assert_eq!(field_text(&json!(null)), None);
        assert_eq!(field_text(&json!("   ")), None);
        assert_eq!(field_text(&json!({"a": 1})), None);
    }

    #[test]
    fn scalars_render_as_text() {
        assert_eq!(field_text(&json!(" Muster GmbH ")), Some("Muster GmbH".to_string()));
        assert_eq!(field_text(&json!(42)), Some("42".to_string()));
        assert_eq!(field_text(&json!(true)), Some("true".to_string()));
    }
}
