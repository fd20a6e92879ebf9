use crate::error::ServiceError;
use chrono::Utc;
use common::model::firmendaten::FirmenDaten;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension};

/// Company profiles, one JSON object per customer.
pub struct FirmenDatenStore<'c> {
    conn: &'c Connection,
}

impl<'c> FirmenDatenStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn load(&self, kunde_id: &str) -> Result<Option<String>, ServiceError> {
        Ok(self
            .conn
            .query_row(
                "SELECT data FROM firmendaten WHERE kunde_id = ?1",
                params![kunde_id],
                |row| row.get(0),
            )
            .optional()?)
    }

    /// The stored profile, or an empty one. A profile that cannot be read is
    /// logged and treated as empty so generation can still fall back to form
    /// input.
    pub fn get(&self, kunde_id: &str) -> Result<FirmenDaten, ServiceError> {
        match self.load(kunde_id)? {
            None => Ok(FirmenDaten::new()),
            Some(raw) => Ok(serde_json::from_str(&raw).unwrap_or_else(|err| {
                warn!("unreadable firmendaten for {}: {}", kunde_id, err);
                FirmenDaten::new()
            })),
        }
    }

    /// Merges `fields` over the stored profile and returns the result. An
    /// unreadable stored profile fails the save instead of being overwritten.
    pub fn save(&self, kunde_id: &str, fields: FirmenDaten) -> Result<FirmenDaten, ServiceError> {
        let mut merged: FirmenDaten = match self.load(kunde_id)? {
            Some(raw) => serde_json::from_str(&raw)?,
            None => FirmenDaten::new(),
        };
        merged.extend(fields);

        self.conn.execute(
            "INSERT OR REPLACE INTO firmendaten (kunde_id, data, updated_at) VALUES (?1, ?2, ?3)",
            params![kunde_id, serde_json::to_string(&merged)?, Utc::now()],
        )?;
        Ok(merged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> FirmenDaten {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn missing_profile_is_empty() {
        let conn = db::memory();
        assert!(FirmenDatenStore::new(&conn).get("k1").unwrap().is_empty());
    }

    #[test]
    fn save_merges_over_existing_fields() {
        let conn = db::memory();
        let store = FirmenDatenStore::new(&conn);
        store
            .save("k1", fields(json!({ "firmenname": "Muster GmbH", "plz": "12345" })))
            .unwrap();
        let merged = store.save("k1", fields(json!({ "plz": "54321", "ort": "Berlin" }))).unwrap();

        assert_eq!(
            merged,
            fields(json!({ "firmenname": "Muster GmbH", "plz": "54321", "ort": "Berlin" }))
        );
        assert_eq!(store.get("k1").unwrap(), merged);
    }

    #[test]
    fn corrupt_profile_reads_as_empty() {
        let conn = db::memory();
        conn.execute(
            "INSERT INTO firmendaten (kunde_id, data, updated_at) VALUES ('k1', 'kein json', 'x')",
            [],
        )
        .unwrap();
        assert!(FirmenDatenStore::new(&conn).get("k1").unwrap().is_empty());
    }

    #[test]
    fn saving_over_a_corrupt_profile_keeps_it() {
        let conn = db::memory();
        conn.execute(
            "INSERT INTO firmendaten (kunde_id, data, updated_at) VALUES ('k1', '{\"plz\": ', 'x')",
            [],
        )
        .unwrap();
        let store = FirmenDatenStore::new(&conn);

        let err = store
            .save("k1", fields(json!({ "ort": "Berlin" })))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Serialization(_)));

        let raw: String = conn
            .query_row("SELECT data FROM firmendaten WHERE kunde_id = 'k1'", [], |row| row.get(0))
            .unwrap();
        assert_eq!(raw, "{\"plz\": ");
    }
}
