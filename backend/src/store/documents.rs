//! Template and document storage.
//!
//! [`DocumentStore`] needs only five primitives from a backend; the document
//! operations the engine works with (substitution, table rows, zones, token
//! cleanup) are provided on top of them as read-modify-write cycles guarded by
//! the document version.

use crate::engine::tables::{self, TableMode};
use crate::engine::tokens::{self, TokenMap};
use crate::engine::zones;
use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use common::model::document::{Block, DocumentBody, StoredDocument};
use rusqlite::{params, Connection, OptionalExtension};
use uuid::Uuid;

pub trait DocumentStore {
    /// Body of a source template.
    fn template(&self, template_id: &str) -> Result<DocumentBody, ServiceError>;

    /// Creates or overwrites a source template.
    fn save_template(&self, template_id: &str, body: &DocumentBody) -> Result<(), ServiceError>;

    /// Stores a new document at version 1 and returns its id.
    fn create(&self, body: &DocumentBody) -> Result<String, ServiceError>;

    fn fetch(&self, document_id: &str) -> Result<StoredDocument, ServiceError>;

    /// Overwrites the body if the stored version still equals
    /// `expected_version`; returns the new version.
    fn write(
        &self,
        document_id: &str,
        body: &DocumentBody,
        expected_version: i64,
    ) -> Result<i64, ServiceError>;

    /// Copies a template into a new document.
    fn duplicate(&self, template_id: &str) -> Result<String, ServiceError> {
        let body = self.template(template_id)?;
        self.create(&body)
    }

    /// Applies `change` to the stored body. `change` reports whether it
    /// modified anything; unchanged bodies are not written back. Returns the
    /// resulting version.
    fn edit<F>(&self, document_id: &str, change: F) -> Result<i64, ServiceError>
    where
        F: FnOnce(&mut DocumentBody) -> Result<bool, ServiceError>,
    {
        let stored = self.fetch(document_id)?;
        let mut body = stored.body;
        if change(&mut body)? {
            self.write(document_id, &body, stored.version)
        } else {
            Ok(stored.version)
        }
    }

    /// Replaces every occurrence of each resolved token; unresolved tokens
    /// stay verbatim. Returns the number of replacements.
    fn substitute(&self, document_id: &str, tokens: &TokenMap) -> Result<usize, ServiceError> {
        let mut replaced = 0;
        self.edit(document_id, |body| {
            replaced = tokens::substitute(body, tokens);
            Ok(replaced > 0)
        })?;
        Ok(replaced)
    }

    /// Adds `rows` to table `table_name`, turning its anchor into a table
    /// first if needed. Returns `false` if the document has neither.
    fn insert_table_rows(
        &self,
        document_id: &str,
        table_name: &str,
        rows: &[String],
    ) -> Result<bool, ServiceError> {
        let mut found = false;
        self.edit(document_id, |body| {
            found = tables::apply_rows(body, table_name, rows, TableMode::Append, &[]);
            Ok(found)
        })?;
        Ok(found)
    }

    fn find_zones(&self, document_id: &str) -> Result<Vec<String>, ServiceError> {
        let stored = self.fetch(document_id)?;
        Ok(zones::zone_names(&stored.body)?)
    }

    /// Replaces the interior of zone `zone_name`. Returns `false` if the
    /// document has no such zone.
    fn replace_zone_content(
        &self,
        document_id: &str,
        zone_name: &str,
        content: Vec<Block>,
    ) -> Result<bool, ServiceError> {
        let mut found = false;
        self.edit(document_id, |body| {
            found = zones::replace_zone_content(body, zone_name, content)?;
            Ok(found)
        })?;
        Ok(found)
    }

    fn scan_unresolved_tokens(&self, document_id: &str) -> Result<Vec<String>, ServiceError> {
        let stored = self.fetch(document_id)?;
        Ok(tokens::scan_unresolved(&stored.body))
    }

    /// Strips leftover tokens. A document without any is not written, so
    /// running this twice leaves the second run a no-op. Returns the removed
    /// tokens and the resulting version.
    fn remove_unresolved_tokens(
        &self,
        document_id: &str,
    ) -> Result<(Vec<String>, i64), ServiceError> {
        let mut removed = Vec::new();
        let version = self.edit(document_id, |body| {
            removed = tokens::remove_unresolved(body);
            Ok(!removed.is_empty())
        })?;
        Ok((removed, version))
    }
}

pub struct SqliteDocumentStore<'c> {
    conn: &'c Connection,
}

impl<'c> SqliteDocumentStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    fn current_version(&self, document_id: &str) -> Result<Option<i64>, ServiceError> {
        Ok(self
            .conn
            .query_row(
                "SELECT version FROM documents WHERE id = ?1",
                params![document_id],
                |row| row.get(0),
            )
            .optional()?)
    }
}

impl DocumentStore for SqliteDocumentStore<'_> {
    fn template(&self, template_id: &str) -> Result<DocumentBody, ServiceError> {
        let raw: Option<String> = self
            .conn
            .query_row(
                "SELECT body FROM templates WHERE id = ?1",
                params![template_id],
                |row| row.get(0),
            )
            .optional()?;
        let raw = raw.ok_or_else(|| ServiceError::not_found("template", template_id))?;
        Ok(serde_json::from_str(&raw)?)
    }

    fn save_template(&self, template_id: &str, body: &DocumentBody) -> Result<(), ServiceError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO templates (id, body, updated_at) VALUES (?1, ?2, ?3)",
            params![template_id, serde_json::to_string(body)?, Utc::now()],
        )?;
        Ok(())
    }

    fn create(&self, body: &DocumentBody) -> Result<String, ServiceError> {
        let id = Uuid::new_v4().to_string();
        self.conn.execute(
            "INSERT INTO documents (id, body, version, updated_at) VALUES (?1, ?2, 1, ?3)",
            params![&id, serde_json::to_string(body)?, Utc::now()],
        )?;
        Ok(id)
    }

    fn fetch(&self, document_id: &str) -> Result<StoredDocument, ServiceError> {
        let row = self
            .conn
            .query_row(
                "SELECT body, version, updated_at FROM documents WHERE id = ?1",
                params![document_id],
                |row| {
                    Ok((
                        row.get::<_, String>(0)?,
                        row.get::<_, i64>(1)?,
                        row.get::<_, DateTime<Utc>>(2)?,
                    ))
                },
            )
            .optional()?;
        let (body, version, updated_at) =
            row.ok_or_else(|| ServiceError::not_found("document", document_id))?;

        Ok(StoredDocument {
            id: document_id.to_string(),
            body: serde_json::from_str(&body)?,
            version,
            updated_at,
        })
    }

    fn write(
        &self,
        document_id: &str,
        body: &DocumentBody,
        expected_version: i64,
    ) -> Result<i64, ServiceError> {
        let changed = self.conn.execute(
            "UPDATE documents SET body = ?1, version = version + 1, updated_at = ?2
             WHERE id = ?3 AND version = ?4",
            params![
                serde_json::to_string(body)?,
                Utc::now(),
                document_id,
                expected_version
            ],
        )?;
        if changed == 1 {
            return Ok(expected_version + 1);
        }

        match self.current_version(document_id)? {
            Some(found) => Err(ServiceError::Conflict {
                document_id: document_id.to_string(),
                expected: expected_version,
                found,
            }),
            None => Err(ServiceError::not_found("document", document_id)),
        }
    }
}
