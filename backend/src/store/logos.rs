use crate::error::ServiceError;
use rusqlite::{params, Connection, OptionalExtension};

/// A customer logo as stored: base64 payload plus its md5 fingerprint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredLogo {
    pub md5: String,
    pub content_type: String,
    pub base64: String,
}

pub struct LogoStore<'c> {
    conn: &'c Connection,
}

impl<'c> LogoStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    /// Stores the logo of `kunde_id`, replacing any previous one.
    pub fn save(&self, kunde_id: &str, logo: &StoredLogo) -> Result<(), ServiceError> {
        self.conn.execute(
            "INSERT OR REPLACE INTO logos (kunde_id, md5, content_type, base64)
             VALUES (?1, ?2, ?3, ?4)",
            params![kunde_id, logo.md5, logo.content_type, logo.base64],
        )?;
        Ok(())
    }

    pub fn get(&self, kunde_id: &str) -> Result<StoredLogo, ServiceError> {
        self.conn
            .query_row(
                "SELECT md5, content_type, base64 FROM logos WHERE kunde_id = ?1",
                params![kunde_id],
                |row| {
                    Ok(StoredLogo {
                        md5: row.get(0)?,
                        content_type: row.get(1)?,
                        base64: row.get(2)?,
                    })
                },
            )
            .optional()?
            .ok_or_else(|| ServiceError::not_found("logo", kunde_id))
    }
}
