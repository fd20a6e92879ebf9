use crate::error::ServiceError;
use chrono::{DateTime, Utc};
use common::model::config::TemplateType;
use common::model::document::DocumentRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};

const COLUMNS: &str =
    "customer_id, config_id, google_doc_id, document_name, template_type, created_at";

/// Which generated document belongs to which customer and config.
pub struct RecordStore<'c> {
    conn: &'c Connection,
}

impl<'c> RecordStore<'c> {
    pub fn new(conn: &'c Connection) -> Self {
        Self { conn }
    }

    pub fn create(&self, record: &DocumentRecord) -> Result<(), ServiceError> {
        self.conn.execute(
            &format!("INSERT INTO document_records ({COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6)"),
            params![
                record.customer_id,
                record.config_id,
                record.google_doc_id,
                record.document_name,
                record.template_type.as_str(),
                record.created_at,
            ],
        )?;
        Ok(())
    }

    /// The most recent record for the pair, if any.
    pub fn find_by_customer_and_config(
        &self,
        customer_id: &str,
        config_id: &str,
    ) -> Result<Option<DocumentRecord>, ServiceError> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM document_records
                     WHERE customer_id = ?1 AND config_id = ?2
                     ORDER BY seq DESC LIMIT 1"
                ),
                params![customer_id, config_id],
                read_record,
            )
            .optional()?)
    }

    /// All records of a customer, oldest first.
    pub fn list_by_customer(&self, customer_id: &str) -> Result<Vec<DocumentRecord>, ServiceError> {
        let mut stmt = self.conn.prepare(&format!(
            "SELECT {COLUMNS} FROM document_records WHERE customer_id = ?1 ORDER BY seq"
        ))?;
        let records = stmt
            .query_map(params![customer_id], read_record)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn find_by_document(&self, document_id: &str) -> Result<Option<DocumentRecord>, ServiceError> {
        Ok(self
            .conn
            .query_row(
                &format!(
                    "SELECT {COLUMNS} FROM document_records
                     WHERE google_doc_id = ?1 ORDER BY seq DESC LIMIT 1"
                ),
                params![document_id],
                read_record,
            )
            .optional()?)
    }
}

fn read_record(row: &Row<'_>) -> rusqlite::Result<DocumentRecord> {
    let template_type = match row.get::<_, String>(4)?.as_str() {
        "spreadsheet" => TemplateType::Spreadsheet,
        _ => TemplateType::Document,
    };
    Ok(DocumentRecord {
        customer_id: row.get(0)?,
        config_id: row.get(1)?,
        google_doc_id: row.get(2)?,
        document_name: row.get(3)?,
        template_type,
        created_at: row.get::<_, DateTime<Utc>>(5)?,
    })
}
