//! SQLite connection handling.
//!
//! Every request opens its own connection on a blocking worker; the schema is
//! created once at start-up and is safe to apply repeatedly.

use rusqlite::Connection;
use std::path::Path;

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS customers (
    kunde_id     TEXT PRIMARY KEY,
    company_name TEXT NOT NULL,
    folder_id    TEXT NOT NULL,
    logo_url     TEXT,
    created_at   TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS logos (
    kunde_id     TEXT PRIMARY KEY REFERENCES customers(kunde_id),
    md5          TEXT NOT NULL,
    content_type TEXT NOT NULL,
    base64       TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS firmendaten (
    kunde_id   TEXT PRIMARY KEY,
    data       TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS templates (
    id         TEXT PRIMARY KEY,
    body       TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS documents (
    id         TEXT PRIMARY KEY,
    body       TEXT NOT NULL,
    version    INTEGER NOT NULL,
    updated_at TEXT NOT NULL
);
CREATE TABLE IF NOT EXISTS document_records (
    seq           INTEGER PRIMARY KEY AUTOINCREMENT,
    customer_id   TEXT NOT NULL,
    config_id     TEXT NOT NULL,
    google_doc_id TEXT NOT NULL,
    document_name TEXT NOT NULL,
    template_type TEXT NOT NULL,
    created_at    TEXT NOT NULL
);
CREATE INDEX IF NOT EXISTS document_records_customer
    ON document_records (customer_id, config_id);
";

pub fn open(path: &Path) -> Result<Connection, rusqlite::Error> {
    Connection::open(path)
}

pub fn init_schema(conn: &Connection) -> Result<(), rusqlite::Error> {
    conn.execute_batch(SCHEMA)
}

#[cfg(test)]
pub(crate) fn memory() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}
