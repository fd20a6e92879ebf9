use crate::model::config::TemplateType;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One block of a document: a paragraph of text or a rendered table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Block {
    Paragraph { text: String },
    Table { name: String, rows: Vec<String> },
}

impl Block {
    pub fn paragraph(text: impl Into<String>) -> Self {
        Block::Paragraph { text: text.into() }
    }

    pub fn table(name: impl Into<String>, rows: Vec<String>) -> Self {
        Block::Table {
            name: name.into(),
            rows,
        }
    }

    /// Paragraph text, `None` for tables.
    pub fn text(&self) -> Option<&str> {
        match self {
            Block::Paragraph { text } => Some(text),
            Block::Table { .. } => None,
        }
    }
}

/// Ordered content of a template or a generated document.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DocumentBody {
    pub blocks: Vec<Block>,
}

impl DocumentBody {
    pub fn new(blocks: Vec<Block>) -> Self {
        Self { blocks }
    }

    /// Templates are authored as plain text with one paragraph per line.
    pub fn from_text(text: &str) -> Self {
        Self {
            blocks: text.lines().map(Block::paragraph).collect(),
        }
    }

    /// Flattens the body back to text, one line per paragraph or table row.
    pub fn to_text(&self) -> String {
        let mut lines: Vec<&str> = Vec::with_capacity(self.blocks.len());
        for block in &self.blocks {
            match block {
                Block::Paragraph { text } => lines.push(text),
                Block::Table { rows, .. } => lines.extend(rows.iter().map(String::as_str)),
            }
        }
        lines.join("\n")
    }

    /// Rows of the first table named `name`.
    pub fn table_rows(&self, name: &str) -> Option<&[String]> {
        self.blocks.iter().find_map(|block| match block {
            Block::Table { name: n, rows } if n == name => Some(rows.as_slice()),
            _ => None,
        })
    }
}

/// A generated document as held by the document store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredDocument {
    pub id: String,
    pub body: DocumentBody,
    /// Bumped on every write; used as a compare-and-swap token.
    pub version: i64,
    pub updated_at: DateTime<Utc>,
}

/// Links a generated document to the customer and config it was made for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentRecord {
    pub customer_id: String,
    pub config_id: String,
    /// Kept under its historical wire name; holds the document store id.
    pub google_doc_id: String,
    pub document_name: String,
    pub template_type: TemplateType,
    pub created_at: DateTime<Utc>,
}
