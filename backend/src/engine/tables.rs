//! Table inputs: splitting raw form text into rows and placing rows into a
//! document body.
//!
//! Column layout (e.g. `Thema | Status | Maßnahme`) is left to the template;
//! a row is one trimmed, non-empty input line.

use common::model::config::{table_anchor, TableDef};
use common::model::document::{Block, DocumentBody};
use std::collections::HashMap;
use std::ops::Range;

/// Rows of one declared table, ready to insert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTable {
    pub name: String,
    pub rows: Vec<String>,
}

/// How new rows meet rows already present in a table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableMode {
    Append,
    Replace,
}

/// Splits raw input into rows: one per line, trimmed, blank lines dropped,
/// order kept. Duplicates are kept too.
pub fn render_rows(raw: Option<&str>) -> Vec<String> {
    raw.map(|text| {
        text.lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Renders every declared table. Inputs for undeclared tables are ignored.
pub fn render_tables(defs: &[TableDef], input: &HashMap<String, String>) -> Vec<RenderedTable> {
    defs.iter()
        .map(|def| RenderedTable {
            name: def.name.clone(),
            rows: render_rows(input.get(&def.name).map(String::as_str)),
        })
        .collect()
}

/// Index of the first table block named `name`, or of its bare
/// `{{TABLE_name}}` anchor paragraph, skipping blocks inside `excluded`.
fn locate(body: &DocumentBody, name: &str, excluded: &[Range<usize>]) -> Option<usize> {
    let anchor = table_anchor(name);
    let usable = |index: &usize| !excluded.iter().any(|range| range.contains(index));

    body.blocks
        .iter()
        .enumerate()
        .filter(|(index, _)| usable(index))
        .find_map(|(index, block)| match block {
            Block::Table { name: n, .. } if n == name => Some(index),
            _ => None,
        })
        .or_else(|| {
            body.blocks
                .iter()
                .enumerate()
                .filter(|(index, _)| usable(index))
                .find_map(|(index, block)| match block {
                    Block::Paragraph { text } if text.trim() == anchor => Some(index),
                    _ => None,
                })
        })
}

/// Puts `rows` into the table `name`. An existing table block gets the rows
/// appended or replaced per `mode`; a bare anchor paragraph is turned into a
/// table holding `rows`. Returns `false` when the body has neither.
pub fn apply_rows(
    body: &mut DocumentBody,
    name: &str,
    rows: &[String],
    mode: TableMode,
    excluded: &[Range<usize>],
) -> bool {
    let Some(index) = locate(body, name, excluded) else {
        return false;
    };

    let block = &mut body.blocks[index];
    match block {
        Block::Table { rows: existing, .. } => match mode {
            TableMode::Append => existing.extend(rows.iter().cloned()),
            TableMode::Replace => *existing = rows.to_vec(),
        },
        Block::Paragraph { .. } => *block = Block::table(name, rows.to_vec()),
    }
    true
}

/// Rows a table should hold after an update, given the rows the document
/// already has. Empty input leaves the existing rows alone.
pub fn carry_over(existing: &[String], input: &[String], mode: TableMode) -> Vec<String> {
    if input.is_empty() {
        return existing.to_vec();
    }
    match mode {
        TableMode::Append => existing.iter().chain(input).cloned().collect(),
        TableMode::Replace => input.to_vec(),
    }
}

/// Converts each table's anchor in a freshly copied template into the table
/// itself. Tables with no input still replace their anchor, so the anchor
/// never shows up as a leftover token.
pub fn fill_anchors(body: &mut DocumentBody, tables: &[RenderedTable]) -> Vec<String> {
    let mut missing = Vec::new();
    for table in tables {
        if !apply_rows(body, &table.name, &table.rows, TableMode::Replace, &[]) {
            missing.push(table.name.clone());
        }
    }
    missing
}
