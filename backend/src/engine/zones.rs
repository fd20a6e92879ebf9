//! Update zones.
//!
//! A zone is the run of blocks between a `[[BAFA_ZONE:NAME]]` paragraph and
//! the matching `[[/BAFA_ZONE:NAME]]` paragraph. When a generated document is
//! refreshed, each zone's interior is replaced by the same zone of the current
//! template; everything outside zones belongs to the user and is not touched.

use common::model::document::{Block, DocumentBody};
use log::debug;
use std::collections::HashSet;
use std::ops::Range;
use thiserror::Error;

const BEGIN_PREFIX: &str = "[[BAFA_ZONE:";
const END_PREFIX: &str = "[[/BAFA_ZONE:";
const MARKER_SUFFIX: &str = "]]";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ZoneError {
    #[error("zone {name} is opened but never closed")]
    Unclosed { name: String },
    #[error("zone {name} is closed without being opened")]
    UnexpectedEnd { name: String },
    #[error("zone {inner} starts inside zone {outer}")]
    Nested { outer: String, inner: String },
    #[error("zone {name} appears more than once")]
    Duplicate { name: String },
}

/// Position of one zone: `begin` and `end` are the block indices of its
/// markers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ZoneSpan {
    pub name: String,
    pub begin: usize,
    pub end: usize,
}

impl ZoneSpan {
    /// Block indices strictly between the markers.
    pub fn interior(&self) -> Range<usize> {
        self.begin + 1..self.end
    }

    /// Block indices including both markers.
    pub fn extent(&self) -> Range<usize> {
        self.begin..self.end + 1
    }
}

/// What a merge did, for logging and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub replaced: Vec<String>,
    pub appended: Vec<String>,
}

pub fn begin_marker(name: &str) -> String {
    format!("{BEGIN_PREFIX}{name}{MARKER_SUFFIX}")
}

pub fn end_marker(name: &str) -> String {
    format!("{END_PREFIX}{name}{MARKER_SUFFIX}")
}

enum Marker<'a> {
    Begin(&'a str),
    End(&'a str),
}

fn marker(block: &Block) -> Option<Marker<'_>> {
    let text = block.text()?.trim();
    if let Some(rest) = text.strip_prefix(END_PREFIX) {
        return marker_name(rest).map(Marker::End);
    }
    if let Some(rest) = text.strip_prefix(BEGIN_PREFIX) {
        return marker_name(rest).map(Marker::Begin);
    }
    None
}

fn marker_name(rest: &str) -> Option<&str> {
    let name = rest.strip_suffix(MARKER_SUFFIX)?.trim();
    (!name.is_empty()).then_some(name)
}

/// Locates every zone of `body`, in document order.
pub fn find_zones(body: &DocumentBody) -> Result<Vec<ZoneSpan>, ZoneError> {
    let mut spans = Vec::new();
    let mut seen = HashSet::new();
    let mut open: Option<(&str, usize)> = None;

    for (index, block) in body.blocks.iter().enumerate() {
        match (marker(block), open) {
            (None, _) => {}
            (Some(Marker::Begin(name)), None) => open = Some((name, index)),
            (Some(Marker::Begin(inner)), Some((outer, _))) => {
                return Err(ZoneError::Nested {
                    outer: outer.to_string(),
                    inner: inner.to_string(),
                })
            }
            (Some(Marker::End(name)), Some((open_name, begin))) if name == open_name => {
                if !seen.insert(name) {
                    return Err(ZoneError::Duplicate {
                        name: name.to_string(),
                    });
                }
                spans.push(ZoneSpan {
                    name: name.to_string(),
                    begin,
                    end: index,
                });
                open = None;
            }
            (Some(Marker::End(name)), _) => {
                return Err(ZoneError::UnexpectedEnd {
                    name: name.to_string(),
                })
            }
        }
    }

    match open {
        Some((name, _)) => Err(ZoneError::Unclosed {
            name: name.to_string(),
        }),
        None => Ok(spans),
    }
}

/// Replaces the interior of zone `name`. Returns `false` if the body has no
/// such zone.
pub fn replace_zone_content(
    body: &mut DocumentBody,
    name: &str,
    content: Vec<Block>,
) -> Result<bool, ZoneError> {
    let spans = find_zones(body)?;
    match spans.into_iter().find(|span| span.name == name) {
        Some(span) => {
            body.blocks.splice(span.interior(), content);
            Ok(true)
        }
        None => Ok(false),
    }
}

/// Appends a complete zone, markers included, at the end of `body`.
pub fn append_zone(body: &mut DocumentBody, name: &str, content: Vec<Block>) {
    body.blocks.push(Block::paragraph(begin_marker(name)));
    body.blocks.extend(content);
    body.blocks.push(Block::paragraph(end_marker(name)));
}

/// Copies every zone of `source` into `target`, matched by name. Zones the
/// target lacks are appended at its end in source order. Blocks of `target`
/// outside its zones are left untouched.
pub fn merge_zones(
    target: &mut DocumentBody,
    source: &DocumentBody,
) -> Result<MergeReport, ZoneError> {
    let source_zones = find_zones(source)?;
    // Validate the target up front so a malformed document is never half merged.
    find_zones(target)?;

    let mut report = MergeReport::default();
    for zone in source_zones {
        let content = source.blocks[zone.interior()].to_vec();
        if replace_zone_content(target, &zone.name, content.clone())? {
            debug!("zone {} replaced", zone.name);
            report.replaced.push(zone.name);
        } else {
            debug!("zone {} appended", zone.name);
            append_zone(target, &zone.name, content);
            report.appended.push(zone.name);
        }
    }
    Ok(report)
}

/// Names of the tables that sit inside some zone of `body`.
pub fn tables_in_zones(body: &DocumentBody, spans: &[ZoneSpan]) -> HashSet<String> {
    let mut names = HashSet::new();
    for span in spans {
        for block in &body.blocks[span.interior()] {
            if let Block::Table { name, .. } = block {
                names.insert(name.clone());
            }
        }
    }
    names
}

/// Block ranges covered by each zone, markers included.
pub fn extents(spans: &[ZoneSpan]) -> Vec<Range<usize>> {
    spans.iter().map(ZoneSpan::extent).collect()
}

/// Zone names in document order.
pub fn zone_names(body: &DocumentBody) -> Result<Vec<String>, ZoneError> {
    Ok(find_zones(body)?.into_iter().map(|span| span.name).collect())
}
