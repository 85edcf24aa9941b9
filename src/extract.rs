//! Spawn extraction.
//!
//! Reduces a parsed document to the spawn positions of both teams. A block is
//! a spawn when its `classname` is a team's player start, `enabled` is truthy
//! and `priority` equals 0 numerically (`0`, `0.0` and `False` all match).
//! Missing selector properties simply mean "not a spawn"; a selected block
//! without a three-float `origin` is an error.

use std::fs;
use std::path::Path;

use crate::error::{Result, VentsError};
use crate::parser::{parse_document_with, Block, ParseOptions, ParsedDocument, PropertyValue};
use crate::types::{Position, SpawnSet, Team};

/// Collect the spawns of both teams in document order.
///
/// Fails on the first selected block whose `origin` is missing or malformed.
pub fn extract_spawns(doc: &ParsedDocument) -> Result<SpawnSet> {
    let mut spawns = SpawnSet::new();

    for block in doc {
        if let Some(team) = spawn_team(block) {
            let position = read_origin(block)?;
            tracing::debug!(block = block.id, %team, %position, "found spawn");
            spawns.push(team, position);
        }
    }

    tracing::debug!(ct = spawns.ct.len(), t = spawns.t.len(), "extracted spawns");

    Ok(spawns)
}

/// Parse `.vents` text and extract its spawns.
pub fn spawns_from_text(source: &str) -> Result<SpawnSet> {
    spawns_from_text_with(source, &ParseOptions::default())
}

/// Parse `.vents` text with explicit options and extract its spawns.
pub fn spawns_from_text_with(source: &str, options: &ParseOptions) -> Result<SpawnSet> {
    let doc = parse_document_with(source, options);
    extract_spawns(&doc)
}

/// Read a `.vents` file and extract its spawns.
pub fn spawns_from_path(path: &Path, options: &ParseOptions) -> Result<SpawnSet> {
    let source = fs::read_to_string(path).map_err(|e| VentsError::Io {
        path: path.to_path_buf(),
        message: format!("Failed to read file: {}", e),
    })?;

    spawns_from_text_with(&source, options)
}

/// The team a block spawns, if any. Terrorist starts are tested first.
fn spawn_team(block: &Block) -> Option<Team> {
    let team = Team::from_classname(block.classname()?)?;

    let enabled = block.get("enabled").is_some_and(PropertyValue::is_truthy);
    let primary = block.get("priority").is_some_and(|p| p.eq_int(0));

    if enabled && primary {
        Some(team)
    } else {
        None
    }
}

fn read_origin(block: &Block) -> Result<Position> {
    let malformed = |reason: String| VentsError::MalformedSpawnRecord {
        block: block.id,
        line: block.line,
        reason,
    };

    let origin = block
        .get("origin")
        .ok_or_else(|| malformed("missing `origin`".to_string()))?;

    let components = origin.as_tuple().ok_or_else(|| {
        malformed(format!(
            "`origin` is a {} (`{}`), expected three floats",
            origin.kind(),
            origin
        ))
    })?;

    Position::from_slice(components).ok_or_else(|| {
        malformed(format!(
            "`origin` has {} components, expected 3",
            components.len()
        ))
    })
}
