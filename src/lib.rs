//! vents - Spawn point extractor for map entity dumps
//!
//! A library for turning `.vents` files (numbered blocks of `key value`
//! entity properties) into the spawn positions of both teams.

pub mod cli;
pub mod config;
pub mod error;
pub mod extract;
pub mod logging;
pub mod output;
pub mod parser;
pub mod types;
pub mod update;

pub use config::Config;
pub use error::{Result, VentsError};
pub use extract::{extract_spawns, spawns_from_path, spawns_from_text, spawns_from_text_with};
pub use parser::{
    coerce_value, parse_document, parse_document_with, Block, ParseOptions, ParsedDocument,
    PropertyValue, RepeatedMarker,
};
pub use types::{Position, SpawnSet, Team};
pub use update::{check_for_update, needs_regeneration, CheckOutcome, SteamCmd, UpdateSource};
