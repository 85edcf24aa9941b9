//! Parser modules for `.vents` entity dumps.
//!
//! A `.vents` file lists map entities as numbered blocks of `key value`
//! lines. Parsing never fails: anything that does not look like a marker or
//! a property is skipped.
//!
//! # Document Structure
//!
//! ```text
//! ====12====
//! classname info_player_terrorist
//! enabled True
//! priority 0
//! origin -1.0 512.0 64.03125
//! ```
//!
//! # Usage
//!
//! ```ignore
//! use vents::parser::parse_document;
//!
//! let source = std::fs::read_to_string("de_dust2.vents")?;
//! let doc = parse_document(&source);
//!
//! for block in &doc {
//!     println!("{}: {:?}", block.id, block.classname());
//! }
//! ```

mod document;
pub mod keyvalues;
pub mod types;
pub mod value;

pub use document::{parse_document, parse_document_with, ParseOptions, RepeatedMarker};
pub use keyvalues::{parse_keyvalues, KvValue};
pub use types::{Block, ParsedDocument};
pub use value::{coerce_value, PropertyValue};
