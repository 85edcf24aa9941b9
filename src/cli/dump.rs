//! Dump command implementation.
//!
//! Prints the parsed document as JSON, for inspecting what the tokenizer saw.

use std::fs;
use std::path::PathBuf;

use clap::Args;

use crate::config::Config;
use crate::error::{Result, VentsError};
use crate::output::{display_path, plural, Printer};
use crate::parser::{parse_document_with, ParsedDocument, RepeatedMarker};

/// Print every parsed block as JSON
#[derive(Args, Debug)]
pub struct DumpArgs {
    /// Input .vents file
    pub file: PathBuf,

    /// Write single-line JSON
    #[arg(long)]
    pub compact: bool,

    /// Start a block over when its marker repeats, instead of merging
    #[arg(long)]
    pub reset_repeated: bool,
}

pub fn run(args: DumpArgs, config: &Config, printer: &Printer) -> Result<()> {
    let mut options = config.parse_options();
    if args.reset_repeated {
        options = options.with_repeated_markers(RepeatedMarker::Reset);
    }

    let source = fs::read_to_string(&args.file).map_err(|e| VentsError::Io {
        path: args.file.clone(),
        message: format!("Failed to read file: {}", e),
    })?;

    printer.status("Parsing", &display_path(&args.file));
    let doc = parse_document_with(&source, &options);
    printer.info("Found", &plural(doc.len(), "block", "blocks"));

    println!("{}", to_json(&doc, config.pretty && !args.compact)?);

    Ok(())
}

fn to_json(doc: &ParsedDocument, pretty: bool) -> Result<String> {
    let json = if pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    Ok(json?)
}
