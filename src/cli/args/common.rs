//! Common CLI types shared across commands

use std::str::FromStr;

use crate::client::models::Entity;
use crate::error::{Error, Result};

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting (default)
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        <Self as clap::ValueEnum>::from_str(s, true)
            .map_err(|_| format!("Unknown output format '{}' (pretty, table, json)", s))
    }
}

/// Parse a `--data` argument: inline JSON, or `@path` to read JSON from a file
pub fn parse_payload(arg: &str) -> Result<Entity> {
    let contents = match arg.strip_prefix('@') {
        Some(path) => std::fs::read_to_string(path)?,
        None => arg.to_string(),
    };

    serde_json::from_str(&contents)
        .map_err(|e| Error::Other(format!("--data is not valid JSON: {}", e)))
}
