//! Display models for CLI output
//!
//! Shared display model abstractions for converting API response types into
//! CLI-friendly display formats.

pub mod display;

pub use display::{
    MessageDisplay, SessionDisplay, entity_details, entity_rows, message_details, stat_rows,
};
