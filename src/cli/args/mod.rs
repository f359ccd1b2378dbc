//! Shared CLI argument types

mod common;
mod global;

pub use common::{OutputFormat, parse_payload};
pub use global::GlobalOptions;
