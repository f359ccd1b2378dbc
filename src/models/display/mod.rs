//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod common;
mod entity;
mod message;
mod session;
mod stats;

pub use entity::{entity_details, entity_rows};
pub use message::{MessageDisplay, message_details};
pub use session::SessionDisplay;
pub use stats::stat_rows;
