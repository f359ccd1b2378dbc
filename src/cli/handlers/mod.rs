//! Shared command handler flows

mod prompt;
mod render;
mod view;

pub use prompt::confirm;
pub use render::{print_details, print_rows};
pub use view::{check_loaded, load_view, run_write};
