//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - Login
//! - [`PublicApi`] - Public portfolio reads and the contact form
//! - [`AdminApi`] - Protected content management

mod admin;
mod auth;
mod public;

pub use admin::AdminApi;
pub use auth::AuthApi;
pub use public::PublicApi;
