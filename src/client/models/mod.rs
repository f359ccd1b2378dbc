//! Portfolio API data models
//!
//! Content sections are opaque JSON; only authentication, contact messages,
//! and dashboard statistics are typed.

mod auth;
mod dashboard;
mod message;
mod resource;

pub use auth::{Credentials, LoginResponse, UserRecord};
pub use dashboard::DashboardStats;
pub use message::{ContactMessage, MessageStatus, NewContactMessage};
pub use resource::{Entity, Resource};
