//! Public portfolio API trait

use async_trait::async_trait;

use crate::client::models::{ContactMessage, Entity, NewContactMessage, Resource};
use crate::error::Result;

/// Unauthenticated reads and the contact form
#[async_trait]
pub trait PublicApi: Send + Sync {
    /// Fetch a public portfolio section (`GET /v1/{resource}`)
    async fn public_section(&self, resource: Resource) -> Result<Entity>;

    /// Submit the contact form
    async fn send_contact(&self, message: &NewContactMessage) -> Result<ContactMessage>;
}
