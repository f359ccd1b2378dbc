//! Admin console API trait

use async_trait::async_trait;

use crate::client::models::{ContactMessage, DashboardStats, Entity, MessageStatus, Resource};
use crate::error::Result;

/// Protected content management, messages, and statistics
#[async_trait]
pub trait AdminApi: Send + Sync {
    /// List all entries of a section. For About this is the single record.
    async fn list_entries(&self, resource: Resource) -> Result<Entity>;

    async fn get_entry(&self, resource: Resource, id: i64) -> Result<Entity>;

    async fn create_entry(&self, resource: Resource, body: &Entity) -> Result<Entity>;

    /// Update an entry. `id` is ignored for singleton sections.
    async fn update_entry(&self, resource: Resource, id: Option<i64>, body: &Entity)
        -> Result<Entity>;

    async fn delete_entry(&self, resource: Resource, id: i64) -> Result<()>;

    /// List contact messages, optionally filtered by status
    async fn list_messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>>;

    async fn get_message(&self, id: i64) -> Result<ContactMessage>;

    async fn mark_message_read(&self, id: i64) -> Result<ContactMessage>;

    async fn delete_message(&self, id: i64) -> Result<()>;

    async fn dashboard_stats(&self) -> Result<DashboardStats>;
}
