//! Mock portfolio API client for testing
//!
//! Provides a mock implementation of the API traits for unit testing
//! without making real API calls.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::json;
use tokio::sync::Mutex;

use super::api::{AdminApi, AuthApi, PublicApi};
use super::models::{
    ContactMessage, Credentials, DashboardStats, Entity, LoginResponse, MessageStatus,
    NewContactMessage, Resource,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure expected responses via builder methods, then use in tests.
///
/// # Example
/// ```ignore
/// let mock = MockPortfolioClient::new()
///     .with_entries(Resource::Skills, json!([{ "id": 1, "name": "Rust" }]))
///     .await;
///
/// let skills = mock.list_entries(Resource::Skills).await?;
/// ```
#[derive(Default)]
pub struct MockPortfolioClient {
    /// Response to return from login
    login: Arc<Mutex<Option<LoginResponse>>>,
    /// Section payloads, shared by the public and admin reads
    entries: Arc<Mutex<HashMap<Resource, Entity>>>,
    /// Messages to return from list_messages
    messages: Arc<Mutex<Vec<ContactMessage>>>,
    /// Stats to return from dashboard_stats
    stats: Arc<Mutex<DashboardStats>>,
    /// Error to return (if any) - consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Track number of calls for verification
    call_count: Arc<Mutex<CallCounts>>,
    /// Usernames passed to login
    captured_logins: Arc<Mutex<Vec<String>>>,
}

/// Tracks API call counts for test verification
#[derive(Default, Debug, Clone)]
pub struct CallCounts {
    pub login: usize,
    pub public_section: usize,
    pub send_contact: usize,
    pub list_entries: usize,
    pub get_entry: usize,
    pub create_entry: usize,
    pub update_entry: usize,
    pub delete_entry: usize,
    pub list_messages: usize,
    pub get_message: usize,
    pub mark_message_read: usize,
    pub delete_message: usize,
    pub dashboard_stats: usize,
}

impl CallCounts {
    /// Get total number of API calls made.
    pub fn total(&self) -> usize {
        self.login
            + self.public_section
            + self.send_contact
            + self.list_entries
            + self.get_entry
            + self.create_entry
            + self.update_entry
            + self.delete_entry
            + self.list_messages
            + self.get_message
            + self.mark_message_read
            + self.delete_message
            + self.dashboard_stats
    }
}

impl MockPortfolioClient {
    /// Create a new mock client with default (empty) responses.
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the response returned from login.
    pub async fn with_login(self, response: LoginResponse) -> Self {
        *self.login.lock().await = Some(response);
        self
    }

    /// Configure the payload of a section.
    pub async fn with_entries(self, resource: Resource, payload: Entity) -> Self {
        self.entries.lock().await.insert(resource, payload);
        self
    }

    /// Configure messages to return from list_messages.
    pub async fn with_messages(self, messages: Vec<ContactMessage>) -> Self {
        *self.messages.lock().await = messages;
        self
    }

    /// Configure stats to return from dashboard_stats.
    pub async fn with_stats(self, stats: DashboardStats) -> Self {
        *self.stats.lock().await = stats;
        self
    }

    /// Configure an error to return on the next API call.
    /// The error is consumed after one use.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    /// Queue an error for the next call on an already-built mock.
    pub async fn fail_next(&self, error: ApiError) {
        *self.error.lock().await = Some(error);
    }

    /// Get the call counts for verification in tests.
    pub async fn call_counts(&self) -> CallCounts {
        self.call_count.lock().await.clone()
    }

    /// Usernames passed to login, in call order.
    pub async fn captured_logins(&self) -> Vec<String> {
        self.captured_logins.lock().await.clone()
    }

    /// Check if there's a pending error and consume it.
    async fn check_error(&self) -> Result<()> {
        let mut error = self.error.lock().await;
        if let Some(e) = error.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn section(&self, resource: Resource) -> Result<Entity> {
        self.entries
            .lock()
            .await
            .get(&resource)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }

    async fn find_message(&self, id: i64) -> Result<ContactMessage> {
        self.messages
            .lock()
            .await
            .iter()
            .find(|m| m.id == id)
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }
}

// ============================================================================
// AuthApi Implementation
// ============================================================================

#[async_trait]
impl AuthApi for MockPortfolioClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        self.captured_logins
            .lock()
            .await
            .push(credentials.identifier.clone());
        self.check_error().await?;

        self.call_count.lock().await.login += 1;

        let login = self.login.lock().await;
        login
            .clone()
            .ok_or_else(|| ApiError::from_status(401, None).into())
    }
}

// ============================================================================
// PublicApi Implementation
// ============================================================================

#[async_trait]
impl PublicApi for MockPortfolioClient {
    async fn public_section(&self, resource: Resource) -> Result<Entity> {
        self.check_error().await?;
        self.call_count.lock().await.public_section += 1;
        self.section(resource).await
    }

    async fn send_contact(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        self.check_error().await?;
        self.call_count.lock().await.send_contact += 1;

        let mut messages = self.messages.lock().await;
        let saved = ContactMessage {
            id: messages.len() as i64 + 1,
            name: message.name.clone(),
            email: message.email.clone(),
            subject: message.subject.clone(),
            message: message.message.clone(),
            status: Some(MessageStatus::Unread),
            created_at: None,
            read_at: None,
        };
        messages.push(saved.clone());
        Ok(saved)
    }
}

// ============================================================================
// AdminApi Implementation
// ============================================================================

#[async_trait]
impl AdminApi for MockPortfolioClient {
    async fn list_entries(&self, resource: Resource) -> Result<Entity> {
        self.check_error().await?;
        self.call_count.lock().await.list_entries += 1;
        self.section(resource).await
    }

    async fn get_entry(&self, resource: Resource, id: i64) -> Result<Entity> {
        self.check_error().await?;
        self.call_count.lock().await.get_entry += 1;

        let section = self.section(resource).await?;
        section
            .as_array()
            .and_then(|items| items.iter().find(|item| item["id"] == json!(id)))
            .cloned()
            .ok_or_else(|| ApiError::from_status(404, None).into())
    }

    async fn create_entry(&self, resource: Resource, body: &Entity) -> Result<Entity> {
        self.check_error().await?;
        self.call_count.lock().await.create_entry += 1;

        let mut entries = self.entries.lock().await;
        let section = entries.entry(resource).or_insert_with(|| json!([]));
        let mut created = body.clone();
        if let (Some(items), Some(obj)) = (section.as_array_mut(), created.as_object_mut()) {
            obj.insert("id".to_string(), json!(items.len() as i64 + 1));
            items.push(Entity::Object(obj.clone()));
        }
        Ok(created)
    }

    async fn update_entry(
        &self,
        resource: Resource,
        id: Option<i64>,
        body: &Entity,
    ) -> Result<Entity> {
        self.check_error().await?;
        self.call_count.lock().await.update_entry += 1;

        let mut entries = self.entries.lock().await;
        if resource.is_singleton() {
            entries.insert(resource, body.clone());
            return Ok(body.clone());
        }

        let item = entries
            .get_mut(&resource)
            .and_then(Entity::as_array_mut)
            .and_then(|items| items.iter_mut().find(|item| item["id"] == json!(id)))
            .ok_or(ApiError::from_status(404, None))?;
        *item = body.clone();
        Ok(body.clone())
    }

    async fn delete_entry(&self, resource: Resource, id: i64) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.delete_entry += 1;

        let mut entries = self.entries.lock().await;
        if let Some(items) = entries.get_mut(&resource).and_then(Entity::as_array_mut) {
            items.retain(|item| item["id"] != json!(id));
        }
        Ok(())
    }

    async fn list_messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>> {
        self.check_error().await?;
        self.call_count.lock().await.list_messages += 1;

        let messages = self.messages.lock().await;
        Ok(messages
            .iter()
            .filter(|m| status.is_none() || m.status == status)
            .cloned()
            .collect())
    }

    async fn get_message(&self, id: i64) -> Result<ContactMessage> {
        self.check_error().await?;
        self.call_count.lock().await.get_message += 1;
        self.find_message(id).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<ContactMessage> {
        self.check_error().await?;
        self.call_count.lock().await.mark_message_read += 1;

        let mut messages = self.messages.lock().await;
        let message = messages
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or(ApiError::from_status(404, None))?;
        message.status = Some(MessageStatus::Read);
        Ok(message.clone())
    }

    async fn delete_message(&self, id: i64) -> Result<()> {
        self.check_error().await?;
        self.call_count.lock().await.delete_message += 1;
        self.messages.lock().await.retain(|m| m.id != id);
        Ok(())
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.check_error().await?;
        self.call_count.lock().await.dashboard_stats += 1;
        Ok(self.stats.lock().await.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn message(id: i64, status: MessageStatus) -> ContactMessage {
        ContactMessage {
            id,
            name: "Jane".to_string(),
            email: "jane@example.com".to_string(),
            subject: "Hello".to_string(),
            message: "Let's work together".to_string(),
            status: Some(status),
            created_at: None,
            read_at: None,
        }
    }

    #[tokio::test]
    async fn test_mock_client_default_empty() {
        let mock = MockPortfolioClient::new();
        assert!(mock.list_messages(None).await.unwrap().is_empty());

        let err = mock.list_entries(Resource::Skills).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[tokio::test]
    async fn test_mock_client_with_error_is_consumed() {
        let mock = MockPortfolioClient::new()
            .with_error(ApiError::from_status(500, None))
            .await;

        assert!(mock.dashboard_stats().await.is_err());
        assert!(mock.dashboard_stats().await.is_ok());
        assert_eq!(mock.call_counts().await.dashboard_stats, 1);
    }

    #[tokio::test]
    async fn test_mock_client_crud() {
        let mock = MockPortfolioClient::new()
            .with_entries(Resource::Skills, json!([]))
            .await;

        let created = mock
            .create_entry(Resource::Skills, &json!({ "name": "Rust" }))
            .await
            .unwrap();
        assert_eq!(created["id"], json!(1));

        mock.update_entry(Resource::Skills, Some(1), &json!({ "id": 1, "name": "Rust 2024" }))
            .await
            .unwrap();
        let fetched = mock.get_entry(Resource::Skills, 1).await.unwrap();
        assert_eq!(fetched["name"], json!("Rust 2024"));

        mock.delete_entry(Resource::Skills, 1).await.unwrap();
        assert!(mock.get_entry(Resource::Skills, 1).await.is_err());

        let counts = mock.call_counts().await;
        assert_eq!(counts.create_entry, 1);
        assert_eq!(counts.delete_entry, 1);
    }

    #[tokio::test]
    async fn test_mock_client_message_filter_and_read() {
        let mock = MockPortfolioClient::new()
            .with_messages(vec![
                message(1, MessageStatus::Unread),
                message(2, MessageStatus::Read),
            ])
            .await;

        let unread = mock.list_messages(Some(MessageStatus::Unread)).await.unwrap();
        assert_eq!(unread.len(), 1);

        let read = mock.mark_message_read(1).await.unwrap();
        assert_eq!(read.status, Some(MessageStatus::Read));
        assert!(mock.list_messages(Some(MessageStatus::Unread)).await.unwrap().is_empty());

        assert_eq!(mock.call_counts().await.total(), 3);
    }
}
