//! Portfolio API client implementation

use std::num::NonZeroU32;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};
use log::{debug, error, warn};
use reqwest::{Client as HttpClient, Method, StatusCode};
use serde::de::DeserializeOwned;

use super::api::{AdminApi, AuthApi, PublicApi};
use super::models::{
    ContactMessage, Credentials, DashboardStats, Entity, LoginResponse, MessageStatus,
    NewContactMessage, Resource,
};
use crate::error::{ApiError, ErrorBody, Result};
use crate::session::SessionGuard;
use crate::session::route::PUBLIC_PATH;

/// Request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Outbound throttle: 10 requests per second
const RATE_LIMIT_PER_SECOND: u32 = 10;

/// Portfolio API client
///
/// Every request carries `Accept-Language`, plus `Authorization: Bearer` when
/// the session holds a token. A 401 clears the session through the guard.
pub struct PortfolioClient {
    http: HttpClient,
    base_url: String,
    locale: String,
    view: String,
    rate_limiter: Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>,
    session: Arc<SessionGuard>,
}

impl PortfolioClient {
    /// Create a client for `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(
        base_url: impl Into<String>,
        locale: impl Into<String>,
        session: Arc<SessionGuard>,
    ) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;

        let per_second = NonZeroU32::new(RATE_LIMIT_PER_SECOND).unwrap_or(NonZeroU32::MIN);
        let rate_limiter = Arc::new(RateLimiter::direct(Quota::per_second(per_second)));

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            locale: locale.into(),
            view: PUBLIC_PATH.to_string(),
            rate_limiter,
            session,
        })
    }

    /// Set the view path requests are made from, used when reacting to a 401
    pub fn for_view(mut self, view: impl Into<String>) -> Self {
        self.view = view.into();
        self
    }

    /// Send a request and return the successful response, or the classified error
    async fn send(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Entity>,
    ) -> Result<reqwest::Response> {
        self.rate_limiter.until_ready().await;

        let url = format!("{}{}", self.base_url, path);
        debug!("[API Request] {} {} [Lang: {}]", method, path, self.locale);

        let mut request = self
            .http
            .request(method.clone(), &url)
            .header("Accept-Language", &self.locale);

        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                error!("[API] Network error - backend unresponsive: {}", e);
                return Err(ApiError::from(e).into());
            }
        };

        let status = response.status();
        if status.is_success() {
            debug!("[API Response] {} {}", status.as_u16(), path);
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let error_body = serde_json::from_str::<ErrorBody>(&text).ok();
        error!("[API Error] {} at {}: {}", status.as_u16(), path, text);

        match status {
            StatusCode::UNAUTHORIZED => {
                if let Some(target) = self.session.handle_unauthorized(&self.view) {
                    warn!("[API] Session rejected; continue at {}", target);
                }
            }
            StatusCode::FORBIDDEN => warn!("[API] Access forbidden."),
            StatusCode::NOT_FOUND => warn!("[API] Resource not found: {}", path),
            _ => {}
        }

        Err(ApiError::from_status(status.as_u16(), error_body).into())
    }

    /// Make a request and decode the JSON response body
    async fn request<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&Entity>,
    ) -> Result<T> {
        let response = self.send(method, path, query, body).await?;
        response.json::<T>().await.map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response: {}", e)).into()
        })
    }

    /// Make a request whose response body is ignored
    async fn request_empty(&self, method: Method, path: &str) -> Result<()> {
        self.send(method, path, &[], None).await?;
        Ok(())
    }

    fn admin_path(resource: Resource, id: Option<i64>) -> String {
        match id {
            Some(id) if !resource.is_singleton() => {
                format!("/v1/admin/{}/{}", resource.segment(), id)
            }
            _ => format!("/v1/admin/{}", resource.segment()),
        }
    }
}

#[async_trait]
impl AuthApi for PortfolioClient {
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse> {
        let body = serde_json::to_value(credentials)?;
        self.request(Method::POST, "/auth/login", &[], Some(&body))
            .await
    }
}

#[async_trait]
impl PublicApi for PortfolioClient {
    async fn public_section(&self, resource: Resource) -> Result<Entity> {
        let path = format!("/v1/{}", resource.segment());
        self.request(Method::GET, &path, &[], None).await
    }

    async fn send_contact(&self, message: &NewContactMessage) -> Result<ContactMessage> {
        let body = serde_json::to_value(message)?;
        self.request(Method::POST, "/v1/contact", &[], Some(&body))
            .await
    }
}

#[async_trait]
impl AdminApi for PortfolioClient {
    async fn list_entries(&self, resource: Resource) -> Result<Entity> {
        let path = Self::admin_path(resource, None);
        match self.request(Method::GET, &path, &[], None).await {
            // The profile section does not exist until it is first saved
            Err(err) if resource.is_singleton() && err.status() == Some(404) => {
                debug!("No {} section yet", resource);
                Ok(Entity::Null)
            }
            other => other,
        }
    }

    async fn get_entry(&self, resource: Resource, id: i64) -> Result<Entity> {
        let path = Self::admin_path(resource, Some(id));
        self.request(Method::GET, &path, &[], None).await
    }

    async fn create_entry(&self, resource: Resource, body: &Entity) -> Result<Entity> {
        let path = Self::admin_path(resource, None);
        self.request(Method::POST, &path, &[], Some(body)).await
    }

    async fn update_entry(
        &self,
        resource: Resource,
        id: Option<i64>,
        body: &Entity,
    ) -> Result<Entity> {
        let path = Self::admin_path(resource, id);
        self.request(Method::PUT, &path, &[], Some(body)).await
    }

    async fn delete_entry(&self, resource: Resource, id: i64) -> Result<()> {
        let path = Self::admin_path(resource, Some(id));
        self.request_empty(Method::DELETE, &path).await
    }

    async fn list_messages(&self, status: Option<MessageStatus>) -> Result<Vec<ContactMessage>> {
        let query: Vec<(&str, &str)> = status
            .map(|s| vec![("status", s.as_str())])
            .unwrap_or_default();
        self.request(Method::GET, "/v1/admin/messages", &query, None)
            .await
    }

    async fn get_message(&self, id: i64) -> Result<ContactMessage> {
        let path = format!("/v1/admin/messages/{}", id);
        self.request(Method::GET, &path, &[], None).await
    }

    async fn mark_message_read(&self, id: i64) -> Result<ContactMessage> {
        let path = format!("/v1/admin/messages/{}/read", id);
        self.request(Method::PUT, &path, &[], None).await
    }

    async fn delete_message(&self, id: i64) -> Result<()> {
        let path = format!("/v1/admin/messages/{}", id);
        self.request_empty(Method::DELETE, &path).await
    }

    async fn dashboard_stats(&self) -> Result<DashboardStats> {
        self.request(Method::GET, "/v1/admin/dashboard/stats", &[], None)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{MemorySessionStore, SessionState, SessionStore};
    use crate::session::token::make_token;
    use mockito::Matcher;
    use serde_json::json;

    fn session_with_token() -> (Arc<MemorySessionStore>, Arc<SessionGuard>) {
        let store = Arc::new(MemorySessionStore::new());
        store
            .set_token(&make_token(&json!({ "exp": chrono::Utc::now().timestamp() + 3600 })))
            .unwrap();
        store
            .set_user_raw(r#"{"id":1,"username":"admin","role":"ADMIN"}"#)
            .unwrap();
        let guard = Arc::new(SessionGuard::new(store.clone()));
        guard.initialize();
        (store, guard)
    }

    #[test]
    fn test_client_creation() {
        let guard = Arc::new(SessionGuard::new(Arc::new(MemorySessionStore::new())));
        let client = PortfolioClient::new("http://localhost:8080/api/", "en", guard).unwrap();
        assert_eq!(client.base_url, "http://localhost:8080/api");
        assert_eq!(client.view, PUBLIC_PATH);
        assert_eq!(client.for_view("/admin/skills").view, "/admin/skills");
    }

    #[test]
    fn test_admin_path() {
        assert_eq!(
            PortfolioClient::admin_path(Resource::Skills, Some(4)),
            "/v1/admin/skills/4"
        );
        assert_eq!(
            PortfolioClient::admin_path(Resource::Skills, None),
            "/v1/admin/skills"
        );
        assert_eq!(
            PortfolioClient::admin_path(Resource::About, Some(1)),
            "/v1/admin/about"
        );
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_public_read_sends_locale_without_token() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/api/v1/skills")
            .match_header("accept-language", "en")
            .match_header("authorization", Matcher::Missing)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"id":1,"name":"Rust"}]"#)
            .create_async()
            .await;

        let guard = Arc::new(SessionGuard::new(Arc::new(MemorySessionStore::new())));
        let client = PortfolioClient::new(format!("{}/api", server.url()), "en", guard).unwrap();

        let skills = client.public_section(Resource::Skills).await.unwrap();
        assert_eq!(skills[0]["name"], json!("Rust"));
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_admin_request_carries_bearer_token() {
        let mut server = mockito::Server::new_async().await;
        let (store, guard) = session_with_token();
        let token = store.token().unwrap();

        let mock = server
            .mock("GET", "/api/v1/admin/messages")
            .match_header("authorization", format!("Bearer {}", token).as_str())
            .match_query(Matcher::UrlEncoded("status".into(), "UNREAD".into()))
            .with_status(200)
            .with_body(r#"[{"id":9,"name":"Jane","email":"jane@example.com","status":"UNREAD"}]"#)
            .create_async()
            .await;

        let client = PortfolioClient::new(format!("{}/api", server.url()), "fr", guard).unwrap();
        let messages = client
            .list_messages(Some(MessageStatus::Unread))
            .await
            .unwrap();

        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0].id, 9);
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_unauthorized_clears_session() {
        let mut server = mockito::Server::new_async().await;
        let (store, guard) = session_with_token();

        server
            .mock("GET", "/api/v1/admin/dashboard/stats")
            .with_status(401)
            .create_async()
            .await;

        let client = PortfolioClient::new(format!("{}/api", server.url()), "fr", guard.clone())
            .unwrap()
            .for_view("/admin");

        let err = client.dashboard_stats().await.unwrap_err();
        assert!(err.is_auth_failure());
        assert_eq!(err.user_message(), Some("Session expired. Please log in again."));
        assert!(store.token().is_none());
        assert_eq!(guard.state(), SessionState::Anonymous);
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_server_message_is_attached() {
        let mut server = mockito::Server::new_async().await;
        let (_store, guard) = session_with_token();

        server
            .mock("POST", "/api/v1/admin/skills")
            .match_body(Matcher::Json(json!({ "name": "" })))
            .with_status(400)
            .with_body(
                r#"{"status":400,"message":"Validation failed","validationErrors":[{"field":"name","message":"Name is required"}]}"#,
            )
            .create_async()
            .await;

        let client = PortfolioClient::new(format!("{}/api", server.url()), "fr", guard).unwrap();
        let err = client
            .create_entry(Resource::Skills, &json!({ "name": "" }))
            .await
            .unwrap_err();

        assert_eq!(err.user_message(), Some("Validation failed"));
        match err {
            crate::error::Error::Api(ApiError::Validation { field_errors, .. }) => {
                assert_eq!(field_errors[0].message, "Name is required");
            }
            other => panic!("Expected validation error, got {other:?}"),
        }
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_login_posts_credentials() {
        let mut server = mockito::Server::new_async().await;
        let token = make_token(&json!({ "sub": "admin" }));

        let mock = server
            .mock("POST", "/api/auth/login")
            .match_body(Matcher::Json(json!({ "username": "admin", "password": "admin123" })))
            .with_status(200)
            .with_body(
                json!({ "token": token, "id": 1, "username": "admin", "role": "ADMIN" })
                    .to_string(),
            )
            .create_async()
            .await;

        let guard = Arc::new(SessionGuard::new(Arc::new(MemorySessionStore::new())));
        guard.initialize();
        let client =
            PortfolioClient::new(format!("{}/api", server.url()), "fr", guard.clone()).unwrap();

        guard
            .login(&client, &Credentials::new("admin", "admin123"))
            .await
            .unwrap();

        assert!(guard.has_valid_session());
        assert!(guard.is_current_admin());
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_missing_about_reads_as_null() {
        let mut server = mockito::Server::new_async().await;
        let (_store, guard) = session_with_token();

        server
            .mock("GET", "/api/v1/admin/about")
            .with_status(404)
            .create_async()
            .await;
        server
            .mock("GET", "/api/v1/admin/skills")
            .with_status(404)
            .create_async()
            .await;

        let client = PortfolioClient::new(format!("{}/api", server.url()), "fr", guard).unwrap();
        assert_eq!(client.list_entries(Resource::About).await.unwrap(), Entity::Null);

        let err = client.list_entries(Resource::Skills).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_delete_accepts_no_content() {
        let mut server = mockito::Server::new_async().await;
        let (_store, guard) = session_with_token();

        let mock = server
            .mock("DELETE", "/api/v1/admin/messages/3")
            .with_status(204)
            .create_async()
            .await;

        let client = PortfolioClient::new(format!("{}/api", server.url()), "fr", guard).unwrap();
        client.delete_message(3).await.unwrap();
        mock.assert_async().await;
    }

    #[cfg_attr(not(feature = "http-tests"), ignore)]
    #[tokio::test]
    async fn test_network_error_message() {
        let guard = Arc::new(SessionGuard::new(Arc::new(MemorySessionStore::new())));
        // Port 9 (discard) on localhost is not expected to accept HTTP
        let client = PortfolioClient::new("http://127.0.0.1:9/api", "fr", guard).unwrap();

        let err = client.public_section(Resource::About).await.unwrap_err();
        assert!(
            err.user_message()
                .unwrap()
                .contains("Unable to connect to server")
        );
    }
}
