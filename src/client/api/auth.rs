//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::{Credentials, LoginResponse};
use crate::error::Result;

/// Authentication operations for the portfolio API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token and the user's profile
    async fn login(&self, credentials: &Credentials) -> Result<LoginResponse>;
}
