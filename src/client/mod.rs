//! Portfolio API client

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod portfolio;

pub use api::{AdminApi, AuthApi, PublicApi};
#[cfg(test)]
#[allow(unused_imports)]
pub use mock::MockPortfolioClient;
pub use portfolio::PortfolioClient;
