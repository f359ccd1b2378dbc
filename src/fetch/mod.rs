//! Resource fetch hooks
//!
//! Two wrappers around an async API call that keep `{data, loading, error}`
//! state for a view:
//!
//! - [`ApiCall`] runs a call on demand and re-raises failures.
//! - [`Fetcher`] runs a reusable call on mount, never fails, and applies
//!   fallback data plus a capped notification budget.
//!
//! Both skip the call entirely when it needs a session and none is valid.

pub mod call;
pub mod mount;
pub mod notify;
pub mod state;

pub use call::{ApiCall, CallOptions};
pub use mount::{FetchOptions, Fetcher};
pub use notify::{Notifier, RetryBudget, TerminalNotifier};
pub use state::FetchState;

use crate::session::SessionGuard;

/// Answers whether authenticated calls may be made right now
pub trait SessionGate: Send + Sync {
    fn has_valid_session(&self) -> bool;
}

impl SessionGate for SessionGuard {
    fn has_valid_session(&self) -> bool {
        SessionGuard::has_valid_session(self)
    }
}

/// Gate with a fixed answer
#[cfg(test)]
#[derive(Debug, Clone, Copy)]
pub struct StaticGate(pub bool);

#[cfg(test)]
impl SessionGate for StaticGate {
    fn has_valid_session(&self) -> bool {
        self.0
    }
}
