//! Load-on-mount wrapper

use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortRegistration, Abortable, BoxFuture};
use log::{debug, warn};

use super::SessionGate;
use super::notify::{Notifier, RetryBudget};
use super::state::FetchState;
use crate::error::Result;

/// Message used when a failure carries no attached message
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load data";

/// Default number of failure notifications before going quiet
pub const DEFAULT_MAX_RETRIES: u32 = 2;

/// Produces a fresh call future on every run
pub type CallFactory<'a, T> = Box<dyn Fn() -> BoxFuture<'a, Result<T>> + Send + Sync + 'a>;

/// Options for [`Fetcher`]
#[derive(Debug, Clone)]
pub struct FetchOptions<T> {
    /// Data shown before the first load completes
    pub initial_data: Option<T>,
    /// Data shown after any failure
    pub fallback_data: Option<T>,
    /// Failure notifications allowed before the next success or refetch
    pub max_retries: u32,
    pub show_notification_on_error: bool,
    pub requires_auth: bool,
}

impl<T> Default for FetchOptions<T> {
    fn default() -> Self {
        Self {
            initial_data: None,
            fallback_data: None,
            max_retries: DEFAULT_MAX_RETRIES,
            show_notification_on_error: true,
            requires_auth: true,
        }
    }
}

impl<T> FetchOptions<T> {
    pub fn fallback(mut self, data: T) -> Self {
        self.fallback_data = Some(data);
        self
    }

    pub fn max_retries(mut self, max_retries: u32) -> Self {
        self.max_retries = max_retries;
        self
    }
}

struct Inner<T> {
    state: FetchState<T>,
    budget: RetryBudget,
    dependencies: Option<String>,
    auth_failure: Option<u16>,
}

/// Runs a reusable call when a view mounts and whenever its dependency key
/// changes. Never returns an error; failures show up in [`state`](Self::state).
pub struct Fetcher<'a, T> {
    factory: CallFactory<'a, T>,
    gate: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    fallback_data: Option<T>,
    show_notification_on_error: bool,
    requires_auth: bool,
    inner: Mutex<Inner<T>>,
}

impl<'a, T: Clone + Send> Fetcher<'a, T> {
    pub fn new<F>(
        factory: F,
        gate: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
        options: FetchOptions<T>,
    ) -> Self
    where
        F: Fn() -> BoxFuture<'a, Result<T>> + Send + Sync + 'a,
    {
        Self {
            factory: Box::new(factory),
            gate,
            notifier,
            fallback_data: options.fallback_data,
            show_notification_on_error: options.show_notification_on_error,
            requires_auth: options.requires_auth,
            inner: Mutex::new(Inner {
                state: FetchState::pending(options.initial_data),
                budget: RetryBudget::new(options.max_retries),
                dependencies: None,
                auth_failure: None,
            }),
        }
    }

    pub fn state(&self) -> FetchState<T> {
        self.lock().state.clone()
    }

    pub fn budget(&self) -> RetryBudget {
        self.lock().budget
    }

    /// Status (401 or 403) of the last run if the server refused it.
    ///
    /// Such failures leave `state.error` empty, since they are handled
    /// globally rather than per view.
    pub fn auth_failure(&self) -> Option<u16> {
        self.lock().auth_failure
    }

    /// First load
    pub async fn mount(&self) {
        self.run(None).await;
    }

    /// First load, abortable through the matching `AbortHandle`
    #[allow(dead_code)]
    pub async fn mount_abortable(&self, registration: AbortRegistration) {
        self.run(Some(registration)).await;
    }

    /// Record the dependency key and reload if it changed
    pub async fn set_dependencies(&self, key: impl Into<String>) {
        let key = key.into();
        let changed = {
            let mut inner = self.lock();
            if inner.dependencies.as_deref() == Some(key.as_str()) {
                false
            } else {
                inner.dependencies = Some(key);
                true
            }
        };

        if changed {
            self.run(None).await;
        }
    }

    /// Reload with a fresh notification budget
    #[allow(dead_code)]
    pub async fn refetch(&self) {
        {
            let mut inner = self.lock();
            inner.budget.reset();
            inner.state.loading = true;
        }
        self.run(None).await;
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner<T>> {
        self.inner.lock().unwrap_or_else(PoisonError::into_inner)
    }

    async fn run(&self, registration: Option<AbortRegistration>) {
        if self.requires_auth && !self.gate.has_valid_session() {
            warn!("No valid session, skipping fetch");
            self.lock().state.loading = false;
            return;
        }

        let previous_error = self.lock().state.error.take();

        let call = (self.factory)();
        let outcome = match registration {
            Some(registration) => Abortable::new(call, registration).await.ok(),
            None => Some(call.await),
        };

        let result = match outcome {
            Some(Err(err)) if err.is_cancelled() => None,
            other => other,
        };

        let Some(result) = result else {
            debug!("Fetch cancelled");
            self.lock().state.error = previous_error;
            return;
        };

        let notification = {
            let mut inner = self.lock();
            inner.state.loading = false;

            match result {
                Ok(data) => {
                    inner.state.data = Some(data);
                    inner.state.error = None;
                    inner.auth_failure = None;
                    inner.budget.reset();
                    None
                }
                Err(err) => {
                    warn!("Fetch error: {}", err);

                    let mut notification = None;
                    if err.is_auth_failure() {
                        inner.auth_failure = err.status();
                    } else {
                        inner.auth_failure = None;
                        let message = err.user_message().unwrap_or(FETCH_ERROR_MESSAGE).to_string();
                        inner.state.error = Some(message.clone());

                        if self.show_notification_on_error && inner.budget.allows_notification() {
                            notification = Some((message, inner.budget));
                            inner.budget.spend();
                        }
                    }

                    if let Some(fallback) = &self.fallback_data {
                        inner.state.data = Some(fallback.clone());
                    }
                    notification
                }
            }
        };

        if let Some((message, budget)) = notification {
            self.notifier.fetch_error(&message, budget);
        }
    }
}
