//! On-demand call wrapper

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use futures::future::{AbortRegistration, Abortable, Aborted};
use log::{debug, warn};

use super::SessionGate;
use super::notify::Notifier;
use super::state::FetchState;
use crate::error::{Error, Result, describe_error};

/// Message used when a failure carries nothing better
pub const DEFAULT_ERROR_MESSAGE: &str = "An error occurred";

pub type SuccessHook<T> = Box<dyn Fn(&T) + Send + Sync>;
pub type ErrorHook = Box<dyn Fn(&Error) + Send + Sync>;

/// Options for [`ApiCall`]
pub struct CallOptions<T> {
    pub on_success: Option<SuccessHook<T>>,
    pub on_error: Option<ErrorHook>,
    pub show_notification_on_error: bool,
    pub requires_auth: bool,
}

impl<T> Default for CallOptions<T> {
    fn default() -> Self {
        Self {
            on_success: None,
            on_error: None,
            show_notification_on_error: true,
            requires_auth: true,
        }
    }
}

impl<T> CallOptions<T> {
    /// Options for calls that work without a session
    pub fn public() -> Self {
        Self {
            requires_auth: false,
            ..Self::default()
        }
    }

    pub fn on_success(mut self, hook: impl Fn(&T) + Send + Sync + 'static) -> Self {
        self.on_success = Some(Box::new(hook));
        self
    }

    #[allow(dead_code)]
    pub fn on_error(mut self, hook: impl Fn(&Error) + Send + Sync + 'static) -> Self {
        self.on_error = Some(Box::new(hook));
        self
    }

    pub fn silent(mut self) -> Self {
        self.show_notification_on_error = false;
        self
    }
}

/// Wraps one API operation and tracks its `{data, loading, error}` state.
///
/// Failures are recorded, optionally notified (never for 401/403, which the
/// session layer already handled), and then returned to the caller.
pub struct ApiCall<T> {
    gate: Arc<dyn SessionGate>,
    notifier: Arc<dyn Notifier>,
    options: CallOptions<T>,
    state: Mutex<FetchState<T>>,
}

impl<T: Clone + Send> ApiCall<T> {
    #[allow(dead_code)]
    pub fn new(gate: Arc<dyn SessionGate>, notifier: Arc<dyn Notifier>) -> Self {
        Self::with_options(gate, notifier, CallOptions::default())
    }

    pub fn with_options(
        gate: Arc<dyn SessionGate>,
        notifier: Arc<dyn Notifier>,
        options: CallOptions<T>,
    ) -> Self {
        Self {
            gate,
            notifier,
            options,
            state: Mutex::new(FetchState::idle()),
        }
    }

    /// Snapshot of the current state
    #[allow(dead_code)]
    pub fn state(&self) -> FetchState<T> {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Run `call` and record its outcome.
    ///
    /// Returns `Ok(None)` without invoking `call` when a session is required
    /// and none is valid.
    pub async fn execute<F, Fut>(&self, call: F) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run(call, None).await
    }

    /// Like [`execute`](Self::execute), but the call can be aborted through
    /// the matching `AbortHandle`. An aborted call leaves no trace.
    pub async fn execute_abortable<F, Fut>(
        &self,
        call: F,
        registration: AbortRegistration,
    ) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        self.run(call, Some(registration)).await
    }

    /// Drop data and error, mark idle
    #[allow(dead_code)]
    pub fn reset(&self) {
        *self.state.lock().unwrap_or_else(PoisonError::into_inner) = FetchState::idle();
    }

    async fn run<F, Fut>(&self, call: F, registration: Option<AbortRegistration>) -> Result<Option<T>>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
    {
        if self.options.requires_auth && !self.gate.has_valid_session() {
            warn!("Skipping API call: no valid session");
            return Ok(None);
        }

        let (previous_loading, previous_error) = {
            let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
            let previous = (state.loading, state.error.take());
            state.loading = true;
            previous
        };

        let outcome: std::result::Result<Result<T>, Aborted> = match registration {
            Some(registration) => Abortable::new(call(), registration).await,
            None => Ok(call().await),
        };

        let result = match outcome {
            Ok(Err(err)) if err.is_cancelled() => Err(Aborted),
            Ok(result) => Ok(result),
            Err(Aborted) => Err(Aborted),
        };

        match result {
            Err(Aborted) => {
                debug!("API call cancelled");
                let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                state.loading = previous_loading;
                state.error = previous_error;
                Ok(None)
            }
            Ok(Ok(data)) => {
                {
                    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                    state.data = Some(data.clone());
                    state.loading = false;
                }
                if let Some(hook) = &self.options.on_success {
                    hook(&data);
                }
                Ok(Some(data))
            }
            Ok(Err(err)) => {
                let message = describe_error(&err, DEFAULT_ERROR_MESSAGE);
                debug!("API call failed: {}", err);
                {
                    let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
                    state.error = Some(message.clone());
                    state.loading = false;
                }
                if let Some(hook) = &self.options.on_error {
                    hook(&err);
                }
                if self.options.show_notification_on_error && !err.is_auth_failure() {
                    self.notifier.error(&message);
                }
                Err(err)
            }
        }
    }
}
