//! Protected view flows
//!
//! Every admin command follows the same steps:
//! 1. Guard the route for its view
//! 2. Load through a [`Fetcher`] (reads) or run an [`ApiCall`] (writes)
//! 3. Re-check the route, since a 401 during the load ends the session and a
//!    403 means the server refused the view
//! 4. Render, then report any load failure through the exit status

use std::future::Future;

use futures::future::AbortHandle;
use log::debug;

use crate::cli::CommandContext;
use crate::error::{ApiError, Error, Result, SessionError};
use crate::fetch::{ApiCall, CallOptions, FetchState, Fetcher, Notifier, RetryBudget};

/// Mount `fetcher` for `view` behind a spinner and return its settled state.
///
/// Fails only when the session was lost or the server refused the view; load
/// errors stay in the returned state so the caller can still render fallback
/// data.
pub async fn load_view<T: Clone + Send>(
    ctx: &CommandContext,
    view: &str,
    fetcher: &Fetcher<'_, T>,
    dependencies: Option<&str>,
) -> Result<FetchState<T>> {
    let spinner = ctx.spinner(format!("Loading {}...", view));
    match dependencies {
        Some(key) => fetcher.set_dependencies(key).await,
        None => fetcher.mount().await,
    }
    spinner.finish_and_clear();

    ctx.require_admin(view)?;
    refused(view, fetcher.auth_failure())?;

    let state = fetcher.state();
    debug!(
        "View {} settled (data: {}, error: {:?})",
        view,
        state.data.is_some(),
        state.error
    );
    Ok(state)
}

/// Map a refused load onto the session error it stands for
fn refused(view: &str, status: Option<u16>) -> Result<()> {
    match status {
        None => Ok(()),
        Some(403) => Err(SessionError::AdminRequired.into()),
        Some(_) => Err(SessionError::LoginRequired {
            from: view.to_string(),
        }
        .into()),
    }
}

/// Turn a rendered state into the command outcome.
///
/// A failure the notifier already showed (budget spent) only sets the exit
/// status; an unannounced one is returned for `main` to print.
pub fn check_loaded<T>(state: &FetchState<T>, budget: RetryBudget) -> Result<()> {
    match &state.error {
        Some(message) if budget.attempts > 0 => Err(Error::Reported(message.clone())),
        Some(message) => Err(Error::Other(message.clone())),
        None => Ok(()),
    }
}

/// Run one write for `view` through an [`ApiCall`] and return its result.
///
/// Success is announced through the context's notifier with `done`.
pub async fn run_write<T, F, Fut>(
    ctx: &CommandContext,
    view: &str,
    done: String,
    call: F,
) -> Result<T>
where
    T: Clone + Send,
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<T>>,
{
    let notifier = ctx.notifier();
    let options = CallOptions::default()
        .silent()
        .on_success(move |_: &T| notifier.success(&done));
    let api_call = ApiCall::with_options(ctx.gate(), ctx.notifier(), options);

    // Ctrl-C abandons the request instead of killing the process mid-write
    let (abort, registration) = AbortHandle::new_pair();
    let interrupt = {
        let abort = abort.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                abort.abort();
            }
        })
    };

    let spinner = ctx.spinner("Saving...");
    let result = api_call.execute_abortable(call, registration).await;
    spinner.finish_and_clear();
    interrupt.abort();

    write_outcome(view, result?, abort.is_aborted())
}

/// A write that produced nothing was either interrupted or never sent for lack of a session
fn write_outcome<T>(view: &str, data: Option<T>, interrupted: bool) -> Result<T> {
    match data {
        Some(data) => Ok(data),
        None if interrupted => Err(ApiError::Cancelled.into()),
        None => Err(SessionError::LoginRequired {
            from: view.to_string(),
        }
        .into()),
    }
}
