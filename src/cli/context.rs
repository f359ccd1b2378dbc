//! Command execution context
//!
//! Resolves configuration, opens the session, and builds API clients so
//! handlers only deal with their own command.

use std::io::IsTerminal;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::PortfolioClient;
use crate::config::Config;
use crate::error::{Error, Result, SessionError};
use crate::fetch::{SessionGate, TerminalNotifier};
use crate::session::{FileSessionStore, RouteDecision, SessionGuard};

/// Context for command execution containing config, session, and runtime options.
pub struct CommandContext {
    /// Configuration with flag and environment overrides applied
    pub config: Config,
    /// Where the config was loaded from (and where `config set` writes)
    pub config_path: PathBuf,
    /// Initialized session guard over the session file
    pub guard: Arc<SessionGuard>,
    /// Resolved output format
    pub format: OutputFormat,
}

impl CommandContext {
    /// Load config, apply overrides, and initialize the session.
    ///
    /// No network access happens here.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config_path = Config::resolve_path(opts.config_ref())?;
        let mut config = Config::load_from(&config_path)?;
        apply_overrides(&mut config, opts);

        let format = match opts.format {
            Some(format) => format,
            None => config
                .preferences
                .format
                .as_deref()
                .map(str::parse::<OutputFormat>)
                .transpose()
                .map_err(|e: String| crate::error::ConfigError::Invalid(e))?
                .unwrap_or_default(),
        };

        let session_path = config.session_path()?;
        debug!("Using session file {}", session_path.display());

        let guard = Arc::new(SessionGuard::new(Arc::new(FileSessionStore::new(session_path))));
        guard.initialize();

        Ok(Self {
            config,
            config_path,
            guard,
            format,
        })
    }

    /// API client acting on behalf of the view at `view`
    pub fn client(&self, view: &str) -> Result<PortfolioClient> {
        Ok(PortfolioClient::new(
            self.config.api_base_url(),
            self.config.locale(),
            self.guard.clone(),
        )?
        .for_view(view))
    }

    /// Gate for the fetch hooks
    pub fn gate(&self) -> Arc<dyn SessionGate> {
        self.guard.clone()
    }

    /// Notifier for the fetch hooks; success lines are dropped for JSON output
    pub fn notifier(&self) -> Arc<TerminalNotifier> {
        Arc::new(TerminalNotifier::new().quiet(self.format == OutputFormat::Json))
    }

    /// Enforce the admin route guard for `view`
    pub fn require_admin(&self, view: &str) -> Result<()> {
        route_result(self.guard.guard_route(view))
    }

    /// Spinner on stderr, hidden when stderr is not a terminal or output is JSON
    pub fn spinner(&self, message: impl Into<String>) -> ProgressBar {
        if self.format == OutputFormat::Json || !std::io::stderr().is_terminal() {
            return ProgressBar::hidden();
        }

        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.cyan} {msg}") {
            spinner.set_style(style);
        }
        spinner.set_message(message.into());
        spinner.enable_steady_tick(Duration::from_millis(100));
        spinner
    }
}

fn apply_overrides(config: &mut Config, opts: &GlobalOptions) {
    if let Some(host) = &opts.api_host {
        config.api_host = Some(host.clone());
    }
    if let Some(lang) = &opts.lang {
        config.locale = Some(lang.clone());
    }
    if let Some(session) = &opts.session {
        config.session_path = Some(PathBuf::from(session));
    }
}

/// Map a route decision onto the command outcome
fn route_result(decision: RouteDecision) -> Result<()> {
    match decision {
        RouteDecision::Render => Ok(()),
        RouteDecision::RedirectToLogin { from } => Err(SessionError::LoginRequired { from }.into()),
        RouteDecision::RedirectToPublic => Err(SessionError::AdminRequired.into()),
        RouteDecision::Loading => Err(Error::Other("Session check did not complete".to_string())),
    }
}
