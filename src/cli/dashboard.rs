//! Dashboard command implementation

use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{check_loaded, load_view, print_rows};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AdminApi;
use crate::client::models::DashboardStats;
use crate::error::Result;
use crate::fetch::{FetchOptions, Fetcher};
use crate::models::{MessageDisplay, stat_rows};
use crate::output::json::format_json_with_error;
use crate::session::route::ADMIN_PREFIX;

/// Run the dashboard command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_admin(ADMIN_PREFIX)?;

    let client = ctx.client(ADMIN_PREFIX)?;
    let client = &client;
    let fetcher = Fetcher::new(
        move || client.dashboard_stats(),
        ctx.gate(),
        ctx.notifier(),
        FetchOptions::default()
            .fallback(DashboardStats::default())
            .max_retries(ctx.config.preferences.max_retries),
    );

    let state = load_view(&ctx, ADMIN_PREFIX, &fetcher, None).await?;
    let stats = state.data.clone().unwrap_or_default();

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json_with_error(&stats, state.error.as_deref())?);
        return check_loaded(&state, fetcher.budget());
    }

    print_rows(ctx.format, stat_rows(&stats), None)?;

    println!("\n{}", "Recent messages".bold());
    let recent: Vec<MessageDisplay> = stats
        .recent_messages
        .iter()
        .map(MessageDisplay::from)
        .collect();
    print_rows(ctx.format, recent, None)?;

    check_loaded(&state, fetcher.budget())
}
