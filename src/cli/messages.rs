//! Contact message commands

use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{
    check_loaded, confirm, load_view, print_details, print_rows, run_write,
};
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AdminApi;
use crate::client::models::{ContactMessage, MessageStatus};
use crate::error::Result;
use crate::fetch::{FetchOptions, Fetcher};
use crate::models::{MessageDisplay, message_details};

/// Admin view the message commands act on behalf of
pub const MESSAGES_VIEW: &str = "/admin/messages";

/// Dependency key for the list view's status filter
fn filter_key(status: Option<MessageStatus>) -> &'static str {
    status.map(|s| s.as_str()).unwrap_or("ALL")
}

/// Run the messages list command
pub async fn list(opts: &GlobalOptions, status: Option<MessageStatus>) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_admin(MESSAGES_VIEW)?;

    let client = ctx.client(MESSAGES_VIEW)?;
    let client = &client;
    let fetcher = Fetcher::new(
        move || client.list_messages(status),
        ctx.gate(),
        ctx.notifier(),
        FetchOptions::default()
            .fallback(Vec::new())
            .max_retries(ctx.config.preferences.max_retries),
    );

    let state = load_view(&ctx, MESSAGES_VIEW, &fetcher, Some(filter_key(status))).await?;
    let messages = state.data.clone().unwrap_or_default();
    let rows: Vec<MessageDisplay> = messages.iter().map(MessageDisplay::from).collect();
    print_rows(ctx.format, rows, state.error.as_deref())?;

    check_loaded(&state, fetcher.budget())
}

/// Run the messages get command
pub async fn get(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_admin(MESSAGES_VIEW)?;

    let client = ctx.client(MESSAGES_VIEW)?;
    let client = &client;
    let fetcher = Fetcher::new(
        move || client.get_message(id),
        ctx.gate(),
        ctx.notifier(),
        FetchOptions::default().max_retries(ctx.config.preferences.max_retries),
    );

    let state = load_view(&ctx, MESSAGES_VIEW, &fetcher, None).await?;
    if let Some(message) = &state.data {
        print_details(ctx.format, &message_details(message), message, None)?;
    }

    check_loaded(&state, fetcher.budget())
}

/// Run the messages read command
pub async fn read(opts: &GlobalOptions, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_admin(MESSAGES_VIEW)?;

    let client = ctx.client(MESSAGES_VIEW)?;
    let message: ContactMessage = run_write(
        &ctx,
        MESSAGES_VIEW,
        format!("Message {} marked as read", id),
        || client.mark_message_read(id),
    )
    .await?;

    if ctx.format == OutputFormat::Json {
        print_details(ctx.format, &message_details(&message), &message, None)?;
    }
    Ok(())
}

/// Run the messages delete command
pub async fn delete(opts: &GlobalOptions, id: i64, yes: bool) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_admin(MESSAGES_VIEW)?;

    if !confirm(&format!("Delete message {}?", id), yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let client = ctx.client(MESSAGES_VIEW)?;
    run_write(&ctx, MESSAGES_VIEW, format!("Deleted message {}", id), || {
        client.delete_message(id)
    })
    .await
}
