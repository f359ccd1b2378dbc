//! Content management commands
//!
//! Reads go through a [`Fetcher`] with fallback data so a failed list still
//! renders; writes go through an [`ApiCall`](crate::fetch::ApiCall).

use serde_json::Value;

use crate::cli::CommandContext;
use crate::cli::args::{GlobalOptions, parse_payload};
use crate::cli::handlers::{
    check_loaded, confirm, load_view, print_details, print_rows, run_write,
};
use crate::client::AdminApi;
use crate::client::models::{Entity, Resource};
use crate::error::{Error, Result};
use crate::fetch::{FetchOptions, Fetcher};
use crate::models::{entity_details, entity_rows};

/// Fallback shown when a section fails to load
fn empty_section(resource: Resource) -> Entity {
    if resource.is_singleton() {
        Value::Null
    } else {
        Value::Array(Vec::new())
    }
}

/// Entry ID to send for an update, or an error when a collection entry has none
fn update_target(resource: Resource, id: Option<i64>) -> Result<Option<i64>> {
    match (resource.is_singleton(), id) {
        (true, _) => Ok(None),
        (false, Some(id)) => Ok(Some(id)),
        (false, None) => Err(Error::Other(format!(
            "An entry ID is required to update {}",
            resource
        ))),
    }
}

fn render_entity(ctx: &CommandContext, entity: &Entity, error: Option<&str>) -> Result<()> {
    print_details(ctx.format, &entity_details(entity), entity, error)
}

/// Run the admin list command
pub async fn list(opts: &GlobalOptions, resource: Resource) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let view = resource.admin_view();
    ctx.require_admin(&view)?;

    let client = ctx.client(&view)?;
    let client = &client;
    let fetcher = Fetcher::new(
        move || client.list_entries(resource),
        ctx.gate(),
        ctx.notifier(),
        FetchOptions::default()
            .fallback(empty_section(resource))
            .max_retries(ctx.config.preferences.max_retries),
    );

    let state = load_view(&ctx, &view, &fetcher, None).await?;
    let payload = state.data.clone().unwrap_or(Value::Null);
    let error = state.error.as_deref();

    if resource.is_singleton() {
        render_entity(&ctx, &payload, error)?;
    } else {
        print_rows(ctx.format, entity_rows(resource, &payload), error)?;
    }

    check_loaded(&state, fetcher.budget())
}

/// Run the admin get command
pub async fn get(opts: &GlobalOptions, resource: Resource, id: i64) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let view = resource.admin_view();
    ctx.require_admin(&view)?;

    let client = ctx.client(&view)?;
    let client = &client;
    let fetcher = Fetcher::new(
        move || client.get_entry(resource, id),
        ctx.gate(),
        ctx.notifier(),
        FetchOptions::default().max_retries(ctx.config.preferences.max_retries),
    );

    let state = load_view(&ctx, &view, &fetcher, None).await?;
    if let Some(entity) = &state.data {
        render_entity(&ctx, entity, None)?;
    }

    check_loaded(&state, fetcher.budget())
}

/// Run the admin create command
pub async fn create(opts: &GlobalOptions, resource: Resource, data: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let view = resource.admin_view();
    ctx.require_admin(&view)?;

    let body = parse_payload(data)?;
    let client = ctx.client(&view)?;
    let created = run_write(&ctx, &view, format!("Created {} entry", resource), || {
        client.create_entry(resource, &body)
    })
    .await?;

    render_entity(&ctx, &created, None)
}

/// Run the admin update command
pub async fn update(
    opts: &GlobalOptions,
    resource: Resource,
    id: Option<i64>,
    data: &str,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let view = resource.admin_view();
    ctx.require_admin(&view)?;

    let id = update_target(resource, id)?;
    let body = parse_payload(data)?;
    let client = ctx.client(&view)?;
    let updated = run_write(&ctx, &view, format!("Updated {}", resource), || {
        client.update_entry(resource, id, &body)
    })
    .await?;

    render_entity(&ctx, &updated, None)
}

/// Run the admin delete command
pub async fn delete(opts: &GlobalOptions, resource: Resource, id: i64, yes: bool) -> Result<()> {
    if resource.is_singleton() {
        return Err(Error::Other(format!("{} cannot be deleted", resource)));
    }

    let ctx = CommandContext::new(opts)?;
    let view = resource.admin_view();
    ctx.require_admin(&view)?;

    if !confirm(&format!("Delete {} entry {}?", resource, id), yes)? {
        println!("Cancelled");
        return Ok(());
    }

    let client = ctx.client(&view)?;
    run_write(&ctx, &view, format!("Deleted {} entry {}", resource, id), || {
        client.delete_entry(resource, id)
    })
    .await
}
