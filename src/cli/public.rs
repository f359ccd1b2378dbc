//! Public portfolio commands (no session needed)

use log::debug;

use crate::cli::CommandContext;
use crate::cli::args::GlobalOptions;
use crate::cli::handlers::{print_details, print_rows};
use crate::client::PublicApi;
use crate::client::models::{Entity, NewContactMessage, Resource};
use crate::error::{Error, Result};
use crate::fetch::{ApiCall, CallOptions, Notifier};
use crate::models::{entity_details, entity_rows};
use crate::session::route::PUBLIC_PATH;

/// Run the show command for one public section
pub async fn show(opts: &GlobalOptions, resource: Resource) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.client(PUBLIC_PATH)?;

    let call: ApiCall<Entity> =
        ApiCall::with_options(ctx.gate(), ctx.notifier(), CallOptions::public().silent());

    let spinner = ctx.spinner(format!("Loading {}...", resource));
    let result = call.execute(|| client.public_section(resource)).await;
    spinner.finish_and_clear();

    let payload = result?.ok_or_else(|| Error::Other(format!("{} was not loaded", resource)))?;
    debug!("Loaded public section {}", resource);

    if resource.is_singleton() {
        print_details(ctx.format, &entity_details(&payload), &payload, None)
    } else {
        print_rows(ctx.format, entity_rows(resource, &payload), None)
    }
}

/// Run the contact command
pub async fn contact(
    opts: &GlobalOptions,
    name: String,
    email: String,
    subject: String,
    message: String,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let client = ctx.client(PUBLIC_PATH)?;
    let body = NewContactMessage {
        name,
        email,
        subject,
        message,
    };

    let call = ApiCall::with_options(ctx.gate(), ctx.notifier(), CallOptions::public().silent());

    let spinner = ctx.spinner("Sending message...");
    let result = call.execute(|| client.send_contact(&body)).await;
    spinner.finish_and_clear();

    let sent = result?.ok_or_else(|| Error::Other("Message was not sent".to_string()))?;
    debug!("Contact message stored with id {}", sent.id);

    ctx.notifier()
        .success("Message sent. Thank you, I will get back to you soon.");
    Ok(())
}
