//! Login and logout commands

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::models::Credentials;
use crate::error::{Error, Result};
use crate::fetch::Notifier;
use crate::models::SessionDisplay;
use crate::output::json::format_json;
use crate::session::route::LOGIN_PATH;

/// Run the login command, prompting for whatever was not passed in
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let username = match username {
        Some(name) => name,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(secret) => secret,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    // The login view never clears the session on a 401
    let client = ctx.client(LOGIN_PATH)?;
    let spinner = ctx.spinner("Signing in...");
    let result = ctx
        .guard
        .login(&client, &Credentials::new(username, password))
        .await;
    spinner.finish_and_clear();

    let user = match result {
        Ok(user) => user,
        Err(err) => {
            let message = ctx.guard.last_error().unwrap_or_else(|| err.to_string());
            ctx.notifier().error(&message);
            return Err(Error::Reported(message));
        }
    };
    debug!("Session stored for {}", user.username);

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&SessionDisplay::from_guard(&ctx.guard))?);
        return Ok(());
    }

    println!("{} Logged in as {}", "✓".green(), user.username.bold());
    if ctx.guard.is_current_admin() {
        println!("{} Admin access granted", "✓".green());
    } else {
        println!(
            "{} {} is not an admin; admin commands will be refused",
            "⚠".yellow(),
            user.username
        );
    }

    Ok(())
}

/// Run the logout command. Succeeds when already logged out.
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let was_signed_in = ctx.guard.current_user().is_some();
    ctx.guard.logout();

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&SessionDisplay::from_guard(&ctx.guard))?);
    } else if was_signed_in {
        println!("{} Logged out", "✓".green());
    } else {
        println!("{} No active session", "○".dimmed());
    }

    Ok(())
}
