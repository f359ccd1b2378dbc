//! Status command implementation

use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::models::SessionDisplay;
use crate::output::formatters::format_remaining;
use crate::output::json::format_json;

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: String,
    api_base_url: String,
    locale: String,
    session_file: String,
    session: SessionDisplay,
}

/// Run the status command. Reads local state only; nothing is sent to the API.
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let report = StatusReport {
        config_file: ctx.config_path.display().to_string(),
        api_base_url: ctx.config.api_base_url(),
        locale: ctx.config.locale().to_string(),
        session_file: ctx.config.session_path()?.display().to_string(),
        session: SessionDisplay::from_guard(&ctx.guard),
    };

    if ctx.format == OutputFormat::Json {
        println!("{}", format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "folioctl status".bold());
    println!("Config file:  {}", report.config_file.cyan());
    println!("API:          {}", report.api_base_url.cyan());
    println!("Language:     {}", report.locale);
    println!("Session file: {}", report.session_file.dimmed());
    println!();

    let session = &report.session;
    match &session.user {
        Some(user) => println!("{} Signed in as {}", "✓".green(), user.username.bold()),
        None => {
            println!("{} Not signed in", "✗".red());
            println!("  → Run 'folioctl login' to sign in");
        }
    }

    if !session.token_present {
        println!("{} No token stored", "○".dimmed());
    } else if !session.token_valid {
        println!("{} Token expired or malformed", "⚠".yellow());
    } else {
        match session.expires_in {
            Some(seconds) => println!(
                "{} Token valid (expires in {})",
                "✓".green(),
                format_remaining(seconds)
            ),
            None => println!("{} Token valid (no expiry)", "✓".green()),
        }
    }

    if session.user.is_some() {
        if session.admin {
            println!("{} Role: {} (admin)", "✓".green(), session.role);
        } else {
            println!("{} Role: {} (not an admin)", "⚠".yellow(), session.role);
        }
    }

    println!();
    Ok(())
}
