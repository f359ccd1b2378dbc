//! Local configuration commands

use clap::ValueEnum;
use colored::Colorize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::json::format_json;

/// Settings `config set` can change
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "snake_case")]
pub enum ConfigKey {
    ApiHost,
    Locale,
    Format,
    MaxRetries,
}

/// Run the config show command with flag and environment overrides applied
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;

    let mut effective = ctx.config.clone();
    effective.api_host = Some(ctx.config.api_host().to_string());
    effective.locale = Some(ctx.config.locale().to_string());
    effective.session_path = Some(ctx.config.session_path()?);

    match ctx.format {
        OutputFormat::Json => println!("{}", format_json(&effective)?),
        OutputFormat::Pretty | OutputFormat::Table => {
            println!("# {}", ctx.config_path.display().to_string().dimmed());
            let yaml = serde_yaml::to_string(&effective).map_err(ConfigError::from)?;
            print!("{}", yaml);
        }
    }

    Ok(())
}

/// Run the config set command. Only the file's own values are written back.
pub fn set(opts: &GlobalOptions, key: ConfigKey, value: &str) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let mut config = Config::load_from(&path)?;
    apply(&mut config, key, value)?;
    config.save_to(&path)?;

    println!(
        "{} Set {} = {} in {}",
        "✓".green(),
        key_name(key),
        value,
        path.display()
    );
    Ok(())
}

fn key_name(key: ConfigKey) -> String {
    key.to_possible_value()
        .map(|v| v.get_name().to_string())
        .unwrap_or_default()
}

/// Validate `value` and store it under `key`
fn apply(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    let value = value.trim();
    match key {
        ConfigKey::ApiHost => {
            if !(value.starts_with("http://") || value.starts_with("https://")) {
                return Err(ConfigError::Invalid(format!(
                    "api_host must start with http:// or https:// (got '{}')",
                    value
                ))
                .into());
            }
            config.api_host = Some(value.trim_end_matches('/').to_string());
        }
        ConfigKey::Locale => {
            if value.is_empty() {
                return Err(ConfigError::Invalid("locale cannot be empty".to_string()).into());
            }
            config.locale = Some(value.to_string());
        }
        ConfigKey::Format => {
            let format: OutputFormat = value.parse().map_err(ConfigError::Invalid)?;
            config.preferences.format = format
                .to_possible_value()
                .map(|v| v.get_name().to_string());
        }
        ConfigKey::MaxRetries => {
            let retries: u32 = value.parse().map_err(|_| {
                ConfigError::Invalid(format!(
                    "max_retries must be a non-negative integer (got '{}')",
                    value
                ))
            })?;
            config.preferences.max_retries = retries;
        }
    }
    Ok(())
}
