//! CLI command definitions and handlers

use clap::{Parser, Subcommand};
pub use clap_complete::Shell;

use crate::client::models::{MessageStatus, Resource};

pub mod admin;
pub mod args;
pub mod config;
pub mod context;
pub mod dashboard;
pub mod handlers;
pub mod login;
pub mod messages;
pub mod public;
pub mod status;

pub use args::OutputFormat;
pub use context::CommandContext;

/// folioctl - command-line console for a personal portfolio site
#[derive(Parser, Debug)]
#[command(name = "folioctl")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(long, global = true, env = "FOLIO_FORMAT", hide_env = true)]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "FOLIO_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Portfolio API host (e.g. http://localhost:8080)
    #[arg(long, global = true, env = "FOLIO_API_HOST", hide_env = true)]
    pub api_host: Option<String>,

    /// Content language sent with every request (e.g. fr, en)
    #[arg(long, global = true, env = "FOLIO_LANG", hide_env = true)]
    pub lang: Option<String>,

    /// Override session file location
    #[arg(long, global = true, env = "FOLIO_SESSION", hide_env = true)]
    pub session: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "FOLIO_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in to the admin console
    Login {
        /// Username (prompted when omitted)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, short = 'p', env = "FOLIO_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show session and configuration status
    Status,

    /// Show a public portfolio section
    Show {
        /// Section to show
        #[arg(value_enum)]
        resource: Resource,
    },

    /// Send a message through the public contact form
    Contact {
        #[arg(long)]
        name: String,

        #[arg(long)]
        email: String,

        #[arg(long)]
        subject: String,

        #[arg(long)]
        message: String,
    },

    /// Manage portfolio content (admin)
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Manage contact messages (admin)
    #[command(subcommand)]
    Messages(MessageCommands),

    /// Show dashboard statistics and recent messages (admin)
    Dashboard,

    /// View or change local configuration
    #[command(subcommand)]
    Config(ConfigCommands),

    /// Generate shell completions
    #[command(after_help = "\
Static completions:
  bash:   folioctl completion bash > /etc/bash_completion.d/folioctl
  zsh:    folioctl completion zsh > \"${fpath[1]}/_folioctl\"
  fish:   folioctl completion fish > ~/.config/fish/completions/folioctl.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Content management subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// List entries of a section
    List {
        #[arg(value_enum)]
        resource: Resource,
    },

    /// Show one entry
    Get {
        #[arg(value_enum)]
        resource: Resource,

        /// Entry ID
        id: i64,
    },

    /// Create an entry
    Create {
        #[arg(value_enum)]
        resource: Resource,

        /// Entry as JSON, or @file.json
        #[arg(long)]
        data: String,
    },

    /// Update an entry (about takes no ID)
    #[command(after_help = "EXAMPLES:\n  \
        folioctl admin update skills 4 --data '{\"name\":\"Rust\",\"proficiencyLevel\":90}'\n  \
        folioctl admin update about --data @about.json")]
    Update {
        #[arg(value_enum)]
        resource: Resource,

        /// Entry ID (omit for about)
        id: Option<i64>,

        /// Entry as JSON, or @file.json
        #[arg(long)]
        data: String,
    },

    /// Delete an entry
    Delete {
        #[arg(value_enum)]
        resource: Resource,

        /// Entry ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Contact message subcommands
#[derive(Subcommand, Debug)]
pub enum MessageCommands {
    /// List messages, newest first
    List {
        /// Only messages with this status
        #[arg(long, value_enum)]
        status: Option<MessageStatus>,
    },

    /// Show one message
    Get {
        /// Message ID
        id: i64,
    },

    /// Mark a message as read
    Read {
        /// Message ID
        id: i64,
    },

    /// Delete a message
    Delete {
        /// Message ID
        id: i64,

        /// Skip the confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Local configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration
    Show,

    /// Persist one setting
    Set {
        /// Setting name
        #[arg(value_enum)]
        key: config::ConfigKey,

        /// New value
        value: String,
    },
}
