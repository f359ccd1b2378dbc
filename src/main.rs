//! folioctl - command-line console for a personal portfolio site and its admin API

use std::io;

use clap::{CommandFactory, Parser};
use log::{LevelFilter, debug};

mod cli;
mod client;
mod config;
mod error;
mod fetch;
mod models;
mod output;
mod session;

use cli::args::GlobalOptions;
use cli::{AdminCommands, Cli, Commands, ConfigCommands, MessageCommands};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        if !err.is_reported() {
            eprintln!("Error: {}", err);
        }
        std::process::exit(1);
    }
}

/// `--debug` forces debug level; otherwise `RUST_LOG` applies, defaulting to warnings
fn init_logging(debug: bool) {
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"));
    if debug {
        builder.filter_module("folioctl", LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);
    debug!("Using config {:?}", opts.config_ref());

    match cli.command {
        Commands::Login { username, password } => {
            cli::login::login(&opts, username, password).await
        }
        Commands::Logout => cli::login::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Show { resource } => cli::public::show(&opts, resource).await,
        Commands::Contact {
            name,
            email,
            subject,
            message,
        } => cli::public::contact(&opts, name, email, subject, message).await,
        Commands::Admin(admin_cmd) => match admin_cmd {
            AdminCommands::List { resource } => cli::admin::list(&opts, resource).await,
            AdminCommands::Get { resource, id } => cli::admin::get(&opts, resource, id).await,
            AdminCommands::Create { resource, data } => {
                cli::admin::create(&opts, resource, &data).await
            }
            AdminCommands::Update { resource, id, data } => {
                cli::admin::update(&opts, resource, id, &data).await
            }
            AdminCommands::Delete { resource, id, yes } => {
                cli::admin::delete(&opts, resource, id, yes).await
            }
        },
        Commands::Messages(msg_cmd) => match msg_cmd {
            MessageCommands::List { status } => cli::messages::list(&opts, status).await,
            MessageCommands::Get { id } => cli::messages::get(&opts, id).await,
            MessageCommands::Read { id } => cli::messages::read(&opts, id).await,
            MessageCommands::Delete { id, yes } => cli::messages::delete(&opts, id, yes).await,
        },
        Commands::Dashboard => cli::dashboard::run(&opts).await,
        Commands::Config(config_cmd) => match config_cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Set { key, value } => cli::config::set(&opts, key, &value),
        },
        Commands::Completion { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "folioctl", &mut io::stdout());
            Ok(())
        }
    }
}
