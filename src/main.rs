mod cli;
mod commands;
mod config;
mod paths;
mod progress;
mod render;
mod ui;

use anyhow::Result;
use clap::{CommandFactory, Parser};
use clap_complete::generate;
use cli::{Cli, Command, ConfigCommand};
use postkit::Client;
use postkit::backend::http::HttpBackend;
use std::io;

/// Global context for the application
pub struct Context {
    pub quiet: bool,
    pub config: config::Config,
    pub client: Client,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity
    let log_level = match cli.verbose {
        0 => log::LevelFilter::Warn,
        1 => log::LevelFilter::Info,
        2 => log::LevelFilter::Debug,
        _ => log::LevelFilter::Trace,
    };

    env_logger::Builder::new()
        .filter_level(if cli.quiet {
            log::LevelFilter::Error
        } else {
            log_level
        })
        .format_timestamp(None)
        .init();

    if let Some(result) = run_without_config(&cli.command) {
        return result;
    }

    let config = config::Config::load()?
        .with_overrides(cli.base_url.as_deref(), cli.timeout);
    config.validate()?;
    log::debug!(
        "Using {} (timeout {}s)",
        config.base_url,
        config.timeout_secs
    );

    let backend = HttpBackend::with_options(
        config.base_url.clone(),
        config.timeout(),
        config.user_agent.clone(),
    );
    let ctx = Context {
        quiet: cli.quiet,
        config,
        client: Client::with_backend(Box::new(backend)),
    };

    match cli.command {
        Command::Todo(args) => commands::posts::todo(&ctx, args),
        Command::List(args) => commands::posts::list(&ctx, args),
        Command::Show(args) => commands::posts::show(&ctx, args),
        Command::Create(args) => commands::posts::create(&ctx, args),
        Command::Update(args) => commands::posts::update(&ctx, args),
        Command::Delete(args) => commands::posts::delete(&ctx, args),
        Command::Menu => commands::menu::run(&ctx),
        Command::Config(cmd) => commands::config::run(&ctx, cmd),
        Command::Completions { .. } => Ok(()),
    }
}

/// Run commands that must keep working when config.toml is missing or broken.
///
/// Returns `None` for commands that need the loaded config.
fn run_without_config(command: &Command) -> Option<Result<()>> {
    match command {
        Command::Completions { shell } => {
            let mut cmd = Cli::command();
            generate(*shell, &mut cmd, "postctl", &mut io::stdout());
            Some(Ok(()))
        }
        Command::Config(ConfigCommand::Path) => Some(commands::config::path()),
        Command::Config(ConfigCommand::Init) => Some(commands::config::init()),
        _ => None,
    }
}
