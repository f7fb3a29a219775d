use anyhow::{Context as _, Result};

use crate::Context;
use crate::cli::ConfigCommand;
use crate::config::Config;
use crate::paths;
use crate::ui;

pub fn run(ctx: &Context, cmd: ConfigCommand) -> Result<()> {
    match cmd {
        ConfigCommand::Show => show(ctx),
        ConfigCommand::Path => path(),
        ConfigCommand::Init => init(),
    }
}

fn show(ctx: &Context) -> Result<()> {
    ui::header("Configuration");

    let file = paths::config_file()?;
    let source = if file.exists() {
        file.display().to_string()
    } else {
        format!("{} (not found, using defaults)", file.display())
    };
    ui::kv("Config file", &source);

    ui::section("Effective values");
    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to serialize config")?;
    for line in rendered.lines() {
        println!("  {}", line);
    }

    if ctx.config.is_mock_service() {
        println!();
        ui::dim("JSONPlaceholder accepts writes but never stores them.");
    }
    Ok(())
}

pub fn path() -> Result<()> {
    println!("{}", paths::config_file()?.display());
    Ok(())
}

pub fn init() -> Result<()> {
    let written = Config::default().write_new(&paths::config_file()?)?;
    ui::success(&format!("Created {}", written.display()));
    Ok(())
}
