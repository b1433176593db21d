use anyhow::{Context, Result};
use colored::Colorize;

use crate::app::AppContext;

/// Prints the resolved configuration and the directories in use.
pub fn show(ctx: &AppContext) -> Result<()> {
    let rendered =
        toml::to_string_pretty(&ctx.config).context("Failed to serialize configuration")?;

    println!("{}", "# Resolved configuration".bright_black());
    print!("{}", rendered);
    println!();
    println!("{}", "# Paths".bright_black());
    println!("config file    {}", ctx.paths.config_file().display());
    println!("local storage  {}", ctx.paths.local_storage_file().display());
    println!("logs           {}", ctx.paths.logs_dir().display());
    println!("mock db        {}", ctx.paths.mock_db_file().display());
    Ok(())
}
