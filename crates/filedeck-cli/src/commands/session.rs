use anyhow::{Result, anyhow};
use colored::Colorize;

use crate::app::AppContext;
use crate::commands::navigate;

pub async fn login(ctx: &mut AppContext, name: &str) -> Result<()> {
    let session = ctx
        .session
        .login(name)
        .map_err(|e| anyhow!("Failed to save session: {}", e))?;
    println!("{}", format!("Logged in as {}", session.name).green());

    navigate::open(ctx, "/").await
}

pub async fn logout(ctx: &mut AppContext) -> Result<()> {
    ctx.session
        .logout()
        .map_err(|e| anyhow!("Failed to clear session: {}", e))?;
    println!("{}", "Logged out".green());

    navigate::open(ctx, "/login").await
}

pub fn whoami(ctx: &AppContext) -> Result<()> {
    match ctx.session.session() {
        Some(session) => println!("{} ({})", session.name, session.id.bright_black()),
        None => println!("{}", "Not logged in".bright_black()),
    }
    Ok(())
}
