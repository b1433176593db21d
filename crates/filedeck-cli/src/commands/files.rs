//! `filedeck files ...`
//!
//! Every action navigates first, so without a session the guard sends the
//! user to the login view and nothing reaches the server.

use std::io::Write;
use std::path::Path;

use anyhow::{Result, anyhow, bail};
use colored::Colorize;
use filedeck_core::router::{Location, View};
use filedeck_infrastructure::payload_from_path;

use crate::app::AppContext;
use crate::commands::navigate;
use crate::views;

pub async fn list(ctx: &mut AppContext) -> Result<()> {
    navigate::open(ctx, "/files").await?;
    fail_on_store_error(ctx, true)
}

pub async fn upload(ctx: &mut AppContext, path: &Path, include_content: bool) -> Result<()> {
    if !enter(ctx, "/upload", View::FileUploader).await? {
        return Ok(());
    }

    let payload = payload_from_path(path, include_content)
        .await
        .map_err(|e| anyhow!("Cannot read {}: {}", path.display(), e))?;
    let name = payload.name.clone();

    let before = ctx.files.len();
    ctx.files.upload(payload).await;
    fail_on_store_error(ctx, false)?;

    if let Some(created) = ctx.files.files().get(before) {
        println!(
            "{}",
            format!("Uploaded {} as {}", name, created.id).green()
        );
    }
    Ok(())
}

pub async fn delete(ctx: &mut AppContext, id: &str) -> Result<()> {
    if !enter(ctx, "/files", View::FileList).await? {
        return Ok(());
    }
    fail_on_store_error(ctx, false)?;

    ctx.files.remove(id).await;
    fail_on_store_error(ctx, false)?;
    println!("{}", format!("Deleted {}", id).green());

    let mut stdout = std::io::stdout().lock();
    views::render(&mut stdout, ctx, &files_location(ctx)?)?;
    stdout.flush()?;
    Ok(())
}

pub async fn preview(ctx: &mut AppContext, id: &str) -> Result<()> {
    let path = format!("/preview/{}", urlencoding::encode(id));
    navigate::open(ctx, &path).await?;
    fail_on_store_error(ctx, true)
}

/// Navigates to `path`. When the guard sent the user elsewhere, renders
/// that view instead and returns false.
async fn enter(ctx: &mut AppContext, path: &str, expected: View) -> Result<bool> {
    let location = navigate::visit(ctx, path).await?;
    if location.view == expected {
        return Ok(true);
    }

    let mut stdout = std::io::stdout().lock();
    views::render(&mut stdout, ctx, &location)?;
    stdout.flush()?;
    Ok(false)
}

fn files_location(ctx: &AppContext) -> Result<Location> {
    ctx.router
        .current()
        .filter(|location| location.view == View::FileList)
        .cloned()
        .ok_or_else(|| anyhow!("file list is not the current view"))
}

/// Turns the store's absorbed error into the process result.
///
/// `shown_by_view` is true when the view just rendered already printed it.
fn fail_on_store_error(ctx: &AppContext, shown_by_view: bool) -> Result<()> {
    let mut stderr = std::io::stderr().lock();
    report_store_error(&mut stderr, ctx, shown_by_view)
}

fn report_store_error(out: &mut dyn Write, ctx: &AppContext, shown_by_view: bool) -> Result<()> {
    let Some(error) = ctx.files.error() else {
        return Ok(());
    };

    tracing::debug!("[Files] {}", error);
    if !shown_by_view {
        views::render_store_error(out, ctx, &error)?;
    }
    bail!("{}", error.error)
}
