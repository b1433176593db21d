use std::io::Write;

use anyhow::{Result, anyhow};
use filedeck_core::router::{Location, View};

use crate::app::AppContext;
use crate::views;

/// Navigates to `path`, loads what the resulting view needs and renders it.
pub async fn open(ctx: &mut AppContext, path: &str) -> Result<()> {
    let location = visit(ctx, path).await?;
    let mut stdout = std::io::stdout().lock();
    views::render(&mut stdout, ctx, &location)?;
    stdout.flush()?;
    Ok(())
}

/// Navigates and loads data without rendering.
pub async fn visit(ctx: &mut AppContext, path: &str) -> Result<Location> {
    let location = ctx
        .navigate(path)
        .map_err(|e| anyhow!("Cannot navigate to '{}': {}", path, e))?;

    if let Some(ref from) = location.redirected_from {
        tracing::info!("[Navigate] '{}' redirected to {}", from, location.path);
    }

    if matches!(location.view, View::FileList | View::FilePreview) {
        ctx.files.fetch_all().await;
    }
    Ok(location)
}
