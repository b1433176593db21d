use std::path::PathBuf;

use anyhow::{Result, anyhow};
use colored::Colorize;
use filedeck_infrastructure::config_service::{port_of, validate_server_url};

use crate::app::AppContext;

/// Runs the mock JSON server until interrupted.
///
/// The port defaults to the one in the configured server URL so the client
/// and the mock agree without extra flags.
pub async fn serve_mock(ctx: &AppContext, db: Option<PathBuf>, port: Option<u16>) -> Result<()> {
    let port = match port {
        Some(port) => port,
        None => port_of(&validate_server_url(&ctx.config.server.json_server_url)?),
    };
    let db = db.unwrap_or_else(|| ctx.paths.mock_db_file());

    println!(
        "{}",
        format!("Starting mock JSON server on port {} ({})", port, db.display()).bright_green()
    );

    tokio::select! {
        result = filedeck_mock_server::run(db, port) => {
            result.map_err(|e| anyhow!("Mock server failed: {}", e))
        }
        _ = tokio::signal::ctrl_c() => {
            tracing::info!("[MockServer] Shutting down");
            Ok(())
        }
    }
}
