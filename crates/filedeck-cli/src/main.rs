use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use filedeck_core::config::Locale;

mod app;
mod commands;
mod logging;
mod views;

use app::AppBootstrap;

#[derive(Parser, Debug)]
#[command(name = "filedeck")]
#[command(about = "filedeck - log in, then list, upload, preview and delete files", long_about = None)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,

    #[command(subcommand)]
    command: Commands,
}

/// Options shared by every subcommand.
#[derive(Args, Debug, Clone, Default)]
pub struct GlobalArgs {
    /// Directory holding config.toml, local storage and logs
    #[arg(long, global = true, value_name = "DIR")]
    pub config_dir: Option<PathBuf>,

    /// Base URL of the JSON server
    #[arg(long, global = true, value_name = "URL")]
    pub server_url: Option<String>,

    /// Language of user-facing messages (en, fr)
    #[arg(long, global = true)]
    pub locale: Option<Locale>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Log in under a display name
    Login { name: String },
    /// Clear the current session
    Logout,
    /// Show the current session
    Whoami,
    /// Navigate to a path and render the resulting view
    Open { path: String },
    /// Work with the file collection
    Files {
        #[command(subcommand)]
        action: FilesAction,
    },
    /// Run the mock JSON server
    ServeMock {
        /// Collection document (defaults to db.json in the data directory)
        #[arg(long, value_name = "PATH")]
        db: Option<PathBuf>,
        /// Port to listen on (defaults to the port of the server URL)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Print the resolved configuration
    Config,
}

#[derive(Subcommand, Debug)]
enum FilesAction {
    /// List the files
    List,
    /// Upload a local file
    Upload {
        path: PathBuf,
        /// Send only the metadata, not the file bytes
        #[arg(long)]
        no_content: bool,
    },
    /// Delete a file by id
    Delete { id: String },
    /// Show a single file
    Preview { id: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let bootstrap = AppBootstrap::initialize(&cli.global)?;
    let _log_guard = bootstrap.log_guard;
    let mut ctx = bootstrap.context;

    match cli.command {
        Commands::Login { name } => commands::session::login(&mut ctx, &name).await?,
        Commands::Logout => commands::session::logout(&mut ctx).await?,
        Commands::Whoami => commands::session::whoami(&ctx)?,
        Commands::Open { path } => commands::navigate::open(&mut ctx, &path).await?,
        Commands::Files { action } => match action {
            FilesAction::List => commands::files::list(&mut ctx).await?,
            FilesAction::Upload { path, no_content } => {
                commands::files::upload(&mut ctx, &path, !no_content).await?
            }
            FilesAction::Delete { id } => commands::files::delete(&mut ctx, &id).await?,
            FilesAction::Preview { id } => commands::files::preview(&mut ctx, &id).await?,
        },
        Commands::ServeMock { db, port } => commands::serve::serve_mock(&ctx, db, port).await?,
        Commands::Config => commands::config::show(&ctx)?,
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_files_upload() {
        let cli = Cli::try_parse_from(["filedeck", "files", "upload", "a.txt", "--no-content"])
            .unwrap();
        match cli.command {
            Commands::Files {
                action: FilesAction::Upload { path, no_content },
            } => {
                assert_eq!(path, PathBuf::from("a.txt"));
                assert!(no_content);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "filedeck",
            "open",
            "/files",
            "--server-url",
            "http://localhost:4000",
            "--locale",
            "fr",
        ])
        .unwrap();
        assert_eq!(
            cli.global.server_url.as_deref(),
            Some("http://localhost:4000")
        );
        assert_eq!(cli.global.locale, Some(Locale::Fr));
    }

    #[test]
    fn test_serve_mock_options() {
        let cli = Cli::try_parse_from(["filedeck", "serve-mock", "--port", "4100"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::ServeMock {
                db: None,
                port: Some(4100)
            }
        ));
    }

    #[test]
    fn test_unknown_locale_is_rejected() {
        assert!(Cli::try_parse_from(["filedeck", "whoami", "--locale", "de"]).is_err());
    }
}
