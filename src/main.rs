//! Route table tool.
//!
//! Loads TOML route tables, checks them, lists their routes and resolves
//! requests against them. `watch` keeps a table loaded and swaps in a new
//! trie whenever the file changes.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use serde_json::json;

use delta_router::config::{load_router, RouteTableWatcher};
use delta_router::observability::logging::init_logging;
use delta_router::SharedRouter;

#[derive(Parser)]
#[command(name = "delta-router")]
#[command(about = "Check, inspect and resolve against route table files", long_about = None)]
struct Cli {
    /// Log level for router events (overrides RUST_LOG)
    #[arg(short, long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Load, validate and build a route table
    Check { file: PathBuf },
    /// List the routes of a table as JSON
    Routes { file: PathBuf },
    /// Resolve a method and path against a table
    Resolve {
        file: PathBuf,
        method: String,
        path: String,
    },
    /// Keep a table loaded and rebuild it when the file changes
    Watch { file: PathBuf },
}

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_logging(cli.log_level.as_deref());

    match cli.command {
        Commands::Check { file } => {
            let trie = load_router(&file)?;
            println!("{}: ok, {} routes", file.display(), trie.len());
        }
        Commands::Routes { file } => {
            let trie = load_router(&file)?;
            println!("{}", serde_json::to_string_pretty(&trie.routes())?);
        }
        Commands::Resolve { file, method, path } => {
            let trie = load_router(&file)?;
            let Some(m) = trie.resolve(&method, &path) else {
                eprintln!("No route for {} {}", method, path);
                return Ok(ExitCode::FAILURE);
            };
            let out = json!({ "handler": m.handler, "params": m.params });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
        Commands::Watch { file } => watch(file).await?,
    }

    Ok(ExitCode::SUCCESS)
}

async fn watch(file: PathBuf) -> Result<(), Box<dyn std::error::Error>> {
    let router = SharedRouter::new(load_router(&file)?);
    tracing::info!(path = ?file, routes = router.load().len(), "Route table loaded");

    let (watcher, mut updates) = RouteTableWatcher::new(&file);
    let _watcher = watcher.run()?;

    loop {
        tokio::select! {
            Some(trie) = updates.recv() => {
                router.replace(trie);
            }
            _ = tokio::signal::ctrl_c() => {
                tracing::info!("Shutdown signal received");
                break;
            }
        }
    }

    Ok(())
}
