//! Parent status synchronisation CLI.
//!
//! `subsync-hook` handles webhook traffic; this binary is for operators:
//! checking the effective configuration and reconciling one parent on demand
//! through the same pipeline the webhook uses.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use subsync::core::categories::PendingExclusions;
use subsync::exit_codes;
use subsync::io::config::{DEFAULT_CONFIG_PATH, SyncConfig, load_effective_config};
use subsync::io::http_tracker::HttpTracker;
use subsync::io::tracker::{IssueTracker, TrackerError};
use subsync::logging;
use subsync::sync::reconcile_parent;

#[derive(Parser)]
#[command(
    name = "subsync",
    version,
    about = "Keep parent issue status in line with its subtasks"
)]
struct Cli {
    /// Path to the TOML config file.
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate configuration and print the managed status table.
    CheckConfig,
    /// Fetch one parent issue and move it to the status its subtasks imply.
    Reconcile {
        /// Issue resource URL, e.g. `https://tracker/rest/api/2/issue/10000`.
        issue_url: String,
    },
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    logging::init("subsync=info");

    let cli = Cli::parse();
    let code = match run(cli).await {
        Ok(()) => exit_codes::OK,
        Err(err) => {
            eprintln!("{:#}", err);
            if err.downcast_ref::<TrackerError>().is_some() {
                exit_codes::TRACKER
            } else {
                exit_codes::INVALID
            }
        }
    };
    std::process::exit(code);
}

async fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::CheckConfig => cmd_check_config(&cli.config),
        Command::Reconcile { issue_url } => cmd_reconcile(&cli.config, &issue_url).await,
    }
}

fn cmd_check_config(path: &Path) -> Result<()> {
    let cfg = load_effective_config(path)?;
    print!("{}", render_status_table(&cfg));
    Ok(())
}

async fn cmd_reconcile(path: &Path, issue_url: &str) -> Result<()> {
    let cfg = load_effective_config(path)?;
    let token = cfg.access_token(|var| std::env::var(var).ok())?;
    let tracker: Arc<dyn IssueTracker> = Arc::new(HttpTracker::new(&token, cfg.timeout())?);
    let map = cfg.statuses.target_map();

    let outcome = reconcile_parent(tracker.as_ref(), &map, issue_url, &PendingExclusions::none())
        .await
        .with_context(|| format!("reconcile {issue_url}"))?;
    let rendered = serde_json::to_string_pretty(&outcome).context("serialize outcome")?;
    println!("{rendered}");
    Ok(())
}

/// One `slot = "name"` line per managed slot.
fn render_status_table(cfg: &SyncConfig) -> String {
    cfg.statuses
        .target_map()
        .entries()
        .map(|(slot, name)| format!("{} = {:?}\n", slot.label(), name))
        .collect()
}
