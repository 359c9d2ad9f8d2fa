//! Subtask webhook server - keeps parent issue status in line with its subtasks.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use subsync::io::config::{DEFAULT_CONFIG_PATH, load_effective_config};
use subsync::io::http_tracker::HttpTracker;
use subsync::io::tracker::IssueTracker;
use subsync::logging;
use subsync_hook::routes;
use subsync_hook::state::AppState;
use tokio::signal;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "subsync-hook")]
#[command(about = "Webhook receiver that synchronises parent issue status")]
struct Args {
    /// Path to the TOML config file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Address to bind the server to (overrides `server.bind`)
    #[arg(long)]
    bind: Option<String>,

    /// Port to listen on (overrides `server.port`)
    #[arg(long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    logging::init("subsync=info,subsync_hook=info,tower_http=info");

    let args = Args::parse();

    let cfg = load_effective_config(&args.config)?;
    let token = cfg.access_token(|var| std::env::var(var).ok())?;
    let statuses = cfg.statuses.target_map();
    info!(
        ready_for_dev = %cfg.statuses.ready_for_dev,
        in_progress = %cfg.statuses.in_progress,
        done = %cfg.statuses.done,
        "managed statuses"
    );

    let tracker: Arc<dyn IssueTracker> = Arc::new(HttpTracker::new(&token, cfg.timeout())?);
    info!(timeout_secs = cfg.tracker.timeout_secs, "tracker client opened");
    let state = AppState::new(tracker, statuses);

    let bind = args.bind.unwrap_or(cfg.server.bind);
    let port = args.port.unwrap_or(cfg.server.port);
    let addr: SocketAddr = format!("{}:{}", bind, port)
        .parse()
        .with_context(|| format!("invalid listen address {bind}:{port}"))?;
    info!(addr = %addr, "listening");

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("bind {addr}"))?;
    axum::serve(listener, routes::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serve")?;

    // The router (and with it the last tracker handle) is gone once serve returns.
    info!("tracker client closed");
    Ok(())
}

/// Resolves on Ctrl+C or SIGTERM.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            warn!(%error, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                warn!(%error, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("received Ctrl+C, shutting down"),
        () = terminate => info!("received SIGTERM, shutting down"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_defaults() {
        let args = Args::parse_from(["subsync-hook"]);
        assert_eq!(args.config, PathBuf::from(DEFAULT_CONFIG_PATH));
        assert!(args.bind.is_none());
        assert!(args.port.is_none());
    }

    #[test]
    fn parse_overrides() {
        let args = Args::parse_from(["subsync-hook", "--bind", "0.0.0.0", "--port", "9000"]);
        assert_eq!(args.bind.as_deref(), Some("0.0.0.0"));
        assert_eq!(args.port, Some(9000));
    }
}
