//! Share server entrypoint.

use snipshare_core::DEFAULT_PORT;
use snipshare_server::{config::Config, reaper, serve_router, AppState, ShareRegistry};
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct CliFlags {
    help: bool,
    purge_expired: bool,
}

fn parse_cli_flags(args: &[String]) -> anyhow::Result<CliFlags> {
    let mut flags = CliFlags::default();
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "--help" | "-h" => flags.help = true,
            "--purge-expired" => flags.purge_expired = true,
            value if value.starts_with('-') => {
                anyhow::bail!(
                    "Unknown option: '{}'. Use --help to see supported options.",
                    value
                );
            }
            value => {
                anyhow::bail!(
                    "Unexpected positional argument: '{}'. Use --help to see supported options.",
                    value
                );
            }
        }
    }
    Ok(flags)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "snipshare=info,tower_http=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args: Vec<String> = std::env::args().collect();
    let cli_flags = parse_cli_flags(&args)?;

    if cli_flags.help {
        print_help();
        return Ok(());
    }

    let config = Config::from_env();
    let registry = Arc::new(ShareRegistry::open(
        &config.registry_db_path,
        &config.share_base_url,
    )?);

    if cli_flags.purge_expired {
        let purged = registry.purge_expired()?;
        println!("Purged {} expired share(s)", purged);
        return Ok(());
    }

    let reaper_handle = if config.reap_interval_secs > 0 {
        tracing::info!(
            "Expired-share reaper running every {}s",
            config.reap_interval_secs
        );
        Some(reaper::spawn_reaper(
            registry.clone(),
            Duration::from_secs(config.reap_interval_secs),
        ))
    } else {
        None
    };

    let allow_public = snipshare_server::config::env_flag_enabled("ALLOW_PUBLIC_ACCESS");
    if allow_public {
        tracing::warn!("Public access enabled - server will accept requests from any origin");
    }

    let bind_addr = snipshare_server::resolve_bind_address(&config, allow_public);
    if !bind_addr.ip().is_loopback() {
        tracing::warn!(
            "Binding to non-localhost address: {} - ensure proper security measures are in place",
            bind_addr
        );
    }

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    let actual_addr = listener.local_addr().unwrap_or(bind_addr);
    tracing::info!("SnipShare running at http://{}", actual_addr);
    tracing::info!("Share links use base URL {}", config.share_base_url);

    let state = AppState::with_registry(config, registry);
    let serve_result = serve_router(listener, state, allow_public, shutdown_signal()).await;

    if let Some(handle) = reaper_handle {
        handle.abort();
    }
    serve_result?;

    Ok(())
}

fn print_help() {
    println!("SnipShare Server\n");
    println!("Usage: snipshare-server [OPTIONS]\n");
    println!("Options:");
    println!("  --purge-expired   Delete expired shares and exit");
    println!("  --help            Show this help message");
    println!("\nEnvironment variables:");
    println!("  REGISTRY_DB_PATH  Share database path (default: ~/.cache/snipshare/registry.redb)");
    println!("  PORT              Server port (default: {})", DEFAULT_PORT);
    println!(
        "  SHARE_BASE_URL    Prefix for share links (default: http://127.0.0.1:PORT/api/snippets)"
    );
    println!("  MAX_SNIPPET_SIZE  Maximum snippet size in bytes (default: 10MB)");
    println!("  REAP_INTERVAL_SECS  Seconds between expiry sweeps (default: 0, disabled)");
    println!("  ALLOW_PUBLIC_ACCESS  Allow CORS from any origin");
    println!(
        "  BIND              Override bind address (e.g. 0.0.0.0:{})",
        DEFAULT_PORT
    );
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", err);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to install SIGTERM handler: {}", err);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
    tracing::info!("Shutdown signal received");
}
