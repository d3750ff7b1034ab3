//! GeoFleet CLI - Command-line interface
//!
//! This binary serves the live driver-position API over HTTP, with a
//! background sweeper expiring drivers that stop reporting.

mod error;

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use clap::Parser;
use tokio_util::sync::CancellationToken;
use tracing::info;

use geofleet::api;
use geofleet::logging::{default_log_file, init_logging};
use geofleet::registry::{
    DriverRegistry, ExpirySweeper, RegistryConfig, SweeperConfig, DEFAULT_HISTORY_CAPACITY,
    DEFAULT_SWEEP_INTERVAL_SECS, DEFAULT_VALIDITY_WINDOW,
};

use error::CliError;

#[derive(Debug, Parser)]
#[command(name = "geofleet")]
#[command(about = "Serve the live driver-position API", long_about = None)]
struct Args {
    /// Address to bind the HTTP server to
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind_addr: SocketAddr,

    /// Location fixes kept per driver
    #[arg(long, default_value_t = DEFAULT_HISTORY_CAPACITY)]
    history_capacity: usize,

    /// Seconds a reported location stays live
    #[arg(long, default_value_t = DEFAULT_VALIDITY_WINDOW.as_secs())]
    ttl_secs: u64,

    /// Seconds between expiry sweep passes
    #[arg(long, default_value_t = DEFAULT_SWEEP_INTERVAL_SECS)]
    sweep_interval_secs: u64,

    /// Directory for log files (stdout only when omitted)
    #[arg(long)]
    log_dir: Option<String>,
}

#[tokio::main]
async fn main() {
    let args = Args::parse();

    if let Err(err) = run(args).await {
        err.exit();
    }
}

async fn run(args: Args) -> Result<(), CliError> {
    let _logging_guard = init_logging(args.log_dir.as_deref(), default_log_file())
        .map_err(CliError::LoggingInit)?;

    let registry_config = RegistryConfig::new()
        .with_history_capacity(args.history_capacity)
        .with_validity_window(Duration::from_secs(args.ttl_secs));
    let registry = Arc::new(DriverRegistry::new(registry_config));

    let sweeper_config =
        SweeperConfig::new().with_interval(Duration::from_secs(args.sweep_interval_secs));
    let sweeper = ExpirySweeper::new(Arc::clone(&registry), sweeper_config)?;

    // Print banner
    println!("GeoFleet v{}", geofleet::VERSION);
    println!("================================");
    println!();
    println!("Bind address:   {}", args.bind_addr);
    println!("Driver TTL:     {}s", args.ttl_secs);
    println!("Sweep interval: {}s", args.sweep_interval_secs);
    println!("History depth:  {} fixes", args.history_capacity);
    println!();
    println!("Press Ctrl+C to stop");
    println!();

    let shutdown = CancellationToken::new();
    let sweeper_handle = tokio::spawn(sweeper.run(shutdown.clone()));

    // Ctrl+C trips the shutdown token
    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown signal received");
                shutdown.cancel();
            }
        });
    }

    let served = api::serve(
        args.bind_addr,
        Arc::clone(&registry),
        shutdown.clone().cancelled_owned(),
    )
    .await;

    // Stop the sweeper even when the server exited with an error
    shutdown.cancel();
    let _ = sweeper_handle.await;

    served.map_err(CliError::Serve)?;

    println!();
    println!("Server stopped.");
    Ok(())
}
