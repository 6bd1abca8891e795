//! One Call weather proxy.
//!
//! Forwards the raw query string of every inbound request to the One Call
//! endpoint and answers with the projected JSON snapshot.
//!
//! ```text
//!     Client ──GET /?lat=..&lon=..&appid=..──▶ proxy handler
//!                                                  │
//!                                                  ▼
//!                           GET <base_url>?lat=..&lon=..&appid=..
//!                                                  │
//!     Client ◀──200 application/json──── decode → encode
//! ```
//!
//! With no arguments the proxy listens on 0.0.0.0:8080 and calls
//! api.openweathermap.org with no timeout.

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use onecall_proxy::config::load_or_default;
use onecall_proxy::observability::{logging, metrics};
use onecall_proxy::{HttpServer, Shutdown};

#[derive(Parser)]
#[command(name = "onecall-proxy")]
#[command(about = "Reverse proxy for the OpenWeather One Call API", long_about = None)]
struct Cli {
    /// TOML configuration file; built-in defaults when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Validate the configuration and exit.
    #[arg(long)]
    check: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = load_or_default(cli.config.as_deref())?;
    if cli.check {
        println!("configuration ok");
        return Ok(());
    }

    logging::init_logging(config.observability.log_format);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.listener.bind_address,
        upstream = %config.upstream.base_url,
        timeout_secs = ?config.upstream.timeout_secs,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config)?;
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
