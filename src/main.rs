//! Maintenance API Gateway
//!
//! Relays client requests to the backend microservices and normalizes their
//! responses.
//!
//! # Architecture Overview
//!
//! ```text
//!                              ┌──────────────────────────────────────────────────┐
//!                              │                    GATEWAY                        │
//!                              │                                                   │
//!     Client Request           │  ┌─────────┐    ┌──────────┐    ┌─────────────┐  │
//!     ─────────────────────────┼─▶│  http   │───▶│ routing  │───▶│  registry   │  │
//!                              │  │ server  │    │  table   │    │ (base URLs) │  │
//!                              │  └─────────┘    └──────────┘    └──────┬──────┘  │
//!                              │                                        │         │
//!                              │                                        ▼         │
//!     Client Response          │  ┌──────────┐   ┌────────────┐  ┌─────────────┐  │
//!     ◀────────────────────────┼──│ response │◀──│ normalize/ │◀─│  forwarder  │◀─┼──── user / car /
//!                              │  │ envelope │   │   login    │  │  (reqwest)  │  │     damage
//!                              │  └──────────┘   └────────────┘  └─────────────┘  │
//!                              │                                                   │
//!                              │  config · observability · lifecycle              │
//!                              └──────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use clap::Parser;

use maintenance_gateway::config::{loader, validate_config, ConfigError};
use maintenance_gateway::lifecycle::{self, signals, Shutdown};
use maintenance_gateway::observability::init_logging;

#[derive(Parser, Debug)]
#[command(name = "maintenance-gateway")]
#[command(about = "API gateway for the car, damage and user microservices", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long, env = "GATEWAY_CONFIG")]
    config: Option<PathBuf>,

    /// Interface to bind, overrides the config file.
    #[arg(long)]
    host: Option<String>,

    /// Port to listen on, overrides the config file and `PORT`.
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match cli.config.as_deref() {
        Some(path) => loader::read_config_file(path)?,
        None => Default::default(),
    };
    loader::apply_process_env(&mut config)?;
    if let Some(host) = cli.host {
        config.listener.host = host;
    }
    if let Some(port) = cli.port {
        config.listener.port = port;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    init_logging(&config.observability);

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        bind_address = %config.bind_address(),
        user = %config.services.user_url,
        car = %config.services.car_url,
        damage = %config.services.damage_url,
        request_timeout_secs = config.timeouts.request_secs,
        "Configuration loaded"
    );

    let shutdown = Shutdown::new();
    let running = lifecycle::start(config, &shutdown).await?;
    signals::trigger_on_signal(shutdown.clone());

    running.handle.await??;

    tracing::info!("Shutdown complete");
    Ok(())
}
