//! Startup orchestration.
//!
//! # Responsibilities
//! - Build the registry, forwarder and route table from a validated config
//! - Bind the listener last, so traffic only arrives when everything is ready
//! - Run the server in the background until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - The bound address is reported back (port 0 binds an ephemeral port)

use std::net::SocketAddr;

use tokio::net::TcpListener;
use tokio::task::JoinHandle;

use crate::config::GatewayConfig;
use crate::http::{GatewayServer, ServerError};
use crate::lifecycle::shutdown::Shutdown;

/// Errors raised while starting the gateway.
#[derive(Debug, thiserror::Error)]
pub enum StartupError {
    #[error(transparent)]
    Server(#[from] ServerError),

    #[error("failed to bind {address}: {source}")]
    Bind {
        address: String,
        #[source]
        source: std::io::Error,
    },
}

/// A gateway serving in a background task.
#[derive(Debug)]
pub struct RunningGateway {
    pub local_addr: SocketAddr,
    pub handle: JoinHandle<Result<(), std::io::Error>>,
}

/// Start serving `config`; the server stops when `shutdown` is triggered.
pub async fn start(config: GatewayConfig, shutdown: &Shutdown) -> Result<RunningGateway, StartupError> {
    let address = config.bind_address();
    let server = GatewayServer::new(&config)?;

    let bind_error = |source| StartupError::Bind {
        address: address.clone(),
        source,
    };
    let listener = TcpListener::bind(&address).await.map_err(bind_error)?;
    let local_addr = listener.local_addr().map_err(bind_error)?;

    tracing::info!(address = %local_addr, "Listening for connections");

    let handle = tokio::spawn(server.run(listener, shutdown.subscribe()));
    Ok(RunningGateway { local_addr, handle })
}
