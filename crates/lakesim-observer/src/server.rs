//! Binding and serving the observer.

use std::net::SocketAddr;
use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Where the observer listens.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// IP address to bind, e.g. `127.0.0.1`.
    pub host: String,
    /// TCP port.
    pub port: u16,
}

impl ServerConfig {
    /// The `host:port` pair as a socket address.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidAddress`] when `host` is not an IP
    /// literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let text = format!("{}:{}", self.host, self.port);
        text.parse()
            .map_err(|source| ServerError::InvalidAddress { text, source })
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_owned(),
            port: 8080,
        }
    }
}

/// Serve the observer routes on `config` until the task is aborted.
///
/// # Errors
///
/// Returns [`ServerError`] if the address is invalid, the port cannot be
/// bound, or the accept loop fails.
pub async fn start_server(config: &ServerConfig, state: Arc<AppState>) -> Result<(), ServerError> {
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "Observer listening");
    axum::serve(listener, build_router(state))
        .await
        .map_err(|source| ServerError::Serve { source })
}

/// Observer server failure.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured host and port do not form a socket address.
    #[error("invalid observer address {text}: {source}")]
    InvalidAddress {
        /// The `host:port` text that failed to parse.
        text: String,
        /// Parser error.
        source: std::net::AddrParseError,
    },

    /// The port could not be bound.
    #[error("cannot bind observer to {addr}: {source}")]
    Bind {
        /// Address that was tried.
        addr: SocketAddr,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The accept loop stopped with an error.
    #[error("observer stopped: {source}")]
    Serve {
        /// Underlying I/O error.
        source: std::io::Error,
    },
}
