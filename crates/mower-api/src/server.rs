//! Listener setup for the mock mower backend.
//!
//! The app on a phone reaches the server over the LAN, so the default
//! bind is every interface on port 3000. [`start_server`] serves until the
//! caller's shutdown future resolves; the position ticker is owned by the
//! caller and is not touched here.

use std::future::Future;
use std::net::{AddrParseError, IpAddr, SocketAddr};
use std::sync::Arc;

use mower_core::ServerSection;
use tokio::net::TcpListener;
use tracing::info;

use crate::router::build_router;
use crate::state::AppState;

/// Where the status API listens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    /// IP address to bind; `0.0.0.0` reaches devices on the LAN.
    pub host: String,
    /// TCP port the app is pointed at.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::from(&ServerSection::default())
    }
}

impl From<&ServerSection> for ServerConfig {
    fn from(section: &ServerSection) -> Self {
        Self {
            host: section.host.clone(),
            port: section.port,
        }
    }
}

impl ServerConfig {
    /// Resolve the bind address. Hostnames are not looked up.
    ///
    /// # Errors
    ///
    /// Returns [`ServerError::InvalidHost`] if `host` is not an IP literal.
    pub fn socket_addr(&self) -> Result<SocketAddr, ServerError> {
        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ServerError::InvalidHost {
                host: self.host.clone(),
                source,
            })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Serve the status API until `shutdown` resolves.
///
/// In-flight requests finish before this returns.
///
/// # Errors
///
/// Returns [`ServerError::InvalidHost`] or [`ServerError::Bind`] before
/// serving starts, and [`ServerError::Serve`] if the accept loop fails.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: Arc<AppState>,
    shutdown: F,
) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = config.socket_addr()?;
    let listener = TcpListener::bind(addr)
        .await
        .map_err(|source| ServerError::Bind { addr, source })?;

    info!(%addr, "Mower status server listening");
    info!("Status endpoint: http://localhost:{}/api/status", config.port);

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(ServerError::Serve)?;

    info!("Mower status server stopped");
    Ok(())
}

/// Failures bringing up or running the listener.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// The configured host is not an IP address.
    #[error("invalid host {host:?}: {source}")]
    InvalidHost {
        /// Host as configured.
        host: String,
        /// Why it did not parse.
        source: AddrParseError,
    },

    /// The port is taken or not permitted.
    #[error("bind failed on {addr}: {source}")]
    Bind {
        /// Address that could not be bound.
        addr: SocketAddr,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The accept loop stopped with an error.
    #[error("serve error: {0}")]
    Serve(std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_binds_all_interfaces_on_3000() {
        let addr = ServerConfig::default().socket_addr();
        assert!(addr.is_ok());
        let Ok(addr) = addr else { return };
        assert!(addr.ip().is_unspecified());
        assert_eq!(addr.port(), 3000);
    }

    #[test]
    fn follows_configured_section() {
        let section = ServerSection {
            host: "127.0.0.1".to_owned(),
            port: 4100,
        };
        let addr = ServerConfig::from(&section).socket_addr();
        assert!(matches!(addr, Ok(a) if a.ip().is_loopback() && a.port() == 4100));
    }

    #[test]
    fn rejects_hostname() {
        let config = ServerConfig {
            host: "mower.local".to_owned(),
            port: 3000,
        };
        assert!(matches!(
            config.socket_addr(),
            Err(ServerError::InvalidHost { host, .. }) if host == "mower.local"
        ));
    }

    #[tokio::test]
    async fn reports_port_in_use() {
        let Ok(taken) = TcpListener::bind("127.0.0.1:0").await else {
            return;
        };
        let Ok(addr) = taken.local_addr() else { return };
        let config = ServerConfig {
            host: "127.0.0.1".to_owned(),
            port: addr.port(),
        };

        let result = start_server(&config, AppState::with_defaults(), async {}).await;

        assert!(matches!(result, Err(ServerError::Bind { .. })));
    }
}
