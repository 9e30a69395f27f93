use axum::Router;
use log::{info, warn};
use std::net::SocketAddr;
use tokio::net::TcpListener;

use crate::api::{AppState, router};
use crate::config::ServerConfig;
use crate::error::ServerError;
use crate::sandbox::SandboxRoot;
use crate::storage::FileOperations;

/// A bound, ready-to-serve file manager.
///
/// Construction establishes the sandbox root first; if that fails nothing is
/// bound and no request can ever reach a file operation.
pub struct Server {
    listener: TcpListener,
    app: Router,
    local_addr: SocketAddr,
}

impl Server {
    pub async fn new(config: &ServerConfig) -> Result<Self, ServerError> {
        let root = SandboxRoot::new(config.sandbox_root_path(), config.create_root)?;
        info!("Sandbox root directory: {}", root.path().display());

        let state = AppState::new(FileOperations::new(root), &config.root_label);

        let addr = config.socket_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .map_err(|source| ServerError::Bind {
                addr: addr.clone(),
                source,
            })?;
        let local_addr = listener
            .local_addr()
            .map_err(|source| ServerError::Bind { addr, source })?;

        info!("Server bound to {}", local_addr);

        Ok(Self {
            listener,
            app: router(state),
            local_addr,
        })
    }

    /// Address actually bound (useful when the configured port is 0)
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Serve requests until Ctrl-C.
    pub async fn start(self) -> Result<(), ServerError> {
        info!("Starting RAX file manager on http://{}", self.local_addr);

        axum::serve(self.listener, self.app)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(ServerError::Serve)
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Shutdown signal received"),
        Err(e) => warn!("Failed to listen for shutdown signal: {}", e),
    }
}
