//! RAX File Manager - Entry Point
//!
//! A web file manager confined to a single sandboxed directory.

use log::{error, info};
use std::process;

use rax_file_manager::Server;
use rax_file_manager::config::ServerConfig;
use rax_file_manager::error::ServerError;

#[tokio::main]
async fn main() {
    // RUST_LOG overrides the default filter
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    info!("Launching file manager...");

    if let Err(e) = run().await {
        error!("{}", e);
        process::exit(1);
    }
}

async fn run() -> Result<(), ServerError> {
    let config = ServerConfig::load()?;
    let server = Server::new(&config).await?;
    server.start().await
}
