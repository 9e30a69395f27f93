pub mod api;
pub mod config;
pub mod error;
pub mod middleware;
pub mod sandbox;
pub mod server;
pub mod storage;
pub mod utils;

pub use server::Server;
