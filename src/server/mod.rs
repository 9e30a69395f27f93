//! Server core functionality
//!
//! This module contains the HTTP server: sandbox initialization, listener
//! binding, and the serve loop.

pub mod core;

pub use self::core::Server;
