//! Path sandboxing
//!
//! Confines every user-supplied path to a single root directory.

mod resolver;
mod root;

pub use resolver::PathResolver;
pub use root::SandboxRoot;
