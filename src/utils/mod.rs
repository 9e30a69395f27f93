//! Utility functions
//!
//! Provides input validation helpers.

pub mod validation;
