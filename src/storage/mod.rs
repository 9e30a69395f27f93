//! File system storage management
//!
//! File operations confined to the sandbox root.

pub mod filesystem;
pub mod operations;
pub mod results;
mod search;

pub use filesystem::EntryKind;
pub use operations::FileOperations;
pub use results::{DirectoryListing, ListingEntry, SearchResults};
