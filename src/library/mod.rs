//! Library module for the book collection
//!
//! Holds the fetched book snapshot, the pure filter/sort view functions
//! applied to it, and the locally persisted view preferences.

mod cache;
mod types;
mod view;

pub use cache::{LibraryCache, LoadState};
pub use types::{Book, Translation};
pub use view::{filtered, sorted, SortKey, ViewMode, ViewPreferences};
