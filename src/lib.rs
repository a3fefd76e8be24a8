//! LitMT Client Core
//!
//! Client-side state management for the LitMT literary
//! machine-translation platform: sessions, authorization gating, the
//! book collection view model, and upload coordination, all against the
//! remote LitMT HTTP API.
//!
//! # Modules
//!
//! - `session`: persisted login state with change notifications
//! - `gate`: per-page authorization state machine
//! - `library`: book collection cache and pure filter/sort views
//! - `upload`: create-then-upload sequencing with settle-all batches
//! - `api`: typed HTTP client and the transport seam
//! - `accounts` / `suggestions`: the form flows built on the above

pub mod accounts;
pub mod api;
pub mod config;
pub mod error;
pub mod gate;
pub mod library;
pub mod session;
pub mod storage;
pub mod suggestions;
pub mod upload;
pub mod validate;

pub use config::Config;
pub use error::{ClientError, Result};
