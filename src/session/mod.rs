//! Session management
//!
//! Single source of truth for "who is signed in and with what
//! privilege", persisted in the local key-value store and re-read on
//! every query. The admin flag here is a UI hint only; the server
//! re-checks authorization on every write using the bearer token.

mod store;
mod types;

pub use store::{SessionEvent, SessionStore};
pub use types::{parse_admin_flag, Session, StoredUser};
