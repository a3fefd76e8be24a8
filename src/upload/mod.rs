//! Upload coordination
//!
//! Turns one add-book form submission into a create request followed by
//! a concurrent batch of file uploads with per-file outcome reporting.

mod coordinator;
mod types;

pub use coordinator::UploadCoordinator;
pub use types::{NewBookForm, Submission, TranslationRow, UploadFailure, UploadReport};
