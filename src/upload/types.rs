//! Upload form and report types

use crate::api::{FilePayload, NewBook};
use crate::library::Book;
use crate::validate::parse_year;

/// One translation row on the add-book form. A row without a file is
/// skipped during upload; it never becomes a persisted record.
#[derive(Debug, Clone, Default)]
pub struct TranslationRow {
    pub language: String,
    pub translated_by: Option<String>,
    pub file: Option<FilePayload>,
}

/// The add-book form as submitted
#[derive(Debug, Clone, Default)]
pub struct NewBookForm {
    pub title: String,
    pub author: String,
    /// Raw year input; unparsable text means "not provided"
    pub year_raw: String,
    pub description: String,
    pub original_language: String,
    /// Inline original text, used when no source file is attached
    pub source_text: String,
    pub source_file: Option<FilePayload>,
    pub translations: Vec<TranslationRow>,
}

impl NewBookForm {
    /// Scalar metadata for the create request: fields trimmed, blanks
    /// dropped, the year parsed leniently
    pub fn metadata(&self) -> NewBook {
        NewBook {
            title: self.title.trim().to_string(),
            author: non_blank(&self.author),
            year: parse_year(&self.year_raw),
            description: non_blank(&self.description),
            original_language: non_blank(&self.original_language),
            source: non_blank(&self.source_text),
        }
    }
}

fn non_blank(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// A single upload that failed while its siblings proceeded
#[derive(Debug, Clone)]
pub struct UploadFailure {
    /// Human-readable label, e.g. `translation French`
    pub label: String,
    pub error: String,
}

/// Aggregate outcome of the settle-all upload batch
#[derive(Debug, Clone, Default)]
pub struct UploadReport {
    pub uploaded: usize,
    pub failed: usize,
    pub failures: Vec<UploadFailure>,
}

impl UploadReport {
    pub fn is_clean(&self) -> bool {
        self.failed == 0
    }

    /// Status line for the UI, e.g. `2 uploaded, 1 failed`
    pub fn summary(&self) -> String {
        format!("{} uploaded, {} failed", self.uploaded, self.failed)
    }
}

/// A successful submission: the created book plus the upload outcome.
/// Creation success gates navigation; upload completeness does not.
#[derive(Debug, Clone)]
pub struct Submission {
    pub book: Book,
    pub report: UploadReport,
}
