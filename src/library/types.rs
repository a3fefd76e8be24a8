//! Book and translation types
//!
//! The canonical wire contract: `id` (never `_id`), snake_case fields,
//! translations nested under their book in insertion order.

use chrono::{DateTime, NaiveDateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// A translation of a book. `file_id` presence means a file has been
/// uploaded and is viewable/downloadable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Translation {
    pub id: String,

    pub book_id: String,

    /// Target language of this translation
    pub language: String,

    #[serde(default)]
    pub filename: Option<String>,

    #[serde(default)]
    pub file_id: Option<String>,

    /// Model or attribution string
    #[serde(default)]
    pub translated_by: Option<String>,
}

impl Translation {
    pub fn has_file(&self) -> bool {
        self.file_id.is_some()
    }
}

/// A book in the collection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Book {
    pub id: String,

    pub title: String,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default)]
    pub year: Option<i32>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub original_language: Option<String>,

    /// Name of the uploaded original source file, when one exists
    #[serde(default)]
    pub source_filename: Option<String>,

    #[serde(default)]
    pub source_file_id: Option<String>,

    /// Server-side creation timestamp, ISO 8601 when present
    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub translated_books: Vec<Translation>,
}

impl Book {
    /// Creation timestamp for ordering. Missing or unparsable stamps
    /// sort as the Unix epoch, i.e. as the oldest possible entry.
    pub fn created_timestamp(&self) -> DateTime<Utc> {
        self.created_at
            .as_deref()
            .and_then(parse_timestamp)
            .unwrap_or(DateTime::<Utc>::UNIX_EPOCH)
    }

    pub fn display_author(&self) -> &str {
        self.author.as_deref().unwrap_or("Unknown author")
    }

    pub fn has_source_file(&self) -> bool {
        self.source_file_id.is_some()
    }
}

/// Accept RFC 3339 stamps and the naive `isoformat()` strings older
/// backend records carry (no offset, assumed UTC).
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(stamp) = DateTime::parse_from_rfc3339(raw) {
        return Some(stamp.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .ok()
        .map(|naive| Utc.from_utc_datetime(&naive))
}
