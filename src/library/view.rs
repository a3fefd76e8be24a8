//! Pure view functions over the book collection
//!
//! The displayed list is always `sorted(filtered(raw, query), key)`:
//! both functions are recomputed from the raw snapshot and never mutate
//! it. Sort and view-mode preferences persist locally across sessions,
//! independent of the collection itself.

use std::cmp::Ordering;
use std::fmt;

use crate::storage::{KeyValueStorage, KEY_SORT_BY, KEY_VIEW_MODE};

use super::Book;

/// Sort order for the library listing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    TitleAsc,
    TitleDesc,
    AuthorAsc,
    AuthorDesc,
    LanguageAsc,
    LanguageDesc,
    CreatedDesc,
    CreatedAsc,
}

impl SortKey {
    pub const ALL: [SortKey; 8] = [
        SortKey::TitleAsc,
        SortKey::TitleDesc,
        SortKey::AuthorAsc,
        SortKey::AuthorDesc,
        SortKey::LanguageAsc,
        SortKey::LanguageDesc,
        SortKey::CreatedDesc,
        SortKey::CreatedAsc,
    ];

    /// Stable identifier, also the persisted storage value
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::TitleAsc => "title-asc",
            SortKey::TitleDesc => "title-desc",
            SortKey::AuthorAsc => "author-asc",
            SortKey::AuthorDesc => "author-desc",
            SortKey::LanguageAsc => "language-asc",
            SortKey::LanguageDesc => "language-desc",
            SortKey::CreatedDesc => "created-desc",
            SortKey::CreatedAsc => "created-asc",
        }
    }

    /// Parse a persisted value; unknown input yields `None` so callers
    /// fall back to the default
    pub fn parse(raw: &str) -> Option<SortKey> {
        Self::ALL.into_iter().find(|key| key.as_str() == raw)
    }
}

impl Default for SortKey {
    fn default() -> Self {
        SortKey::CreatedDesc
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Library layout preference
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    Grid,
    List,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Grid => "grid",
            ViewMode::List => "list",
        }
    }

    pub fn parse(raw: &str) -> Option<ViewMode> {
        match raw {
            "grid" => Some(ViewMode::Grid),
            "list" => Some(ViewMode::List),
            _ => None,
        }
    }
}

impl Default for ViewMode {
    fn default() -> Self {
        ViewMode::Grid
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Locally persisted view preferences. These survive both `refresh()`
/// and logout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ViewPreferences {
    pub sort_key: SortKey,
    pub view_mode: ViewMode,
}

impl ViewPreferences {
    /// Load from storage; unknown or missing values fall back to the
    /// defaults
    pub fn load(storage: &dyn KeyValueStorage) -> Self {
        let sort_key = storage
            .get(KEY_SORT_BY)
            .ok()
            .flatten()
            .as_deref()
            .and_then(SortKey::parse)
            .unwrap_or_default();
        let view_mode = storage
            .get(KEY_VIEW_MODE)
            .ok()
            .flatten()
            .as_deref()
            .and_then(ViewMode::parse)
            .unwrap_or_default();
        Self {
            sort_key,
            view_mode,
        }
    }

    /// Persist; write failures are logged and swallowed
    pub fn store(&self, storage: &dyn KeyValueStorage) {
        if let Err(err) = storage.set(KEY_SORT_BY, self.sort_key.as_str()) {
            tracing::warn!("Failed to persist sort preference: {}", err);
        }
        if let Err(err) = storage.set(KEY_VIEW_MODE, self.view_mode.as_str()) {
            tracing::warn!("Failed to persist view mode: {}", err);
        }
    }
}

/// Case-insensitive substring filter over title, author and original
/// language. A book matches when any of the three fields contains the
/// query; the empty query matches everything.
pub fn filtered(books: &[Book], query: &str) -> Vec<Book> {
    let query = query.to_lowercase();
    books
        .iter()
        .filter(|book| matches_query(book, &query))
        .cloned()
        .collect()
}

fn matches_query(book: &Book, query: &str) -> bool {
    let field_matches =
        |field: Option<&str>| field.is_some_and(|text| text.to_lowercase().contains(query));
    book.title.to_lowercase().contains(query)
        || field_matches(book.author.as_deref())
        || field_matches(book.original_language.as_deref())
}

/// Sort a filtered list. String keys compare case-insensitively; the
/// created keys compare parsed timestamps with missing or unparsable
/// stamps pinned to the epoch (oldest). The sort is stable, so it is
/// idempotent.
pub fn sorted(books: &[Book], key: SortKey) -> Vec<Book> {
    let mut list = books.to_vec();
    match key {
        SortKey::TitleAsc => list.sort_by(|a, b| compare_ci(&a.title, &b.title)),
        SortKey::TitleDesc => list.sort_by(|a, b| compare_ci(&b.title, &a.title)),
        SortKey::AuthorAsc => {
            list.sort_by(|a, b| compare_ci_opt(a.author.as_deref(), b.author.as_deref()))
        }
        SortKey::AuthorDesc => {
            list.sort_by(|a, b| compare_ci_opt(b.author.as_deref(), a.author.as_deref()))
        }
        SortKey::LanguageAsc => list.sort_by(|a, b| {
            compare_ci_opt(
                a.original_language.as_deref(),
                b.original_language.as_deref(),
            )
        }),
        SortKey::LanguageDesc => list.sort_by(|a, b| {
            compare_ci_opt(
                b.original_language.as_deref(),
                a.original_language.as_deref(),
            )
        }),
        SortKey::CreatedAsc => {
            list.sort_by(|a, b| a.created_timestamp().cmp(&b.created_timestamp()))
        }
        SortKey::CreatedDesc => {
            list.sort_by(|a, b| b.created_timestamp().cmp(&a.created_timestamp()))
        }
    }
    list
}

fn compare_ci(a: &str, b: &str) -> Ordering {
    a.to_lowercase().cmp(&b.to_lowercase())
}

fn compare_ci_opt(a: Option<&str>, b: Option<&str>) -> Ordering {
    compare_ci(a.unwrap_or(""), b.unwrap_or(""))
}
