//! Book collection cache
//!
//! One in-memory snapshot of the collection per app, replaced wholesale
//! by `refresh()` and patched optimistically after successful writes.
//! A failed refresh keeps the previous snapshot and surfaces an error
//! state instead.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::api::ApiTransport;
use crate::error::Result;

use super::{Book, Translation};

/// Mutually exclusive fetch states. "Loaded but empty" is `Loaded` with
/// an empty snapshot, distinct from both `Loading` and `Error`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadState {
    Loading,
    Error(String),
    Loaded,
}

/// Shared cache of the fetched book collection
#[derive(Clone, Default)]
pub struct LibraryCache {
    books: Arc<RwLock<Vec<Book>>>,
    state: Arc<RwLock<LoadState>>,
}

impl Default for LoadState {
    fn default() -> Self {
        LoadState::Loading
    }
}

impl LibraryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fetch the full collection and replace the snapshot.
    ///
    /// On failure the previous snapshot is retained; the error is both
    /// returned and left in [`LoadState::Error`] for the UI.
    pub async fn refresh(&self, api: &dyn ApiTransport) -> Result<()> {
        {
            let mut state = self.state.write().await;
            *state = LoadState::Loading;
        }
        match api.list_books().await {
            Ok(list) => {
                tracing::debug!("Library refreshed with {} books", list.len());
                *self.books.write().await = list;
                *self.state.write().await = LoadState::Loaded;
                Ok(())
            }
            Err(err) => {
                let message = err.user_message("Failed to load books");
                tracing::warn!("Library refresh failed: {}", message);
                *self.state.write().await = LoadState::Error(message);
                Err(err)
            }
        }
    }

    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    /// Cloned snapshot of the raw collection
    pub async fn books(&self) -> Vec<Book> {
        self.books.read().await.clone()
    }

    pub async fn get(&self, book_id: &str) -> Option<Book> {
        self.books
            .read()
            .await
            .iter()
            .find(|book| book.id == book_id)
            .cloned()
    }

    pub async fn len(&self) -> usize {
        self.books.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.books.read().await.is_empty()
    }

    /// Add a freshly created book to the snapshot
    pub async fn insert(&self, book: Book) {
        self.books.write().await.push(book);
    }

    /// Replace a book with the server's updated copy
    pub async fn apply_update(&self, updated: Book) {
        let mut books = self.books.write().await;
        if let Some(existing) = books.iter_mut().find(|book| book.id == updated.id) {
            *existing = updated;
        }
    }

    /// Record a successful original-source upload
    pub async fn apply_source_upload(&self, book_id: &str, filename: &str, file_id: &str) {
        let mut books = self.books.write().await;
        if let Some(book) = books.iter_mut().find(|book| book.id == book_id) {
            book.source_filename = Some(filename.to_string());
            book.source_file_id = Some(file_id.to_string());
        }
    }

    /// Record a successful translation-file replacement
    pub async fn apply_translation_file(
        &self,
        book_id: &str,
        translation_id: &str,
        filename: &str,
        file_id: &str,
    ) {
        let mut books = self.books.write().await;
        let Some(book) = books.iter_mut().find(|book| book.id == book_id) else {
            return;
        };
        if let Some(translation) = book
            .translated_books
            .iter_mut()
            .find(|translation| translation.id == translation_id)
        {
            translation.filename = Some(filename.to_string());
            translation.file_id = Some(file_id.to_string());
        }
    }

    /// Append a translation created after the book itself
    pub async fn apply_new_translation(&self, translation: Translation) {
        let mut books = self.books.write().await;
        if let Some(book) = books
            .iter_mut()
            .find(|book| book.id == translation.book_id)
        {
            book.translated_books.push(translation);
        }
    }
}
