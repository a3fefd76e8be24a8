//! LitMT backend API
//!
//! [`ApiTransport`] is the seam between the state-management components
//! and the network: the real [`ApiClient`] implements it over HTTP, and
//! tests substitute a recording mock. Components take the trait, never
//! the concrete client.

mod client;
mod types;

use async_trait::async_trait;

pub use client::ApiClient;
pub use types::{
    BookUpdate, FilePayload, LoginPayload, NewBook, RegisterRequest, SourceUpload, SuggestionIn,
    SuggestionOut,
};

use crate::error::Result;
use crate::library::{Book, Translation};
use crate::session::StoredUser;

/// The backend operations the client core depends on.
///
/// `token` parameters carry the session's bearer credential when one
/// exists; implementations decide what an absent token means (the real
/// client falls back to the configured non-production key, else sends
/// the request anonymously).
#[async_trait]
pub trait ApiTransport: Send + Sync {
    async fn register(&self, request: &RegisterRequest) -> Result<StoredUser>;

    async fn login(&self, username: &str, password: &str) -> Result<(StoredUser, Option<String>)>;

    /// Full collection snapshot; all filtering is client-side
    async fn list_books(&self) -> Result<Vec<Book>>;

    async fn create_book(&self, book: &NewBook, token: Option<&str>) -> Result<Book>;

    async fn update_book(
        &self,
        book_id: &str,
        update: &BookUpdate,
        token: Option<&str>,
    ) -> Result<Book>;

    async fn upload_source(
        &self,
        book_id: &str,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<SourceUpload>;

    async fn create_translation(
        &self,
        book_id: &str,
        language: &str,
        translated_by: Option<&str>,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<Translation>;

    async fn replace_translation_file(
        &self,
        translation_id: &str,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<Translation>;

    async fn view_source(&self, book_id: &str) -> Result<String>;

    async fn view_translation(&self, translation_id: &str) -> Result<String>;

    async fn download_translation(&self, translation_id: &str) -> Result<Vec<u8>>;

    async fn suggest_book(&self, suggestion: &SuggestionIn, token: &str) -> Result<SuggestionOut>;

    /// Admin-only review listing
    async fn list_suggestions(
        &self,
        only_needing_review: bool,
        token: &str,
    ) -> Result<Vec<SuggestionOut>>;

    async fn my_suggestions(&self, token: &str) -> Result<Vec<SuggestionOut>>;

    async fn acknowledge_suggestion(
        &self,
        suggestion_id: &str,
        token: &str,
    ) -> Result<SuggestionOut>;
}

/// Recording mock transport for tests
#[cfg(test)]
pub(crate) mod testing {
    use std::collections::HashSet;

    use async_trait::async_trait;
    use parking_lot::Mutex;
    use serde_json::json;

    use super::*;
    use crate::error::ClientError;

    /// Scripted [`ApiTransport`] that records every call it receives
    #[derive(Default)]
    pub struct MockTransport {
        /// One entry per network call, e.g. `"create_book The Trial"`
        pub calls: Mutex<Vec<String>>,
        /// Books returned by `list_books`
        pub books: Vec<Book>,
        pub fail_list: bool,
        /// Simulated create-book failure: status + server detail
        pub fail_create: Option<(u16, String)>,
        pub fail_source_upload: bool,
        /// Languages whose translation upload answers 500
        pub fail_translation_languages: HashSet<String>,
    }

    impl MockTransport {
        pub fn record(&self, entry: String) {
            self.calls.lock().push(entry);
        }

        pub fn call_count(&self) -> usize {
            self.calls.lock().len()
        }

        pub fn calls_matching(&self, prefix: &str) -> usize {
            self.calls
                .lock()
                .iter()
                .filter(|call| call.starts_with(prefix))
                .count()
        }

        fn server_error(detail: &str) -> ClientError {
            ClientError::Api {
                status: 500,
                detail: Some(detail.to_string()),
            }
        }
    }

    pub fn test_user(username: &str) -> StoredUser {
        StoredUser {
            id: format!("user-{username}"),
            username: username.to_string(),
            email: Some(format!("{username}@litmt.org")),
            isadmin: json!(false),
        }
    }

    pub fn test_book(id: &str, title: &str) -> Book {
        Book {
            id: id.to_string(),
            title: title.to_string(),
            author: None,
            year: None,
            description: None,
            original_language: None,
            source_filename: None,
            source_file_id: None,
            created_at: None,
            translated_books: Vec::new(),
        }
    }

    fn test_translation(book_id: &str, language: &str, filename: &str) -> Translation {
        Translation {
            id: format!("t-{language}"),
            book_id: book_id.to_string(),
            language: language.to_string(),
            filename: Some(filename.to_string()),
            file_id: Some(format!("f-{language}")),
            translated_by: None,
        }
    }

    #[async_trait]
    impl ApiTransport for MockTransport {
        async fn register(&self, request: &RegisterRequest) -> Result<StoredUser> {
            self.record(format!("register {}", request.username));
            Ok(test_user(&request.username))
        }

        async fn login(
            &self,
            username: &str,
            _password: &str,
        ) -> Result<(StoredUser, Option<String>)> {
            self.record(format!("login {username}"));
            Ok((test_user(username), Some("jwt-token".to_string())))
        }

        async fn list_books(&self) -> Result<Vec<Book>> {
            self.record("list_books".to_string());
            if self.fail_list {
                return Err(Self::server_error("Database unavailable"));
            }
            Ok(self.books.clone())
        }

        async fn create_book(&self, book: &NewBook, _token: Option<&str>) -> Result<Book> {
            self.record(format!("create_book {}", book.title));
            if let Some((status, detail)) = &self.fail_create {
                return Err(ClientError::Api {
                    status: *status,
                    detail: Some(detail.clone()),
                });
            }
            Ok(test_book("book-1", &book.title))
        }

        async fn update_book(
            &self,
            book_id: &str,
            update: &BookUpdate,
            _token: Option<&str>,
        ) -> Result<Book> {
            self.record(format!("update_book {book_id}"));
            Ok(test_book(
                book_id,
                update.title.as_deref().unwrap_or("Untitled"),
            ))
        }

        async fn upload_source(
            &self,
            book_id: &str,
            file: &FilePayload,
            _token: Option<&str>,
        ) -> Result<SourceUpload> {
            self.record(format!("upload_source {book_id} {}", file.filename));
            if self.fail_source_upload {
                return Err(Self::server_error("Failed to store source file"));
            }
            Ok(SourceUpload {
                source_filename: file.filename.clone(),
                source_file_id: "source-file-1".to_string(),
            })
        }

        async fn create_translation(
            &self,
            book_id: &str,
            language: &str,
            _translated_by: Option<&str>,
            file: &FilePayload,
            _token: Option<&str>,
        ) -> Result<Translation> {
            self.record(format!("create_translation {book_id} {language}"));
            if self.fail_translation_languages.contains(language) {
                return Err(Self::server_error("Failed to create translation record"));
            }
            Ok(test_translation(book_id, language, &file.filename))
        }

        async fn replace_translation_file(
            &self,
            translation_id: &str,
            file: &FilePayload,
            _token: Option<&str>,
        ) -> Result<Translation> {
            self.record(format!("replace_translation_file {translation_id}"));
            Ok(test_translation("book-1", "unknown", &file.filename))
        }

        async fn view_source(&self, book_id: &str) -> Result<String> {
            self.record(format!("view_source {book_id}"));
            Ok(String::new())
        }

        async fn view_translation(&self, translation_id: &str) -> Result<String> {
            self.record(format!("view_translation {translation_id}"));
            Ok(String::new())
        }

        async fn download_translation(&self, translation_id: &str) -> Result<Vec<u8>> {
            self.record(format!("download_translation {translation_id}"));
            Ok(Vec::new())
        }

        async fn suggest_book(
            &self,
            suggestion: &SuggestionIn,
            _token: &str,
        ) -> Result<SuggestionOut> {
            self.record(format!("suggest_book {}", suggestion.title));
            Ok(SuggestionOut {
                id: "s-1".to_string(),
                title: suggestion.title.clone(),
                author: suggestion.author.clone(),
                original_language: suggestion.original_language.clone(),
                description: suggestion.description.clone(),
                submitter_id: None,
                submitter_username: None,
                created_at: None,
                needs_review: true,
                acknowledged: false,
                acknowledged_by: None,
                acknowledged_at: None,
            })
        }

        async fn list_suggestions(
            &self,
            only_needing_review: bool,
            _token: &str,
        ) -> Result<Vec<SuggestionOut>> {
            self.record(format!("list_suggestions {only_needing_review}"));
            Ok(Vec::new())
        }

        async fn my_suggestions(&self, _token: &str) -> Result<Vec<SuggestionOut>> {
            self.record("my_suggestions".to_string());
            Ok(Vec::new())
        }

        async fn acknowledge_suggestion(
            &self,
            suggestion_id: &str,
            _token: &str,
        ) -> Result<SuggestionOut> {
            self.record(format!("acknowledge_suggestion {suggestion_id}"));
            Err(ClientError::Api {
                status: 404,
                detail: Some("Suggestion not found".to_string()),
            })
        }
    }
}
