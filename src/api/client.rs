//! HTTP implementation of the backend API

use async_trait::async_trait;
use reqwest::multipart;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::config::Config;
use crate::error::{ClientError, Result};
use crate::library::{Book, Translation};
use crate::session::StoredUser;

use super::types::{
    BookUpdate, FilePayload, LoginPayload, NewBook, RegisterRequest, SourceUpload, SuggestionIn,
    SuggestionOut,
};
use super::ApiTransport;

/// Error body shape the backend uses for failures
#[derive(Deserialize)]
struct ErrorBody {
    detail: Option<String>,
}

/// Typed `reqwest` client for the LitMT backend
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    admin_fallback_key: Option<String>,
}

impl ApiClient {
    pub fn new(config: &Config) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.backend_base_url.clone(),
            admin_fallback_key: config.admin_fallback_key.clone(),
        }
    }

    /// Absolute URL for an API path
    pub fn api_url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    /// URL serving a book's original source as text, for link rendering
    pub fn source_url(&self, book_id: &str) -> String {
        self.api_url(&format!("/api/books/{}/source", urlencoding::encode(book_id)))
    }

    /// URL rendering a translation inline as text
    pub fn translation_view_url(&self, translation_id: &str) -> String {
        self.api_url(&format!(
            "/api/translations/{}/view",
            urlencoding::encode(translation_id)
        ))
    }

    /// URL downloading a translation as an attachment
    pub fn translation_download_url(&self, translation_id: &str) -> String {
        self.api_url(&format!(
            "/api/translations/{}/file",
            urlencoding::encode(translation_id)
        ))
    }

    /// Attach the bearer credential: the session token when present,
    /// else the configured fallback key, else nothing (anonymous; the
    /// server is the final arbiter).
    fn bearer(&self, request: reqwest::RequestBuilder, token: Option<&str>) -> reqwest::RequestBuilder {
        match token.or(self.admin_fallback_key.as_deref()) {
            Some(credential) => request.bearer_auth(credential),
            None => request,
        }
    }

    fn file_part(file: &FilePayload) -> Result<multipart::Part> {
        let part = multipart::Part::bytes(file.content.clone())
            .file_name(file.filename.clone())
            .mime_str("text/plain")?;
        Ok(part)
    }

    /// Reject non-success responses, preserving the server's detail
    /// message when its body carries one
    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        let detail = serde_json::from_str::<ErrorBody>(&body)
            .ok()
            .and_then(|parsed| parsed.detail)
            .or_else(|| {
                let trimmed = body.trim();
                (!trimmed.is_empty()).then(|| trimmed.to_string())
            });
        Err(ClientError::Api {
            status: status.as_u16(),
            detail,
        })
    }

    async fn into_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let response = Self::check_status(response).await?;
        response
            .json::<T>()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }

    async fn into_text(response: reqwest::Response) -> Result<String> {
        let response = Self::check_status(response).await?;
        response
            .text()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))
    }
}

#[async_trait]
impl ApiTransport for ApiClient {
    async fn register(&self, request: &RegisterRequest) -> Result<StoredUser> {
        let response = self
            .http
            .post(self.api_url("/api/users/register"))
            .json(request)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn login(&self, username: &str, password: &str) -> Result<(StoredUser, Option<String>)> {
        // Credentials go as query parameters; the login endpoint takes
        // no body.
        let response = self
            .http
            .post(self.api_url("/api/users/login"))
            .query(&[("username", username), ("password", password)])
            .send()
            .await?;
        let payload: LoginPayload = Self::into_json(response).await?;
        Ok(payload.into_parts())
    }

    async fn list_books(&self) -> Result<Vec<Book>> {
        let response = self.http.get(self.api_url("/api/books")).send().await?;
        Self::into_json(response).await
    }

    async fn create_book(&self, book: &NewBook, token: Option<&str>) -> Result<Book> {
        let request = self.http.post(self.api_url("/api/books")).json(book);
        let response = self.bearer(request, token).send().await?;
        Self::into_json(response).await
    }

    async fn update_book(
        &self,
        book_id: &str,
        update: &BookUpdate,
        token: Option<&str>,
    ) -> Result<Book> {
        let url = self.api_url(&format!("/api/books/{}", urlencoding::encode(book_id)));
        let request = self.http.put(url).json(update);
        let response = self.bearer(request, token).send().await?;
        Self::into_json(response).await
    }

    async fn upload_source(
        &self,
        book_id: &str,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<SourceUpload> {
        let form = multipart::Form::new().part("file", Self::file_part(file)?);
        let request = self.http.post(self.source_url(book_id)).multipart(form);
        let response = self.bearer(request, token).send().await?;
        Self::into_json(response).await
    }

    async fn create_translation(
        &self,
        book_id: &str,
        language: &str,
        translated_by: Option<&str>,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<Translation> {
        let mut form = multipart::Form::new()
            .text("language", language.to_string())
            .part("file", Self::file_part(file)?);
        if let Some(translated_by) = translated_by {
            form = form.text("translated_by", translated_by.to_string());
        }
        let url = self.api_url(&format!(
            "/api/books/{}/translations",
            urlencoding::encode(book_id)
        ));
        let request = self.http.post(url).multipart(form);
        let response = self.bearer(request, token).send().await?;
        Self::into_json(response).await
    }

    async fn replace_translation_file(
        &self,
        translation_id: &str,
        file: &FilePayload,
        token: Option<&str>,
    ) -> Result<Translation> {
        let form = multipart::Form::new().part("file", Self::file_part(file)?);
        let request = self
            .http
            .post(self.translation_download_url(translation_id))
            .multipart(form);
        let response = self.bearer(request, token).send().await?;
        Self::into_json(response).await
    }

    async fn view_source(&self, book_id: &str) -> Result<String> {
        let response = self.http.get(self.source_url(book_id)).send().await?;
        Self::into_text(response).await
    }

    async fn view_translation(&self, translation_id: &str) -> Result<String> {
        let response = self
            .http
            .get(self.translation_view_url(translation_id))
            .send()
            .await?;
        Self::into_text(response).await
    }

    async fn download_translation(&self, translation_id: &str) -> Result<Vec<u8>> {
        let response = self
            .http
            .get(self.translation_download_url(translation_id))
            .send()
            .await?;
        let response = Self::check_status(response).await?;
        let bytes = response
            .bytes()
            .await
            .map_err(|err| ClientError::InvalidResponse(err.to_string()))?;
        Ok(bytes.to_vec())
    }

    async fn suggest_book(&self, suggestion: &SuggestionIn, token: &str) -> Result<SuggestionOut> {
        let response = self
            .http
            .post(self.api_url("/api/suggestions"))
            .bearer_auth(token)
            .json(suggestion)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn list_suggestions(
        &self,
        only_needing_review: bool,
        token: &str,
    ) -> Result<Vec<SuggestionOut>> {
        let response = self
            .http
            .get(self.api_url("/api/suggestions"))
            .query(&[("only_needing_review", only_needing_review)])
            .bearer_auth(token)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn my_suggestions(&self, token: &str) -> Result<Vec<SuggestionOut>> {
        let response = self
            .http
            .get(self.api_url("/api/suggestions/mine"))
            .bearer_auth(token)
            .send()
            .await?;
        Self::into_json(response).await
    }

    async fn acknowledge_suggestion(
        &self,
        suggestion_id: &str,
        token: &str,
    ) -> Result<SuggestionOut> {
        let url = self.api_url(&format!(
            "/api/suggestions/{}/acknowledge",
            urlencoding::encode(suggestion_id)
        ));
        let response = self.http.put(url).bearer_auth(token).send().await?;
        Self::into_json(response).await
    }
}
