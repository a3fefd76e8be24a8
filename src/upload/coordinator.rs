//! Create-then-upload sequencing with settle-all semantics

use std::sync::Arc;

use futures::future::{join_all, BoxFuture};
use futures::FutureExt;

use crate::api::ApiTransport;
use crate::error::Result;
use crate::validate::validate_new_book;

use super::types::{NewBookForm, Submission, UploadFailure, UploadReport};

/// Sequences one add-book submission: validate, create, then upload
/// every attached file concurrently.
///
/// The create step strictly precedes all uploads (they need the new
/// book's id); the uploads among themselves have no ordering and no
/// atomicity — each settles independently and failures never cancel
/// siblings.
pub struct UploadCoordinator {
    api: Arc<dyn ApiTransport>,
}

impl UploadCoordinator {
    pub fn new(api: Arc<dyn ApiTransport>) -> Self {
        Self { api }
    }

    /// Submit the form.
    ///
    /// Validation or create-book failure aborts the whole operation
    /// before any upload is attempted. After a successful create, the
    /// result is always `Ok`: partial upload failure is reported in the
    /// [`UploadReport`], and the caller navigates to the created book
    /// regardless.
    pub async fn submit(&self, form: &NewBookForm, token: Option<&str>) -> Result<Submission> {
        validate_new_book(&form.title)?;

        let metadata = form.metadata();
        let book = self.api.create_book(&metadata, token).await?;
        tracing::info!("Created book {} ({})", book.title, book.id);

        let mut tasks: Vec<BoxFuture<'_, (String, Result<()>)>> = Vec::new();

        if let Some(file) = &form.source_file {
            let book_id = book.id.clone();
            let label = format!("source {}", file.filename);
            tasks.push(
                async move {
                    let outcome = self
                        .api
                        .upload_source(&book_id, file, token)
                        .await
                        .map(|_| ());
                    (label, outcome)
                }
                .boxed(),
            );
        }

        for row in &form.translations {
            // Rows without a file are skipped silently: no request, no
            // error.
            let Some(file) = row.file.as_ref() else {
                continue;
            };
            let book_id = book.id.clone();
            let label = if row.language.trim().is_empty() {
                format!("translation {}", file.filename)
            } else {
                format!("translation {}", row.language)
            };
            tasks.push(
                async move {
                    let outcome = self
                        .api
                        .create_translation(
                            &book_id,
                            &row.language,
                            row.translated_by.as_deref(),
                            file,
                            token,
                        )
                        .await
                        .map(|_| ());
                    (label, outcome)
                }
                .boxed(),
            );
        }

        let mut report = UploadReport::default();
        for (label, outcome) in join_all(tasks).await {
            match outcome {
                Ok(()) => report.uploaded += 1,
                Err(err) => {
                    let error = err.user_message("Upload failed");
                    tracing::warn!("Upload failed for {}: {}", label, error);
                    report.failed += 1;
                    report.failures.push(UploadFailure { label, error });
                }
            }
        }

        if !report.is_clean() {
            tracing::warn!("Book {} created with partial uploads: {}", book.id, report.summary());
        }

        Ok(Submission { book, report })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::api::FilePayload;
    use crate::error::ClientError;
    use crate::upload::TranslationRow;
    use crate::validate::ValidationError;

    fn text_file(name: &str) -> FilePayload {
        FilePayload::new(name, b"text".to_vec())
    }

    fn form_with_source_and_two_rows() -> NewBookForm {
        NewBookForm {
            title: "The Trial".to_string(),
            source_file: Some(text_file("trial.txt")),
            translations: vec![
                TranslationRow {
                    language: "French".to_string(),
                    file: Some(text_file("trial-fr.txt")),
                    ..TranslationRow::default()
                },
                // No file attached: must produce zero requests and zero
                // errors.
                TranslationRow {
                    language: "Spanish".to_string(),
                    ..TranslationRow::default()
                },
            ],
            ..NewBookForm::default()
        }
    }

    #[tokio::test]
    async fn rows_without_files_are_skipped() {
        let api = Arc::new(MockTransport::default());
        let coordinator = UploadCoordinator::new(api.clone());

        let submission = coordinator
            .submit(&form_with_source_and_two_rows(), Some("jwt"))
            .await
            .unwrap();

        // Exactly two uploads: the source plus the one filed row.
        assert_eq!(api.calls_matching("upload_source"), 1);
        assert_eq!(api.calls_matching("create_translation"), 1);
        assert_eq!(submission.report.uploaded, 2);
        assert_eq!(submission.report.failed, 0);
        assert_eq!(submission.book.id, "book-1");
    }

    #[tokio::test]
    async fn validation_failure_makes_no_network_call() {
        let api = Arc::new(MockTransport::default());
        let coordinator = UploadCoordinator::new(api.clone());

        let form = NewBookForm {
            title: "   ".to_string(),
            source_file: Some(text_file("trial.txt")),
            ..NewBookForm::default()
        };
        let err = coordinator.submit(&form, Some("jwt")).await.unwrap_err();

        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingTitle)
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn create_failure_aborts_before_any_upload() {
        let api = Arc::new(MockTransport {
            fail_create: Some((400, "Failed to insert book".to_string())),
            ..MockTransport::default()
        });
        let coordinator = UploadCoordinator::new(api.clone());

        let err = coordinator
            .submit(&form_with_source_and_two_rows(), Some("jwt"))
            .await
            .unwrap_err();

        assert_eq!(
            err.user_message("Failed to create book"),
            "Failed to insert book"
        );
        assert_eq!(api.calls_matching("upload_source"), 0);
        assert_eq!(api.calls_matching("create_translation"), 0);
    }

    #[tokio::test]
    async fn partial_failure_is_reported_not_fatal() {
        let api = Arc::new(MockTransport {
            fail_translation_languages: ["French".to_string()].into_iter().collect(),
            ..MockTransport::default()
        });
        let coordinator = UploadCoordinator::new(api.clone());

        let submission = coordinator
            .submit(&form_with_source_and_two_rows(), Some("jwt"))
            .await
            .unwrap();

        // The failing translation did not cancel the source upload, and
        // the caller still gets the created book to navigate to.
        assert_eq!(submission.report.summary(), "1 uploaded, 1 failed");
        assert_eq!(submission.report.failures.len(), 1);
        assert_eq!(submission.report.failures[0].label, "translation French");
        assert_eq!(submission.book.id, "book-1");
    }

    #[tokio::test]
    async fn form_without_files_uploads_nothing() {
        let api = Arc::new(MockTransport::default());
        let coordinator = UploadCoordinator::new(api.clone());

        let form = NewBookForm {
            title: "The Trial".to_string(),
            source_text: "Jemand musste Josef K. verleumdet haben".to_string(),
            ..NewBookForm::default()
        };
        let submission = coordinator.submit(&form, None).await.unwrap();

        assert_eq!(api.call_count(), 1); // the create only
        assert_eq!(submission.report.uploaded, 0);
        assert!(submission.report.is_clean());
    }
}
