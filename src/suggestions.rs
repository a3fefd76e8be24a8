//! Book suggestion flow
//!
//! Any signed-in user may suggest a book; the admin flag is not
//! consulted. The submission requires a real bearer token — the
//! fallback key is deliberately not used here.

use crate::api::{ApiTransport, SuggestionIn, SuggestionOut};
use crate::error::Result;
use crate::validate::validate_suggestion;

/// Validate and submit a suggestion
pub async fn submit(
    api: &dyn ApiTransport,
    token: Option<&str>,
    suggestion: &SuggestionIn,
) -> Result<SuggestionOut> {
    let token = validate_suggestion(&suggestion.title, token)?;
    api.suggest_book(suggestion, token).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::testing::MockTransport;
    use crate::error::ClientError;
    use crate::validate::ValidationError;

    fn suggestion(title: &str) -> SuggestionIn {
        SuggestionIn {
            title: title.to_string(),
            ..SuggestionIn::default()
        }
    }

    #[tokio::test]
    async fn requires_title_before_token() {
        let api = MockTransport::default();
        let err = submit(&api, None, &suggestion("  ")).await.unwrap_err();
        assert!(matches!(
            err,
            ClientError::Validation(ValidationError::MissingTitle)
        ));
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn requires_a_token_even_for_non_admins() {
        let api = MockTransport::default();
        let err = submit(&api, None, &suggestion("The Trial"))
            .await
            .unwrap_err();
        assert_eq!(
            err.user_message(""),
            "You must be signed in to suggest a book."
        );
        assert_eq!(api.call_count(), 0);
    }

    #[tokio::test]
    async fn signed_in_user_submits() {
        let api = MockTransport::default();
        let out = submit(&api, Some("jwt"), &suggestion("The Trial"))
            .await
            .unwrap();
        assert_eq!(out.title, "The Trial");
        assert!(out.needs_review);
        assert_eq!(api.call_count(), 1);
    }
}
