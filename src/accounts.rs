//! Account flows: registration and sign-in
//!
//! Each flow validates locally, performs the one network call, then
//! persists the session and notifies subscribers through the
//! [`SessionStore`].

use crate::api::{ApiTransport, RegisterRequest};
use crate::error::Result;
use crate::session::{Session, SessionStore, StoredUser};
use crate::validate::{validate_registration, RegistrationForm};

/// Register a new account and sign the user in.
///
/// A failing validation rule aborts with its message before any network
/// call. Registration does not return a token; the stored session is a
/// legacy one until the next sign-in.
pub async fn register(
    api: &dyn ApiTransport,
    sessions: &SessionStore,
    form: &RegistrationForm,
) -> Result<StoredUser> {
    validate_registration(form)?;
    let request = RegisterRequest::new(&form.username, &form.email, &form.password);
    let user = api.register(&request).await?;
    sessions.login(&user, None);
    Ok(user)
}

/// Sign in and persist the resulting session. The token is optional in
/// the response for backward compatibility with legacy backends.
pub async fn sign_in(
    api: &dyn ApiTransport,
    sessions: &SessionStore,
    username: &str,
    password: &str,
) -> Result<Session> {
    let (user, token) = api.login(username, password).await?;
    sessions.login(&user, token.as_deref());
    Ok(Session { user, token })
}
