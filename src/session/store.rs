//! Persistent session store with change notifications

use std::sync::Arc;

use tokio::sync::broadcast;

use crate::storage::{KeyValueStorage, KEY_IS_LOGGED_IN, KEY_TOKEN, KEY_USER};

use super::{Session, StoredUser};

/// Session change notification, sent to every subscriber on login and
/// logout. Listeners must tolerate receiving an event after storage
/// already reflects it and simply re-read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    LoggedIn,
    LoggedOut,
}

const EVENT_CHANNEL_CAPACITY: usize = 16;

/// Stores the current session in local key-value storage and broadcasts
/// login/logout events.
///
/// Storage failures degrade to "not logged in" rather than erroring:
/// every read and write failure is logged and swallowed.
pub struct SessionStore {
    storage: Arc<dyn KeyValueStorage>,
    events: broadcast::Sender<SessionEvent>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStorage>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self { storage, events }
    }

    /// Persist a successful login and notify subscribers
    pub fn login(&self, user: &StoredUser, token: Option<&str>) {
        let raw = match serde_json::to_string(user) {
            Ok(raw) => raw,
            Err(err) => {
                tracing::warn!("Failed to serialize user for storage: {}", err);
                return;
            }
        };
        self.write(KEY_USER, &raw);
        match token {
            Some(token) => self.write(KEY_TOKEN, token),
            None => self.delete(KEY_TOKEN),
        }
        self.write(KEY_IS_LOGGED_IN, "true");
        let _ = self.events.send(SessionEvent::LoggedIn);
    }

    /// Clear the session and notify subscribers. Navigating away from
    /// protected pages is the caller's responsibility.
    pub fn logout(&self) {
        self.delete(KEY_USER);
        self.delete(KEY_TOKEN);
        self.delete(KEY_IS_LOGGED_IN);
        let _ = self.events.send(SessionEvent::LoggedOut);
    }

    /// Read the current session fresh from storage.
    ///
    /// Corrupt stored JSON and storage read failures both yield `None`:
    /// a session that cannot be parsed is a session that does not exist.
    pub fn current_session(&self) -> Option<Session> {
        let raw = match self.storage.get(KEY_USER) {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                tracing::warn!("Session storage read failed: {}", err);
                return None;
            }
        };
        let user: StoredUser = match serde_json::from_str(&raw) {
            Ok(user) => user,
            Err(err) => {
                tracing::warn!("Discarding corrupt stored session: {}", err);
                return None;
            }
        };
        let token = self.storage.get(KEY_TOKEN).ok().flatten();
        Some(Session { user, token })
    }

    /// The bearer token of the current session, if any
    pub fn token(&self) -> Option<String> {
        self.storage.get(KEY_TOKEN).ok().flatten()
    }

    pub fn is_logged_in(&self) -> bool {
        self.current_session().is_some()
    }

    /// UI hint only; the server is the authority
    pub fn is_admin(&self) -> bool {
        self.current_session()
            .map(|session| session.is_admin())
            .unwrap_or(false)
    }

    /// Subscribe to login/logout notifications
    pub fn subscribe(&self) -> broadcast::Receiver<SessionEvent> {
        self.events.subscribe()
    }

    fn write(&self, key: &str, value: &str) {
        if let Err(err) = self.storage.set(key, value) {
            tracing::warn!("Storage write failed for {}: {}", key, err);
        }
    }

    fn delete(&self, key: &str) {
        if let Err(err) = self.storage.remove(key) {
            tracing::warn!("Storage remove failed for {}: {}", key, err);
        }
    }
}
