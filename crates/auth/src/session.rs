//! Session-expiry notification.
//!
//! When the backend answers 401 the gateway clears the stored credential and
//! then hands control to the host application, which decides how to get the
//! user back to a login entry point.

/// Callback invoked after an authentication failure has cleared the credential.
pub trait SessionExpiredHandler: Send + Sync {
    /// `login_path` is the configured login entry point (e.g. `/login`).
    fn session_expired(&self, login_path: &str);
}

impl<F> SessionExpiredHandler for F
where
    F: Fn(&str) + Send + Sync,
{
    fn session_expired(&self, login_path: &str) {
        self(login_path)
    }
}

/// Default handler: records the event and does nothing else.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogOnlySessionHandler;

impl SessionExpiredHandler for LogOnlySessionHandler {
    fn session_expired(&self, login_path: &str) {
        tracing::warn!("session expired; user must sign in again at {}", login_path);
    }
}
