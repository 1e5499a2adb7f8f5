//! Bearer-token session state shared across API calls.

use std::sync::{Arc, Mutex};

/// Shared holder for the current bearer token.
///
/// Cloning hands out another handle to the same token, so the CLI and the
/// client observe sign-outs together. A 401 from any endpoint clears the
/// token, which signs the whole process out at once.
#[derive(Debug, Clone, Default)]
pub struct Session {
    token: Arc<Mutex<Option<String>>>,
}

impl Session {
    /// Create a session with no token.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session that already holds a token.
    #[must_use]
    pub fn with_token(token: impl Into<String>) -> Self {
        let session = Self::new();
        session.sign_in(token);
        session
    }

    /// Store a token, replacing any previous one.
    ///
    /// A blank token counts as no token at all.
    pub fn sign_in(&self, token: impl Into<String>) {
        let token = token.into();
        let token = if token.trim().is_empty() {
            None
        } else {
            Some(token)
        };
        *self.token.lock().unwrap() = token;
    }

    /// Drop the token. Later calls go out unauthenticated.
    pub fn sign_out(&self) {
        *self.token.lock().unwrap() = None;
    }

    /// Current token, if one is held.
    #[must_use]
    pub fn token(&self) -> Option<String> {
        self.token.lock().unwrap().clone()
    }

    /// Whether a token is currently held.
    #[must_use]
    pub fn is_signed_in(&self) -> bool {
        self.token.lock().unwrap().is_some()
    }
}
