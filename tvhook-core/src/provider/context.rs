// Resolve Context
//
// Everything a single resolve call needs from its caller

use tokio_util::sync::CancellationToken;

use crate::host::{SessionRegistry, UserDirectory};

/// Per-call resolve context
///
/// Passed explicitly into every resolve; nothing is read from ambient state.
#[derive(Clone)]
pub struct ResolveContext<'a> {
    /// Authenticated user name attached to the request (optional)
    pub identity: Option<&'a str>,

    /// Active playback sessions
    pub sessions: &'a dyn SessionRegistry,

    /// User lookup
    pub users: &'a dyn UserDirectory,

    /// Aborts the outbound webhook call when cancelled
    pub cancel: CancellationToken,
}

impl<'a> ResolveContext<'a> {
    /// Create new context with no identity and a fresh cancellation token
    #[must_use]
    pub fn new(sessions: &'a dyn SessionRegistry, users: &'a dyn UserDirectory) -> Self {
        Self {
            identity: None,
            sessions,
            users,
            cancel: CancellationToken::new(),
        }
    }

    /// Set the authenticated user name
    #[must_use]
    pub const fn with_identity(mut self, identity: &'a str) -> Self {
        self.identity = Some(identity);
        self
    }

    /// Set cancellation token
    #[must_use]
    pub fn with_cancel(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }
}
