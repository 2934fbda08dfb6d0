//! Media server collaborators
//!
//! The resolver only reads from the host: who is playing what, and which
//! users exist. Session and user lifecycle stay with the host.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HostError {
    #[error("Session registry unavailable: {0}")]
    Sessions(String),

    #[error("User lookup failed: {0}")]
    Users(String),
}

/// An active playback session
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionInfo {
    pub session_id: String,
    /// Owning user's id
    pub user_id: String,
    /// Item currently playing in this session, if any
    pub now_playing_item_id: Option<String>,
}

impl SessionInfo {
    #[must_use]
    pub fn new(session_id: impl Into<String>, user_id: impl Into<String>) -> Self {
        Self {
            session_id: session_id.into(),
            user_id: user_id.into(),
            now_playing_item_id: None,
        }
    }

    #[must_use]
    pub fn playing(mut self, item_id: impl Into<String>) -> Self {
        self.now_playing_item_id = Some(item_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: String,
    pub name: String,
}

impl User {
    #[must_use]
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
        }
    }
}

/// Read-only view of the host's active sessions
#[cfg_attr(test, mockall::automock)]
pub trait SessionRegistry: Send + Sync {
    /// Sessions in the host's own order
    fn active_sessions(&self) -> Result<Vec<SessionInfo>, HostError>;
}

/// Read-only user lookup
#[cfg_attr(test, mockall::automock)]
pub trait UserDirectory: Send + Sync {
    fn user_by_name(&self, name: &str) -> Result<Option<User>, HostError>;

    fn user_by_id(&self, id: &str) -> Result<Option<User>, HostError>;
}

/// Fixed host state held in memory
///
/// Backs the command-line binary and tests.
#[derive(Debug, Clone, Default)]
pub struct InMemoryHost {
    users: Vec<User>,
    sessions: Vec<SessionInfo>,
}

impl InMemoryHost {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_user(mut self, user: User) -> Self {
        self.users.push(user);
        self
    }

    #[must_use]
    pub fn with_session(mut self, session: SessionInfo) -> Self {
        self.sessions.push(session);
        self
    }
}

impl SessionRegistry for InMemoryHost {
    fn active_sessions(&self) -> Result<Vec<SessionInfo>, HostError> {
        Ok(self.sessions.clone())
    }
}

impl UserDirectory for InMemoryHost {
    /// Names match case-insensitively, like media server logins
    fn user_by_name(&self, name: &str) -> Result<Option<User>, HostError> {
        Ok(self
            .users
            .iter()
            .find(|u| u.name.eq_ignore_ascii_case(name))
            .cloned())
    }

    fn user_by_id(&self, id: &str) -> Result<Option<User>, HostError> {
        Ok(self.users.iter().find(|u| u.id == id).cloned())
    }
}
