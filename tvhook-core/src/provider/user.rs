//! Acting user resolution
//!
//! Precedence: the request's authenticated identity, then the first active
//! session playing the item, then "unknown". Host lookup failures are logged
//! and treated as "not found" for that step.

use tracing::{debug, warn};

use super::ResolveContext;
use crate::host::User;
use crate::models::MediaItemRef;

/// User id sent when nobody can be tied to the playback
pub const UNKNOWN_USER_ID: &str = "unknown";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActingUser {
    pub user_id: String,
}

impl ActingUser {
    #[must_use]
    pub fn new(user_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
        }
    }

    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN_USER_ID)
    }

    #[must_use]
    pub fn is_unknown(&self) -> bool {
        self.user_id == UNKNOWN_USER_ID
    }
}

/// Work out who is playing `item`
pub fn resolve_acting_user(item: &MediaItemRef, ctx: &ResolveContext<'_>) -> ActingUser {
    let user = user_from_identity(ctx).or_else(|| user_from_sessions(item, ctx));

    match user {
        Some(user) => ActingUser::new(user.id),
        None => {
            debug!(item_id = %item.id, "No acting user found");
            ActingUser::unknown()
        }
    }
}

fn user_from_identity(ctx: &ResolveContext<'_>) -> Option<User> {
    let name = ctx.identity.map(str::trim).filter(|n| !n.is_empty())?;

    match ctx.users.user_by_name(name) {
        Ok(user) => user,
        Err(e) => {
            warn!(identity = name, error = %e, "Failed to look up user by name");
            None
        }
    }
}

// First match in registry order wins.
fn user_from_sessions(item: &MediaItemRef, ctx: &ResolveContext<'_>) -> Option<User> {
    let sessions = match ctx.sessions.active_sessions() {
        Ok(sessions) => sessions,
        Err(e) => {
            warn!(item_id = %item.id, error = %e, "Failed to list active sessions");
            return None;
        }
    };

    let session = sessions
        .into_iter()
        .find(|s| s.now_playing_item_id.as_deref() == Some(item.id.as_str()))?;

    match ctx.users.user_by_id(&session.user_id) {
        Ok(user) => user,
        Err(e) => {
            warn!(user_id = %session.user_id, error = %e, "Failed to look up session user");
            None
        }
    }
}
