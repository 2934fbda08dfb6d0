// Media Source Provider
//
// Two-tier architecture:
//
// Tier 1: tvhook-rewrite (pure webhook HTTP client)
//   - RewriteClient, RewriteRequest, RewriteError
//   - No knowledge of items, sessions or fallbacks
//
// Tier 2: tvhook-core/provider (this module)
//   - RewriteResolver implements MediaSourceProvider
//   - Resolves the acting user, calls the client, applies the fallback policy

pub mod context;
pub mod error;
pub mod rewrite;
pub mod traits;
pub mod user;

pub use context::*;
pub use error::*;
pub use rewrite::RewriteResolver;
pub use traits::*;
pub use user::{resolve_acting_user, ActingUser, UNKNOWN_USER_ID};
