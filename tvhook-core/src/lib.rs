pub mod cache;
pub mod config;
pub mod host;
pub mod logging;
pub mod models;
pub mod provider;

pub use config::{Config, RewriteConfig, RewritePolicy};
pub use host::{HostError, InMemoryHost, SessionInfo, SessionRegistry, User, UserDirectory};
pub use models::{LiveStreamInfo, MediaItemRef, MediaProtocol, MediaSourceDescriptor};
pub use provider::{
    ActingUser, MediaSourceProvider, ProviderError, ResolveContext, RewriteResolver,
};
