// Provider Error Types

use tvhook_rewrite::RewriteError;

/// Errors a provider surfaces to the host
///
/// Resolving never fails; these come from construction and from
/// capabilities the provider does not offer.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Rewrite client error: {0}")]
    Rewrite(#[from] RewriteError),
}

pub type Result<T> = std::result::Result<T, ProviderError>;
