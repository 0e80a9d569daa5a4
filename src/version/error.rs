use thiserror::Error;

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Failed to create HTTP client")]
    Client(#[source] reqwest::Error),

    #[error("Network error")]
    Network(#[from] reqwest::Error),

    #[error("Rate limited: retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Repository not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Timed out after {timeout_ms} ms")]
    Timeout { timeout_ms: u128 },
}
