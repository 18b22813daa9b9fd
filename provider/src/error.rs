use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(String),

    #[error("bridge error: {0}")]
    Bridge(String),

    #[error("execution reverted: {0}")]
    Reverted(String),

    #[error("invalid response: {0}")]
    InvalidResponse(String),

    #[error("wallet not connected")]
    NotConnected,

    #[error("network switch rejected: {0}")]
    SwitchRejected(String),
}

impl ProviderError {
    /// Short human-readable form for inline display.
    ///
    /// Prefers the provider-supplied message (revert reason, bridge
    /// error text) over the generic rendering.
    pub fn short_message(&self) -> String {
        match self {
            ProviderError::Reverted(m) | ProviderError::Bridge(m) if !m.is_empty() => m.clone(),
            other => other.to_string(),
        }
    }
}
