use thiserror::Error;

use vaultops_provider::ProviderError;
use vaultops_types::{TxHash, TypeError};

#[derive(Debug, Error)]
pub enum ActionError {
    /// User input rejected before anything touched the network.
    #[error("{0}")]
    Validation(String),

    #[error("wallet not connected")]
    NotConnected,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("transaction {hash} failed on-chain")]
    TransactionFailed { hash: TxHash },
}

impl From<TypeError> for ActionError {
    fn from(e: TypeError) -> Self {
        ActionError::Validation(e.to_string())
    }
}

impl ActionError {
    /// Short message for inline display next to the triggering control.
    ///
    /// Prefers the provider-supplied short form where one exists.
    pub fn user_message(&self) -> String {
        match self {
            ActionError::Provider(e) => e.short_message(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_provider_short_form() {
        let err = ActionError::Provider(ProviderError::Reverted("paused".into()));
        assert_eq!(err.user_message(), "paused");
    }

    #[test]
    fn validation_message_passes_through() {
        let err = ActionError::Validation("enter a positive amount".into());
        assert_eq!(err.user_message(), "enter a positive amount");
    }
}
