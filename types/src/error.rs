use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TypeError {
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    #[error("invalid transaction hash: {0}")]
    InvalidTxHash(String),

    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("amount does not fit in 128 bits")]
    AmountOverflow,

    #[error("invalid validator pubkey: {0}")]
    InvalidPubkey(String),
}
