//! RPC error types.

use obol_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RpcError {
    /// A request parameter is missing or malformed.
    #[error("{0}")]
    InvalidParams(String),

    #[error("{0}")]
    NotFound(String),

    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub fn invalid(message: impl Into<String>) -> Self {
        Self::InvalidParams(message.into())
    }

    /// The message shown to the caller, without any prefix.
    pub fn message(&self) -> &str {
        match self {
            Self::InvalidParams(message) | Self::NotFound(message) | Self::Internal(message) => {
                message
            }
        }
    }
}

impl From<StoreError> for RpcError {
    fn from(e: StoreError) -> Self {
        RpcError::Internal(e.to_string())
    }
}
