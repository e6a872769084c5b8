use obol_types::Address;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("address was not declared by the transaction: {0}")]
    UndeclaredAddress(Address),

    #[error("state operation timed out: {0}")]
    Timeout(String),

    #[error("state backend error: {0}")]
    Backend(String),
}
