use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum TransactionError {
    #[error("Unknown method")]
    UnknownMethod(u32),

    #[error("Invalid payload serialization: {0}")]
    Decode(String),

    #[error("Could not encode payload: {0}")]
    Encode(String),

    #[error("Wrong transaction family: expected {expected}, got {actual}")]
    FamilyMismatch { expected: String, actual: String },

    #[error("Payload hash does not match the transaction header")]
    PayloadHashMismatch,

    #[error("Invalid signature on transaction {id}")]
    InvalidSignature { id: String },

    #[error("{0}")]
    InvalidField(String),
}
