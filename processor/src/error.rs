//! Processor errors and their classification.

use obol_store::StoreError;
use obol_transactions::TransactionError;
use obol_types::TypeError;
use thiserror::Error;

/// How the host should treat a failed `apply`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// The transaction is invalid and must be dropped from the block.
    InvalidTransaction,
    /// Rejected for an infrastructure reason, not because the input is
    /// malformed.
    Internal,
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("{0}")]
    InvalidTransaction(String),

    #[error("Unknown method")]
    UnknownMethod(u32),

    #[error("Malformed committee.")]
    MalformedCommittee,

    #[error("Malformed committee. A node doesn't have enough tokens to pay obligatory payment.")]
    InsufficientFunds,

    #[error("setting {key} is not available")]
    SettingsUnavailable { key: String },

    #[error("setting {key} is malformed: {reason}")]
    MalformedSettings { key: String, reason: String },

    #[error("arithmetic overflow in node account update")]
    Overflow,

    #[error("ledger context timed out during {0}")]
    ContextTimeout(String),

    #[error("storage error: {0}")]
    Storage(String),

    #[error("configuration error: {0}")]
    Config(String),
}

impl ProcessorError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        Self::InvalidTransaction(reason.into())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidTransaction(_)
            | Self::UnknownMethod(_)
            | Self::MalformedCommittee
            | Self::InsufficientFunds
            | Self::Overflow => ErrorKind::InvalidTransaction,
            Self::SettingsUnavailable { .. }
            | Self::MalformedSettings { .. }
            | Self::ContextTimeout(_)
            | Self::Storage(_)
            | Self::Config(_) => ErrorKind::Internal,
        }
    }

    pub fn is_invalid_transaction(&self) -> bool {
        self.kind() == ErrorKind::InvalidTransaction
    }
}

impl From<StoreError> for ProcessorError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::UndeclaredAddress(address) => {
                Self::InvalidTransaction(format!("Address {address} is not declared by the transaction."))
            }
            StoreError::Timeout(operation) => Self::ContextTimeout(operation),
            StoreError::Backend(reason) => Self::Storage(reason),
        }
    }
}

impl From<TransactionError> for ProcessorError {
    fn from(err: TransactionError) -> Self {
        match err {
            TransactionError::UnknownMethod(code) => Self::UnknownMethod(code),
            TransactionError::Decode(_) => Self::invalid("Invalid payload serialization"),
            other => Self::InvalidTransaction(other.to_string()),
        }
    }
}

/// Stored account bytes that fail to decode indicate corrupted state, not a bad transaction.
impl From<TypeError> for ProcessorError {
    fn from(err: TypeError) -> Self {
        Self::Storage(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use obol_types::Address;

    #[test]
    fn business_rejections_are_invalid_transactions() {
        for err in [
            ProcessorError::MalformedCommittee,
            ProcessorError::InsufficientFunds,
            ProcessorError::UnknownMethod(9),
            ProcessorError::Overflow,
            ProcessorError::invalid("nope"),
        ] {
            assert_eq!(err.kind(), ErrorKind::InvalidTransaction, "{err}");
        }
    }

    #[test]
    fn infrastructure_failures_are_internal() {
        let timeout: ProcessorError = StoreError::Timeout("get_state".into()).into();
        assert!(matches!(timeout, ProcessorError::ContextTimeout(_)));
        assert_eq!(timeout.kind(), ErrorKind::Internal);
        let backend: ProcessorError = StoreError::Backend("disk full".into()).into();
        assert!(matches!(&backend, ProcessorError::Storage(reason) if reason == "disk full"));
        assert_eq!(backend.kind(), ErrorKind::Internal);
        let missing = ProcessorError::SettingsUnavailable {
            key: "obol.settings.committee_size".into(),
        };
        assert_eq!(missing.kind(), ErrorKind::Internal);
    }

    #[test]
    fn undeclared_address_rejects_transaction() {
        let address = Address::from_bytes(&[1; Address::BYTES]);
        let err: ProcessorError = StoreError::UndeclaredAddress(address).into();
        assert!(err.is_invalid_transaction());
    }

    #[test]
    fn messages_match_wire_text() {
        assert_eq!(ProcessorError::MalformedCommittee.to_string(), "Malformed committee.");
        assert_eq!(
            ProcessorError::InsufficientFunds.to_string(),
            "Malformed committee. A node doesn't have enough tokens to pay obligatory payment."
        );
        let decode: ProcessorError = TransactionError::Decode("eof".into()).into();
        assert_eq!(decode.to_string(), "Invalid payload serialization");
        let unknown: ProcessorError = TransactionError::UnknownMethod(77).into();
        assert_eq!(unknown.to_string(), "Unknown method");
    }
}
