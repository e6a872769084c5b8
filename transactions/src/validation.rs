//! Stateless transaction validation.
//!
//! Envelope checks run before any payload decoding; payload field checks run
//! before the handler reads state. Stateful checks (balances, node state,
//! settings) belong to the processor.

use crate::envelope::TransactionEnvelope;
use crate::error::TransactionError;
use obol_crypto::{sha512_hex, verify_header};
use obol_types::Address;

/// Message reported for a value that is not a node-account address.
pub const INVALID_ADDRESS: &str = "Address is not of a blockchain token type.";

/// Message reported for a zero-valued transfer.
pub const ZERO_AMOUNT: &str = "Could not transfer with zero amount.";

/// Validate the envelope against the family this processor serves.
///
/// Checks, in order: family name and version, payload digest, header signature.
pub fn validate_envelope(
    envelope: &TransactionEnvelope,
    family_name: &str,
    family_version: &str,
) -> Result<(), TransactionError> {
    let header = &envelope.header;
    if header.family_name != family_name || header.family_version != family_version {
        return Err(TransactionError::FamilyMismatch {
            expected: format!("{family_name} {family_version}"),
            actual: format!("{} {}", header.family_name, header.family_version),
        });
    }

    if header.payload_sha512 != sha512_hex(&envelope.payload) {
        return Err(TransactionError::PayloadHashMismatch);
    }

    let header_bytes = header.to_bytes()?;
    if !verify_header(&header_bytes, &envelope.header_signature, &header.signer_public_key) {
        return Err(TransactionError::InvalidSignature { id: envelope.id() });
    }

    Ok(())
}

/// Parse a payload address field.
pub fn validate_address(raw: &str) -> Result<Address, TransactionError> {
    Address::parse(raw).map_err(|_| TransactionError::InvalidField(INVALID_ADDRESS.to_string()))
}

/// Reject zero amounts.
pub fn validate_amount(value: u64) -> Result<u64, TransactionError> {
    if value == 0 {
        return Err(TransactionError::InvalidField(ZERO_AMOUNT.to_string()));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::envelope::{TransactionBuilder, NODE_ACCOUNT_VERSION};
    use crate::payload::{NodeAccountMethod, ObligatoryPaymentPayload};
    use obol_crypto::{keypair_from_seed, NODE_ACCOUNT_FAMILY};

    fn envelope() -> TransactionEnvelope {
        TransactionBuilder::new(keypair_from_seed(&[5; 32]).private)
            .build(NodeAccountMethod::PayObligatoryPayment, &ObligatoryPaymentPayload {})
            .unwrap()
    }

    #[test]
    fn valid_envelope_passes() {
        assert_eq!(
            validate_envelope(&envelope(), NODE_ACCOUNT_FAMILY, NODE_ACCOUNT_VERSION),
            Ok(())
        );
    }

    #[test]
    fn wrong_family_rejected() {
        let result = validate_envelope(&envelope(), "settings", NODE_ACCOUNT_VERSION);
        assert!(matches!(result, Err(TransactionError::FamilyMismatch { .. })));
    }

    #[test]
    fn tampered_payload_rejected() {
        let mut tx = envelope();
        tx.payload.push(0);
        assert_eq!(
            validate_envelope(&tx, NODE_ACCOUNT_FAMILY, NODE_ACCOUNT_VERSION),
            Err(TransactionError::PayloadHashMismatch)
        );
    }

    #[test]
    fn tampered_header_rejected() {
        let mut tx = envelope();
        tx.header.nonce = "replayed".to_string();
        let result = validate_envelope(&tx, NODE_ACCOUNT_FAMILY, NODE_ACCOUNT_VERSION);
        assert!(matches!(result, Err(TransactionError::InvalidSignature { .. })));
    }

    #[test]
    fn address_field_validation() {
        assert!(validate_address(&"0a".repeat(35)).is_ok());
        let err = validate_address("1120be").unwrap_err();
        assert_eq!(err.to_string(), INVALID_ADDRESS);
        assert!(validate_address(&"0A".repeat(35)).is_err());
    }

    #[test]
    fn zero_amount_rejected() {
        assert_eq!(validate_amount(0).unwrap_err().to_string(), ZERO_AMOUNT);
        assert_eq!(validate_amount(1), Ok(1));
    }
}
