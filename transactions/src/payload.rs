//! Transaction payload: a method code plus the method's encoded arguments.

use crate::codec;
use crate::TransactionError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Methods of the node-account transaction family.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NodeAccountMethod {
    /// Initial token issuance to the genesis authority.
    Genesis,
    /// Move operational balance to another node account.
    InternalTransfer,
    /// Freeze a stake and open a masternode.
    InitializeMasternode,
    /// Close an opened masternode.
    CloseMasternode,
    /// Move liquid reputation back to the operational balance.
    TransferFromUnfrozenToOperational,
    /// Redistribute the obligatory payment of the committee to the block winner.
    PayObligatoryPayment,
}

impl NodeAccountMethod {
    pub const ALL: [Self; 6] = [
        Self::Genesis,
        Self::InternalTransfer,
        Self::InitializeMasternode,
        Self::CloseMasternode,
        Self::TransferFromUnfrozenToOperational,
        Self::PayObligatoryPayment,
    ];

    /// Wire code of the method.
    pub fn code(self) -> u32 {
        match self {
            Self::Genesis => 0,
            Self::InternalTransfer => 1,
            Self::InitializeMasternode => 2,
            Self::CloseMasternode => 3,
            Self::TransferFromUnfrozenToOperational => 4,
            Self::PayObligatoryPayment => 5,
        }
    }

    pub fn from_code(code: u32) -> Option<Self> {
        Self::ALL.into_iter().find(|method| method.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Genesis => "GENESIS",
            Self::InternalTransfer => "INTERNAL_TRANSFER",
            Self::InitializeMasternode => "INITIALIZE_MASTERNODE",
            Self::CloseMasternode => "CLOSE_MASTERNODE",
            Self::TransferFromUnfrozenToOperational => "TRANSFER_FROM_UNFROZEN_TO_OPERATIONAL",
            Self::PayObligatoryPayment => "PAY_OBLIGATORY_PAYMENT",
        }
    }
}

/// The envelope payload: which method to run and its encoded arguments.
///
/// `method` stays a raw code so that payloads naming an unknown method still
/// decode and can be rejected with a precise reason.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionPayload {
    pub method: u32,
    pub data: Vec<u8>,
}

impl TransactionPayload {
    /// Wrap method arguments into a payload.
    pub fn new(method: NodeAccountMethod, data: &impl Serialize) -> Result<Self, TransactionError> {
        Ok(Self {
            method: method.code(),
            data: codec::encode(data)?,
        })
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        codec::encode(self)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TransactionError> {
        codec::decode(bytes)
    }

    /// The method named by this payload.
    pub fn method(&self) -> Result<NodeAccountMethod, TransactionError> {
        NodeAccountMethod::from_code(self.method).ok_or(TransactionError::UnknownMethod(self.method))
    }

    /// Decode the method arguments.
    pub fn decode_data<P: DeserializeOwned>(&self) -> Result<P, TransactionError> {
        codec::decode(&self.data)
    }
}

/// Arguments of [`NodeAccountMethod::Genesis`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenesisPayload {
    pub total_supply: u64,
}

/// Arguments of [`NodeAccountMethod::InternalTransfer`].
///
/// `address_to` is carried as text and validated by the handler, so a
/// malformed address is reported as such rather than as a decode failure.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InternalTransferPayload {
    pub address_to: String,
    pub value: u64,
}

/// Arguments of [`NodeAccountMethod::InitializeMasternode`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InitializeMasternodePayload {
    pub value: u64,
}

/// Arguments of [`NodeAccountMethod::CloseMasternode`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CloseMasternodePayload {}

/// Arguments of [`NodeAccountMethod::TransferFromUnfrozenToOperational`].
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferFromUnfrozenToOperationalPayload {
    pub value: u64,
}

/// Arguments of [`NodeAccountMethod::PayObligatoryPayment`].
///
/// Deliberately empty: amount and committee come from chain settings and the
/// signer, never from the submitter.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ObligatoryPaymentPayload {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_codes_are_unique_and_roundtrip() {
        for method in NodeAccountMethod::ALL {
            assert_eq!(NodeAccountMethod::from_code(method.code()), Some(method));
        }
        assert_eq!(NodeAccountMethod::from_code(6), None);
    }

    #[test]
    fn unknown_method_is_reported() {
        let payload = TransactionPayload {
            method: 42,
            data: Vec::new(),
        };
        assert_eq!(payload.method(), Err(TransactionError::UnknownMethod(42)));
        assert_eq!(payload.method().unwrap_err().to_string(), "Unknown method");
    }

    #[test]
    fn transfer_payload_decodes() {
        let transfer = InternalTransferPayload {
            address_to: "ab".repeat(35),
            value: 10,
        };
        let payload = TransactionPayload::new(NodeAccountMethod::InternalTransfer, &transfer).unwrap();
        let bytes = payload.to_bytes().unwrap();
        let decoded = TransactionPayload::from_bytes(&bytes).unwrap();
        assert_eq!(decoded.method().unwrap(), NodeAccountMethod::InternalTransfer);
        assert_eq!(decoded.decode_data::<InternalTransferPayload>().unwrap(), transfer);
    }

    #[test]
    fn obligatory_payment_payload_is_empty() {
        let payload =
            TransactionPayload::new(NodeAccountMethod::PayObligatoryPayment, &ObligatoryPaymentPayload {})
                .unwrap();
        assert!(payload.data.is_empty());
    }

    #[test]
    fn truncated_arguments_fail_to_decode() {
        let payload = TransactionPayload {
            method: NodeAccountMethod::InitializeMasternode.code(),
            data: vec![1, 2, 3],
        };
        assert!(matches!(
            payload.decode_data::<InitializeMasternodePayload>(),
            Err(TransactionError::Decode(_))
        ));
    }
}
