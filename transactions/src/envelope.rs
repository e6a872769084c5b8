//! Signed transaction envelope as delivered by the validator.

use crate::codec;
use crate::payload::{NodeAccountMethod, TransactionPayload};
use crate::TransactionError;
use obol_crypto::{address_for, keypair_from_private, sha512_hex, sign_header, NODE_ACCOUNT_FAMILY};
use obol_types::{Address, KeyPair, PrivateKey, PublicKey, Signature};
use serde::{Deserialize, Serialize};

/// Family version this processor implements.
pub const NODE_ACCOUNT_VERSION: &str = "0.1";

/// Signed metadata of a transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionHeader {
    pub signer_public_key: PublicKey,
    pub batcher_public_key: PublicKey,
    pub family_name: String,
    pub family_version: String,
    /// Addresses the transaction may read.
    pub inputs: Vec<Address>,
    /// Addresses the transaction may write.
    pub outputs: Vec<Address>,
    /// Header signatures of transactions that must be committed first.
    pub dependencies: Vec<String>,
    /// Lowercase hex SHA-512 of the payload bytes.
    pub payload_sha512: String,
    pub nonce: String,
}

impl TransactionHeader {
    /// Canonical bytes covered by the header signature.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TransactionError> {
        codec::encode(self)
    }

    /// Node-account address of the signer.
    pub fn signer_address(&self) -> Address {
        address_for(&self.signer_public_key)
    }

    pub fn declares_input(&self, address: &Address) -> bool {
        self.inputs.contains(address)
    }

    pub fn declares_output(&self, address: &Address) -> bool {
        self.outputs.contains(address)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionEnvelope {
    pub header: TransactionHeader,
    pub header_signature: Signature,
    pub payload: Vec<u8>,
}

impl TransactionEnvelope {
    /// Transaction id: the hex header signature.
    pub fn id(&self) -> String {
        self.header_signature.to_hex()
    }

    pub fn signer(&self) -> &PublicKey {
        &self.header.signer_public_key
    }

    /// Decode the payload bytes.
    pub fn decode_payload(&self) -> Result<TransactionPayload, TransactionError> {
        TransactionPayload::from_bytes(&self.payload)
    }
}

/// Builds and signs node-account transactions.
///
/// The signer's own address is always declared as both input and output;
/// further addresses are added with [`TransactionBuilder::input`] and
/// [`TransactionBuilder::output`].
pub struct TransactionBuilder {
    signer: KeyPair,
    batcher: PublicKey,
    family_name: String,
    family_version: String,
    inputs: Vec<Address>,
    outputs: Vec<Address>,
    dependencies: Vec<String>,
    nonce: String,
}

impl TransactionBuilder {
    pub fn new(private_key: PrivateKey) -> Self {
        let signer = keypair_from_private(private_key);
        let own = address_for(&signer.public);
        Self {
            batcher: signer.public,
            signer,
            family_name: NODE_ACCOUNT_FAMILY.to_string(),
            family_version: NODE_ACCOUNT_VERSION.to_string(),
            inputs: vec![own.clone()],
            outputs: vec![own],
            dependencies: Vec::new(),
            nonce: String::new(),
        }
    }

    pub fn family(mut self, name: &str, version: &str) -> Self {
        self.family_name = name.to_string();
        self.family_version = version.to_string();
        self
    }

    pub fn batcher(mut self, batcher: PublicKey) -> Self {
        self.batcher = batcher;
        self
    }

    pub fn input(mut self, address: Address) -> Self {
        if !self.inputs.contains(&address) {
            self.inputs.push(address);
        }
        self
    }

    pub fn output(mut self, address: Address) -> Self {
        if !self.outputs.contains(&address) {
            self.outputs.push(address);
        }
        self
    }

    /// Declare an address as both input and output.
    pub fn touch(self, address: Address) -> Self {
        self.input(address.clone()).output(address)
    }

    pub fn dependency(mut self, id: impl Into<String>) -> Self {
        self.dependencies.push(id.into());
        self
    }

    pub fn nonce(mut self, nonce: impl Into<String>) -> Self {
        self.nonce = nonce.into();
        self
    }

    /// Encode `data` as the arguments of `method` and sign the envelope.
    pub fn build(
        self,
        method: NodeAccountMethod,
        data: &impl Serialize,
    ) -> Result<TransactionEnvelope, TransactionError> {
        let payload = TransactionPayload::new(method, data)?;
        self.build_raw(payload.to_bytes()?)
    }

    /// Sign an envelope around arbitrary payload bytes.
    pub fn build_raw(self, payload: Vec<u8>) -> Result<TransactionEnvelope, TransactionError> {
        let header = TransactionHeader {
            signer_public_key: self.signer.public,
            batcher_public_key: self.batcher,
            family_name: self.family_name,
            family_version: self.family_version,
            inputs: self.inputs,
            outputs: self.outputs,
            dependencies: self.dependencies,
            payload_sha512: sha512_hex(&payload),
            nonce: self.nonce,
        };
        let header_signature = sign_header(&header.to_bytes()?, &self.signer.private);
        Ok(TransactionEnvelope {
            header,
            header_signature,
            payload,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload::InternalTransferPayload;
    use obol_crypto::{keypair_from_seed, verify_header};

    fn private(seed: u8) -> PrivateKey {
        keypair_from_seed(&[seed; 32]).private
    }

    #[test]
    fn builder_declares_signer_address() {
        let envelope = TransactionBuilder::new(private(1))
            .build(NodeAccountMethod::CloseMasternode, &crate::payload::CloseMasternodePayload {})
            .unwrap();
        let own = envelope.header.signer_address();
        assert!(envelope.header.declares_input(&own));
        assert!(envelope.header.declares_output(&own));
        assert_eq!(envelope.header.family_name, NODE_ACCOUNT_FAMILY);
        assert_eq!(envelope.header.family_version, NODE_ACCOUNT_VERSION);
    }

    #[test]
    fn header_signature_verifies() {
        let envelope = TransactionBuilder::new(private(2))
            .nonce("1")
            .build(NodeAccountMethod::PayObligatoryPayment, &crate::payload::ObligatoryPaymentPayload {})
            .unwrap();
        let header_bytes = envelope.header.to_bytes().unwrap();
        assert!(verify_header(
            &header_bytes,
            &envelope.header_signature,
            envelope.signer()
        ));
        assert_eq!(envelope.id().len(), 128);
    }

    #[test]
    fn payload_hash_is_recorded() {
        let to = address_for(&keypair_from_seed(&[9; 32]).public);
        let envelope = TransactionBuilder::new(private(3))
            .touch(to.clone())
            .build(
                NodeAccountMethod::InternalTransfer,
                &InternalTransferPayload {
                    address_to: to.to_string(),
                    value: 5,
                },
            )
            .unwrap();
        assert_eq!(envelope.header.payload_sha512, sha512_hex(&envelope.payload));
        assert!(envelope.header.declares_output(&to));
        let payload = envelope.decode_payload().unwrap();
        assert_eq!(payload.method().unwrap(), NodeAccountMethod::InternalTransfer);
    }

    #[test]
    fn touch_does_not_duplicate() {
        let kp = keypair_from_seed(&[4; 32]);
        let own = address_for(&kp.public);
        let envelope = TransactionBuilder::new(private(4))
            .touch(own)
            .build_raw(Vec::new())
            .unwrap();
        assert_eq!(envelope.header.inputs.len(), 1);
        assert_eq!(envelope.header.outputs.len(), 1);
    }
}
