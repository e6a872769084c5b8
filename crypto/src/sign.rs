//! Header signatures.
//!
//! A transaction is identified by the signature over its serialized header.
//! Verification is strict: it rejects non-canonical signatures and
//! small-order signer keys.

use ed25519_dalek::{Signer, SigningKey, VerifyingKey};
use obol_types::{PrivateKey, PublicKey, Signature};

/// Sign serialized header bytes.
pub fn sign_header(header_bytes: &[u8], signer: &PrivateKey) -> Signature {
    Signature(SigningKey::from_bytes(&signer.0).sign(header_bytes).to_bytes())
}

/// Whether `signature` is the signer's strict Ed25519 signature over
/// `header_bytes`.
pub fn verify_header(header_bytes: &[u8], signature: &Signature, signer: &PublicKey) -> bool {
    VerifyingKey::from_bytes(&signer.0)
        .and_then(|key| {
            key.verify_strict(header_bytes, &ed25519_dalek::Signature::from_bytes(&signature.0))
        })
        .is_ok()
}
