//! Ed25519 key derivation for transaction signers.

use ed25519_dalek::SigningKey;
use obol_types::{KeyPair, PrivateKey, PublicKey};

pub fn public_from_private(private: &PrivateKey) -> PublicKey {
    PublicKey(SigningKey::from_bytes(&private.0).verifying_key().to_bytes())
}

/// Pair a private key with its public key.
pub fn keypair_from_private(private: PrivateKey) -> KeyPair {
    KeyPair {
        public: public_from_private(&private),
        private,
    }
}

/// Deterministic key pair whose private key is `seed`.
///
/// Processing never generates keys, so there is no random constructor.
pub fn keypair_from_seed(seed: &[u8; 32]) -> KeyPair {
    keypair_from_private(PrivateKey(*seed))
}
