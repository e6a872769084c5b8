//! Cryptographic primitives for the Obol node-account ledger.
//!
//! - **Ed25519** for transaction header signing and verification
//! - **SHA-512 / SHA-256** for payload digests and state address derivation
//! - Address derivation for node accounts and chain settings, plus shape
//!   checks for addresses, header-signature ids and swap ids

pub mod address;
pub mod hash;
pub mod keys;
pub mod sign;

pub use address::{
    address_for, is_address, make_address, namespace_prefix, settings_address,
    validate_signature_id, validate_swap_id, NODE_ACCOUNT_FAMILY, SETTINGS_NAMESPACE,
};
pub use hash::{sha256, sha512, sha512_hex};
pub use keys::{keypair_from_private, keypair_from_seed, public_from_private};
pub use sign::{sign_header, verify_header};
