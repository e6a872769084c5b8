//! State address derivation and identifier shape checks.
//!
//! Address format: `namespace(3 bytes) ‖ digest(32 bytes)`, rendered as 70
//! lowercase hex characters.
//!
//! - Node accounts: namespace = SHA-512("node_account")[0..3],
//!   digest = SHA-512(hex(public_key))[0..32].
//! - Settings: namespace = `000000`, digest = four 8-byte chunks, one per
//!   dot-separated key part, each the first 8 bytes of SHA-256(part).

use crate::hash::{sha256, sha512};
use obol_types::address::is_lower_hex;
use obol_types::{Address, PublicKey};

/// Transaction family owning node-account state.
pub const NODE_ACCOUNT_FAMILY: &str = "node_account";
/// Reserved namespace of chain settings.
pub const SETTINGS_NAMESPACE: [u8; 3] = [0x00, 0x00, 0x00];

/// Number of key parts hashed into a settings address.
const SETTINGS_KEY_PARTS: usize = 4;
/// Bytes contributed by each settings key part.
const SETTINGS_PART_BYTES: usize = 8;

/// Hex length of a header-signature (transaction/batch) id.
const SIGNATURE_ID_LEN: usize = 128;
/// Hex length of an atomic-swap id.
const SWAP_ID_LEN: usize = 64;

/// The 3-byte namespace prefix of a transaction family.
pub fn namespace_prefix(family: &str) -> [u8; 3] {
    let digest = sha512(family.as_bytes());
    [digest[0], digest[1], digest[2]]
}

/// Build an address from a namespace and an arbitrary key.
pub fn make_address(namespace: [u8; 3], key: &[u8]) -> Address {
    let digest = sha512(key);
    let mut raw = [0u8; Address::BYTES];
    raw[..3].copy_from_slice(&namespace);
    raw[3..].copy_from_slice(&digest[..32]);
    Address::from_bytes(&raw)
}

/// Derive the node-account address owned by a public key.
///
/// Pure and deterministic: the same key always yields the same address.
pub fn address_for(public_key: &PublicKey) -> Address {
    make_address(
        namespace_prefix(NODE_ACCOUNT_FAMILY),
        public_key.to_hex().as_bytes(),
    )
}

/// Derive the address holding a chain setting.
pub fn settings_address(key: &str) -> Address {
    let mut raw = [0u8; Address::BYTES];
    raw[..3].copy_from_slice(&SETTINGS_NAMESPACE);

    let mut parts = key.splitn(SETTINGS_KEY_PARTS, '.');
    for i in 0..SETTINGS_KEY_PARTS {
        let part = parts.next().unwrap_or("");
        let digest = sha256(part.as_bytes());
        let offset = 3 + i * SETTINGS_PART_BYTES;
        raw[offset..offset + SETTINGS_PART_BYTES].copy_from_slice(&digest[..SETTINGS_PART_BYTES]);
    }

    Address::from_bytes(&raw)
}

/// Whether `value` is a well-formed state address.
pub fn is_address(value: &str) -> bool {
    is_lower_hex(value, Address::LENGTH)
}

/// Whether `value` is a well-formed transaction or batch id (128 lowercase hex).
pub fn validate_signature_id(value: &str) -> bool {
    is_lower_hex(value, SIGNATURE_ID_LEN)
}

/// Whether `value` is a well-formed atomic-swap id (64 lowercase hex).
pub fn validate_swap_id(value: &str) -> bool {
    is_lower_hex(value, SWAP_ID_LEN)
}
