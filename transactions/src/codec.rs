//! Payload codec: canonical serialization for payloads and headers.
//!
//! Every validator must decode the same bytes the same way, so the encoding is
//! fixed-width little-endian bincode with a size limit and no trailing bytes.

use crate::TransactionError;
use bincode::Options;
use serde::de::DeserializeOwned;
use serde::Serialize;

/// Maximum encoded payload size in bytes.
pub const MAX_PAYLOAD_SIZE: u64 = 64 * 1024;

fn options() -> impl Options {
    bincode::DefaultOptions::new()
        .with_fixint_encoding()
        .with_limit(MAX_PAYLOAD_SIZE)
}

/// Encode a value into its canonical bytes.
pub fn encode(value: &impl Serialize) -> Result<Vec<u8>, TransactionError> {
    options()
        .serialize(value)
        .map_err(|e| TransactionError::Encode(e.to_string()))
}

/// Decode canonical bytes, rejecting oversize input and trailing bytes.
pub fn decode<T: DeserializeOwned>(data: &[u8]) -> Result<T, TransactionError> {
    options()
        .deserialize(data)
        .map_err(|e| TransactionError::Decode(e.to_string()))
}
