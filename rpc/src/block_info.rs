//! Block-info configuration record kept by the validator in global state.

use bincode::Options;
use obol_types::Address;
use serde::{Deserialize, Serialize};

use crate::RpcError;

/// Namespace of block-info state.
pub const BLOCK_INFO_NAMESPACE: &str = "00b10c";

/// Address of the block-info configuration record.
///
/// `00b10c` namespace, `01` record type, zero-filled remainder.
pub fn block_info_config_address() -> Address {
    let mut raw = [0u8; Address::BYTES];
    raw[..4].copy_from_slice(&[0x00, 0xb1, 0x0c, 0x01]);
    Address::from_bytes(&raw)
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockInfoConfig {
    pub latest_block: u64,
    pub oldest_block: u64,
    pub target_count: u64,
    pub sync_tolerance: u64,
}

impl BlockInfoConfig {
    pub fn to_bytes(&self) -> Result<Vec<u8>, RpcError> {
        canonical()
            .serialize(self)
            .map_err(|e| RpcError::Internal(e.to_string()))
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, RpcError> {
        canonical()
            .deserialize(bytes)
            .map_err(|e| RpcError::Internal(format!("invalid block info config: {e}")))
    }
}

fn canonical() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}
