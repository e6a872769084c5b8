//! The node account record stored at every node-account address.

use crate::{NodeState, TypeError};
use bincode::Options;
use serde::{Deserialize, Serialize};

/// Two-tier reputation stake of a node.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reputation {
    /// Locked stake.
    pub frozen: u64,
    /// Liquid stake.
    pub unfrozen: u64,
}

/// Per-node balance record.
///
/// An absent address decodes as [`NodeAccount::default`]: every amount zero and
/// state [`NodeState::New`]. Amounts are unsigned and only ever changed with
/// checked arithmetic by the processor.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeAccount {
    /// Operational (transferable) token balance.
    pub balance: u64,
    pub reputation: Reputation,
    pub node_state: NodeState,
}

impl NodeAccount {
    /// An account holding only an operational balance.
    pub fn with_balance(balance: u64) -> Self {
        Self {
            balance,
            ..Self::default()
        }
    }

    /// Sum of all three tiers, or `None` on overflow.
    pub fn total_funds(&self) -> Option<u64> {
        self.balance
            .checked_add(self.reputation.unfrozen)?
            .checked_add(self.reputation.frozen)
    }

    /// Canonical byte representation written to global state.
    pub fn to_bytes(&self) -> Result<Vec<u8>, TypeError> {
        canonical()
            .serialize(self)
            .map_err(|e| TypeError::Serialization(e.to_string()))
    }

    /// Decode the canonical byte representation. Trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, TypeError> {
        canonical()
            .deserialize(bytes)
            .map_err(|e| TypeError::Serialization(e.to_string()))
    }
}

/// Fixed-width little-endian encoding that refuses trailing bytes.
fn canonical() -> impl Options {
    bincode::DefaultOptions::new().with_fixint_encoding()
}
