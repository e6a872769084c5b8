//! Lifecycle state of a node account.

use serde::{Deserialize, Serialize};

/// The masternode lifecycle state of a node account.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum NodeState {
    /// Account exists (or is implicitly zeroed) but never staked as a masternode.
    #[default]
    New,
    /// Masternode is initialized and its stake is frozen.
    Opened,
    /// Masternode was closed; balances stay addressable.
    Closed,
}

impl NodeState {
    /// Whether a masternode can be initialized from this state.
    pub fn can_open(&self) -> bool {
        matches!(self, Self::New)
    }

    /// Whether the masternode can be closed from this state.
    pub fn can_close(&self) -> bool {
        matches!(self, Self::Opened)
    }

    /// Upper-case wire name, as exposed by read-side queries.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::New => "NEW",
            Self::Opened => "OPENED",
            Self::Closed => "CLOSED",
        }
    }
}
