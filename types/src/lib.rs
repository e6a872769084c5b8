//! Fundamental types for the Obol node-account ledger.
//!
//! This crate defines the core types shared across every other crate in the workspace:
//! state addresses, keys and signatures, and the node account record with its
//! reputation tiers and lifecycle state.

pub mod account;
pub mod address;
pub mod error;
pub mod keys;
pub mod state;

pub use account::{NodeAccount, Reputation};
pub use address::Address;
pub use error::TypeError;
pub use keys::{KeyPair, PrivateKey, PublicKey, Signature};
pub use state::NodeState;
