//! Abstract global-state access for the Obol transaction processor.
//!
//! The validator hosting the processor owns the canonical state. It hands each
//! transaction a [`LedgerContext`] scoped to the addresses that transaction
//! declared; the processor reads and writes raw bytes through it and depends
//! only on this trait.

pub mod context;
pub mod error;

pub use context::{LedgerContext, StateEntry};
pub use error::StoreError;
