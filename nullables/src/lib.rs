//! Nullable infrastructure for deterministic testing.
//!
//! The validator's global state is abstracted behind
//! [`obol_store::LedgerContext`]. This crate provides a test-friendly
//! implementation that:
//! - Keeps state in memory, ordered by address
//! - Enforces the declared input/output address sets like the host does
//! - Can be told to time out, and records every write batch
//!
//! Usage: hand a [`NullContext`] to the processor instead of the host context.

pub mod context;

pub use context::NullContext;
