//! Read-side query contracts for the Obol node-account ledger.
//!
//! Provides, as plain functions over an injected reader or source:
//! - Request parameter validation (addresses, batch/transaction ids, swap ids,
//!   listing filters)
//! - Node account lookup
//! - Current block number
//! - Transaction and batch lookup, batch status, transaction listing

pub mod block_info;
pub mod error;
pub mod params;
pub mod query;

pub use error::RpcError;
pub use params::ListTransactionsParams;
pub use query::{
    fetch_batch, fetch_transaction, get_batch_status, get_block_number, get_node_account,
    list_transactions, BatchStatus, StateReader, TransactionSource,
};
