//! Read-side queries over global state and the validator's transaction store.
//!
//! Every query validates its parameters first and only then touches the
//! injected reader or source, so malformed requests never cause I/O.

use obol_store::LedgerContext;
use obol_types::{Address, NodeAccount};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::block_info::{block_info_config_address, BlockInfoConfig};
use crate::params::{
    require_address, require_batch_id, require_transaction_id, ListTransactionsParams,
};
use crate::RpcError;

/// Point reads of global state.
pub trait StateReader {
    fn get_value(&self, address: &Address) -> Result<Option<Vec<u8>>, RpcError>;
}

impl<T: LedgerContext + ?Sized> StateReader for T {
    fn get_value(&self, address: &Address) -> Result<Option<Vec<u8>>, RpcError> {
        Ok(self.get_one(address)?)
    }
}

/// Commit status of a batch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Committed,
    Invalid,
    Pending,
    Unknown,
}

impl BatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Committed => "COMMITTED",
            Self::Invalid => "INVALID",
            Self::Pending => "PENDING",
            Self::Unknown => "UNKNOWN",
        }
    }
}

/// The validator's view of transactions and batches.
///
/// Ids passed in are already validated. `Ok(None)` means not found.
pub trait TransactionSource {
    fn transaction(&self, id: &str) -> Result<Option<Value>, RpcError>;
    fn batch(&self, id: &str) -> Result<Option<Value>, RpcError>;
    fn batch_status(&self, id: &str) -> Result<Option<BatchStatus>, RpcError>;
    fn list_transactions(&self, filters: &ListTransactionsParams) -> Result<Value, RpcError>;
}

/// Node account at `params.node_account_address`.
pub fn get_node_account<R: StateReader + ?Sized>(
    reader: &R,
    params: &Value,
) -> Result<NodeAccount, RpcError> {
    let address = require_address(params, "node_account_address")?;
    let raw = reader
        .get_value(&address)?
        .ok_or_else(|| RpcError::NotFound(format!("Node account with address `{address}` not found.")))?;
    NodeAccount::from_bytes(&raw).map_err(|e| RpcError::Internal(e.to_string()))
}

/// Number of the next block; `0` before the first block-info record exists.
pub fn get_block_number<R: StateReader + ?Sized>(reader: &R) -> Result<u64, RpcError> {
    let Some(raw) = reader.get_value(&block_info_config_address())? else {
        debug!("block info config not found, reporting block number 0");
        return Ok(0);
    };
    let config = BlockInfoConfig::from_bytes(&raw)?;
    config
        .latest_block
        .checked_add(1)
        .ok_or_else(|| RpcError::Internal("latest block number overflows".to_string()))
}

pub fn fetch_transaction<S: TransactionSource + ?Sized>(
    source: &S,
    params: &Value,
) -> Result<Value, RpcError> {
    let id = require_transaction_id(params)?;
    source
        .transaction(&id)?
        .ok_or_else(|| RpcError::NotFound(format!("Transaction with id \"{id}\" not found")))
}

pub fn fetch_batch<S: TransactionSource + ?Sized>(
    source: &S,
    params: &Value,
) -> Result<Value, RpcError> {
    let id = require_batch_id(params)?;
    source
        .batch(&id)?
        .ok_or_else(|| RpcError::NotFound(format!("Batch with batch id `{id}` not found.")))
}

pub fn get_batch_status<S: TransactionSource + ?Sized>(
    source: &S,
    params: &Value,
) -> Result<BatchStatus, RpcError> {
    let id = require_batch_id(params)?;
    Ok(source.batch_status(&id)?.unwrap_or(BatchStatus::Unknown))
}

pub fn list_transactions<S: TransactionSource + ?Sized>(
    source: &S,
    params: &Value,
) -> Result<Value, RpcError> {
    let filters = ListTransactionsParams::parse(params)?;
    source.list_transactions(&filters)
}

#[cfg(test)]
mod tests {
    use super::*;
    use obol_nullables::NullContext;
    use obol_types::Reputation;
    use serde_json::json;
    use std::cell::Cell;
    use std::collections::HashMap;

    const BATCH_ID: &str = "5b3261a62694198d7eb034484abc06dfe997eca0f29f5f1019ba4d460e8b0977\
                            3cf52f8235ab89c273da3725dd3c212c955734332777e02725e78333aba7f1f5";

    #[derive(Default)]
    struct StubSource {
        transactions: HashMap<String, Value>,
        batches: HashMap<String, (Value, BatchStatus)>,
        calls: Cell<usize>,
    }

    impl TransactionSource for StubSource {
        fn transaction(&self, id: &str) -> Result<Option<Value>, RpcError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.transactions.get(id).cloned())
        }

        fn batch(&self, id: &str) -> Result<Option<Value>, RpcError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.batches.get(id).map(|(batch, _)| batch.clone()))
        }

        fn batch_status(&self, id: &str) -> Result<Option<BatchStatus>, RpcError> {
            self.calls.set(self.calls.get() + 1);
            Ok(self.batches.get(id).map(|(_, status)| *status))
        }

        fn list_transactions(&self, filters: &ListTransactionsParams) -> Result<Value, RpcError> {
            self.calls.set(self.calls.get() + 1);
            Ok(json!({ "limit": filters.limit }))
        }
    }

    fn address(byte: u8) -> Address {
        Address::from_bytes(&[byte; Address::BYTES])
    }

    #[test]
    fn node_account_found() {
        let context = NullContext::new();
        let account = NodeAccount {
            balance: 10,
            reputation: Reputation {
                frozen: 2,
                unfrozen: 3,
            },
            ..NodeAccount::default()
        };
        context.insert_account(&address(0x11), &account);

        let params = json!({ "node_account_address": address(0x11).as_str() });
        let found = get_node_account(&context, &params).unwrap();
        assert_eq!(found, account);
        let json = serde_json::to_value(found).unwrap();
        assert_eq!(
            json,
            json!({
                "balance": 10,
                "reputation": { "frozen": 2, "unfrozen": 3 },
                "node_state": "NEW",
            })
        );
    }

    #[test]
    fn node_account_absent_is_not_found() {
        let context = NullContext::new();
        let params = json!({ "node_account_address": address(0x22).as_str() });
        assert!(matches!(
            get_node_account(&context, &params),
            Err(RpcError::NotFound(_))
        ));
    }

    #[test]
    fn node_account_params_validated_before_reading() {
        let context = NullContext::new();
        context.time_out_next_call();
        let err = get_node_account(&context, &json!({})).unwrap_err();
        assert_eq!(err.message(), "Missed address.");
        // The armed timeout surfaces on the first real read.
        let params = json!({ "node_account_address": address(1).as_str() });
        assert!(matches!(
            get_node_account(&context, &params),
            Err(RpcError::Internal(_))
        ));
    }

    #[test]
    fn block_number_defaults_to_zero() {
        assert_eq!(get_block_number(&NullContext::new()).unwrap(), 0);
    }

    #[test]
    fn block_number_is_latest_plus_one() {
        let context = NullContext::new();
        let config = BlockInfoConfig {
            latest_block: 41,
            ..BlockInfoConfig::default()
        };
        context.insert(block_info_config_address(), config.to_bytes().unwrap());
        assert_eq!(get_block_number(&context).unwrap(), 42);
    }

    #[test]
    fn fetch_transaction_paths() {
        let mut source = StubSource::default();
        source
            .transactions
            .insert(BATCH_ID.to_string(), json!({ "header_signature": BATCH_ID }));

        let found = fetch_transaction(&source, &json!({ "id": BATCH_ID })).unwrap();
        assert_eq!(found["header_signature"], BATCH_ID);

        let other = "0".repeat(128);
        let err = fetch_transaction(&source, &json!({ "id": other })).unwrap_err();
        assert_eq!(
            err,
            RpcError::NotFound(format!("Transaction with id \"{other}\" not found"))
        );

        let calls = source.calls.get();
        let err = fetch_transaction(&source, &json!({ "id": 12345 })).unwrap_err();
        assert_eq!(err.message(), "Given transaction id is not a valid.");
        assert_eq!(source.calls.get(), calls);
    }

    #[test]
    fn batch_queries() {
        let mut source = StubSource::default();
        source.batches.insert(
            BATCH_ID.to_string(),
            (json!({ "header_signature": BATCH_ID }), BatchStatus::Committed),
        );

        let status = get_batch_status(&source, &json!({ "id": BATCH_ID })).unwrap();
        assert_eq!(status.as_str(), "COMMITTED");
        assert_eq!(serde_json::to_value(status).unwrap(), json!("COMMITTED"));
        assert!(fetch_batch(&source, &json!({ "id": BATCH_ID })).is_ok());

        let other = "1".repeat(128);
        assert_eq!(
            get_batch_status(&source, &json!({ "id": other })).unwrap(),
            BatchStatus::Unknown
        );
        assert_eq!(
            fetch_batch(&source, &json!({ "id": other })).unwrap_err(),
            RpcError::NotFound(format!("Batch with batch id `{other}` not found."))
        );
        assert_eq!(
            get_batch_status(&source, &json!({ "id": "" })).unwrap_err().message(),
            "Missed id."
        );
    }

    #[test]
    fn listing_delegates_validated_filters() {
        let source = StubSource::default();
        let listed = list_transactions(&source, &json!({ "limit": 5 })).unwrap();
        assert_eq!(listed["limit"], 5);
        assert!(list_transactions(&source, &json!({ "limit": "5" })).is_err());
        assert_eq!(source.calls.get(), 1);
    }
}
