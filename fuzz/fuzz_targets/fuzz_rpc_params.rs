#![no_main]

use libfuzzer_sys::fuzz_target;

use obol_rpc::params::{require_address, require_batch_id, require_swap_id};
use obol_rpc::ListTransactionsParams;

// Parameter validation must accept or reject any JSON without panicking.
fuzz_target!(|data: &[u8]| {
    let Ok(params) = serde_json::from_slice::<serde_json::Value>(data) else {
        return;
    };
    let _ = require_address(&params, "node_account_address");
    let _ = require_batch_id(&params);
    let _ = require_swap_id(&params);
    let _ = ListTransactionsParams::parse(&params);
});
