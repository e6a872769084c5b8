#![no_main]

use libfuzzer_sys::fuzz_target;

use obol_transactions::{
    GenesisPayload, InitializeMasternodePayload, InternalTransferPayload, TransactionPayload,
    TransferFromUnfrozenToOperationalPayload,
};

// Decoding arbitrary bytes must fail cleanly, never panic or over-allocate.
fuzz_target!(|data: &[u8]| {
    if let Ok(payload) = TransactionPayload::from_bytes(data) {
        let _ = payload.method();
        let _ = payload.decode_data::<GenesisPayload>();
        let _ = payload.decode_data::<InternalTransferPayload>();
        let _ = payload.decode_data::<InitializeMasternodePayload>();
        let _ = payload.decode_data::<TransferFromUnfrozenToOperationalPayload>();
    }
    let _ = obol_types::NodeAccount::from_bytes(data);
});
