#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;

use obol_crypto::{address_for, keypair_from_seed, settings_address};
use obol_nullables::NullContext;
use obol_processor::settings::{
    obligatory_payment_addresses, ALLOWED_VALIDATORS_KEY, COMMITTEE_SIZE_KEY, MINIMUM_STAKE_KEY,
    OBLIGATORY_PAYMENT_KEY,
};
use obol_processor::{NodeAccountHandler, Setting};
use obol_transactions::{TransactionBuilder, TransactionPayload};
use obol_types::{NodeAccount, Reputation};

#[derive(Debug, Arbitrary)]
struct Input {
    method: u32,
    data: Vec<u8>,
    signer: u8,
    committee_size: u8,
    payment: u64,
    accounts: Vec<(u64, u64, u64)>,
}

// Applying any payload against any state either commits in one batch or
// leaves the state byte-for-byte unchanged.
fuzz_target!(|input: Input| {
    let context = NullContext::new();
    let members = input.accounts.len().clamp(1, 8);
    let put = |key: &str, value: &str| {
        context.insert(settings_address(key), Setting::single(key, value).to_bytes().unwrap());
    };
    let validators: Vec<String> = (1..=members as u8)
        .map(|seed| keypair_from_seed(&[seed; 32]).public.to_hex())
        .collect();
    put(COMMITTEE_SIZE_KEY, &input.committee_size.to_string());
    put(OBLIGATORY_PAYMENT_KEY, &input.payment.to_string());
    put(ALLOWED_VALIDATORS_KEY, &validators.join(";"));
    put(MINIMUM_STAKE_KEY, "1");

    let mut builder = TransactionBuilder::new(keypair_from_seed(&[input.signer % 9 + 1; 32]).private);
    for address in obligatory_payment_addresses() {
        builder = builder.input(address);
    }
    builder = builder.input(settings_address(MINIMUM_STAKE_KEY));
    for (i, (balance, unfrozen, frozen)) in input.accounts.iter().take(members).enumerate() {
        let address = address_for(&keypair_from_seed(&[i as u8 + 1; 32]).public);
        let account = NodeAccount {
            balance: *balance,
            reputation: Reputation {
                frozen: *frozen,
                unfrozen: *unfrozen,
            },
            ..NodeAccount::default()
        };
        context.insert_account(&address, &account);
        builder = builder.touch(address);
    }

    let payload = TransactionPayload {
        method: input.method % 8,
        data: input.data,
    };
    let Ok(bytes) = payload.to_bytes() else {
        return;
    };
    let tx = builder.build_raw(bytes).unwrap();

    let before = context.snapshot();
    match NodeAccountHandler::new(None).apply(&tx, &context) {
        Ok(()) => assert!(context.write_batches().len() <= 1),
        Err(_) => {
            assert_eq!(context.snapshot(), before);
            assert!(context.write_batches().is_empty());
        }
    }
});
