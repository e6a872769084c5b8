use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use obol_crypto::{address_for, keypair_from_seed, settings_address};
use obol_nullables::NullContext;
use obol_processor::settings::{
    obligatory_payment_addresses, ALLOWED_VALIDATORS_KEY, COMMITTEE_SIZE_KEY,
    OBLIGATORY_PAYMENT_KEY,
};
use obol_processor::{withdraw_tiered, NodeAccountHandler, Setting};
use obol_transactions::{
    InternalTransferPayload, NodeAccountMethod, ObligatoryPaymentPayload, TransactionBuilder,
    TransactionEnvelope,
};
use obol_types::{NodeAccount, Reputation};

fn put_setting(context: &NullContext, key: &str, value: &str) {
    context.insert(
        settings_address(key),
        Setting::single(key, value).to_bytes().unwrap(),
    );
}

fn committee_setup(size: u8) -> (NullContext, TransactionEnvelope) {
    let context = NullContext::new();
    let keys: Vec<_> = (1..=size).map(|seed| keypair_from_seed(&[seed; 32]).public).collect();
    let validators: Vec<String> = keys.iter().map(|key| key.to_hex()).collect();
    put_setting(&context, COMMITTEE_SIZE_KEY, &size.to_string());
    put_setting(&context, OBLIGATORY_PAYMENT_KEY, "1");
    put_setting(&context, ALLOWED_VALIDATORS_KEY, &validators.join(";"));

    let mut builder = TransactionBuilder::new(keypair_from_seed(&[1; 32]).private);
    for address in obligatory_payment_addresses() {
        builder = builder.input(address);
    }
    for key in &keys {
        let address = address_for(key);
        context.insert_account(&address, &NodeAccount::with_balance(u32::MAX as u64));
        builder = builder.touch(address);
    }
    let tx = builder
        .build(NodeAccountMethod::PayObligatoryPayment, &ObligatoryPaymentPayload {})
        .unwrap();
    (context, tx)
}

fn bench_obligatory_payment(c: &mut Criterion) {
    let mut group = c.benchmark_group("obligatory_payment");
    let handler = NodeAccountHandler::new(None);

    for size in [2u8, 4, 16, 64] {
        let (context, tx) = committee_setup(size);
        group.bench_with_input(BenchmarkId::new("apply", size), &size, |b, _| {
            b.iter(|| handler.apply(black_box(&tx), &context).unwrap());
        });
    }

    group.finish();
}

fn bench_internal_transfer(c: &mut Criterion) {
    let handler = NodeAccountHandler::new(None);
    let sender = keypair_from_seed(&[1; 32]).public;
    let receiver = address_for(&keypair_from_seed(&[2; 32]).public);
    let context = NullContext::new();
    context.insert_account(&address_for(&sender), &NodeAccount::with_balance(u64::MAX / 2));
    let tx = TransactionBuilder::new(keypair_from_seed(&[1; 32]).private)
        .touch(receiver.clone())
        .build(
            NodeAccountMethod::InternalTransfer,
            &InternalTransferPayload {
                address_to: receiver.to_string(),
                value: 1,
            },
        )
        .unwrap();

    c.bench_function("internal_transfer_apply", |b| {
        b.iter(|| handler.apply(black_box(&tx), &context).unwrap());
    });
}

fn bench_withdraw_tiered(c: &mut Criterion) {
    let template = NodeAccount {
        balance: 10,
        reputation: Reputation {
            frozen: 1_000_000,
            unfrozen: 10,
        },
        ..NodeAccount::default()
    };
    c.bench_function("withdraw_tiered_spill", |b| {
        b.iter(|| {
            let mut account = template.clone();
            black_box(withdraw_tiered(&mut account, black_box(500)))
        });
    });
}

criterion_group!(
    benches,
    bench_obligatory_payment,
    bench_internal_transfer,
    bench_withdraw_tiered
);
criterion_main!(benches);
