//! Benchmarks for per-record tuple and token generation
//!
//! Per-record cost is bounded by the 256-tuple cap; these measure a typical
//! record, a record that hits the cap, and key-count scaling.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use emtp::normalize::{AddressInput, StructuredAddress};
use emtp::{process_record, PipelineOptions, Record, TokenKey};

fn typical_record() -> Record {
    Record {
        name: "Dr. John Ronald Reuel Tolkien Jr".to_string(),
        dob: "1892-01-03".to_string(),
        phones: vec!["(212) 555-0100".to_string()],
        addresses: vec![AddressInput::Structured(StructuredAddress {
            line1: "20 Northmoor Road".to_string(),
            city: "Oxford".to_string(),
            state: "OX".to_string(),
            postal_code: "OX2 6".to_string(),
            ..StructuredAddress::default()
        })],
        ids: vec!["ID-123456789".to_string()],
    }
}

fn capped_record() -> Record {
    Record {
        phones: (0..40).map(|i| format!("(303) 555-{i:04}")).collect(),
        addresses: (0..20)
            .map(|i| AddressInput::from(format!("{i} Main Street, Denver, CO 80{i:03}").as_str()))
            .collect(),
        ..typical_record()
    }
}

fn test_keys(count: u8) -> Vec<TokenKey> {
    (0..count)
        .map(|k| TokenKey::new((0u8..32).map(|b| b ^ k).collect()))
        .collect()
}

fn benchmark_typical_record(c: &mut Criterion) {
    let record = typical_record();
    let keys = test_keys(1);
    let options = PipelineOptions::default();

    c.bench_function("process_typical_record", |b| {
        b.iter(|| process_record(black_box(&record), &keys, &options));
    });
}

fn benchmark_capped_record(c: &mut Criterion) {
    let record = capped_record();
    let keys = test_keys(1);
    let options = PipelineOptions::default();

    c.bench_function("process_capped_record", |b| {
        b.iter(|| process_record(black_box(&record), &keys, &options));
    });
}

fn benchmark_key_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_scaling");
    let record = typical_record();
    let options = PipelineOptions::default();

    for count in [0u8, 1, 2, 4, 8].iter() {
        let keys = test_keys(*count);
        group.bench_with_input(BenchmarkId::from_parameter(count), count, |b, _| {
            b.iter(|| process_record(black_box(&record), &keys, &options));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_typical_record,
    benchmark_capped_record,
    benchmark_key_scaling
);
criterion_main!(benches);
