//! Criterion benchmarks for keystroke masking.
//!
//! `mask` runs on every keystroke and on every paste, so it should stay well
//! under a microsecond for typical input and scale linearly for large pastes.
//!
//! Run with:
//! ```bash
//! cargo bench --package vendor-form-core --bench mask_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use vendor_form_core::{mask, FieldId};

/// A typical single keystroke's worth of state for each kind of field.
const KEYSTROKE_INPUTS: &[(FieldId, &str)] = &[
    (FieldId::LegalCompanyName, "Acme Industries Private Limited"),
    (FieldId::VendorCode, "acme-0042"),
    (FieldId::PrimaryContactName, "Mary-Jane O'Neil"),
    (FieldId::PrimaryContactPhone, "98765-43210"),
    (FieldId::PrimaryContactEmail, "accounts@acme.example.in"),
    (FieldId::Gstin, "27aapfu0939f1zv"),
    (FieldId::Pincode, "400001"),
];

fn bench_keystroke(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask/keystroke");
    for &(id, raw) in KEYSTROKE_INPUTS {
        group.bench_with_input(BenchmarkId::from_parameter(id), &raw, |b, raw| {
            b.iter(|| mask(black_box(id), black_box(raw)));
        });
    }
    group.finish();
}

fn bench_paste(c: &mut Criterion) {
    let mut group = c.benchmark_group("mask/paste");
    for size in [64usize, 1024, 16 * 1024] {
        let raw: String = "ab-12 cd/".chars().cycle().take(size).collect();
        group.throughput(Throughput::Bytes(size as u64));
        group.bench_with_input(BenchmarkId::new("address", size), &raw, |b, raw| {
            b.iter(|| mask(black_box(FieldId::Address), black_box(raw)));
        });
        group.bench_with_input(BenchmarkId::new("gstin", size), &raw, |b, raw| {
            b.iter(|| mask(black_box(FieldId::Gstin), black_box(raw)));
        });
    }
    group.finish();
}

criterion_group!(benches, bench_keystroke, bench_paste);
criterion_main!(benches);
