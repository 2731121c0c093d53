//! Benchmarks for the dispatch and record engines
//!
//! Measures:
//! - Leaf rule lists on strings
//! - Collection recursion over self-validating elements
//! - Record validation by reference and by name

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use nebula_validation::prelude::*;

struct Item {
    sku: String,
    quantity: u32,
}

record!(validatable Item {
    #[json = "sku"]
    sku,
    #[json = "qty"]
    quantity,
});

impl Validatable for Item {
    fn validate(&self, ctx: &Context) -> Result<(), Error> {
        validate_record_with_context(
            ctx,
            self,
            &[
                field(&self.sku, rules![required(), length(3, 16)]),
                field(&self.quantity, rules![required()]),
            ],
        )
    }
}

struct Order {
    reference: String,
    note: Option<String>,
    items: Vec<Item>,
}

record!(Order {
    #[json = "ref"]
    reference,
    note,
    items,
});

fn order(size: usize, broken_every: usize) -> Order {
    Order {
        reference: "ORD-1".into(),
        note: None,
        items: (0..size)
            .map(|i| Item {
                sku: if broken_every > 0 && i % broken_every == 0 {
                    "X".into()
                } else {
                    format!("SKU-{i:05}")
                },
                quantity: 1,
            })
            .collect(),
    }
}

fn leaf_rules(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/leaf");
    let value = String::from("nebula-validation");
    let required = required();
    let length = length(3, 32);

    group.bench_function("required_length", |b| {
        b.iter(|| black_box(validate(black_box(&value), &[&required, &length])));
    });

    group.bench_function("skip", |b| {
        b.iter(|| black_box(validate(black_box(&value), &[&SKIP, &required])));
    });

    group.finish();
}

fn collections(c: &mut Criterion) {
    let mut group = c.benchmark_group("dispatch/collection");

    for size in [10usize, 100, 1000] {
        let valid = order(size, 0).items;
        group.bench_with_input(BenchmarkId::new("valid", size), &valid, |b, items| {
            b.iter(|| black_box(validate(black_box(items), &[])));
        });

        let broken = order(size, 10).items;
        group.bench_with_input(BenchmarkId::new("broken", size), &broken, |b, items| {
            b.iter(|| black_box(validate(black_box(items), &[])));
        });
    }

    group.finish();
}

fn records(c: &mut Criterion) {
    let mut group = c.benchmark_group("record");
    let order = order(20, 0);

    group.bench_function("by_reference", |b| {
        b.iter(|| {
            black_box(validate_record(
                &order,
                &[
                    field(&order.reference, rules![required(), length(1, 32)]),
                    field(&order.note, rules![nil_or_not_empty()]),
                    field(&order.items, rules![length(1, 0)]),
                ],
            ))
        });
    });

    group.bench_function("by_name", |b| {
        b.iter(|| {
            black_box(validate_record(
                &order,
                &[
                    named_field("reference", rules![required(), length(1, 32)]),
                    named_field("note", rules![nil_or_not_empty()]),
                    named_field("items", rules![length(1, 0)]),
                ],
            ))
        });
    });

    group.finish();
}

criterion_group!(benches, leaf_rules, collections, records);
criterion_main!(benches);
