use criterion::{black_box, criterion_group, criterion_main, Criterion};

use price_list::export::flatten;
use price_list::render::{render, RenderOptions};
use price_list::session::build_price_lists;
use price_list::types::RawRow;

fn rows(n: usize) -> Vec<RawRow> {
    (0..n)
        .map(|i| {
            RawRow::new()
                .with("Category", format!("Category {}", i % 17))
                .with("Brand", format!("Brand {}", i % 23))
                .with("SKU", format!("SKU{i:06}"))
                .with("Product Name", format!("Product {i}"))
                .with("Wholesale", (i % 100) as f64 + 0.25)
                .with("Trade £", format!("{}.99", i % 120))
                .with("(Box) Ctn", "1x6")
        })
        .collect()
}

fn bench_pipeline(c: &mut Criterion) {
    let input = rows(10_000);
    let options = RenderOptions::default();

    c.bench_function("normalize_and_group_10k", |b| {
        b.iter(|| build_price_lists(black_box(&input)).map(|(lists, _)| lists.product_count()))
    });

    let (lists, _) = build_price_lists(&input).expect("bench rows are valid");
    c.bench_function("flatten_wholesale_10k", |b| b.iter(|| flatten(black_box(lists.wholesale())).rows.len()));
    c.bench_function("render_trade_10k", |b| {
        b.iter(|| render(black_box(lists.trade()), &options).groups.len())
    });
}

criterion_group!(benches, bench_pipeline);
criterion_main!(benches);
