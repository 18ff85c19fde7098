//! Benchmarks for scanning and rendering JSON documents of increasing size.
use criterion::{
    BenchmarkId, Criterion, Throughput, criterion_group, criterion_main,
};
use jsonhl::render::Emitter;
use jsonhl::tokenizer::scan;
use std::hint::black_box;

/// A pretty-printed page of `items` timeline entries.
fn timeline(items: usize) -> String {
    let data: Vec<serde_json::Value> = (0..items)
        .map(|i| {
            serde_json::json!({
                "id": i.to_string(),
                "type": "status_update",
                "status": 200,
                "payload": {
                    "content":
                        format!("post number {i} with an \"escaped\" quote"),
                    "author": {"handle": "rustacean", "verified": i % 2 == 0},
                    "metrics": {
                        "impressions": i * 1000,
                        "ratio": 0.25,
                        "reply_to": null
                    }
                }
            })
        })
        .collect();
    let page = serde_json::json!({"method": "GET", "data": data});
    serde_json::to_string_pretty(&page).expect("serializable document")
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render");
    let emitter = Emitter::default();
    let line_safe = Emitter::default().line_safe(true);

    for items in [10, 100, 1000] {
        let document = timeline(items);
        group.throughput(Throughput::Bytes(document.len() as u64));

        group.bench_with_input(
            BenchmarkId::new("scan", items),
            &document,
            |b, doc| b.iter(|| scan(black_box(doc.as_bytes())).count()),
        );
        group.bench_with_input(
            BenchmarkId::new("render", items),
            &document,
            |b, doc| b.iter(|| emitter.render(black_box(doc))),
        );
        group.bench_with_input(
            BenchmarkId::new("render_line_safe", items),
            &document,
            |b, doc| b.iter(|| line_safe.render(black_box(doc))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_render);
criterion_main!(benches);
