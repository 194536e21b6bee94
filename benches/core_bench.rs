//! Benchmarks for crisol core operations.
//!
//! Run with: cargo bench
//!
//! Results include 95% confidence intervals via Criterion.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use crisol::core::resolver;
use crisol::core::types::ResolvedEnvironment;
use crisol::recipe::template;

fn synthetic_document(addresses: usize) -> String {
    let mut document = String::from("{\n  \"processes\": {\n");
    for i in 0..addresses {
        let source = if i % 2 == 0 { "pypi" } else { "conda" };
        document.push_str(&format!(
            "    \"process_{i}\": \"{source}:package-{i}[>={i}.0]@module_{i}.api\",\n"
        ));
    }
    document.push_str("    \"sink\": \"local:builtin.sink\"\n  }\n}\n");
    document
}

fn bench_resolve(c: &mut Criterion) {
    let mut group = c.benchmark_group("resolve");
    for count in [1, 16, 128, 1024] {
        let document = synthetic_document(count);
        group.bench_with_input(BenchmarkId::from_parameter(count), &document, |b, doc| {
            b.iter(|| {
                let environment = resolver::resolve(black_box(doc), None).unwrap();
                black_box(environment);
            });
        });
    }
    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let document = synthetic_document(256);
    c.bench_function("scan_256", |b| {
        b.iter(|| {
            let references = resolver::scan(black_box(&document)).unwrap();
            black_box(references);
        });
    });
}

fn bench_template_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("template_render");
    for count in [0, 8, 64] {
        let environment = ResolvedEnvironment {
            pypi_dependencies: (0..count).map(|i| format!("package-{i}>=1.0")).collect(),
            conda_dependencies: (0..count).map(|i| format!("tool-{i}")).collect(),
            document: String::new(),
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(count),
            &environment,
            |b, env| {
                b.iter(|| {
                    let recipe = template::render(black_box(template::DEFAULT_TEMPLATE), env).unwrap();
                    black_box(recipe);
                });
            },
        );
    }
    group.finish();
}

criterion_group!(benches, bench_resolve, bench_scan, bench_template_render);
criterion_main!(benches);
