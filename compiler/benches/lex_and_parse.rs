//! Lexing and full compilation throughput over generated scripts.
//!
//! Run with: `cargo bench -p compiler`.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

/// A script of `n` statement blocks mixing declarations, arithmetic,
/// built-ins and a function body.
fn generate_script(n: usize) -> String {
    let mut script = String::from("int x\nint y\nfloat t\n");
    for i in 0..n {
        script.push_str(&format!("x <- ({i} + 3) * 2 - x / 4\n"));
        script.push_str("y <- x * x + 1\n");
        script.push_str(&format!("t <- {i}.5 * 0.25\n"));
        script.push_str("move x y\n");
        script.push_str(&format!("start f{i}\nint a\na <- x\nend\n"));
    }
    script.push_str("display x\n");
    script
}

fn bench_lex(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex");
    for size in [10, 100, 1000] {
        let source = generate_script(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| macro_parser::tokenize(black_box(source)).expect("lex failed"))
        });
    }
    group.finish();
}

fn bench_lex_and_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("lex_and_parse");
    for size in [10, 100, 1000] {
        let source = generate_script(size);
        group.throughput(Throughput::Bytes(source.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &source, |b, source| {
            b.iter(|| compiler::compile(black_box(source)).expect("compile failed"))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_lex, bench_lex_and_parse);
criterion_main!(benches);
