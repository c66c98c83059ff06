//! Engine Benchmarks
//!
//! Parse, differentiate and expand mixed expressions of growing size.

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use std::fmt::Write;
use std::hint::black_box;
use symb_cas::{Expr, parse};

// =============================================================================
// Expression Generator
// =============================================================================

/// Mixed expression with `n` terms: polynomials, trig, exponentials,
/// quotients and nested calls
fn generate_mixed(n: usize) -> String {
    let mut s = String::with_capacity(n * 40);
    for i in 1..=n {
        if i > 1 {
            s.push_str(if i % 3 == 1 { " - " } else { " + " });
        }
        let _ = match i % 5 {
            0 => write!(s, "{}*x^{}", i, i % 10 + 1),
            1 => write!(s, "sin({i}*x)*cos(x)"),
            2 => write!(s, "(exp(x/{i}) + ln(x + {i}))"),
            3 => write!(s, "(x^2 + {i})/(x + {i})"),
            _ => write!(s, "sin(exp(x) + {i})"),
        };
    }
    s
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse");
    for n in [10, 100, 300] {
        let input = generate_mixed(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, input| {
            b.iter(|| parse(black_box(input)));
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    let x = Expr::symbol("x");
    for n in [10, 100, 300] {
        let Ok(expr) = parse(&generate_mixed(n)) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &expr, |b, expr| {
            b.iter(|| black_box(expr).diff(black_box(&x)));
        });
    }
    group.finish();
}

fn bench_expand(c: &mut Criterion) {
    let mut group = c.benchmark_group("expand");
    group.sample_size(20);
    for n in [4, 8, 12] {
        let Ok(expr) = parse(&format!("(x + y + z + 1)^{n}")) else {
            continue;
        };
        group.bench_with_input(BenchmarkId::from_parameter(n), &expr, |b, expr| {
            b.iter(|| black_box(expr).expand());
        });
    }
    if let Ok(cubic) = parse("(3x +2)*(x^2-7x+9)*(x-1)") {
        group.bench_function("cubic", |b| b.iter(|| black_box(&cubic).expand()));
    }
    group.finish();
}

criterion_group!(benches, bench_parse, bench_diff, bench_expand);
criterion_main!(benches);
