//! Criterion benchmarks for dualre.
//!
//! Each group runs the same workload through `dualre::Regex` and, where the
//! pattern is expressible there, the plain `regex` crate for reference.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use dualre::Regex;

const COMPILE_PATTERNS: &[(&str, &str)] = &[
    ("email", r"\b\w+@\w+\.\w+\b"),
    ("simple", r"p([a-z]+)ch"),
    (
        "url",
        r"^(https?://)?([\da-z\.-]+)\.([a-z\.]{2,6})([/\w \.-]*)*/?$",
    ),
    ("lookbehind", r"(?<=foo)bar"),
    ("backreference", r"(\w+)\s+\1"),
];

fn bench_compile(c: &mut Criterion) {
    let mut group = c.benchmark_group("compile");
    for &(name, pattern) in COMPILE_PATTERNS {
        group.bench_function(format!("dualre/{name}"), |bench| {
            bench.iter(|| Regex::new(black_box(pattern)))
        });
        if regex::Regex::new(pattern).is_ok() {
            group.bench_function(format!("regex/{name}"), |bench| {
                bench.iter(|| regex::Regex::new(black_box(pattern)))
            });
        }
    }
    group.finish();
}

fn bench_is_match(c: &mut Criterion) {
    let cases = [
        ("simple", r"p([a-z]+)ch", "peach punch pinch"),
        ("email", r"\b\w+@\w+\.\w+\b", "test@example.com"),
        ("backreference", r"(\w+)\s+\1", "hello hello world"),
        ("lookbehind", r"(?<=foo)bar", "foobar"),
    ];
    let mut group = c.benchmark_group("is_match");
    for (name, pattern, subject) in cases {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        group.bench_function(format!("dualre/{name}"), |bench| {
            bench.iter(|| re.is_match(black_box(subject)))
        });
        if let Ok(reference) = regex::Regex::new(pattern) {
            group.bench_function(format!("regex/{name}"), |bench| {
                bench.iter(|| reference.is_match(black_box(subject)))
            });
        }
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let cases = [
        ("simple", r"p([a-z]+)ch", "peach punch pinch"),
        ("submatch", r"(\w+)\s+(\w+)", "hello world"),
        ("no_match", r"xyz", "abc def ghi"),
    ];
    let mut group = c.benchmark_group("find");
    for (name, pattern, subject) in cases {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        group.bench_function(format!("dualre/find/{name}"), |bench| {
            bench.iter(|| re.find(black_box(subject)).map(|m| m.range()))
        });
        group.bench_function(format!("dualre/captures/{name}"), |bench| {
            bench.iter(|| re.captures(black_box(subject)).map(|c| c.len()))
        });
    }
    group.finish();
}

fn bench_replace(c: &mut Criterion) {
    let cases = [
        ("simple", r"p([a-z]+)ch", "peach punch pinch", "FRUIT"),
        ("no_match", r"xyz", "abc def ghi", "NONE"),
        ("multiple", r"\b\w+\b", "one two three", "word"),
        ("dedupe", r"(\w+) \1", "hi hi yo yo no", "$1"),
    ];
    let mut group = c.benchmark_group("replace_all");
    for (name, pattern, subject, rep) in cases {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        group.bench_function(format!("dualre/{name}"), |bench| {
            bench.iter(|| re.replace_all(black_box(subject), rep).len())
        });
        if let Ok(reference) = regex::Regex::new(pattern) {
            group.bench_function(format!("regex/{name}"), |bench| {
                bench.iter(|| reference.replace_all(black_box(subject), rep).len())
            });
        }
    }
    group.finish();
}

fn bench_find_all(c: &mut Criterion) {
    let cases = [
        ("simple", r"p([a-z]+)ch", "peach punch pinch"),
        ("words", r"\b\w+\b", "one two three four five"),
        ("empty", r"x*", "one two three four five"),
    ];
    let mut group = c.benchmark_group("find_all");
    for (name, pattern, subject) in cases {
        let Ok(re) = Regex::new(pattern) else {
            continue;
        };
        group.bench_function(format!("dualre/{name}"), |bench| {
            bench.iter(|| re.find_all(black_box(subject), -1).len())
        });
        group.bench_function(format!("dualre/split/{name}"), |bench| {
            bench.iter(|| re.split(black_box(subject), -1).len())
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_compile,
    bench_is_match,
    bench_find,
    bench_replace,
    bench_find_all
);
criterion_main!(benches);
