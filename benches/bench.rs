//! Criterion benchmarks for expression parsing and matching.

use criterion::{Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use termsieve::{matches, parse};

/// A realistic saved-alert filter: a long OR chain of words and phrases.
fn alert_filter() -> String {
    let words = [
        "defense",
        "budget",
        "technology",
        "electronics",
        "network",
        "command",
        "control",
        "communication",
        "autonomous",
        "\"mixed signal\"",
        "\"rapid prototyping\"",
        "tactical",
        "strategic",
        "space",
        "medical",
        "cybersecurity",
        "guidance",
        "navigation",
        "gyro",
        "sensor",
        "payload",
        "geospatial",
        "weapon",
        "missile",
        "strike",
        "drone",
        "unmanned",
        "intelligence",
        "surveillance",
        "reconnaissance",
        "energy",
        "environment",
    ];
    words.join(" or ")
}

/// Generate article-like text that matches only near the end.
fn article_text(words: usize) -> String {
    let filler = [
        "the", "quick", "brown", "fox", "jumps", "over", "lazy", "dogs", "while", "birds",
        "watch", "from", "tall", "trees", "nearby",
    ];
    let mut text = Vec::with_capacity(words + 1);
    for i in 0..words {
        text.push(filler[(i * 7) % filler.len()]);
    }
    text.push("missile");
    text.join(" ")
}

fn bench_parse(c: &mut Criterion) {
    let filter = alert_filter();
    let or_chain = (0..500)
        .map(|n| format!("term{n}"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let nested = format!("{}core{}", "(".repeat(50), ")".repeat(50));

    let mut group = c.benchmark_group("parse");
    group.bench_function("alert_filter", |b| {
        b.iter(|| parse(black_box(&filter)).unwrap())
    });
    group.bench_function("or_chain_500", |b| {
        b.iter(|| parse(black_box(&or_chain)).unwrap())
    });
    group.bench_function("nested_50", |b| {
        b.iter(|| parse(black_box(&nested)).unwrap())
    });
    group.finish();
}

fn bench_matches(c: &mut Criterion) {
    let filter = alert_filter();
    let text = article_text(500).to_lowercase();
    let tree = parse(&filter).unwrap();

    let mut group = c.benchmark_group("matches");
    group.throughput(Throughput::Bytes(text.len() as u64));
    group.bench_function("tree_eval", |b| {
        b.iter(|| tree.matches(black_box(&text)))
    });
    group.bench_function("parse_and_eval", |b| {
        b.iter(|| matches(black_box(&filter), black_box(&text)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_parse, bench_matches);
criterion_main!(benches);
