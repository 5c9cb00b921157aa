//! Validation performance benchmarks

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use csspv::*;
use std::fs;
use tempfile::TempDir;

const BASE_URL: &str = "https://example.org/style/";

const BLOCK: &str = "margin: 1em 2em; padding: 0 4px; color: #336699; \
    font: italic small-caps bold 12px/1.5 \"Open Sans\", serif; \
    border: 1px solid red; background: url(bg.png) no-repeat center / cover, white; \
    list-style: square inside; text-decoration: underline dotted blue; \
    flex: 1 1 auto; columns: 12em 3; grid-template-columns: repeat(3, 1fr); \
    transform: rotate(45deg) scale(2); width: var(--width)";

fn bench_single_longhand(c: &mut Criterion) {
    let tokens = tokenize("1px");
    c.bench_function("single_longhand", |b| {
        b.iter(|| validation::validate(black_box("border-top-width"), black_box(&tokens), "").unwrap())
    });
}

fn bench_shorthand_expansion(c: &mut Criterion) {
    let mut group = c.benchmark_group("shorthand_expansion");
    for (name, value) in [
        ("margin", "1px 2px 3px 4px"),
        ("border", "1px solid red"),
        ("font", "italic bold 12px/30px Georgia, serif"),
        ("background", "url(a.png) no-repeat left top / 50% auto, red"),
        ("grid", "auto-flow dense / 40px 40px"),
    ] {
        let tokens = tokenize(value);
        group.bench_with_input(name, &tokens, |b, tokens| {
            b.iter(|| validation::validate(black_box(name), black_box(tokens), BASE_URL).unwrap())
        });
    }
    group.finish();
}

fn bench_declaration_block(c: &mut Criterion) {
    let options = ValidationOptions {
        base_url: BASE_URL.to_string(),
        ..Default::default()
    };
    c.bench_function("declaration_block", |b| {
        b.iter(|| validate_stylesheet(black_box(BLOCK), &options))
    });
}

fn bench_large_file(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let input_path = temp_dir.path().join("large.css");

    let mut content = String::new();
    for _ in 0..200 {
        content.push_str(BLOCK);
        content.push(';');
    }
    fs::write(&input_path, content).unwrap();

    c.bench_function("large_file_validation", |b| {
        b.iter(|| validate_file(black_box(input_path.to_str().unwrap())).unwrap())
    });
}

criterion_group!(
    benches,
    bench_single_longhand,
    bench_shorthand_expansion,
    bench_declaration_block,
    bench_large_file
);

criterion_main!(benches);
