use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use ideguard::rules::ThreatScanner;
use ideguard::scanner::walk_directory;
use ideguard::utils::language_detection::Language;
use std::fs;
use tempfile::TempDir;

const CLEAN_JS: &str = r#"
function total(items) {
    let sum = 0;
    for (const item of items) {
        sum += item.price * item.quantity;
    }
    return sum;
}
"#;

const MIXED_PY: &str = r#"
import os
import pickle

def load(raw):
    return pickle.loads(raw)

def run(cmd):
    os.system(cmd)
"#;

const SUPERGLOBALS_PHP: &str = r#"<?php
$id = $_GET['id'];
$name = $_POST['name'];
include 'header.php';
echo htmlspecialchars($name);
"#;

// Repeat a sample so the scan cost dominates setup
fn sized_sample(sample: &str, copies: usize) -> String {
    sample.repeat(copies)
}

fn benchmark_scan_samples(c: &mut Criterion) {
    let scanner = ThreatScanner::new();
    let mut group = c.benchmark_group("scan_samples");

    let samples = [
        ("clean_js", CLEAN_JS, Language::JavaScript),
        ("mixed_py", MIXED_PY, Language::Python),
        ("superglobals_php", SUPERGLOBALS_PHP, Language::Php),
        ("plaintext", "rm -rf /tmp/cache", Language::from_tag("plaintext")),
    ];

    for (name, code, language) in &samples {
        group.bench_with_input(BenchmarkId::from_parameter(name), code, |b, &code| {
            b.iter(|| {
                let result = scanner.scan(black_box(code), language);
                black_box(result);
            });
        });
    }

    group.finish();
}

fn benchmark_scan_size(c: &mut Criterion) {
    let scanner = ThreatScanner::new();
    let mut group = c.benchmark_group("scan_size");

    for copies in [1usize, 10, 100] {
        let code = sized_sample(MIXED_PY, copies);
        group.bench_with_input(BenchmarkId::from_parameter(copies), &code, |b, code| {
            b.iter(|| {
                let result = scanner.scan(black_box(code), &Language::Python);
                black_box(result);
            });
        });
    }

    group.finish();
}

fn benchmark_scanner_initialization(c: &mut Criterion) {
    c.bench_function("scanner_initialization", |b| {
        b.iter(|| {
            let scanner = ThreatScanner::new();
            black_box(scanner);
        });
    });
}

fn benchmark_walk_directory(c: &mut Criterion) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("src/api")).unwrap();
    fs::create_dir_all(root.join("dist")).unwrap();
    fs::write(root.join(".gitignore"), "dist/\n").unwrap();
    for i in 0..50 {
        fs::write(root.join(format!("src/api/handler{i}.js")), CLEAN_JS).unwrap();
        fs::write(root.join(format!("dist/bundle{i}.js")), CLEAN_JS).unwrap();
    }

    c.bench_function("walk_directory", |b| {
        b.iter(|| {
            let files = walk_directory(black_box(root));
            black_box(files);
        });
    });
}

criterion_group!(
    benches,
    benchmark_scan_samples,
    benchmark_scan_size,
    benchmark_scanner_initialization,
    benchmark_walk_directory,
);
criterion_main!(benches);
