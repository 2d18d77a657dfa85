//! Criterion benchmarks for sqldump-csv core operations.
//!
//! Benchmarks cover:
//! - Value tokenizing (tokenize_values) on plain and quote-heavy tuples
//! - Token coercion (coerce) across every scalar kind
//! - Full conversion (convert + write_csv) on synthetic dumps

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use sqlcsv::dump::export::{convert, write_csv};
use sqlcsv::dump::scalar::coerce;
use sqlcsv::dump::values::tokenize_values;

// ---------------------------------------------------------------------------
// Synthetic dump builder
// ---------------------------------------------------------------------------

/// Build a mysqldump-style script with one table and `n_rows` INSERT statements.
fn build_dump(n_rows: usize) -> String {
    let mut dump = String::from(
        "DROP TABLE IF EXISTS `orders`;\n\
         CREATE TABLE `orders` (\n\
         \x20 `id` int NOT NULL AUTO_INCREMENT,\n\
         \x20 `customer` varchar(64) DEFAULT NULL,\n\
         \x20 `note` text,\n\
         \x20 `total` decimal(10,2) NOT NULL,\n\
         \x20 PRIMARY KEY (`id`),\n\
         \x20 KEY `idx_customer` (`customer`)\n\
         ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4;\n",
    );
    for i in 0..n_rows {
        dump.push_str(&format!(
            "INSERT INTO `orders` VALUES ({}, 'customer {}', 'note, with comma and \\'quote\\'', {}.{:02});\n",
            i,
            i % 97,
            i * 3,
            i % 100
        ));
    }
    dump
}

// ---------------------------------------------------------------------------
// Tokenizer
// ---------------------------------------------------------------------------

fn bench_tokenize(c: &mut Criterion) {
    let mut group = c.benchmark_group("tokenize_values");

    let plain = "1, 2, 3, 4, 5, 6, 7, 8, 9, 10, NULL, 12.5";
    group.bench_function("plain", |b| {
        b.iter(|| black_box(tokenize_values(black_box(plain))));
    });

    let quoted = r"'a, b', 'it\'s', 'x,y,z', NULL, 'O''Brien', 42";
    group.bench_function("quoted", |b| {
        b.iter(|| black_box(tokenize_values(black_box(quoted))));
    });

    group.finish();
}

// ---------------------------------------------------------------------------
// Coercion
// ---------------------------------------------------------------------------

fn bench_coerce(c: &mut Criterion) {
    let mut group = c.benchmark_group("coerce");
    for token in ["NULL", "''", "'Alice'", "12345", "123.45", "CURRENT_TIMESTAMP"] {
        group.bench_with_input(BenchmarkId::from_parameter(token), token, |b, t| {
            b.iter(|| black_box(coerce(black_box(t))));
        });
    }
    group.finish();
}

// ---------------------------------------------------------------------------
// Full conversion
// ---------------------------------------------------------------------------

fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");

    for &n_rows in &[100usize, 1_000, 10_000] {
        let dump = build_dump(n_rows);
        group.throughput(Throughput::Bytes(dump.len() as u64));
        group.bench_with_input(BenchmarkId::new("csv", n_rows), &dump, |b, dump| {
            b.iter(|| {
                let conv = convert(dump);
                let mut out = Vec::with_capacity(dump.len());
                write_csv(&conv, &mut out).unwrap();
                black_box(out);
            });
        });
    }

    group.finish();
}

// ---------------------------------------------------------------------------
// Group and main
// ---------------------------------------------------------------------------

criterion_group!(benches, bench_tokenize, bench_coerce, bench_convert);
criterion_main!(benches);
