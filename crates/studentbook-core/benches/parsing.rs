use criterion::{black_box, criterion_group, criterion_main, Criterion};

use studentbook_core::parser::{format_records, parse_records_str};
use studentbook_core::query::{search, sort_records, SortKey};
use studentbook_core::{Scores, StudentRecord};

fn class_file(n: i64) -> String {
    let records: Vec<StudentRecord> = (0..n)
        .map(|i| {
            StudentRecord::new(
                1000 + i,
                format!("Student {i}"),
                Scores::new(i % 21, (i * 7) % 21, (i * 13) % 21, (i * 31) % 101),
            )
        })
        .collect();
    format_records(&records)
}

fn bench_parse(c: &mut Criterion) {
    let mut group = c.benchmark_group("parse_records");

    let small = class_file(10);
    let large = class_file(10_000);
    let noisy = {
        let mut s = class_file(1_000);
        for i in 0..200 {
            s.push_str(&format!("{i},broken line\n"));
        }
        s
    };

    group.bench_function("10_records", |b| {
        b.iter(|| parse_records_str(black_box(&small)))
    });

    group.bench_function("10k_records", |b| {
        b.iter(|| parse_records_str(black_box(&large)))
    });

    group.bench_function("1k_records_with_malformed", |b| {
        b.iter(|| parse_records_str(black_box(&noisy)))
    });

    group.finish();
}

fn bench_query(c: &mut Criterion) {
    let records = parse_records_str(&class_file(10_000)).records;

    c.bench_function("search_10k", |b| {
        b.iter(|| search(black_box(&records), black_box("99")))
    });

    c.bench_function("sort_10k_by_percentage", |b| {
        b.iter(|| {
            let mut view: Vec<&StudentRecord> = records.iter().collect();
            sort_records(&mut view, SortKey::Percentage, true);
            view
        })
    });
}

criterion_group!(benches, bench_parse, bench_query);
criterion_main!(benches);
