//! Benchmarks for the book repository
//!
//! Run with: cargo bench --package bookscan-library

use bookscan_config::{JsonFile, MemoryDocument};
use bookscan_core::{BookRecord, RecordQuery};
use bookscan_library::BookRepository;
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use serde_json::json;
use std::hint::black_box;
use tempfile::TempDir;

const SIZES: [usize; 3] = [10, 100, 1000];

fn collection(size: usize) -> Vec<BookRecord> {
    (0..size)
        .map(|i| {
            BookRecord::new(
                format!("Volume {}", i),
                format!("Author {}", i % 10),
                "2000",
                format!("978{:010}", i),
                "Press",
            )
        })
        .collect()
}

fn memory_repository(size: usize) -> BookRepository<MemoryDocument> {
    BookRepository::new(MemoryDocument::with_value(
        json!({ "books": collection(size) }),
    ))
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_find_last");

    for size in SIZES {
        let repository = memory_repository(size);
        let query = RecordQuery::new(
            format!("Volume {}", size - 1),
            format!("Author {}", (size - 1) % 10),
        );

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(repository.find(&query).expect("find failed")));
        });
    }

    group.finish();
}

fn bench_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_list");

    for size in SIZES {
        let repository = memory_repository(size);
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(repository.list().expect("list failed")));
        });
    }

    group.finish();
}

fn bench_file_add(c: &mut Criterion) {
    let mut group = c.benchmark_group("repository_file_add");
    group.sample_size(20);

    for size in SIZES {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let path = temp_dir.path().join("books.json");
        let repository = BookRepository::new(JsonFile::new(&path));
        repository.initialize().expect("initialize failed");
        for record in collection(size) {
            repository.add(record).expect("add failed");
        }
        let extra = BookRecord::new("Dune", "Herbert", "1965", "9780441013593", "Ace");

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| {
                repository.add(extra.clone()).expect("add failed");
                repository
                    .delete(&RecordQuery::new("Dune", "Herbert"))
                    .expect("delete failed");
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_find, bench_list, bench_file_add);
criterion_main!(benches);
