//! 短码分配性能基准测试

use std::collections::HashSet;
use std::hint::black_box;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};

use linkdash::errors::Result;
use linkdash::services::CodeAllocator;
use linkdash::storage::{LinkStore, ShortLink};
use linkdash::utils::url_validator::validate_url;
use linkdash::utils::{generate_random_code, is_valid_short_code};

/// 只回答 exists 的内存 store
struct SetStore(HashSet<String>);

#[async_trait]
impl LinkStore for SetStore {
    fn backend_name(&self) -> &str {
        "bench"
    }

    async fn exists(&self, code: &str) -> Result<bool> {
        Ok(self.0.contains(code))
    }

    async fn insert(&self, _link: &ShortLink) -> Result<()> {
        Ok(())
    }

    async fn get(&self, _code: &str) -> Result<Option<ShortLink>> {
        Ok(None)
    }

    async fn list(&self) -> Result<Vec<ShortLink>> {
        Ok(Vec::new())
    }

    async fn delete(&self, _code: &str) -> Result<bool> {
        Ok(false)
    }

    async fn record_click(&self, _code: &str, _at: DateTime<Utc>) -> Result<Option<String>> {
        Ok(None)
    }
}

// ============== 短码生成与校验 ==============

fn bench_generate_random_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/generate_random_code");

    for len in [6, 8] {
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, &len| {
            b.iter(|| generate_random_code(black_box(len)));
        });
    }

    group.finish();
}

fn bench_is_valid_short_code(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/is_valid_short_code");

    group.bench_function("valid", |b| {
        b.iter(|| assert!(is_valid_short_code(black_box("abc123"))));
    });

    group.bench_function("invalid_chars", |b| {
        b.iter(|| assert!(!is_valid_short_code(black_box("abc-12"))));
    });

    let too_long = "a".repeat(20);
    group.bench_function("invalid_too_long", |b| {
        b.iter(|| assert!(!is_valid_short_code(black_box(&too_long))));
    });

    group.finish();
}

fn bench_validate_url(c: &mut Criterion) {
    let mut group = c.benchmark_group("utils/validate_url");

    group.bench_function("https", |b| {
        b.iter(|| validate_url(black_box("https://example.com/some/path?q=1")).is_ok());
    });

    group.bench_function("bad_scheme", |b| {
        b.iter(|| validate_url(black_box("ftp://example.com")).is_err());
    });

    group.finish();
}

// ============== 分配器 ==============

fn bench_allocate(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();
    let allocator = CodeAllocator::default();
    let mut group = c.benchmark_group("allocator/allocate");

    let empty = SetStore(HashSet::new());
    group.bench_function("generated_empty_store", |b| {
        b.to_async(&rt)
            .iter(|| async { allocator.allocate(&empty, None).await.is_ok() });
    });

    let populated = SetStore((0..10_000).map(|_| generate_random_code(6)).collect());
    group.bench_function("generated_10k_store", |b| {
        b.to_async(&rt)
            .iter(|| async { allocator.allocate(&populated, None).await.is_ok() });
    });

    group.bench_function("requested", |b| {
        b.to_async(&rt).iter(|| async {
            allocator
                .allocate(&populated, Some(black_box("Custom12")))
                .await
                .is_ok()
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_generate_random_code,
    bench_is_valid_short_code,
    bench_validate_url,
    bench_allocate
);
criterion_main!(benches);
