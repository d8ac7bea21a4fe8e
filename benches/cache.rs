use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use rescache::ResourceCache;

fn warm_cache(capacity: usize) -> ResourceCache {
    let mut cache = ResourceCache::new(capacity);
    for i in 0..capacity {
        cache.put(format!("/res/{i}"), "application/octet-stream", &[0u8; 64]);
    }
    cache
}

fn bench_put_get(c: &mut Criterion) {
    c.bench_function("cache_put_get", |b| {
        b.iter_batched(
            || warm_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    cache.put(
                        format!("/new/{}", std::hint::black_box(i)),
                        "text/plain",
                        &[1u8; 64],
                    );
                    let key = format!("/res/{}", std::hint::black_box(i));
                    let _ = std::hint::black_box(cache.get(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_get_hit(c: &mut Criterion) {
    c.bench_function("cache_get_hit", |b| {
        b.iter_batched(
            || warm_cache(1024),
            |mut cache| {
                for i in 0..1024usize {
                    let key = format!("/res/{}", std::hint::black_box(i));
                    let _ = std::hint::black_box(cache.get(&key));
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_eviction_churn(c: &mut Criterion) {
    c.bench_function("cache_eviction_churn", |b| {
        b.iter_batched(
            || warm_cache(1024),
            |mut cache| {
                for i in 0..4096usize {
                    cache.put(
                        format!("/churn/{}", std::hint::black_box(i)),
                        "text/plain",
                        &[2u8; 64],
                    );
                }
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_pop_lru(c: &mut Criterion) {
    c.bench_function("cache_pop_lru", |b| {
        b.iter_batched(
            || warm_cache(1024),
            |mut cache| {
                while let Some(entry) = cache.pop_lru() {
                    std::hint::black_box(entry);
                }
            },
            BatchSize::SmallInput,
        )
    });
}

criterion_group!(
    benches,
    bench_put_get,
    bench_get_hit,
    bench_eviction_churn,
    bench_pop_lru
);
criterion_main!(benches);
