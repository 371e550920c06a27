use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;
use strhash::HashTable;

const BUCKETS: usize = 4096;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

fn filled(seed: u64, n: usize) -> (HashTable<'static, String, u64>, Vec<String>) {
    let mut t = HashTable::new(BUCKETS).unwrap();
    let keys: Vec<String> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        t.add(k.clone(), i as u64).unwrap();
    }
    (t, keys)
}

fn bench_add_fresh_100k(c: &mut Criterion) {
    c.bench_function("table::add_fresh_100k", |b| {
        let keys: Vec<String> = lcg(1).take(100_000).map(key).collect();
        b.iter_batched(
            || HashTable::<&str, u64>::new(BUCKETS).unwrap(),
            |mut t| {
                for (i, k) in keys.iter().enumerate() {
                    t.add(k.as_str(), i as u64).unwrap();
                }
                black_box(t.count())
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_add_replace_100k(c: &mut Criterion) {
    c.bench_function("table::add_replace_100k", |b| {
        b.iter_batched(
            || filled(2, 100_000),
            |(mut t, keys)| {
                for k in keys {
                    t.add(k, 0).unwrap();
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_del_random_10k(c: &mut Criterion) {
    c.bench_function("table::del_random_10k_of_110k", |b| {
        b.iter_batched(
            || {
                let (t, keys) = filled(5, 110_000);
                // Precompute 10k unique victims via LCG
                let n = keys.len();
                let mut sel = std::collections::HashSet::with_capacity(10_000);
                let mut s = 0x9e3779b97f4a7c15u64;
                while sel.len() < 10_000 {
                    s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                    sel.insert((s as usize) % n);
                }
                let victims: Vec<String> = sel.into_iter().map(|i| keys[i].clone()).collect();
                (t, victims)
            },
            |(mut t, victims)| {
                for k in &victims {
                    let _ = t.del(k);
                }
                black_box(t)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit_10k(c: &mut Criterion) {
    c.bench_function("table::find_hit_10k_on_100k", |b| {
        let (t, keys) = filled(7, 100_000);
        let n = keys.len();
        let mut s = 0x9e3779b97f4a7c15u64;
        let queries: Vec<&str> = (0..10_000)
            .map(|_| {
                s = s.wrapping_mul(2862933555777941757).wrapping_add(3037000493);
                keys[(s as usize) % n].as_str()
            })
            .collect();
        b.iter(|| {
            for k in &queries {
                black_box(t.find(k));
            }
        })
    });
}

fn bench_find_miss_10k(c: &mut Criterion) {
    c.bench_function("table::find_miss_10k_on_100k", |b| {
        let (t, _) = filled(11, 100_000);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            for _ in 0..10_000 {
                let k = key(miss.next().unwrap());
                black_box(t.find(&k));
            }
        })
    });
}

fn bench_iter_100k(c: &mut Criterion) {
    c.bench_function("table::iter_all_100k", |b| {
        let (t, _) = filled(999, 100_000);
        b.iter(|| {
            let mut sum = 0u64;
            for (_k, v) in t.iter() {
                sum = sum.wrapping_add(*v);
            }
            black_box(sum)
        })
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(12)
        .measurement_time(Duration::from_secs(5))
        .warm_up_time(Duration::from_secs(1))
}

criterion_group! {
    name = benches_add;
    config = bench_config();
    targets = bench_add_fresh_100k, bench_add_replace_100k
}
criterion_group! {
    name = benches_ops;
    config = bench_config();
    targets = bench_del_random_10k,
              bench_find_hit_10k,
              bench_find_miss_10k,
              bench_iter_100k
}
criterion_main!(benches_add, benches_ops);
