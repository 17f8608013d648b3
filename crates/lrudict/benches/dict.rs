use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use lrudict::{LruDict, SharedLruDict};

fn key(i: usize) -> String {
    format!("key:{}", i)
}

fn bench_get(c: &mut Criterion) {
    let mut group = c.benchmark_group("get");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("get_hot", |b| {
        let mut dict = LruDict::new(1000);
        let keys: Vec<String> = (0..100).map(key).collect();
        for k in &keys {
            dict.set(k.clone(), vec![b'x'; 64]);
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(dict.get(keys[counter % 100].as_str()));
            counter += 1;
        });
    });

    group.bench_function("peek_hot", |b| {
        let mut dict = LruDict::new(1000);
        let keys: Vec<String> = (0..100).map(key).collect();
        for k in &keys {
            dict.set(k.clone(), vec![b'x'; 64]);
        }

        let mut counter = 0;
        b.iter(|| {
            black_box(dict.peek(keys[counter % 100].as_str()));
            counter += 1;
        });
    });

    group.finish();
}

fn bench_set_evicting(c: &mut Criterion) {
    let mut group = c.benchmark_group("set");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("set_full_evicting", |b| {
        let mut dict = LruDict::new(50);
        let keys: Vec<String> = (0..1000).map(key).collect();

        let mut counter = 0;
        b.iter(|| {
            dict.set(keys[counter % 1000].clone(), counter);
            counter += 1;
        });
    });

    group.finish();
}

fn bench_mixed_50_50(c: &mut Criterion) {
    let mut group = c.benchmark_group("mixed");
    group.sample_size(50);
    group.throughput(Throughput::Elements(1));

    group.bench_function("50_read_50_write_shared", |b| {
        let dict = SharedLruDict::new(100);
        let keys: Vec<String> = (0..200).map(key).collect();
        for k in &keys[..100] {
            dict.set(k.clone(), 0u64);
        }

        let mut counter = 0u64;
        b.iter(|| {
            let k = &keys[(counter as usize) % 200];
            if counter % 2 == 0 {
                black_box(dict.get(k.as_str()));
            } else {
                dict.set(k.clone(), counter);
            }
            counter += 1;
        });
    });

    group.finish();
}

criterion_group!(benches, bench_get, bench_set_evicting, bench_mixed_50_50);
criterion_main!(benches);
