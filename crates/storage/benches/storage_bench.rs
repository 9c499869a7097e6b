use criterion::{Criterion, black_box, criterion_group, criterion_main};

use galedb_storage::Db;

fn bench_set_get_sequential(c: &mut Criterion) {
    c.bench_function("set_get_sequential_10k", |b| {
        b.iter(|| {
            let db = Db::new();
            for i in 0..10_000 {
                let key = format!("key:{i}");
                let value = format!("value:{i}");
                db.set(&key, &value);
                black_box(db.get(&key));
            }
        })
    });
}

fn bench_set_concurrent(c: &mut Criterion) {
    c.bench_function("set_concurrent_4_threads_10k", |b| {
        b.iter(|| {
            let db = Db::new();
            let mut handles = Vec::new();

            for t in 0..4 {
                let db = db.clone();
                handles.push(std::thread::spawn(move || {
                    for i in 0..2_500 {
                        db.set(&format!("key:{t}:{i}"), "value");
                    }
                }));
            }

            for h in handles {
                h.join().unwrap();
            }
        })
    });
}

fn bench_list_operations(c: &mut Criterion) {
    c.bench_function("rpush_lpop_1k", |b| {
        b.iter(|| {
            let db = Db::new();
            for i in 0..1_000 {
                db.rpush("list", &[format!("item:{i}")]).unwrap();
            }
            for _ in 0..1_000 {
                black_box(db.lpop("list").unwrap());
            }
        })
    });
}

fn bench_lrange_full(c: &mut Criterion) {
    let db = Db::new();
    let items: Vec<String> = (0..1_000).map(|i| format!("item:{i}")).collect();
    db.rpush("list", &items).unwrap();

    c.bench_function("lrange_full_1k", |b| {
        b.iter(|| black_box(db.lrange("list", 0, -1).unwrap()))
    });
}

criterion_group!(
    benches,
    bench_set_get_sequential,
    bench_set_concurrent,
    bench_list_operations,
    bench_lrange_full,
);
criterion_main!(benches);
