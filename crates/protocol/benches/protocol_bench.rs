use bytes::BytesMut;
use criterion::{Criterion, black_box, criterion_group, criterion_main};

use galedb_protocol::{Command, Reply, extract_line, tokenize};

fn bench_extract_line(c: &mut Criterion) {
    c.bench_function("extract_line_set_command", |b| {
        b.iter(|| {
            let mut buf = BytesMut::from(&b"SET mykey myvalue\r\n"[..]);
            extract_line(black_box(&mut buf)).unwrap()
        })
    });
}

fn bench_parse_set_command(c: &mut Criterion) {
    c.bench_function("parse_set_command", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box("SET mykey myvalue"));
            Command::from_tokens(&tokens).unwrap()
        })
    });
}

fn bench_parse_lrange_command(c: &mut Criterion) {
    c.bench_function("parse_lrange_command", |b| {
        b.iter(|| {
            let tokens = tokenize(black_box("LRANGE mylist 0 -1"));
            Command::from_tokens(&tokens).unwrap()
        })
    });
}

fn bench_encode_ok(c: &mut Criterion) {
    let reply = Reply::Ok;

    c.bench_function("encode_ok", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(64);
            black_box(&reply).encode(&mut buf);
            buf
        })
    });
}

fn bench_encode_values_1k(c: &mut Criterion) {
    let reply = Reply::Values((0..1_000).map(|i| format!("item:{i}")).collect());

    c.bench_function("encode_values_1k", |b| {
        b.iter(|| {
            let mut buf = BytesMut::with_capacity(16 * 1024);
            black_box(&reply).encode(&mut buf);
            buf
        })
    });
}

criterion_group!(
    benches,
    bench_extract_line,
    bench_parse_set_command,
    bench_parse_lrange_command,
    bench_encode_ok,
    bench_encode_values_1k,
);
criterion_main!(benches);
