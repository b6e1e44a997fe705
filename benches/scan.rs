#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;

use pulse_json::{Emitter, Scanner, TokenKind};

fn sample_small() -> String {
    "{\"name\":\"pulse\",\"seq\":41,\"ok\":true}".to_string()
}

fn sample_medium() -> String {
    let mut e = Emitter::new(1 << 16, 8).unwrap();
    e.open_object();
    for i in 0..64_i64 {
        e.open_property(&format!("k{i:03}"));
        e.open_array();
        e.int(i);
        e.float(0.5 * i as f64);
        e.text("metric\npayload");
        e.close_token();
        e.close_token();
    }
    e.finish().to_string()
}

fn scan_all(payload: &[u8]) -> usize {
    let mut s = Scanner::new(payload, 0, 16).unwrap();
    let mut count = 0;
    while s.next() {
        if s.token_kind() == TokenKind::String {
            let _ = s.parse_str();
        }
        count += 1;
    }
    count
}

fn bench_scan(c: &mut Criterion) {
    let small = sample_small();
    c.bench_function("scan_small", |b| {
        b.iter(|| scan_all(black_box(small.as_bytes())))
    });

    let medium = sample_medium();
    c.bench_function("scan_medium", |b| {
        b.iter(|| scan_all(black_box(medium.as_bytes())))
    });

    c.bench_function("emit_medium", |b| {
        let mut e = Emitter::new(1 << 16, 8).unwrap();
        b.iter(|| {
            e.clear();
            e.open_array();
            for i in 0..256_i64 {
                e.int(black_box(i));
            }
            black_box(e.finish().len())
        })
    });
}

criterion_group!(benches, bench_scan);
criterion_main!(benches);
