use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rust_qr_rawcode::encoder::reed_solomon::ReedSolomonEncoder;
use rust_qr_rawcode::{ECLevel, RsBlocks, block_spec};

fn blocks_for(version: u8, level: ECLevel) -> RsBlocks {
    let spec = block_spec(version, level).expect("valid spec");
    let data: Vec<u8> = (0..spec.data_length()).map(|i| (i * 31) as u8).collect();
    RsBlocks::build::<ReedSolomonEncoder>(&data, spec).expect("blocks")
}

fn bench_stream_small(c: &mut Criterion) {
    let blocks = blocks_for(5, ECLevel::Q);
    c.bench_function("stream_v5q", |b| {
        b.iter(|| {
            let stream = blocks.stream();
            let total = stream.total_len();
            black_box(stream.take(total).fold(0u8, |acc, cw| acc ^ cw))
        })
    });
}

fn bench_stream_large(c: &mut Criterion) {
    let blocks = blocks_for(40, ECLevel::H);
    c.bench_function("stream_v40h", |b| {
        b.iter(|| {
            let stream = blocks.stream();
            let total = stream.total_len();
            black_box(stream.take(total).fold(0u8, |acc, cw| acc ^ cw))
        })
    });
}

criterion_group!(benches, bench_stream_small, bench_stream_large);
criterion_main!(benches);
