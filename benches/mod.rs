use criterion::{criterion_group, criterion_main};


criterion_group!(
    benches,
    http::bench_parse_plain,
    http::bench_parse_chunked,
    http::bench_decode_chunked
);
criterion_main!(benches);
