use std::sync::Arc;

use criterion::{Criterion, black_box, criterion_group, criterion_main};
use gametask_audio::{AudioBlock, AudioBlockStream, BlockReader};

fn block_conversion_benchmark(c: &mut Criterion) {
    let raw: Vec<i16> = (0..736 * 2).map(|i| (i * 37 % 65536 - 32768) as i16).collect();
    c.bench_function("from_i16_735", |b| {
        b.iter(|| AudioBlock::from_i16(black_box(&raw), 735));
    });
}

fn stream_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("block_stream");

    group.bench_function("add_then_pull", |b| {
        let stream = AudioBlockStream::new(735, 44100);
        let block = AudioBlock::silence(735);
        b.iter(|| {
            stream.add_block(block.clone());
            black_box(stream.next_block());
        });
    });

    group.bench_function("reader_fill_512", |b| {
        let stream = Arc::new(AudioBlockStream::new(735, 44100));
        let mut reader = BlockReader::new(Arc::clone(&stream));
        let mut buf = vec![0.0f32; 512];
        b.iter(|| {
            reader.fill(black_box(&mut buf));
        });
    });

    group.finish();
}

criterion_group!(benches, block_conversion_benchmark, stream_benchmark);
criterion_main!(benches);
