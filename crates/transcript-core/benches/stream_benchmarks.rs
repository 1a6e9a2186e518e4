//! Benchmarks for indexing, slicing and render coalescing
//!
//! Generates synthetic transcripts so no fixture files are needed.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use transcript_core::{render_segments, Item, ItemStream};

/// Synthetic transcript of `paragraphs` paragraphs with `words` words each
fn transcript(paragraphs: usize, words: usize) -> ItemStream {
    let mut items = Vec::with_capacity(paragraphs * (words + 2));
    let mut offset = 0.0;
    for p in 0..paragraphs {
        items.push(Item::paragraph_start(if p % 2 == 0 { "A" } else { "B" }));
        for w in 0..words {
            if w % 7 == 6 {
                items.push(Item::artificial_silence(0.2));
            } else {
                items.push(Item::word("word", "interview.wav", offset, 0.3));
            }
            offset += 0.3;
        }
        items.push(Item::paragraph_end());
    }
    ItemStream::from_items(items)
}

fn bench_indexing(c: &mut Criterion) {
    let mut group = c.benchmark_group("indexing");
    for size in [10, 100, 1000] {
        let stream = transcript(size, 20);
        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &stream, |b, stream| {
            b.iter(|| black_box(stream.index()));
        });
    }
    group.finish();
}

fn bench_render(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_segments");
    for size in [10, 100, 1000] {
        let stream = transcript(size, 20);
        group.throughput(Throughput::Elements(stream.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &stream, |b, stream| {
            b.iter(|| black_box(render_segments(stream.timed())));
        });
    }
    group.finish();
}

fn bench_slicing(c: &mut Criterion) {
    let stream = transcript(500, 20);
    let middle = stream.duration() / 2.0;
    c.bench_function("split_and_rejoin", |b| {
        b.iter(|| {
            black_box(
                stream
                    .timed()
                    .exact_until(middle)
                    .chain(stream.timed().exact_from(middle))
                    .collect(),
            )
        });
    });
    c.bench_function("items_at_time", |b| {
        b.iter(|| black_box(stream.timed().items_at_time(black_box(middle))));
    });
}

criterion_group!(benches, bench_indexing, bench_render, bench_slicing);
criterion_main!(benches);
