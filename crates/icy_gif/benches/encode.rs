//! Benchmarks for GIF encoding
//!
//! Compares worker counts of the web safe encoder and measures it against the
//! NeuQuant based encoder of the `gif` crate.

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use icy_gif::{EncodeOptions, GifEncoder, quantize};
use image::{Rgba, RgbaImage};
use std::hint::black_box;

// ============================================================================
// Helper functions
// ============================================================================

fn test_image(width: u32, height: u32) -> RgbaImage {
    let mut state = 0x2545_F491u32;
    RgbaImage::from_fn(width, height, |x, y| {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        // smooth gradient with a little noise, roughly like a rendered screen
        let noise = (state & 0x0F) as u8;
        Rgba([
            ((x * 255 / width) as u8).wrapping_add(noise),
            (y * 255 / height) as u8,
            ((x ^ y) & 0xFF) as u8,
            255,
        ])
    })
}

fn worker_counts() -> Vec<usize> {
    let cores = EncodeOptions::default().effective_workers();
    let mut counts = vec![1, 2, 4, cores];
    counts.sort_unstable();
    counts.dedup();
    counts
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_quantize(c: &mut Criterion) {
    let img = test_image(1920, 1080);
    let mut group = c.benchmark_group("quantize");
    group.throughput(Throughput::Elements(u64::from(img.width() * img.height())));

    for workers in worker_counts() {
        group.bench_with_input(BenchmarkId::from_parameter(workers), &workers, |b, &workers| {
            b.iter(|| black_box(quantize(&img, workers)));
        });
    }
    group.finish();
}

fn bench_encode(c: &mut Criterion) {
    let img = test_image(1920, 1080);
    let mut group = c.benchmark_group("encode");
    group.throughput(Throughput::Elements(u64::from(img.width() * img.height())));
    group.sample_size(20);

    for workers in worker_counts() {
        let encoder = GifEncoder::new(EncodeOptions::new().with_workers(workers));
        group.bench_with_input(BenchmarkId::new("icy_gif", workers), &workers, |b, _| {
            b.iter(|| black_box(encoder.encode_to_vec(&img).unwrap()));
        });
    }

    group.bench_function("gif_crate_speed_30", |b| {
        b.iter(|| {
            let mut pixels = img.as_raw().clone();
            let frame = gif::Frame::from_rgba_speed(img.width() as u16, img.height() as u16, &mut pixels, 30);
            let mut out = Vec::new();
            {
                let mut encoder = gif::Encoder::new(&mut out, frame.width, frame.height, &[]).unwrap();
                encoder.write_frame(&frame).unwrap();
            }
            black_box(out)
        });
    });

    group.finish();
}

criterion_group!(benches, bench_quantize, bench_encode);

criterion_main!(benches);
