// Frame Benchmarks
// Performance benchmarks for CPU-side frame operations

use criterion::{criterion_group, criterion_main, Criterion};
use std::hint::black_box;
use vidview_rs::image::ImageFrame;
use vidview_rs::viewer::FrameQueue;

/// Helper function to create a solid-color test frame
fn solid_frame(width: u32, height: u32) -> ImageFrame {
    let size = width as usize * height as usize * 3;
    ImageFrame::from_bgr(width, height, vec![0x7F; size]).unwrap()
}

/// Benchmark the BGR to RGBA conversion done once per uploaded frame
fn bench_bgr_to_rgba(c: &mut Criterion) {
    let mut group = c.benchmark_group("frame_convert");

    group.bench_function("to_rgba_640x480", |b| {
        let frame = solid_frame(640, 480);
        let mut output = vec![0u8; 640 * 480 * 4];
        b.iter(|| {
            frame.to_rgba(&mut output);
            black_box(&output);
        });
    });

    group.bench_function("to_rgba_1920x1080", |b| {
        let frame = solid_frame(1920, 1080);
        let mut output = vec![0u8; 1920 * 1080 * 4];
        b.iter(|| {
            frame.to_rgba(&mut output);
            black_box(&output);
        });
    });

    group.finish();
}

/// Benchmark one cycle of queue submission and draining
fn bench_queue_cycle(c: &mut Criterion) {
    c.bench_function("submit_drain_16", |b| {
        let frame = solid_frame(64, 64);
        let mut queue = FrameQueue::new();
        b.iter(|| {
            for _ in 0..16 {
                queue.submit(&frame);
            }
            black_box(queue.drain());
        });
    });
}

criterion_group!(benches, bench_bgr_to_rgba, bench_queue_cycle);
criterion_main!(benches);
