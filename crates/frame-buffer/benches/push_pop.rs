use criterion::{black_box, criterion_group, criterion_main, Criterion};
use frame_buffer::{Frame, FrameRingBuffer, InterruptFree, CAPACITY};

fn bench_push_pop(c: &mut Criterion) {
    let frame = Frame::new(0x7E8, &[0x04, 0x41, 0x0C, 0x1A, 0x2B, 0, 0, 0]);

    c.bench_function("push_pop_unmasked", |b| {
        let mut buffer = FrameRingBuffer::unmasked();
        b.iter(|| {
            buffer.push(black_box(frame));
            black_box(buffer.pop())
        })
    });

    c.bench_function("fill_drain_interrupt_free", |b| {
        let mut buffer = FrameRingBuffer::new(InterruptFree);
        b.iter(|| {
            for _ in 0..CAPACITY {
                buffer.push(black_box(frame));
            }
            while let Some(out) = buffer.pop() {
                black_box(out);
            }
        })
    });
}

criterion_group!(benches, bench_push_pop);
criterion_main!(benches);
