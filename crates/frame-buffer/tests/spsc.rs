//! Producer and consumer on separate threads

use frame_buffer::{Frame, FrameRingBuffer, InterruptFree};
use std::thread;

const FRAMES: u32 = 20_000;

fn run_transfer<C: frame_buffer::CriticalSection + Sync>(buffer: &mut FrameRingBuffer<C>) -> Vec<u32> {
    let (mut producer, mut consumer) = buffer.split();
    let mut received = Vec::with_capacity(FRAMES as usize);

    thread::scope(|s| {
        s.spawn(move || {
            for id in 1..=FRAMES {
                let frame = Frame::new(id, &id.to_le_bytes());
                while !producer.push(frame) {
                    thread::yield_now();
                }
            }
        });

        while received.len() < FRAMES as usize {
            match consumer.pop() {
                Some(frame) => {
                    let expected = frame.id.to_le_bytes();
                    assert_eq!(&frame.payload[..4], &expected[..]);
                    received.push(frame.id);
                }
                None => thread::yield_now(),
            }
        }
    });

    received
}

#[test]
fn test_threaded_transfer_preserves_order() {
    let mut buffer = FrameRingBuffer::unmasked();
    let received = run_transfer(&mut buffer);

    assert!(received.iter().copied().eq(1..=FRAMES));
    assert!(buffer.is_empty());
    assert_eq!(buffer.total_pushed(), FRAMES as usize);
}

#[test]
fn test_threaded_transfer_with_interrupt_free() {
    let mut buffer = FrameRingBuffer::new(InterruptFree);
    let received = run_transfer(&mut buffer);

    assert!(received.iter().copied().eq(1..=FRAMES));
    assert!(buffer.pop().is_none());
}

#[test]
fn test_lossy_producer_never_reorders() {
    let mut buffer = FrameRingBuffer::unmasked();
    let (mut producer, mut consumer) = buffer.split();
    let mut received = Vec::new();

    thread::scope(|s| {
        let handle = s.spawn(move || {
            for id in 1..=FRAMES {
                producer.push(Frame::new(id, &[]));
            }
        });

        while !handle.is_finished() || !consumer.is_empty() {
            if let Some(frame) = consumer.pop() {
                received.push(frame.id);
            }
        }
    });

    assert!(!received.is_empty());
    assert!(received.windows(2).all(|w| w[0] < w[1]));
    assert_eq!(received.len() + buffer.total_dropped(), FRAMES as usize);
}
