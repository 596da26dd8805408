//! Lock-Free Frame Ring Buffer

use crate::error::BufferFull;
use crate::frame::Frame;
use crate::section::{CriticalSection, NoMask};
use std::cell::UnsafeCell;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Live frame slots (the sentinel slot is not counted)
pub const CAPACITY: usize = 8;

/// Index of the reserved sentinel slot
const SENTINEL_INDEX: usize = CAPACITY;

#[allow(clippy::declare_interior_mutable_const)]
const EMPTY_SLOT: UnsafeCell<Frame> = UnsafeCell::new(Frame::EMPTY);

#[inline]
fn advance(index: usize) -> usize {
    let next = index + 1;
    if next == CAPACITY {
        0
    } else {
        next
    }
}

/// Bounded SPSC queue of CAN frames
///
/// One producer (the receive interrupt) and one consumer (the main loop).
/// A full buffer rejects new frames instead of overwriting unread ones.
/// Use [`FrameRingBuffer::split`] to hand each side to its own context.
pub struct FrameRingBuffer<C: CriticalSection = NoMask> {
    /// Frame storage; slot `CAPACITY` is the sentinel and is never written
    slots: [UnsafeCell<Frame>; CAPACITY + 1],
    /// Next slot to read (consumer-owned)
    read_index: AtomicUsize,
    /// Next slot to write (producer-owned)
    write_index: AtomicUsize,
    /// Unread frames
    count: AtomicUsize,
    /// Frames accepted since construction
    total_pushed: AtomicUsize,
    /// Frames rejected because the buffer was full
    total_dropped: AtomicUsize,
    /// Platform masking primitive around the consumer update
    section: C,
}

impl FrameRingBuffer<NoMask> {
    /// Create an empty buffer with no interrupt masking
    pub const fn unmasked() -> Self {
        Self::new(NoMask)
    }
}

impl<C: CriticalSection> FrameRingBuffer<C> {
    /// Create an empty buffer guarded by `section`
    pub const fn new(section: C) -> Self {
        Self {
            slots: [EMPTY_SLOT; CAPACITY + 1],
            read_index: AtomicUsize::new(0),
            write_index: AtomicUsize::new(0),
            count: AtomicUsize::new(0),
            total_pushed: AtomicUsize::new(0),
            total_dropped: AtomicUsize::new(0),
            section,
        }
    }

    /// Split into producer and consumer handles
    pub fn split(&mut self) -> (Producer<'_, C>, Consumer<'_, C>) {
        let this: &Self = self;
        (Producer { buffer: this }, Consumer { buffer: this })
    }

    /// Append a frame, returning false (and dropping it) if full
    pub fn push(&mut self, frame: Frame) -> bool {
        // SAFETY: `&mut self` rules out any other producer or consumer.
        unsafe { self.produce(frame) }
    }

    /// Append a frame assembled from `id` and up to `length` payload bytes
    pub fn push_raw(&mut self, id: u32, payload: &[u8], length: usize) -> bool {
        self.push(Frame::with_length(id, payload, length))
    }

    /// Append a frame, handing it back inside the error if full
    pub fn try_push(&mut self, frame: Frame) -> Result<(), BufferFull> {
        if self.push(frame) {
            Ok(())
        } else {
            Err(BufferFull(frame))
        }
    }

    /// Remove the oldest frame
    pub fn pop(&mut self) -> Option<Frame> {
        // SAFETY: `&mut self` rules out any other producer or consumer.
        unsafe { self.consume() }
    }

    /// Remove the oldest frame, or return the sentinel if empty
    ///
    /// The sentinel is indistinguishable from a real frame with id 0 and
    /// a zero payload; check [`is_empty`](Self::is_empty) first or prefer
    /// [`pop`](Self::pop).
    pub fn pop_or_sentinel(&mut self) -> Frame {
        self.pop().unwrap_or(*self.sentinel())
    }

    /// The reserved frame returned on empty reads
    pub fn sentinel(&self) -> &Frame {
        // SAFETY: the sentinel slot is written only by the const initializer.
        unsafe { &*self.slots[SENTINEL_INDEX].get() }
    }

    /// Number of unread frames
    pub fn size(&self) -> usize {
        self.count.load(Ordering::Acquire)
    }

    pub fn is_empty(&self) -> bool {
        self.size() == 0
    }

    pub fn is_full(&self) -> bool {
        self.size() == CAPACITY
    }

    pub fn capacity(&self) -> usize {
        CAPACITY
    }

    /// Raw read index, for diagnostics
    pub fn read_cursor(&self) -> usize {
        self.read_index.load(Ordering::Relaxed)
    }

    /// Raw write index, for diagnostics
    pub fn write_cursor(&self) -> usize {
        self.write_index.load(Ordering::Relaxed)
    }

    /// Frames accepted since construction
    pub fn total_pushed(&self) -> usize {
        self.total_pushed.load(Ordering::Relaxed)
    }

    /// Frames rejected on overflow since construction
    pub fn total_dropped(&self) -> usize {
        self.total_dropped.load(Ordering::Relaxed)
    }

    /// # Safety
    /// The caller must be the only producer.
    unsafe fn produce(&self, frame: Frame) -> bool {
        // Acquire pairs with the consumer's release so its copy out of the
        // slot we are about to reuse has completed.
        if self.count.load(Ordering::Acquire) == CAPACITY {
            self.total_dropped.fetch_add(1, Ordering::Relaxed);
            return false;
        }

        let write = self.write_index.load(Ordering::Relaxed);
        // SAFETY: count < CAPACITY, so slot `write` holds no unread frame
        // and the consumer will not touch it until count is bumped below.
        unsafe { *self.slots[write].get() = frame };

        self.write_index.store(advance(write), Ordering::Relaxed);
        self.count.fetch_add(1, Ordering::Release);
        self.total_pushed.fetch_add(1, Ordering::Relaxed);
        true
    }

    /// # Safety
    /// The caller must be the only consumer.
    unsafe fn consume(&self) -> Option<Frame> {
        self.section.enter(|| {
            if self.count.load(Ordering::Acquire) == 0 {
                return None;
            }

            let read = self.read_index.load(Ordering::Relaxed);
            // SAFETY: count > 0, so the producer published slot `read` and
            // will not reuse it until count is decremented below.
            let frame = unsafe { *self.slots[read].get() };

            self.read_index.store(advance(read), Ordering::Relaxed);
            self.count.fetch_sub(1, Ordering::Release);
            Some(frame)
        })
    }
}

impl<C: CriticalSection + Default> Default for FrameRingBuffer<C> {
    fn default() -> Self {
        Self::new(C::default())
    }
}

// SAFETY: slots are only mutated through the unique `Producer`/`Consumer`
// pair or through `&mut self`; shared references only read atomics and the
// immutable sentinel slot.
unsafe impl<C: CriticalSection + Sync> Sync for FrameRingBuffer<C> {}

/// Write side of a split buffer
pub struct Producer<'a, C: CriticalSection = NoMask> {
    buffer: &'a FrameRingBuffer<C>,
}

impl<'a, C: CriticalSection> Producer<'a, C> {
    /// Append a frame, returning false (and dropping it) if full
    pub fn push(&mut self, frame: Frame) -> bool {
        // SAFETY: `split` hands out exactly one producer.
        unsafe { self.buffer.produce(frame) }
    }

    /// Append a frame assembled from `id` and up to `length` payload bytes
    pub fn push_raw(&mut self, id: u32, payload: &[u8], length: usize) -> bool {
        self.push(Frame::with_length(id, payload, length))
    }

    /// Append a frame, handing it back inside the error if full
    pub fn try_push(&mut self, frame: Frame) -> Result<(), BufferFull> {
        if self.push(frame) {
            Ok(())
        } else {
            Err(BufferFull(frame))
        }
    }

    pub fn is_full(&self) -> bool {
        self.buffer.is_full()
    }

    pub fn size(&self) -> usize {
        self.buffer.size()
    }

    pub fn total_dropped(&self) -> usize {
        self.buffer.total_dropped()
    }
}

/// Read side of a split buffer
pub struct Consumer<'a, C: CriticalSection = NoMask> {
    buffer: &'a FrameRingBuffer<C>,
}

impl<'a, C: CriticalSection> Consumer<'a, C> {
    /// Remove the oldest frame
    pub fn pop(&mut self) -> Option<Frame> {
        // SAFETY: `split` hands out exactly one consumer.
        unsafe { self.buffer.consume() }
    }

    /// Remove the oldest frame, or return the sentinel if empty
    pub fn pop_or_sentinel(&mut self) -> Frame {
        self.pop().unwrap_or(*self.buffer.sentinel())
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    pub fn size(&self) -> usize {
        self.buffer.size()
    }
}
