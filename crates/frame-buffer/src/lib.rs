//! CAN Frame Ring Buffer
//!
//! Bounded, allocation-free FIFO for CAN frames, pushed from a receive
//! interrupt and drained by the main loop. A full buffer drops incoming
//! frames rather than overwriting unread ones.

mod buffer;
mod error;
mod frame;
mod section;

pub use buffer::{Consumer, FrameRingBuffer, Producer, CAPACITY};
pub use error::BufferFull;
pub use frame::{Frame, MAX_DLC};
pub use section::{CriticalSection, InterruptFree, NoMask};
