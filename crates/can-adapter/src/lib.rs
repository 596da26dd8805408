//! CAN Adapter
//!
//! Explicit driver context around a CAN transceiver: setup, identifier
//! filtering on receive, the interrupt callback that feeds the frame
//! buffer, the transmit path, and payload encoding helpers.

mod adapter;
mod bus;
pub mod codec;
mod config;
mod error;
mod transceiver;

pub use adapter::CanAdapter;
pub use bus::{Bitrate, Mode};
pub use self::config::{AdapterConfig, ENV_PREFIX, MAX_EXTENDED_ID};
pub use error::{AdapterError, DriverError, DriverStatus};
pub use transceiver::{MockTransceiver, Transceiver};

pub use frame_buffer::{Frame, FrameRingBuffer, MAX_DLC};
