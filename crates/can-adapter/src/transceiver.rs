//! Transceiver Driver Interface
//!
//! The hardware driver is an opaque service: the adapter only needs reset,
//! timing and mode setup, a non-blocking read, and a transmit call.
//! [`MockTransceiver`] stands in for the hardware in tests and the monitor.

use crate::bus::{Bitrate, Mode};
use crate::error::{DriverError, DriverStatus};
use frame_buffer::Frame;
use std::collections::VecDeque;
use tracing::debug;

/// Low-level CAN controller driver
pub trait Transceiver {
    /// Reset the controller into configuration mode
    fn reset(&mut self) -> Result<(), DriverError>;

    /// Program the bus bit rate
    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), DriverError>;

    /// Switch the controller operating mode
    fn set_mode(&mut self, mode: Mode) -> Result<(), DriverError>;

    /// Read one received frame (non-blocking)
    fn read_frame(&mut self) -> Result<Option<Frame>, DriverError>;

    /// Queue a frame for transmission
    fn send_frame(&mut self, frame: &Frame) -> Result<(), DriverError>;
}

/// In-memory transceiver with scripted inbound traffic
#[derive(Debug, Default)]
pub struct MockTransceiver {
    inbound: VecDeque<Frame>,
    sent: Vec<Frame>,
    bitrate: Option<Bitrate>,
    mode: Option<Mode>,
    resets: usize,
    next_read_status: Option<DriverStatus>,
    bus_off: bool,
}

impl MockTransceiver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mock with frames already waiting on the bus
    pub fn with_traffic(frames: impl IntoIterator<Item = Frame>) -> Self {
        Self {
            inbound: frames.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Queue a frame as if it arrived on the bus
    pub fn inject(&mut self, frame: Frame) {
        self.inbound.push_back(frame);
    }

    /// Make the next read report `status` instead of a frame
    pub fn fail_next_read(&mut self, status: DriverStatus) {
        self.next_read_status = Some(status);
    }

    /// Simulate the controller entering or leaving bus-off
    pub fn set_bus_off(&mut self, bus_off: bool) {
        self.bus_off = bus_off;
    }

    /// Frames waiting to be read
    pub fn pending(&self) -> usize {
        self.inbound.len()
    }

    /// Frames transmitted so far
    pub fn sent(&self) -> &[Frame] {
        &self.sent
    }

    pub fn bitrate(&self) -> Option<Bitrate> {
        self.bitrate
    }

    pub fn mode(&self) -> Option<Mode> {
        self.mode
    }

    pub fn resets(&self) -> usize {
        self.resets
    }

    fn ensure_initialized(&self) -> Result<(), DriverError> {
        if self.resets == 0 {
            Err(DriverError::NotInitialized)
        } else {
            Ok(())
        }
    }
}

impl Transceiver for MockTransceiver {
    fn reset(&mut self) -> Result<(), DriverError> {
        self.resets += 1;
        self.mode = Some(Mode::Configuration);
        self.bus_off = false;
        Ok(())
    }

    fn set_bitrate(&mut self, bitrate: Bitrate) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        if self.mode != Some(Mode::Configuration) {
            return Err(DriverError::Failure(DriverStatus::Fail as u8));
        }
        self.bitrate = Some(bitrate);
        Ok(())
    }

    fn set_mode(&mut self, mode: Mode) -> Result<(), DriverError> {
        self.ensure_initialized()?;
        debug!("Mock transceiver mode {:?}", mode);
        self.mode = Some(mode);
        Ok(())
    }

    fn read_frame(&mut self) -> Result<Option<Frame>, DriverError> {
        self.ensure_initialized()?;

        if let Some(status) = self.next_read_status.take() {
            if !status.into_result()? {
                return Ok(None);
            }
        }

        if self.bus_off {
            return Err(DriverError::BusOff);
        }

        Ok(self.inbound.pop_front())
    }

    fn send_frame(&mut self, frame: &Frame) -> Result<(), DriverError> {
        self.ensure_initialized()?;

        if self.bus_off {
            return Err(DriverError::BusOff);
        }
        if !self.mode.map_or(false, |m| m.can_transmit()) {
            return Err(DriverError::Transmit(format!(
                "controller in {:?} mode",
                self.mode
            )));
        }

        self.sent.push(*frame);
        if self.mode == Some(Mode::Loopback) {
            self.inbound.push_back(*frame);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_before_reset_fails() {
        let mut mock = MockTransceiver::with_traffic([Frame::new(1, &[1])]);
        assert_eq!(mock.read_frame(), Err(DriverError::NotInitialized));
    }

    #[test]
    fn test_scripted_traffic() {
        let mut mock = MockTransceiver::with_traffic([Frame::new(1, &[1]), Frame::new(2, &[2])]);
        mock.reset().unwrap();

        assert_eq!(mock.read_frame().unwrap().map(|f| f.id), Some(1));
        assert_eq!(mock.read_frame().unwrap().map(|f| f.id), Some(2));
        assert_eq!(mock.read_frame().unwrap(), None);
    }

    #[test]
    fn test_scripted_failure_is_one_shot() {
        let mut mock = MockTransceiver::with_traffic([Frame::new(3, &[])]);
        mock.reset().unwrap();
        mock.fail_next_read(DriverStatus::Fail);

        assert!(mock.read_frame().is_err());
        assert_eq!(mock.read_frame().unwrap().map(|f| f.id), Some(3));
    }

    #[test]
    fn test_no_message_status_reads_as_empty() {
        let mut mock = MockTransceiver::with_traffic([Frame::new(4, &[])]);
        mock.reset().unwrap();
        mock.fail_next_read(DriverStatus::NoMessage);

        assert_eq!(mock.read_frame(), Ok(None));
        assert_eq!(mock.read_frame().unwrap().map(|f| f.id), Some(4));
    }

    #[test]
    fn test_send_requires_transmit_mode() {
        let mut mock = MockTransceiver::new();
        mock.reset().unwrap();
        assert!(mock.send_frame(&Frame::new(5, &[])).is_err());

        mock.set_mode(Mode::Normal).unwrap();
        mock.send_frame(&Frame::new(5, &[])).unwrap();
        assert_eq!(mock.sent().len(), 1);
    }

    #[test]
    fn test_bitrate_only_in_configuration_mode() {
        let mut mock = MockTransceiver::new();
        mock.reset().unwrap();
        mock.set_bitrate(Bitrate::Kbps500).unwrap();
        mock.set_mode(Mode::Normal).unwrap();

        assert!(mock.set_bitrate(Bitrate::Kbps125).is_err());
        assert_eq!(mock.bitrate(), Some(Bitrate::Kbps500));
    }
}
