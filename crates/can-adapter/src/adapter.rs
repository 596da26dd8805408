//! CAN Adapter
//!
//! Owns the transceiver handle and the node's accepted identifier. The
//! receive path runs in interrupt context and feeds the frame buffer; the
//! transmit path runs from the main loop.

use crate::bus::Mode;
use crate::config::{validate_node_id, AdapterConfig};
use crate::error::AdapterError;
use crate::transceiver::Transceiver;
use frame_buffer::{CriticalSection, Frame, Producer};
use metrics::counter;
use tracing::{debug, info, warn};

/// Driver context for one CAN node
pub struct CanAdapter<T: Transceiver> {
    /// Hardware driver
    transceiver: T,
    /// Active configuration
    config: AdapterConfig,
}

impl<T: Transceiver> CanAdapter<T> {
    /// Reset the transceiver, program the bit rate and enter normal mode
    pub fn setup(mut transceiver: T, config: AdapterConfig) -> Result<Self, AdapterError> {
        config.validate()?;

        info!("CAN transceiver: loading address {:#05X}", config.node_id);
        info!("CAN transceiver: init starting");

        transceiver.reset()?;
        transceiver.set_bitrate(config.bitrate)?;
        transceiver.set_mode(Mode::Normal)?;

        info!(
            "CAN transceiver: done (cs={}, int={}, {:?})",
            config.chip_select, config.interrupt_pin, config.bitrate
        );

        Ok(Self {
            transceiver,
            config,
        })
    }

    /// Read one frame addressed to this node
    ///
    /// Frames for other identifiers are consumed from the transceiver and
    /// discarded.
    pub fn receive(&mut self) -> Result<Option<Frame>, AdapterError> {
        let Some(frame) = self.transceiver.read_frame()? else {
            return Ok(None);
        };

        if frame.id != self.config.node_id {
            debug!("Ignoring frame for id {:#X}", frame.id);
            counter!("can_rx_filtered_total").increment(1);
            return Ok(None);
        }

        info!("CAN-RX: {}", frame);
        counter!("can_rx_frames_total").increment(1);
        Ok(Some(frame))
    }

    /// Receive callback: read one frame and push it into the buffer
    ///
    /// Returns true if a frame was buffered. Overflow and driver errors are
    /// logged and counted; the interrupt never fails.
    pub fn on_interrupt<C: CriticalSection>(&mut self, producer: &mut Producer<'_, C>) -> bool {
        match self.receive() {
            Ok(Some(frame)) => {
                if producer.push(frame) {
                    true
                } else {
                    warn!("Frame buffer full, dropping {}", frame);
                    counter!("can_rx_dropped_total").increment(1);
                    false
                }
            }
            Ok(None) => false,
            Err(e) => {
                warn!("CAN read error: {}", e);
                counter!("can_rx_errors_total").increment(1);
                false
            }
        }
    }

    /// Transmit `data` to `id` as a frame of the configured DLC
    pub fn send(&mut self, id: u32, data: &[u8]) -> Result<(), AdapterError> {
        let mut frame = Frame::with_length(id, data, self.config.dlc as usize);
        frame.length = self.config.dlc;

        info!("CAN-TX: {}", frame);
        self.transceiver.send_frame(&frame)?;
        counter!("can_tx_frames_total").increment(1);
        Ok(())
    }

    /// Change the identifier this node accepts
    ///
    /// Identifiers past the 29-bit range are rejected and the filter is left
    /// unchanged.
    pub fn set_node_id(&mut self, node_id: u32) -> Result<(), AdapterError> {
        validate_node_id(node_id)?;
        info!("CAN address changed {:#05X} -> {:#05X}", self.config.node_id, node_id);
        self.config.node_id = node_id;
        Ok(())
    }

    pub fn node_id(&self) -> u32 {
        self.config.node_id
    }

    pub fn config(&self) -> &AdapterConfig {
        &self.config
    }

    pub fn transceiver(&self) -> &T {
        &self.transceiver
    }

    pub fn transceiver_mut(&mut self) -> &mut T {
        &mut self.transceiver
    }
}
