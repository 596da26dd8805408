//! CAN adapter configuration

use crate::bus::Bitrate;
use crate::error::AdapterError;
use config::builder::DefaultState;
use config::{Config, ConfigBuilder, Environment, File, FileFormat};
use frame_buffer::MAX_DLC;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Environment variable prefix for overrides (e.g. `CANBUF_NODE_ID`)
pub const ENV_PREFIX: &str = "CANBUF";

/// Largest 29-bit extended identifier
pub const MAX_EXTENDED_ID: u32 = 0x1FFF_FFFF;

/// CAN adapter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AdapterConfig {
    /// SPI chip-select pin of the transceiver
    pub chip_select: u8,

    /// Receive interrupt pin
    pub interrupt_pin: u8,

    /// Bus bit rate
    pub bitrate: Bitrate,

    /// Identifier this node accepts; other frames are ignored
    pub node_id: u32,

    /// Payload bytes copied into outgoing frames
    pub dlc: u8,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            chip_select: 10,
            interrupt_pin: 2,
            bitrate: Bitrate::Kbps125,
            node_id: 0x000,
            dlc: MAX_DLC as u8,
        }
    }
}

impl AdapterConfig {
    /// Load from an optional TOML file, overlaid by `CANBUF_*` variables
    pub fn load(path: Option<&Path>) -> Result<Self, AdapterError> {
        let mut builder = Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(File::from(path).format(FileFormat::Toml));
        }
        Self::build(builder.add_source(Environment::with_prefix(ENV_PREFIX)))
    }

    /// Parse a TOML document, without environment overrides
    pub fn from_toml(source: &str) -> Result<Self, AdapterError> {
        Self::build(Config::builder().add_source(File::from_str(source, FileFormat::Toml)))
    }

    fn build(builder: ConfigBuilder<DefaultState>) -> Result<Self, AdapterError> {
        let config: Self = builder.build()?.try_deserialize()?;
        config.validate()?;
        Ok(config)
    }

    /// Check value ranges the transceiver cannot represent
    pub fn validate(&self) -> Result<(), AdapterError> {
        if self.dlc == 0 || self.dlc as usize > MAX_DLC {
            return Err(AdapterError::Config(format!(
                "dlc {} outside 1..={}",
                self.dlc, MAX_DLC
            )));
        }
        validate_node_id(self.node_id)
    }
}

/// Reject identifiers outside the 29-bit extended range
pub fn validate_node_id(node_id: u32) -> Result<(), AdapterError> {
    if node_id > MAX_EXTENDED_ID {
        return Err(AdapterError::Config(format!(
            "node_id {:#X} exceeds 29-bit identifier range",
            node_id
        )));
    }
    Ok(())
}
