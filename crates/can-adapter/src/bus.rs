//! CAN Bus Timing and Controller Modes

use serde::{Deserialize, Serialize};

/// Bus bit rates supported by the transceiver
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Bitrate {
    #[serde(rename = "5kbps")]
    Kbps5,
    #[serde(rename = "10kbps")]
    Kbps10,
    #[serde(rename = "20kbps")]
    Kbps20,
    #[serde(rename = "50kbps")]
    Kbps50,
    #[serde(rename = "100kbps")]
    Kbps100,
    #[serde(rename = "125kbps")]
    Kbps125,
    #[serde(rename = "250kbps")]
    Kbps250,
    #[serde(rename = "500kbps")]
    Kbps500,
    #[serde(rename = "1000kbps")]
    Kbps1000,
}

impl Bitrate {
    /// Bits per second on the wire
    pub fn bits_per_second(&self) -> u32 {
        match self {
            Bitrate::Kbps5 => 5_000,
            Bitrate::Kbps10 => 10_000,
            Bitrate::Kbps20 => 20_000,
            Bitrate::Kbps50 => 50_000,
            Bitrate::Kbps100 => 100_000,
            Bitrate::Kbps125 => 125_000,
            Bitrate::Kbps250 => 250_000,
            Bitrate::Kbps500 => 500_000,
            Bitrate::Kbps1000 => 1_000_000,
        }
    }
}

impl Default for Bitrate {
    fn default() -> Self {
        Bitrate::Kbps125
    }
}

/// Controller operating mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mode {
    /// Mode after reset; registers writable, bus inactive
    Configuration,
    /// Full participation on the bus
    Normal,
    /// Receive only, no acknowledgements
    ListenOnly,
    /// Transmitted frames are looped back internally
    Loopback,
    Sleep,
}

impl Mode {
    /// Whether the controller can put frames on the bus in this mode
    pub fn can_transmit(&self) -> bool {
        matches!(self, Mode::Normal | Mode::Loopback)
    }
}
