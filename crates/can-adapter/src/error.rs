//! CAN Adapter Error Types

use thiserror::Error;

/// Status codes reported by an MCP2515-style transceiver driver
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverStatus {
    Ok = 0,
    Fail = 1,
    AllTxBusy = 2,
    FailInit = 3,
    FailTx = 4,
    NoMessage = 5,
}

impl From<u8> for DriverStatus {
    fn from(code: u8) -> Self {
        match code {
            0 => Self::Ok,
            2 => Self::AllTxBusy,
            3 => Self::FailInit,
            4 => Self::FailTx,
            5 => Self::NoMessage,
            _ => Self::Fail,
        }
    }
}

/// Errors raised by the transceiver driver
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DriverError {
    /// Transceiver not reset and configured yet
    #[error("CAN transceiver not initialized")]
    NotInitialized,

    /// Controller entered bus-off after too many errors
    #[error("CAN bus off")]
    BusOff,

    /// No transmit buffer became free in time
    #[error("CAN transmit timeout")]
    Timeout,

    /// Frame could not be queued for transmission
    #[error("CAN transmit failed: {0}")]
    Transmit(String),

    /// Any other driver failure
    #[error("CAN driver failure (status {0})")]
    Failure(u8),
}

impl DriverStatus {
    /// Map a status to the driver result it stands for
    ///
    /// `NoMessage` is not an error; it maps to `Ok(false)`.
    pub fn into_result(self) -> Result<bool, DriverError> {
        match self {
            Self::Ok => Ok(true),
            Self::NoMessage => Ok(false),
            Self::FailInit => Err(DriverError::NotInitialized),
            Self::AllTxBusy => Err(DriverError::Timeout),
            Self::FailTx => Err(DriverError::Transmit("no free transmit buffer".to_string())),
            Self::Fail => Err(DriverError::Failure(self as u8)),
        }
    }
}

/// Errors that can occur in the CAN adapter
#[derive(Debug, Error)]
pub enum AdapterError {
    /// Transceiver driver error
    #[error("Driver error: {0}")]
    Driver(#[from] DriverError),

    /// Invalid or unreadable configuration
    #[error("Configuration error: {0}")]
    Config(String),
}

impl From<config::ConfigError> for AdapterError {
    fn from(err: config::ConfigError) -> Self {
        AdapterError::Config(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_conversion() {
        assert_eq!(DriverStatus::from(0), DriverStatus::Ok);
        assert_eq!(DriverStatus::from(5), DriverStatus::NoMessage);
        assert_eq!(DriverStatus::from(200), DriverStatus::Fail);
    }

    #[test]
    fn test_status_results() {
        assert_eq!(DriverStatus::Ok.into_result(), Ok(true));
        assert_eq!(DriverStatus::NoMessage.into_result(), Ok(false));
        assert_eq!(DriverStatus::AllTxBusy.into_result(), Err(DriverError::Timeout));
        assert_eq!(
            DriverStatus::FailInit.into_result(),
            Err(DriverError::NotInitialized)
        );
    }
}
