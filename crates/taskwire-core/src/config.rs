//! Protocol configuration
//!
//! The wire protocol bakes its version into the crate; per-device values
//! (board id, expected device count) travel in a [`ProtocolConfig`] that is
//! handed to the hub and the channels at construction time.

use crate::types::DeviceId;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Protocol Constants
// ----------------------------------------------------------------------------

/// Protocol version stamped into every outbound header (2-bit field)
pub const PROTOCOL_VERSION: u8 = 0;

const _: () = assert!(PROTOCOL_VERSION < 4, "PROTOCOL_VERSION must fit 2 bits");

// ----------------------------------------------------------------------------
// Protocol Configuration
// ----------------------------------------------------------------------------

/// Per-device protocol configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProtocolConfig {
    /// Identity of this device; outbound sender id and inbound receive filter
    pub board_id: DeviceId,
    /// Number of devices expected on the link, in `1..=255`
    pub device_n: u8,
}

impl Default for ProtocolConfig {
    fn default() -> Self {
        Self {
            board_id: DeviceId::BOARD,
            device_n: 2,
        }
    }
}

impl ProtocolConfig {
    /// Configuration for an executing board with the given id
    pub fn for_board(board_id: DeviceId) -> Self {
        Self {
            board_id,
            ..Self::default()
        }
    }

    /// Point-to-point configuration: one board, one controller
    pub fn point_to_point(board_id: DeviceId) -> Self {
        Self {
            board_id,
            device_n: 2,
        }
    }

    /// Check the configured ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.device_n == 0 {
            return Err(ConfigError::DeviceCountZero);
        }
        Ok(())
    }
}

/// Configuration validation failures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigError {
    /// `device_n` must be at least 1
    DeviceCountZero,
}

impl core::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            ConfigError::DeviceCountZero => f.write_str("device_n must be in range [1, 255]"),
        }
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProtocolConfig::default();
        assert_eq!(config.board_id, DeviceId::BOARD);
        assert_eq!(config.device_n, 2);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_device_count_rejected() {
        let config = ProtocolConfig {
            board_id: DeviceId::new(1),
            device_n: 0,
        };
        assert_eq!(config.validate(), Err(ConfigError::DeviceCountZero));
    }
}
