//! Core identifier types for the taskwire protocol
//!
//! This module defines the fundamental types used throughout the dispatcher,
//! using newtype patterns for semantic validation and type safety.

use core::fmt;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Task Identifier
// ----------------------------------------------------------------------------

/// Unique identifier for a task *type*, assigned at compile time.
///
/// Every registered task type carries exactly one `TaskId`; the registry
/// rejects task sets with duplicate ids at compile time. A single byte is
/// wide enough for the closed task sets this dispatcher targets, and it is
/// the width the wire format reserves for the field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TaskId(u8);

impl TaskId {
    /// Create a new task id from a raw byte
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Wire size of a task id in bytes
    pub const SIZE: usize = 1;
}

impl fmt::Display for TaskId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "task:{:#04x}", self.0)
    }
}

impl From<u8> for TaskId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

// ----------------------------------------------------------------------------
// Device Identifier
// ----------------------------------------------------------------------------

/// 8-bit identity of a device on the link.
///
/// Used as the sender id on outbound packets, as the receive-side filter
/// (a packet whose receiver id differs from the local board id is dropped),
/// and as the initiator id propagated back with task results.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DeviceId(u8);

impl DeviceId {
    /// Create a new device id from a raw byte
    pub const fn new(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// Conventional id of the executing board itself
    pub const BOARD: Self = Self(0);
}

impl fmt::Display for DeviceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "device:{:#04x}", self.0)
    }
}

impl From<u8> for DeviceId {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

// ----------------------------------------------------------------------------
// Priority
// ----------------------------------------------------------------------------

/// Packet priority, stored in a 3-bit header field.
///
/// Zero means "no priority"; higher values are more important. Values above
/// the 3-bit range are clamped on construction so the header packing can
/// never spill into neighboring fields.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Priority(u8);

impl Priority {
    /// Maximum encodable priority (3 bits)
    pub const MAX: Self = Self(0x7);

    /// No priority
    pub const NONE: Self = Self(0);

    /// Create a new priority, clamping to the 3-bit range
    pub const fn new(value: u8) -> Self {
        if value > 0x7 {
            Self(0x7)
        } else {
            Self(value)
        }
    }

    /// Get the raw value
    pub const fn value(self) -> u8 {
        self.0
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_task_id_roundtrip() {
        let id = TaskId::new(0x07);
        assert_eq!(id.as_u8(), 0x07);
        assert_eq!(TaskId::from(0x07), id);
        assert_eq!(TaskId::SIZE, 1);
    }

    #[test]
    fn test_device_id_board_default() {
        assert_eq!(DeviceId::BOARD.as_u8(), 0);
        assert_eq!(DeviceId::default(), DeviceId::BOARD);
    }

    #[test]
    fn test_priority_clamps_to_three_bits() {
        assert_eq!(Priority::new(3).value(), 3);
        assert_eq!(Priority::new(200).value(), 7);
        assert_eq!(Priority::NONE.value(), 0);
    }
}
