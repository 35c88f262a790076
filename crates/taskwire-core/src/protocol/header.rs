//! Bit-packed packet header
//!
//! The header is a single 32-bit word serialized little-endian as the first
//! four bytes of every packet. Bit layout, MSB to LSB:
//!
//! ```text
//! +-------------+---------+-----+------+----------+----------+----------+----------+-----------+-------------+
//! | 31 30 29 28 |  27 26  | 25  |  24  | 23 22 21 | 20 19 18 |    17    |    16    |  15 .. 8  |   7 .. 0    |
//! |    kind     | version | enc | frag | priority |  flags   | checksum | reserved | sender_id | receiver_id |
//! +-------------+---------+-----+------+----------+----------+----------+----------+-----------+-------------+
//! ```
//!
//! `version` and `sender_id` are immutable protocol-level fields: every
//! constructor forces them to [`PROTOCOL_VERSION`] and the local board id,
//! and no setter exists for either.

use crate::config::PROTOCOL_VERSION;
use crate::types::{DeviceId, Priority};
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Packet Kind
// ----------------------------------------------------------------------------

/// Packet type stored in the 4-bit `kind` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum PacketKind {
    /// Generic application data packet
    Data = 0x0,
    /// Configuration or parameter change
    Config = 0x1,
    /// Protocol-level commands
    Control = 0x2,
    /// Routing or discovery
    Routing = 0x3,
    /// Time synchronization message
    TimeSync = 0x4,
    /// Authentication or login data
    Auth = 0x5,
    /// Session initiation/teardown
    Session = 0x6,
    /// Device status or health info
    Status = 0x7,
    /// Log or diagnostic data
    Log = 0x8,
    /// Debug-specific packets
    Debug = 0x9,
    /// Firmware updates or related payloads
    Firmware = 0xA,
    /// Reserved for future use
    ReservedB = 0xB,
    /// Reserved for future use
    ReservedC = 0xC,
    /// Reserved for future use
    ReservedD = 0xD,
    /// Reserved for future use
    ReservedE = 0xE,
    /// Reserved for future use
    ReservedF = 0xF,
}

impl PacketKind {
    /// Decode from the 4-bit field value
    pub const fn from_u8(value: u8) -> Self {
        match value & 0xF {
            0x0 => PacketKind::Data,
            0x1 => PacketKind::Config,
            0x2 => PacketKind::Control,
            0x3 => PacketKind::Routing,
            0x4 => PacketKind::TimeSync,
            0x5 => PacketKind::Auth,
            0x6 => PacketKind::Session,
            0x7 => PacketKind::Status,
            0x8 => PacketKind::Log,
            0x9 => PacketKind::Debug,
            0xA => PacketKind::Firmware,
            0xB => PacketKind::ReservedB,
            0xC => PacketKind::ReservedC,
            0xD => PacketKind::ReservedD,
            0xE => PacketKind::ReservedE,
            _ => PacketKind::ReservedF,
        }
    }

    /// Raw 4-bit field value
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

// ----------------------------------------------------------------------------
// Header Flags
// ----------------------------------------------------------------------------

/// Lifecycle command stored in the 3-bit `flags` field.
///
/// `None` requests task registration; `Abort`, `Pause` and `Resume` drive an
/// already registered task. `Error` is never consumed on receive — it marks
/// outbound replies. `Ack` and `Heartbeat` are carried but not consumed by
/// the external channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum HeaderFlag {
    /// No flags; a data-bearing packet registers a task
    None = 0,
    /// Error indication (set on outbound failure replies)
    Error = 1,
    /// Acknowledgment packet
    Ack = 2,
    /// Abort the addressed task
    Abort = 3,
    /// Pause the addressed task
    Pause = 4,
    /// Resume the addressed task
    Resume = 5,
    /// Heartbeat signal
    Heartbeat = 6,
    /// Reserved for future use
    Reserved = 7,
}

impl HeaderFlag {
    /// Decode from the 3-bit field value
    pub const fn from_u8(value: u8) -> Self {
        match value & 0x7 {
            0 => HeaderFlag::None,
            1 => HeaderFlag::Error,
            2 => HeaderFlag::Ack,
            3 => HeaderFlag::Abort,
            4 => HeaderFlag::Pause,
            5 => HeaderFlag::Resume,
            6 => HeaderFlag::Heartbeat,
            _ => HeaderFlag::Reserved,
        }
    }

    /// Raw 3-bit field value
    pub const fn as_u8(self) -> u8 {
        self as u8
    }
}

// ----------------------------------------------------------------------------
// Header Field Bundle
// ----------------------------------------------------------------------------

/// Caller-controlled header fields for full-field construction.
///
/// Excludes `version` and `sender_id`, which are protocol-owned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderFields {
    /// Packet type
    pub kind: PacketKind,
    /// Encrypted-payload bit (reserved; the core never encrypts)
    pub encrypted: bool,
    /// Fragmentation bit (reserved; the core never fragments)
    pub fragmented: bool,
    /// Packet priority
    pub priority: Priority,
    /// Lifecycle command flags
    pub flags: HeaderFlag,
    /// Whether the packet carries a frame check sequence
    pub has_checksum: bool,
    /// Reserved bit
    pub reserved: bool,
    /// Intended recipient of the packet
    pub receiver_id: DeviceId,
}

impl HeaderFields {
    /// Plain data fields addressed to `receiver_id`
    pub fn data(flags: HeaderFlag, has_checksum: bool, receiver_id: DeviceId) -> Self {
        Self {
            kind: PacketKind::Data,
            encrypted: false,
            fragmented: false,
            priority: Priority::NONE,
            flags,
            has_checksum,
            reserved: false,
            receiver_id,
        }
    }
}

// ----------------------------------------------------------------------------
// Packet Header
// ----------------------------------------------------------------------------

const KIND_SHIFT: u32 = 28;
const VERSION_SHIFT: u32 = 26;
const ENCRYPTED_BIT: u32 = 1 << 25;
const FRAGMENTED_BIT: u32 = 1 << 24;
const PRIORITY_SHIFT: u32 = 21;
const FLAGS_SHIFT: u32 = 18;
const CHECKSUM_BIT: u32 = 1 << 17;
const RESERVED_BIT: u32 = 1 << 16;
const SENDER_SHIFT: u32 = 8;

const VERSION_MASK: u32 = 0x3 << VERSION_SHIFT;
const SENDER_MASK: u32 = 0xFF << SENDER_SHIFT;

/// Immutable, bit-packed 4-byte packet header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PacketHeader(u32);

impl PacketHeader {
    /// Wire size of the header in bytes
    pub const SIZE: usize = 4;

    /// Full-field constructor.
    ///
    /// `version` is forced to [`PROTOCOL_VERSION`] and `sender_id` to
    /// `board_id` regardless of any caller intent.
    pub fn build(fields: HeaderFields, board_id: DeviceId) -> Self {
        let word = ((fields.kind.as_u8() as u32) << KIND_SHIFT)
            | ((PROTOCOL_VERSION as u32) << VERSION_SHIFT)
            | if fields.encrypted { ENCRYPTED_BIT } else { 0 }
            | if fields.fragmented { FRAGMENTED_BIT } else { 0 }
            | ((fields.priority.value() as u32) << PRIORITY_SHIFT)
            | ((fields.flags.as_u8() as u32) << FLAGS_SHIFT)
            | if fields.has_checksum { CHECKSUM_BIT } else { 0 }
            | if fields.reserved { RESERVED_BIT } else { 0 }
            | ((board_id.as_u8() as u32) << SENDER_SHIFT)
            | fields.receiver_id.as_u8() as u32;
        Self(word)
    }

    /// Raw constructor from the upper 16 header bits.
    ///
    /// `raw` supplies bits 31..16 verbatim except for the version subfield,
    /// which is overwritten with [`PROTOCOL_VERSION`]; `sender_id` is set to
    /// `board_id`.
    pub fn from_raw(raw: u16, receiver_id: DeviceId, board_id: DeviceId) -> Self {
        let word = ((raw as u32) << 16 & !VERSION_MASK)
            | ((PROTOCOL_VERSION as u32) << VERSION_SHIFT)
            | ((board_id.as_u8() as u32) << SENDER_SHIFT)
            | receiver_id.as_u8() as u32;
        Self(word)
    }

    /// Reconstruct a header from its packed word (receive path)
    pub const fn from_word(word: u32) -> Self {
        Self(word)
    }

    /// The packed 32-bit word
    pub const fn word(self) -> u32 {
        self.0
    }

    /// Serialize to the four wire bytes (little-endian)
    pub const fn to_bytes(self) -> [u8; Self::SIZE] {
        self.0.to_le_bytes()
    }

    /// Parse from the four wire bytes (little-endian)
    pub const fn from_bytes(bytes: [u8; Self::SIZE]) -> Self {
        Self(u32::from_le_bytes(bytes))
    }

    /// Extract the packet kind (bits 31..28)
    pub const fn kind(self) -> PacketKind {
        PacketKind::from_u8((self.0 >> KIND_SHIFT) as u8)
    }

    /// Extract the protocol version (bits 27..26)
    pub const fn version(self) -> u8 {
        ((self.0 >> VERSION_SHIFT) & 0x3) as u8
    }

    /// Extract the encrypted bit (bit 25)
    pub const fn encrypted(self) -> bool {
        self.0 & ENCRYPTED_BIT != 0
    }

    /// Extract the fragmentation bit (bit 24)
    pub const fn fragmented(self) -> bool {
        self.0 & FRAGMENTED_BIT != 0
    }

    /// Extract the priority (bits 23..21)
    pub const fn priority(self) -> Priority {
        Priority::new(((self.0 >> PRIORITY_SHIFT) & 0x7) as u8)
    }

    /// Extract the lifecycle flags (bits 20..18)
    pub const fn flags(self) -> HeaderFlag {
        HeaderFlag::from_u8(((self.0 >> FLAGS_SHIFT) & 0x7) as u8)
    }

    /// Extract the checksum-presence bit (bit 17)
    pub const fn has_checksum(self) -> bool {
        self.0 & CHECKSUM_BIT != 0
    }

    /// Extract the reserved bit (bit 16)
    pub const fn reserved(self) -> bool {
        self.0 & RESERVED_BIT != 0
    }

    /// Extract the sender id (bits 15..8)
    pub const fn sender_id(self) -> DeviceId {
        DeviceId::new(((self.0 & SENDER_MASK) >> SENDER_SHIFT) as u8)
    }

    /// Extract the receiver id (bits 7..0)
    pub const fn receiver_id(self) -> DeviceId {
        DeviceId::new((self.0 & 0xFF) as u8)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> HeaderFields {
        HeaderFields {
            kind: PacketKind::Control,
            encrypted: true,
            fragmented: false,
            priority: Priority::new(5),
            flags: HeaderFlag::Pause,
            has_checksum: true,
            reserved: false,
            receiver_id: DeviceId::new(0x42),
        }
    }

    #[test]
    fn test_full_field_roundtrip() {
        let board = DeviceId::new(0x07);
        let header = PacketHeader::build(sample_fields(), board);

        assert_eq!(header.kind(), PacketKind::Control);
        assert_eq!(header.version(), PROTOCOL_VERSION);
        assert!(header.encrypted());
        assert!(!header.fragmented());
        assert_eq!(header.priority().value(), 5);
        assert_eq!(header.flags(), HeaderFlag::Pause);
        assert!(header.has_checksum());
        assert!(!header.reserved());
        assert_eq!(header.sender_id(), board);
        assert_eq!(header.receiver_id(), DeviceId::new(0x42));
    }

    #[test]
    fn test_wire_bytes_are_little_endian() {
        let header = PacketHeader::build(sample_fields(), DeviceId::new(0x07));
        let bytes = header.to_bytes();
        assert_eq!(bytes, header.word().to_le_bytes());
        // Low byte on the wire is the receiver id
        assert_eq!(bytes[0], 0x42);
        assert_eq!(bytes[1], 0x07);
        assert_eq!(PacketHeader::from_bytes(bytes), header);
    }

    #[test]
    fn test_raw_constructor_pins_version() {
        // All upper bits set, including both version bits
        let header = PacketHeader::from_raw(0xFFFF, DeviceId::new(0x01), DeviceId::new(0x02));
        assert_eq!(header.version(), PROTOCOL_VERSION);
        assert_eq!(header.kind(), PacketKind::ReservedF);
        assert_eq!(header.flags(), HeaderFlag::Reserved);
        assert_eq!(header.sender_id(), DeviceId::new(0x02));
        assert_eq!(header.receiver_id(), DeviceId::new(0x01));
    }

    #[test]
    fn test_flag_command_numbering() {
        assert_eq!(HeaderFlag::None.as_u8(), 0);
        assert_eq!(HeaderFlag::Error.as_u8(), 1);
        assert_eq!(HeaderFlag::Ack.as_u8(), 2);
        assert_eq!(HeaderFlag::Abort.as_u8(), 3);
        assert_eq!(HeaderFlag::Pause.as_u8(), 4);
        assert_eq!(HeaderFlag::Resume.as_u8(), 5);
        assert_eq!(HeaderFlag::from_u8(4), HeaderFlag::Pause);
    }

    #[test]
    fn test_kind_field_covers_nibble() {
        for value in 0..=0xF {
            assert_eq!(PacketKind::from_u8(value).as_u8(), value);
        }
    }
}
