//! Fixed-size packet layouts
//!
//! Packets are fixed-size byte frames with an explicit layout — no struct
//! padding, no host-dependent field placement. Multi-byte integers are
//! little-endian. Two shapes exist:
//!
//! ```text
//! basic:   | header (4) | status (1) | task_id (1) | payload ...          |
//! framed:  | header (4) | status (1) | task_id (1) | payload ... | fcs (F) |
//! ```
//!
//! The total size `N` is a compile-time constant and must be a multiple of
//! the machine word size; both invariants are enforced with const
//! assertions evaluated at monomorphization.

use core::marker::PhantomData;

use super::checksum::ChecksumPolicy;
use super::header::PacketHeader;
use crate::status::StatusCode;
use crate::types::TaskId;

// ----------------------------------------------------------------------------
// Layout Offsets
// ----------------------------------------------------------------------------

/// Offset of the status byte
pub const STATUS_OFFSET: usize = PacketHeader::SIZE;
/// Offset of the task id
pub const TASK_ID_OFFSET: usize = STATUS_OFFSET + 1;
/// Offset of the payload
pub const PAYLOAD_OFFSET: usize = TASK_ID_OFFSET + TaskId::SIZE;

// ----------------------------------------------------------------------------
// Wire Packet Trait
// ----------------------------------------------------------------------------

/// A fixed-size frame the transport layer can move as raw bytes.
///
/// Implemented by [`BasicPacket`] and [`FramedPacket`]; the hub, transports
/// and channels are generic over this trait plus
/// [`super::validator::Validate`].
pub trait WirePacket: Sized {
    /// Total frame size in bytes
    const SIZE: usize;

    /// Payload capacity in bytes
    const PAYLOAD_SIZE: usize;

    /// Whether the frame carries a check sequence
    const HAS_FCS: bool;

    /// An all-zero frame (used to receive into)
    fn zeroed() -> Self;

    /// The raw frame bytes
    fn as_bytes(&self) -> &[u8];

    /// Mutable access to the raw frame bytes
    fn as_bytes_mut(&mut self) -> &mut [u8];

    /// Parse the header word from the frame
    fn header(&self) -> PacketHeader {
        let mut word = [0u8; PacketHeader::SIZE];
        word.copy_from_slice(&self.as_bytes()[..PacketHeader::SIZE]);
        PacketHeader::from_bytes(word)
    }

    /// Write the header word into the frame
    fn set_header(&mut self, header: PacketHeader) {
        self.as_bytes_mut()[..PacketHeader::SIZE].copy_from_slice(&header.to_bytes());
    }

    /// The status byte
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u8(self.as_bytes()[STATUS_OFFSET])
    }

    /// Write the status byte
    fn set_status_code(&mut self, code: StatusCode) {
        self.as_bytes_mut()[STATUS_OFFSET] = code.as_u8();
    }

    /// The task id field
    fn task_id(&self) -> TaskId {
        TaskId::new(self.as_bytes()[TASK_ID_OFFSET])
    }

    /// Write the task id field
    fn set_task_id(&mut self, uid: TaskId) {
        self.as_bytes_mut()[TASK_ID_OFFSET] = uid.as_u8();
    }

    /// The payload field
    fn payload(&self) -> &[u8] {
        &self.as_bytes()[PAYLOAD_OFFSET..PAYLOAD_OFFSET + Self::PAYLOAD_SIZE]
    }

    /// Mutable access to the payload field
    fn payload_mut(&mut self) -> &mut [u8] {
        &mut self.as_bytes_mut()[PAYLOAD_OFFSET..PAYLOAD_OFFSET + Self::PAYLOAD_SIZE]
    }

    /// Copy `data` into the payload, truncating or zero-padding as needed
    fn fill_payload(&mut self, data: &[u8]) {
        let payload = self.payload_mut();
        let take = core::cmp::min(data.len(), payload.len());
        payload[..take].copy_from_slice(&data[..take]);
        for byte in payload[take..].iter_mut() {
            *byte = 0;
        }
    }
}

// ----------------------------------------------------------------------------
// Basic Packet
// ----------------------------------------------------------------------------

/// Packet without a frame check sequence, for fully trusted links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BasicPacket<const N: usize = 32> {
    bytes: [u8; N],
}

impl<const N: usize> BasicPacket<N> {
    const LAYOUT_OK: () = assert!(
        N % core::mem::size_of::<usize>() == 0 && N >= PAYLOAD_OFFSET,
        "packet size must be word-aligned and hold header, status and task id"
    );

    /// Construct with a zeroed payload
    pub fn new(header: PacketHeader, uid: TaskId, code: StatusCode) -> Self {
        let mut packet = Self::zeroed();
        packet.set_header(header);
        packet.set_task_id(uid);
        packet.set_status_code(code);
        packet
    }

    /// Construct with a payload, truncated or zero-padded to the field
    pub fn with_payload(
        header: PacketHeader,
        uid: TaskId,
        code: StatusCode,
        payload: &[u8],
    ) -> Self {
        let mut packet = Self::new(header, uid, code);
        packet.fill_payload(payload);
        packet
    }

    /// Reconstruct from raw frame bytes
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        let () = Self::LAYOUT_OK;
        Self { bytes }
    }
}

impl<const N: usize> WirePacket for BasicPacket<N> {
    const SIZE: usize = N;
    const PAYLOAD_SIZE: usize = N - PAYLOAD_OFFSET;
    const HAS_FCS: bool = false;

    fn zeroed() -> Self {
        let () = Self::LAYOUT_OK;
        Self { bytes: [0u8; N] }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

// ----------------------------------------------------------------------------
// Framed Packet
// ----------------------------------------------------------------------------

/// Packet protected by a trailing frame check sequence.
///
/// The FCS covers every byte before it and is written little-endian in the
/// width of the checksum policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FramedPacket<C = super::checksum::Crc32, const N: usize = 32> {
    bytes: [u8; N],
    _policy: PhantomData<C>,
}

impl<C: ChecksumPolicy, const N: usize> FramedPacket<C, N> {
    const LAYOUT_OK: () = assert!(
        N % core::mem::size_of::<usize>() == 0 && N >= PAYLOAD_OFFSET + C::SIZE,
        "packet size must be word-aligned and hold header, status, task id and fcs"
    );

    /// Offset of the FCS field
    pub const FCS_OFFSET: usize = N - C::SIZE;

    /// Construct with a zeroed payload
    pub fn new(header: PacketHeader, uid: TaskId, code: StatusCode) -> Self {
        let mut packet = Self::zeroed();
        packet.set_header(header);
        packet.set_task_id(uid);
        packet.set_status_code(code);
        packet
    }

    /// Construct with a payload, truncated or zero-padded to the field
    pub fn with_payload(
        header: PacketHeader,
        uid: TaskId,
        code: StatusCode,
        payload: &[u8],
    ) -> Self {
        let mut packet = Self::new(header, uid, code);
        packet.fill_payload(payload);
        packet
    }

    /// Reconstruct from raw frame bytes
    pub fn from_bytes(bytes: [u8; N]) -> Self {
        let () = Self::LAYOUT_OK;
        Self {
            bytes,
            _policy: PhantomData,
        }
    }

    /// Read the FCS field, widened to `u64`
    pub fn fcs(&self) -> u64 {
        let mut value = 0u64;
        for (lane, &byte) in self.bytes[Self::FCS_OFFSET..].iter().enumerate() {
            value |= (byte as u64) << (8 * lane);
        }
        value
    }

    /// Write the FCS field little-endian
    pub(crate) fn set_fcs(&mut self, value: u64) {
        for (lane, byte) in self.bytes[Self::FCS_OFFSET..].iter_mut().enumerate() {
            *byte = (value >> (8 * lane)) as u8;
        }
    }

    /// The bytes the checksum protects
    pub(crate) fn protected_bytes(&self) -> &[u8] {
        &self.bytes[..Self::FCS_OFFSET]
    }
}

impl<C: ChecksumPolicy, const N: usize> WirePacket for FramedPacket<C, N> {
    const SIZE: usize = N;
    const PAYLOAD_SIZE: usize = N - PAYLOAD_OFFSET - C::SIZE;
    const HAS_FCS: bool = true;

    fn zeroed() -> Self {
        let () = Self::LAYOUT_OK;
        Self {
            bytes: [0u8; N],
            _policy: PhantomData,
        }
    }

    fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    fn as_bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
