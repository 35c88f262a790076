//! Transport capability: byte-frame links with shared validation
//!
//! A transport is split in two layers. The **delegate** layer
//! ([`Transport`]) is what a driver implements: blocking, fixed-size reads
//! and writes of raw byte frames over whatever link it owns (UART, TCP, a
//! radio). The **shared** layer ([`TransportExt`], blanket-implemented for
//! every delegate) adds the protocol duties every link performs
//! identically:
//!
//! - on receive: parse the header, drop frames not addressed to this board,
//!   drop frames the validator rejects;
//! - on send: seal the packet (write its FCS) before the bytes leave.
//!
//! Drops are silent on the wire — no NACK — and logged at `trace!`.

pub mod hub;

pub use hub::{Hub, TransportSlot};

use log::trace;

use crate::errors::Result;
use crate::protocol::{Validate, WirePacket};
use crate::types::DeviceId;

// ----------------------------------------------------------------------------
// Transport Delegate
// ----------------------------------------------------------------------------

/// Driver-implemented byte-frame link.
///
/// Implementations move whole frames: `delegate_try_receive` either fills
/// the entire buffer or reports that no frame is available, and
/// `delegate_send` writes the entire frame, flushing synchronously if the
/// link requires it. Neither call blocks beyond the availability check and
/// the I/O itself.
pub trait Transport {
    /// Read exactly `frame.len()` bytes if a frame is available.
    ///
    /// Returns `Ok(true)` when the buffer was filled, `Ok(false)` when no
    /// frame is pending.
    fn delegate_try_receive(&mut self, frame: &mut [u8]) -> Result<bool>;

    /// Write the frame to the link
    fn delegate_send(&mut self, frame: &[u8]) -> Result<()>;
}

// ----------------------------------------------------------------------------
// Shared Layer
// ----------------------------------------------------------------------------

/// Validation and addressing shared by every transport.
///
/// Blanket-implemented; drivers implement only [`Transport`].
pub trait TransportExt: Transport {
    /// Receive one packet, filtering by receiver id and integrity.
    ///
    /// Returns `Ok(None)` when no frame is pending, when the frame is
    /// addressed to another device, or when validation fails. The two drop
    /// cases are indistinguishable to the caller on purpose: the wire
    /// contract is silence.
    fn try_receive<P: WirePacket + Validate>(&mut self, board_id: DeviceId) -> Result<Option<P>> {
        let mut packet = P::zeroed();
        if !self.delegate_try_receive(packet.as_bytes_mut())? {
            return Ok(None);
        }
        let header = packet.header();
        if header.receiver_id() != board_id {
            trace!(
                "dropped frame for {} (local {board_id})",
                header.receiver_id()
            );
            return Ok(None);
        }
        if !packet.is_valid() {
            trace!("dropped frame from {}: bad fcs", header.sender_id());
            return Ok(None);
        }
        Ok(Some(packet))
    }

    /// Seal and send one packet
    fn send<P: WirePacket + Validate>(&mut self, packet: &mut P) -> Result<()> {
        packet.seal();
        self.delegate_send(packet.as_bytes())
    }
}

impl<T: Transport + ?Sized> TransportExt for T {}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::{Crc32, FramedPacket, HeaderFields, HeaderFlag, PacketHeader};
    use crate::status::StatusCode;
    use crate::types::TaskId;
    use alloc::collections::VecDeque;
    use alloc::vec::Vec;

    type TestPacket = FramedPacket<Crc32, 32>;

    /// Frame queue standing in for a real link
    #[derive(Default)]
    struct QueueTransport {
        inbound: VecDeque<Vec<u8>>,
        outbound: Vec<Vec<u8>>,
    }

    impl Transport for QueueTransport {
        fn delegate_try_receive(&mut self, frame: &mut [u8]) -> Result<bool> {
            match self.inbound.pop_front() {
                Some(bytes) => {
                    frame.copy_from_slice(&bytes);
                    Ok(true)
                }
                None => Ok(false),
            }
        }

        fn delegate_send(&mut self, frame: &[u8]) -> Result<()> {
            self.outbound.push(frame.to_vec());
            Ok(())
        }
    }

    fn sealed_packet(receiver: DeviceId) -> TestPacket {
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::None, true, receiver),
            DeviceId::new(0x01),
        );
        let mut packet =
            TestPacket::with_payload(header, TaskId::new(0x07), StatusCode::OK, b"abc");
        packet.seal();
        packet
    }

    #[test]
    fn test_send_seals_before_write() {
        let mut link = QueueTransport::default();
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::None, true, DeviceId::new(0x01)),
            DeviceId::BOARD,
        );
        let mut packet = TestPacket::new(header, TaskId::new(0x01), StatusCode::OK);
        assert!(!packet.is_valid());

        link.send(&mut packet).unwrap();

        assert!(packet.is_valid());
        let mut raw = [0u8; 32];
        raw.copy_from_slice(&link.outbound[0]);
        assert!(TestPacket::from_bytes(raw).is_valid());
    }

    #[test]
    fn test_receive_accepts_addressed_valid_frame() {
        let mut link = QueueTransport::default();
        let packet = sealed_packet(DeviceId::BOARD);
        link.inbound.push_back(packet.as_bytes().to_vec());

        let received: Option<TestPacket> = link.try_receive(DeviceId::BOARD).unwrap();
        assert_eq!(received, Some(packet));
    }

    #[test]
    fn test_receive_drops_foreign_receiver_id() {
        let mut link = QueueTransport::default();
        let packet = sealed_packet(DeviceId::new(0x02));
        link.inbound.push_back(packet.as_bytes().to_vec());

        let received: Option<TestPacket> = link.try_receive(DeviceId::BOARD).unwrap();
        assert_eq!(received, None);
    }

    #[test]
    fn test_receive_drops_corrupt_frame() {
        let mut link = QueueTransport::default();
        let packet = sealed_packet(DeviceId::BOARD);
        let mut bytes = packet.as_bytes().to_vec();
        bytes[10] ^= 0xFF; // corrupt the payload, keep the stale FCS
        link.inbound.push_back(bytes);

        let received: Option<TestPacket> = link.try_receive(DeviceId::BOARD).unwrap();
        assert_eq!(received, None);
    }

    #[test]
    fn test_receive_empty_link() {
        let mut link = QueueTransport::default();
        let received: Option<TestPacket> = link.try_receive(DeviceId::BOARD).unwrap();
        assert_eq!(received, None);
    }
}
