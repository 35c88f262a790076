//! Property tests for the wire layer
//!
//! Covers the protocol laws that must hold for arbitrary field values and
//! payloads: header build/parse round-trips with the version and sender
//! fields pinned, seal/verify sensitivity to any protected byte, envelope
//! pack/unpack symmetry, and checksum determinism.

use proptest::prelude::*;

use taskwire_core::config::PROTOCOL_VERSION;
use taskwire_core::envelope::Envelope;
use taskwire_core::protocol::{
    compute, Crc16, Crc32, FramedPacket, HeaderFields, HeaderFlag, PacketHeader, PacketKind,
    Validate, WirePacket,
};
use taskwire_core::status::StatusCode;
use taskwire_core::types::{DeviceId, Priority, TaskId};

type TestPacket = FramedPacket<Crc32, 32>;

fn arb_fields() -> impl Strategy<Value = HeaderFields> {
    (
        0u8..16,
        any::<bool>(),
        any::<bool>(),
        0u8..8,
        0u8..8,
        any::<bool>(),
        any::<bool>(),
        any::<u8>(),
    )
        .prop_map(
            |(kind, encrypted, fragmented, priority, flags, has_checksum, reserved, receiver)| {
                HeaderFields {
                    kind: PacketKind::from_u8(kind),
                    encrypted,
                    fragmented,
                    priority: Priority::new(priority),
                    flags: HeaderFlag::from_u8(flags),
                    has_checksum,
                    reserved,
                    receiver_id: DeviceId::new(receiver),
                }
            },
        )
}

proptest! {
    #[test]
    fn header_accessors_return_builder_inputs(fields in arb_fields(), board in any::<u8>()) {
        let board = DeviceId::new(board);
        let header = PacketHeader::build(fields, board);

        prop_assert_eq!(header.kind(), fields.kind);
        prop_assert_eq!(header.encrypted(), fields.encrypted);
        prop_assert_eq!(header.fragmented(), fields.fragmented);
        prop_assert_eq!(header.priority(), fields.priority);
        prop_assert_eq!(header.flags(), fields.flags);
        prop_assert_eq!(header.has_checksum(), fields.has_checksum);
        prop_assert_eq!(header.reserved(), fields.reserved);
        prop_assert_eq!(header.receiver_id(), fields.receiver_id);

        // Protocol-owned fields are pinned regardless of inputs
        prop_assert_eq!(header.version(), PROTOCOL_VERSION);
        prop_assert_eq!(header.sender_id(), board);
    }

    #[test]
    fn header_survives_wire_bytes(fields in arb_fields(), board in any::<u8>()) {
        let header = PacketHeader::build(fields, DeviceId::new(board));
        let parsed = PacketHeader::from_bytes(header.to_bytes());
        prop_assert_eq!(parsed, header);
        prop_assert_eq!(parsed.word(), header.word());
    }

    #[test]
    fn raw_header_pins_version(raw in any::<u16>(), receiver in any::<u8>(), board in any::<u8>()) {
        let header = PacketHeader::from_raw(raw, DeviceId::new(receiver), DeviceId::new(board));
        prop_assert_eq!(header.version(), PROTOCOL_VERSION);
        prop_assert_eq!(header.sender_id(), DeviceId::new(board));
        prop_assert_eq!(header.receiver_id(), DeviceId::new(receiver));
    }

    #[test]
    fn sealed_packet_verifies_and_reseals_identically(
        payload in proptest::collection::vec(any::<u8>(), 0..=22),
        uid in any::<u8>(),
        status in any::<u8>(),
    ) {
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::None, true, DeviceId::BOARD),
            DeviceId::new(0x01),
        );
        let mut packet = TestPacket::with_payload(
            header,
            TaskId::new(uid),
            StatusCode::from_u8(status),
            &payload,
        );

        packet.seal();
        prop_assert!(packet.is_valid());

        // Sealing is idempotent for fixed content
        let first = packet.as_bytes().to_vec();
        packet.seal();
        prop_assert_eq!(packet.as_bytes(), first.as_slice());
    }

    #[test]
    fn any_protected_byte_flip_is_detected(
        payload in proptest::collection::vec(any::<u8>(), 0..=22),
        flip_at in 0usize..28,
        flip_bit in 0u8..8,
    ) {
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::None, true, DeviceId::BOARD),
            DeviceId::new(0x01),
        );
        let mut packet =
            TestPacket::with_payload(header, TaskId::new(0x07), StatusCode::OK, &payload);
        packet.seal();

        packet.as_bytes_mut()[flip_at] ^= 1 << flip_bit;
        prop_assert!(!packet.is_valid());
    }

    #[test]
    fn envelope_roundtrip_tuple(a in any::<u32>(), b in any::<i64>(), c in any::<bool>(), d in any::<u8>()) {
        let value = (a, b, c, d);
        let envelope = Envelope::packed(&value).unwrap();
        let decoded: (u32, i64, bool, u8) = envelope.unpack().unwrap();
        prop_assert_eq!(decoded, value);
    }

    #[test]
    fn envelope_roundtrip_bytes(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        let envelope = Envelope::packed(&data).unwrap();
        let decoded: Vec<u8> = envelope.unpack().unwrap();
        prop_assert_eq!(decoded, data);
    }

    #[test]
    fn checksums_are_pure(data in proptest::collection::vec(any::<u8>(), 0..128)) {
        prop_assert_eq!(compute::crc32(&data), compute::crc32(&data));
        prop_assert_eq!(compute::crc64(&data), compute::crc64(&data));
        prop_assert_eq!(compute::fletcher32(&data), compute::fletcher32(&data));
        prop_assert_eq!(compute::adler32(&data), compute::adler32(&data));
        prop_assert_eq!(compute::internet16(&data), compute::internet16(&data));
    }

    #[test]
    fn sum_policies_agree_with_byte_model(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        // sum8 is a plain byte sum; the wider sums weigh bytes by their
        // little-endian lane within each word.
        let byte_model: u8 = data.iter().fold(0u8, |acc, &b| acc.wrapping_add(b));
        prop_assert_eq!(compute::sum8(&data), byte_model);

        let lane_model16: u16 = data
            .chunks(2)
            .map(|chunk| {
                chunk
                    .iter()
                    .enumerate()
                    .fold(0u16, |acc, (lane, &b)| acc.wrapping_add((b as u16) << (8 * lane)))
            })
            .fold(0u16, |acc, word| acc.wrapping_add(word));
        prop_assert_eq!(compute::sum16(&data), lane_model16);
    }

    #[test]
    fn policies_dispatch_to_matching_engines(data in proptest::collection::vec(any::<u8>(), 0..64)) {
        use taskwire_core::protocol::ChecksumPolicy;
        prop_assert_eq!(Crc16::compute(&data), compute::crc16(&data) as u64);
        prop_assert_eq!(Crc32::compute(&data), compute::crc32(&data) as u64);
    }
}

#[test]
fn smoke_manual_header() {
    let fields = HeaderFields::data(HeaderFlag::Resume, true, DeviceId::new(0x01));
    let header = PacketHeader::build(fields, DeviceId::BOARD);
    assert_eq!(header.flags(), HeaderFlag::Resume);
}
