//! Wire protocol: headers, packet layouts, checksums, validation
//!
//! The protocol moves fixed-size frames over byte-oriented links. A frame is
//! a bit-packed header, a status byte, a task id, a payload, and (for framed
//! packets) a trailing check sequence chosen by a [`checksum::ChecksumPolicy`].

pub mod checksum;
pub mod compute;
pub mod header;
pub mod packet;
pub mod validator;

pub use checksum::{
    Adler32, ChecksumPolicy, Crc16, Crc32, Crc64, Crc8, Fletcher16, Fletcher32, Internet16, Sum16,
    Sum32, Sum8,
};
pub use header::{HeaderFields, HeaderFlag, PacketHeader, PacketKind};
pub use packet::{BasicPacket, FramedPacket, WirePacket};
pub use validator::Validate;
