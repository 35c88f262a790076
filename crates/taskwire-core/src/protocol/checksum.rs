//! Checksum policy types for framed packets
//!
//! Each policy names an algorithm from [`super::compute`] and fixes the size
//! of the frame check sequence (FCS) field it occupies on the wire. Policies
//! are zero-sized: they exist to parameterize [`super::packet::FramedPacket`]
//! at compile time. A link that wants no checksum at all uses
//! [`super::packet::BasicPacket`] instead of a `None` policy.

use super::compute;

// ----------------------------------------------------------------------------
// Policy Trait
// ----------------------------------------------------------------------------

/// A checksum algorithm together with its on-wire field width.
///
/// `compute` returns the value widened to `u64`; the packet layer writes the
/// low `SIZE` bytes little-endian into the FCS field.
pub trait ChecksumPolicy {
    /// Size of the FCS field in bytes
    const SIZE: usize;

    /// Compute the checksum of `data`, widened to `u64`
    fn compute(data: &[u8]) -> u64;
}

// ----------------------------------------------------------------------------
// Additive Sums
// ----------------------------------------------------------------------------

/// 8-bit additive sum; cheapest detection for very short frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum8;

impl ChecksumPolicy for Sum8 {
    const SIZE: usize = 1;

    fn compute(data: &[u8]) -> u64 {
        compute::sum8(data) as u64
    }
}

/// 16-bit additive sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum16;

impl ChecksumPolicy for Sum16 {
    const SIZE: usize = 2;

    fn compute(data: &[u8]) -> u64 {
        compute::sum16(data) as u64
    }
}

/// 32-bit additive sum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sum32;

impl ChecksumPolicy for Sum32 {
    const SIZE: usize = 4;

    fn compute(data: &[u8]) -> u64 {
        compute::sum32(data) as u64
    }
}

// ----------------------------------------------------------------------------
// CRC Family
// ----------------------------------------------------------------------------

/// 8-bit CRC; better burst detection than sums on small frames
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc8;

impl ChecksumPolicy for Crc8 {
    const SIZE: usize = 1;

    fn compute(data: &[u8]) -> u64 {
        compute::crc8(data) as u64
    }
}

/// 16-bit CRC; the common choice for serial links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc16;

impl ChecksumPolicy for Crc16 {
    const SIZE: usize = 2;

    fn compute(data: &[u8]) -> u64 {
        compute::crc16(data) as u64
    }
}

/// 32-bit CRC; the default framed-packet policy
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc32;

impl ChecksumPolicy for Crc32 {
    const SIZE: usize = 4;

    fn compute(data: &[u8]) -> u64 {
        compute::crc32(data) as u64
    }
}

/// 64-bit CRC for high-integrity links
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Crc64;

impl ChecksumPolicy for Crc64 {
    const SIZE: usize = 8;

    fn compute(data: &[u8]) -> u64 {
        compute::crc64(data)
    }
}

// ----------------------------------------------------------------------------
// Fletcher Family
// ----------------------------------------------------------------------------

/// 16-bit Fletcher checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fletcher16;

impl ChecksumPolicy for Fletcher16 {
    const SIZE: usize = 2;

    fn compute(data: &[u8]) -> u64 {
        compute::fletcher16(data) as u64
    }
}

/// 32-bit Fletcher checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Fletcher32;

impl ChecksumPolicy for Fletcher32 {
    const SIZE: usize = 4;

    fn compute(data: &[u8]) -> u64 {
        compute::fletcher32(data) as u64
    }
}

// ----------------------------------------------------------------------------
// Adler / Internet
// ----------------------------------------------------------------------------

/// Adler-32, the zlib checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Adler32;

impl ChecksumPolicy for Adler32 {
    const SIZE: usize = 4;

    fn compute(data: &[u8]) -> u64 {
        compute::adler32(data) as u64
    }
}

/// RFC 1071 Internet checksum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Internet16;

impl ChecksumPolicy for Internet16 {
    const SIZE: usize = 2;

    fn compute(data: &[u8]) -> u64 {
        compute::internet16(data) as u64
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_widths() {
        assert_eq!(Sum8::SIZE, 1);
        assert_eq!(Sum16::SIZE, 2);
        assert_eq!(Sum32::SIZE, 4);
        assert_eq!(Crc8::SIZE, 1);
        assert_eq!(Crc16::SIZE, 2);
        assert_eq!(Crc32::SIZE, 4);
        assert_eq!(Crc64::SIZE, 8);
        assert_eq!(Fletcher16::SIZE, 2);
        assert_eq!(Fletcher32::SIZE, 4);
        assert_eq!(Adler32::SIZE, 4);
        assert_eq!(Internet16::SIZE, 2);
    }

    #[test]
    fn test_policies_delegate_to_engines() {
        let data = b"123456789";
        assert_eq!(Crc32::compute(data), compute::crc32(data) as u64);
        assert_eq!(Sum16::compute(data), compute::sum16(data) as u64);
        assert_eq!(Crc64::compute(data), compute::crc64(data));
    }
}
