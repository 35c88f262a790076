//! Packet validation: seal on send, verify on receive
//!
//! [`Validate`] is specialized per packet shape. Basic packets carry no
//! check sequence, so sealing is a no-op and every frame verifies. Framed
//! packets compute their policy's checksum over all bytes before the FCS
//! field; `seal` writes the value, `is_valid` recomputes and compares.
//! Sealing is idempotent: the FCS is outside the protected range.

use super::checksum::ChecksumPolicy;
use super::packet::{BasicPacket, FramedPacket};

// ----------------------------------------------------------------------------
// Validate Trait
// ----------------------------------------------------------------------------

/// Seal-on-send / verify-on-receive for one packet shape
pub trait Validate {
    /// Finalize the frame before transmission
    fn seal(&mut self);

    /// Check frame integrity after reception
    fn is_valid(&self) -> bool;
}

impl<const N: usize> Validate for BasicPacket<N> {
    fn seal(&mut self) {}

    fn is_valid(&self) -> bool {
        true
    }
}

impl<C: ChecksumPolicy, const N: usize> Validate for FramedPacket<C, N> {
    fn seal(&mut self) {
        let fcs = C::compute(self.protected_bytes());
        self.set_fcs(fcs);
    }

    fn is_valid(&self) -> bool {
        C::compute(self.protected_bytes()) == self.fcs()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
