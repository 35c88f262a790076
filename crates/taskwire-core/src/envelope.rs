//! Byte-buffer handles for task parameters and results
//!
//! An [`Envelope`] owns a serialized buffer: tasks return results in one,
//! and the channel that delivers the result consumes it. An
//! [`EnvelopeView`] borrows a buffer someone else keeps alive — the
//! external channel hands incoming packet payloads to task constructors
//! this way, with no copy.
//!
//! Typed access goes through the [`Codec`] capability. The default codec is
//! bincode over serde, so any tuple of serde-supported types packs and
//! unpacks symmetrically: `envelope.pack(&t)` followed by `unpack()` yields
//! `t` back.

use alloc::vec::Vec;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::errors::EnvelopeError;

// ----------------------------------------------------------------------------
// Codec Capability
// ----------------------------------------------------------------------------

/// Transforms typed values to and from byte buffers.
///
/// Parameter and result serialization is a collaborator of the core, not
/// part of it; implementations can swap in any self-describing or schema'd
/// format as long as encode/decode round-trip.
pub trait Codec {
    /// Serialize `value` into a fresh byte buffer
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EnvelopeError>;

    /// Deserialize a value from `bytes`
    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, EnvelopeError>;
}

/// Default codec: bincode over serde
#[derive(Debug, Clone, Copy, Default)]
pub struct BincodeCodec;

impl Codec for BincodeCodec {
    fn encode<T: Serialize + ?Sized>(&self, value: &T) -> Result<Vec<u8>, EnvelopeError> {
        Ok(bincode::serialize(value)?)
    }

    fn decode<T: DeserializeOwned>(&self, bytes: &[u8]) -> Result<T, EnvelopeError> {
        Ok(bincode::deserialize(bytes)?)
    }
}

// ----------------------------------------------------------------------------
// Envelope View (borrowed)
// ----------------------------------------------------------------------------

/// Non-owning view over a byte buffer whose lifetime the caller guarantees
#[derive(Debug, Clone, Copy)]
pub struct EnvelopeView<'a> {
    bytes: &'a [u8],
}

impl<'a> EnvelopeView<'a> {
    /// Create a view over `bytes`
    pub fn new(bytes: &'a [u8]) -> Self {
        Self { bytes }
    }

    /// The viewed bytes
    pub fn data(&self) -> &'a [u8] {
        self.bytes
    }

    /// Length of the viewed buffer in bytes
    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// True if the view covers no bytes
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Deserialize the viewed bytes with the default codec.
    ///
    /// Fails if decoding needs more bytes than the view holds.
    pub fn unpack<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        self.unpack_with(&BincodeCodec)
    }

    /// Deserialize the viewed bytes with an explicit codec
    pub fn unpack_with<C: Codec, T: DeserializeOwned>(
        &self,
        codec: &C,
    ) -> Result<T, EnvelopeError> {
        codec.decode(self.bytes)
    }
}

impl<'a> From<&'a [u8]> for EnvelopeView<'a> {
    fn from(bytes: &'a [u8]) -> Self {
        Self::new(bytes)
    }
}

// ----------------------------------------------------------------------------
// Envelope (owning)
// ----------------------------------------------------------------------------

/// Owning byte buffer carrying serialized parameters or results.
///
/// Exactly one owner exists at a time: passing an envelope moves it, and an
/// empty envelope (`data` empty) is what default task completions return.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct Envelope {
    data: Vec<u8>,
}

impl Envelope {
    /// Create an empty envelope
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of an already serialized buffer
    pub fn from_vec(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// Serialize `value` into a fresh envelope with the default codec
    pub fn packed<T: Serialize + ?Sized>(value: &T) -> Result<Self, EnvelopeError> {
        let mut envelope = Self::new();
        envelope.pack(value)?;
        Ok(envelope)
    }

    /// Serialize `value` into this envelope, discarding prior contents
    pub fn pack<T: Serialize + ?Sized>(&mut self, value: &T) -> Result<(), EnvelopeError> {
        self.pack_with(&BincodeCodec, value)
    }

    /// Serialize with an explicit codec, discarding prior contents
    pub fn pack_with<C: Codec, T: Serialize + ?Sized>(
        &mut self,
        codec: &C,
        value: &T,
    ) -> Result<(), EnvelopeError> {
        self.data = codec.encode(value)?;
        Ok(())
    }

    /// Deserialize the contents with the default codec
    pub fn unpack<T: DeserializeOwned>(&self) -> Result<T, EnvelopeError> {
        self.as_view().unpack()
    }

    /// Deserialize the contents with an explicit codec
    pub fn unpack_with<C: Codec, T: DeserializeOwned>(
        &self,
        codec: &C,
    ) -> Result<T, EnvelopeError> {
        self.as_view().unpack_with(codec)
    }

    /// The owned bytes
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Length of the owned buffer in bytes
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// True if the envelope holds no bytes
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Borrow the contents as a view
    pub fn as_view(&self) -> EnvelopeView<'_> {
        EnvelopeView::new(&self.data)
    }

    /// Consume the envelope, yielding the owned buffer
    pub fn into_vec(self) -> Vec<u8> {
        self.data
    }
}

impl From<Vec<u8>> for Envelope {
    fn from(data: Vec<u8>) -> Self {
        Self::from_vec(data)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
