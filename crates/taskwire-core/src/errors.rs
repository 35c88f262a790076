//! Error types for the taskwire core
//!
//! This module contains the error types used by the transport, packet, and
//! envelope layers, plus the unified [`TaskwireError`] that joins them.
//! Manager lifecycle APIs deliberately do not use these types: they return
//! [`crate::StatusCode`] bytes, which are part of the wire contract.

use alloc::string::String;

cfg_if::cfg_if! {
    if #[cfg(not(feature = "std"))] {
        use alloc::string::ToString;
    }
}

// ----------------------------------------------------------------------------
// Transport Errors
// ----------------------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Failures raised by transport delegates
        #[derive(Debug, thiserror::Error)]
        pub enum TransportError {
            #[error("link I/O error: {0}")]
            Io(#[from] std::io::Error),
            #[error("link closed: {reason}")]
            Closed { reason: String },
            #[error("short frame: expected {expected} bytes, got {actual}")]
            ShortFrame { expected: usize, actual: usize },
        }
    } else {
        /// Failures raised by transport delegates (no_std version)
        #[derive(Debug)]
        pub enum TransportError {
            Closed { reason: String },
            ShortFrame { expected: usize, actual: usize },
        }
    }
}

// ----------------------------------------------------------------------------
// Packet Errors
// ----------------------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Packet construction and parsing failures
        #[derive(Debug, thiserror::Error)]
        pub enum PacketError {
            #[error("payload too large: {actual} bytes does not fit {capacity}-byte field")]
            PayloadTooLarge { capacity: usize, actual: usize },
            #[error("frame length mismatch: expected {expected} bytes, got {actual}")]
            FrameLength { expected: usize, actual: usize },
            #[error("{message}")]
            Generic { message: String },
        }
    } else {
        /// Packet construction and parsing failures (no_std version)
        #[derive(Debug)]
        pub enum PacketError {
            PayloadTooLarge { capacity: usize, actual: usize },
            FrameLength { expected: usize, actual: usize },
            Generic { message: String },
        }
    }
}

impl From<&str> for PacketError {
    fn from(message: &str) -> Self {
        PacketError::Generic {
            message: message.to_string(),
        }
    }
}

// ----------------------------------------------------------------------------
// Envelope Errors
// ----------------------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Envelope pack/unpack failures
        #[derive(Debug, thiserror::Error)]
        pub enum EnvelopeError {
            #[error("codec error: {0}")]
            Codec(#[from] bincode::Error),
        }
    } else {
        /// Envelope pack/unpack failures (no_std version)
        #[derive(Debug)]
        pub enum EnvelopeError {
            Codec(bincode::Error),
        }

        impl From<bincode::Error> for EnvelopeError {
            fn from(err: bincode::Error) -> Self {
                EnvelopeError::Codec(err)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Unified Error
// ----------------------------------------------------------------------------

cfg_if::cfg_if! {
    if #[cfg(feature = "std")] {
        /// Unified error for the taskwire core
        #[derive(Debug, thiserror::Error)]
        pub enum TaskwireError {
            #[error("transport error: {0}")]
            Transport(#[from] TransportError),

            #[error("packet error: {0}")]
            Packet(#[from] PacketError),

            #[error("envelope error: {0}")]
            Envelope(#[from] EnvelopeError),
        }
    } else {
        /// Unified error for the taskwire core (no_std version)
        #[derive(Debug)]
        pub enum TaskwireError {
            Transport(TransportError),
            Packet(PacketError),
            Envelope(EnvelopeError),
        }

        impl From<TransportError> for TaskwireError {
            fn from(err: TransportError) -> Self {
                TaskwireError::Transport(err)
            }
        }

        impl From<PacketError> for TaskwireError {
            fn from(err: PacketError) -> Self {
                TaskwireError::Packet(err)
            }
        }

        impl From<EnvelopeError> for TaskwireError {
            fn from(err: EnvelopeError) -> Self {
                TaskwireError::Envelope(err)
            }
        }
    }
}

// ----------------------------------------------------------------------------
// Convenience Constructors
// ----------------------------------------------------------------------------

impl TaskwireError {
    /// Create a closed-link transport error
    pub fn link_closed<T: Into<String>>(reason: T) -> Self {
        TaskwireError::Transport(TransportError::Closed {
            reason: reason.into(),
        })
    }

    /// Create a generic packet error with a message
    pub fn invalid_packet<T: Into<String>>(message: T) -> Self {
        TaskwireError::Packet(PacketError::Generic {
            message: message.into(),
        })
    }
}

// ----------------------------------------------------------------------------
// Type Aliases
// ----------------------------------------------------------------------------

pub type Result<T> = core::result::Result<T, TaskwireError>;
