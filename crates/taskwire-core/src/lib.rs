//! Taskwire core: cooperative task dispatch over a framed wire protocol
//!
//! This crate is the headless engine of a host↔device task system for
//! small targets: a controlling peer sends fixed-size binary packets over a
//! byte link; the device decodes each packet into a lifecycle command —
//! register, pause, resume, abort — drives the addressed task to completion
//! on a single-threaded cooperative loop, and replies with a result packet.
//!
//! ## Architecture Overview
//!
//! - **Protocol** ([`protocol`]): bit-packed 4-byte header, fixed-size
//!   basic/framed packet layouts, checksum engines and policies, and the
//!   seal/verify validator.
//! - **Transports** ([`transport`]): drivers implement blocking byte-frame
//!   reads and writes; a shared layer adds receiver-id filtering and
//!   checksum validation. The [`transport::Hub`] multiplexes several
//!   transports behind one send/receive surface.
//! - **Tasks** ([`task`], [`registry`]): user task types implement the
//!   [`task::Task`] lifecycle hooks and register in a compile-time-checked
//!   [`registry::TaskRegistry`], one singleton storage slot per type.
//! - **Manager** ([`manager`]): the active-task list and the single-pass
//!   scheduler; every mutating API returns a wire-compatible
//!   [`status::StatusCode`].
//! - **Channels** ([`channel`]): the external channel decodes packets into
//!   manager calls and encodes results and error replies; the internal
//!   channel offers the same commands to local code.
//!
//! ## Main Loop
//!
//! ```no_run
//! use taskwire_core::channel::ExternalChannel;
//! use taskwire_core::manager::TaskManager;
//! use taskwire_core::protocol::{Crc32, FramedPacket};
//! use taskwire_core::task_set;
//! use taskwire_core::transport::Hub;
//! use taskwire_core::types::DeviceId;
//! # use taskwire_core::envelope::EnvelopeView;
//! # use taskwire_core::registry::RegisteredTask;
//! # use taskwire_core::status::StatusCode;
//! # use taskwire_core::task::Task;
//! # use taskwire_core::types::TaskId;
//! # struct Blink;
//! # impl Task for Blink {}
//! # impl RegisteredTask for Blink {
//! #     const UID: TaskId = TaskId::new(1);
//! #     fn from_params(_p: EnvelopeView<'_>) -> Result<Self, StatusCode> { Ok(Blink) }
//! # }
//!
//! type Packet = FramedPacket<Crc32, 32>;
//!
//! # fn main() -> taskwire_core::errors::Result<()> {
//! let mut manager = TaskManager::new(task_set![Blink]);
//! let hub = Hub::new(DeviceId::BOARD);
//! // hub.attach(Box::new(my_uart_link));
//! let external = ExternalChannel::<Packet>::new(hub).into_handle();
//!
//! loop {
//!     ExternalChannel::update(&external, &mut manager)?;
//!     manager.update();
//! }
//! # }
//! ```
//!
//! The crate is `no_std`-capable (with `alloc`); the `std` feature (default)
//! enables `thiserror`-derived errors and `std::io` sources.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

// ----------------------------------------------------------------------------
// Module Declarations
// ----------------------------------------------------------------------------

pub mod channel;
pub mod config;
pub mod envelope;
pub mod errors;
pub mod manager;
pub mod protocol;
pub mod registry;
pub mod status;
pub mod task;
pub mod transport;
pub mod types;

// ----------------------------------------------------------------------------
// Public API Re-exports
// ----------------------------------------------------------------------------

pub use channel::{Channel, ChannelHandle, ExternalChannel, InternalChannel};
pub use config::{ProtocolConfig, PROTOCOL_VERSION};
pub use envelope::{Codec, Envelope, EnvelopeView};
pub use errors::{Result, TaskwireError};
pub use manager::TaskManager;
pub use protocol::{
    BasicPacket, FramedPacket, HeaderFields, HeaderFlag, PacketHeader, PacketKind, Validate,
    WirePacket,
};
pub use registry::{RegisteredTask, Slot, TaskRegistry};
pub use status::StatusCode;
pub use task::{Task, TaskState};
pub use transport::{Hub, Transport, TransportExt};
pub use types::{DeviceId, Priority, TaskId};
