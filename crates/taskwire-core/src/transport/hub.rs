//! Hub: one logical link over many physical transports
//!
//! The hub owns a small set of transports and two enable masks deciding
//! which of them participate in sending and receiving. Both default to
//! enabled on attach. `send` fans a sealed packet out to every enabled
//! sender; `try_receive` probes enabled receivers in attach order and
//! returns the first packet that survives the shared filter.

use alloc::boxed::Box;
use log::debug;
use smallvec::SmallVec;

use super::{Transport, TransportExt};
use crate::config::ProtocolConfig;
use crate::errors::Result;
use crate::protocol::{Validate, WirePacket};
use crate::types::DeviceId;

// ----------------------------------------------------------------------------
// Transport Slot
// ----------------------------------------------------------------------------

/// Position of an attached transport, used to toggle its enable bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransportSlot(usize);

/// Upper bound on attached transports (width of the enable masks)
pub const MAX_TRANSPORTS: usize = 32;

// ----------------------------------------------------------------------------
// Hub
// ----------------------------------------------------------------------------

/// Multiplexer over a set of transports with per-transport enable flags
pub struct Hub {
    transports: SmallVec<[Box<dyn Transport>; 4]>,
    senders: u32,
    receivers: u32,
    board_id: DeviceId,
}

impl Hub {
    /// An empty hub filtering for `board_id`
    pub fn new(board_id: DeviceId) -> Self {
        Self {
            transports: SmallVec::new(),
            senders: 0,
            receivers: 0,
            board_id,
        }
    }

    /// An empty hub taking its board id from a protocol configuration
    pub fn from_config(config: &ProtocolConfig) -> Self {
        Self::new(config.board_id)
    }

    /// The board id this hub filters inbound frames against
    pub fn board_id(&self) -> DeviceId {
        self.board_id
    }

    /// Number of attached transports
    pub fn len(&self) -> usize {
        self.transports.len()
    }

    /// True if no transports are attached
    pub fn is_empty(&self) -> bool {
        self.transports.is_empty()
    }

    /// Attach a transport, enabled for both directions.
    ///
    /// At most [`MAX_TRANSPORTS`] transports can be attached.
    pub fn attach(&mut self, transport: Box<dyn Transport>) -> TransportSlot {
        debug_assert!(self.transports.len() < MAX_TRANSPORTS, "hub is full");
        let slot = TransportSlot(self.transports.len());
        self.transports.push(transport);
        self.senders |= 1 << slot.0;
        self.receivers |= 1 << slot.0;
        slot
    }

    /// Enable a transport for sending
    pub fn use_sender(&mut self, slot: TransportSlot) {
        debug!("hub: enabling sender {}", slot.0);
        self.senders |= 1 << slot.0;
    }

    /// Disable a transport for sending
    pub fn remove_sender(&mut self, slot: TransportSlot) {
        debug!("hub: disabling sender {}", slot.0);
        self.senders &= !(1 << slot.0);
    }

    /// Enable a transport for receiving
    pub fn use_receiver(&mut self, slot: TransportSlot) {
        debug!("hub: enabling receiver {}", slot.0);
        self.receivers |= 1 << slot.0;
    }

    /// Disable a transport for receiving
    pub fn remove_receiver(&mut self, slot: TransportSlot) {
        debug!("hub: disabling receiver {}", slot.0);
        self.receivers &= !(1 << slot.0);
    }

    /// Seal the packet once and send it through every enabled sender.
    ///
    /// Every enabled transport is attempted even when an earlier one fails;
    /// the first failure is reported after the fan-out completes.
    pub fn send<P: WirePacket + Validate>(&mut self, packet: &mut P) -> Result<()> {
        packet.seal();
        let mut first_error = None;
        for (index, transport) in self.transports.iter_mut().enumerate() {
            if self.senders & (1 << index) == 0 {
                continue;
            }
            if let Err(err) = transport.delegate_send(packet.as_bytes()) {
                debug!("hub: send failed on transport {index}");
                first_error.get_or_insert(err);
            }
        }
        match first_error {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }

    /// Probe enabled receivers in attach order; return the first packet
    /// that passes the receiver-id filter and the validator
    pub fn try_receive<P: WirePacket + Validate>(&mut self) -> Result<Option<P>> {
        for (index, transport) in self.transports.iter_mut().enumerate() {
            if self.receivers & (1 << index) == 0 {
                continue;
            }
            if let Some(packet) = transport.as_mut().try_receive(self.board_id)? {
                return Ok(Some(packet));
            }
        }
        Ok(None)
    }
}

impl core::fmt::Debug for Hub {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Hub")
            .field("board_id", &self.board_id)
            .field("transports", &self.transports.len())
            .field("senders", &format_args!("{:#b}", self.senders))
            .field("receivers", &format_args!("{:#b}", self.receivers))
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
