//! In-memory byte-frame links
//!
//! A loopback pair is two endpoints sharing a duplex queue: frames sent on
//! one endpoint become receivable on the other, in order. Frames cross the
//! "link" as plain byte vectors, so everything the real wire would exercise
//! — sealing, receiver filtering, checksum verification — happens exactly
//! as it would over a UART.

use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use taskwire_core::errors::{Result, TaskwireError, TransportError};
use taskwire_core::transport::Transport;

// ----------------------------------------------------------------------------
// Loopback Pair
// ----------------------------------------------------------------------------

type FrameQueue = Rc<RefCell<VecDeque<Vec<u8>>>>;

/// One side of an in-memory duplex link
pub struct LoopbackEndpoint {
    /// Frames this endpoint can receive
    inbound: FrameQueue,
    /// Frames this endpoint has sent (the peer's inbound)
    outbound: FrameQueue,
}

/// Create a connected pair of endpoints.
///
/// Whatever `a` sends, `b` receives, and vice versa.
pub fn loopback_pair() -> (LoopbackEndpoint, LoopbackEndpoint) {
    let a_to_b: FrameQueue = Rc::new(RefCell::new(VecDeque::new()));
    let b_to_a: FrameQueue = Rc::new(RefCell::new(VecDeque::new()));
    (
        LoopbackEndpoint {
            inbound: b_to_a.clone(),
            outbound: a_to_b.clone(),
        },
        LoopbackEndpoint {
            inbound: a_to_b,
            outbound: b_to_a,
        },
    )
}

impl LoopbackEndpoint {
    /// Number of frames waiting to be received on this endpoint
    pub fn pending(&self) -> usize {
        self.inbound.borrow().len()
    }

    /// Push a raw frame into this endpoint's inbound queue, bypassing the
    /// peer — handy for injecting corrupted frames
    pub fn inject(&self, frame: Vec<u8>) {
        self.inbound.borrow_mut().push_back(frame);
    }
}

impl Transport for LoopbackEndpoint {
    fn delegate_try_receive(&mut self, frame: &mut [u8]) -> Result<bool> {
        let Some(bytes) = self.inbound.borrow_mut().pop_front() else {
            return Ok(false);
        };
        if bytes.len() != frame.len() {
            return Err(TaskwireError::Transport(TransportError::ShortFrame {
                expected: frame.len(),
                actual: bytes.len(),
            }));
        }
        frame.copy_from_slice(&bytes);
        Ok(true)
    }

    fn delegate_send(&mut self, frame: &[u8]) -> Result<()> {
        self.outbound.borrow_mut().push_back(frame.to_vec());
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Silent Transport
// ----------------------------------------------------------------------------

/// A link that never receives and only counts what it is asked to send
#[derive(Default)]
pub struct SilentTransport {
    sent: Rc<RefCell<usize>>,
}

impl SilentTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Shared counter of frames sent through this transport
    pub fn sent_counter(&self) -> Rc<RefCell<usize>> {
        self.sent.clone()
    }
}

impl Transport for SilentTransport {
    fn delegate_try_receive(&mut self, _frame: &mut [u8]) -> Result<bool> {
        Ok(false)
    }

    fn delegate_send(&mut self, _frame: &[u8]) -> Result<()> {
        *self.sent.borrow_mut() += 1;
        Ok(())
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
