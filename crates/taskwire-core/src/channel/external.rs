//! External channel: the wire-facing command dispatcher
//!
//! One `update` call pulls at most one packet from the hub, decodes its
//! header flag into a lifecycle command, and routes it to the task manager:
//!
//! | flag     | command                                |
//! |----------|----------------------------------------|
//! | `None`   | register task (payload = parameters)   |
//! | `Abort`  | abort task                             |
//! | `Pause`  | pause task                             |
//! | `Resume` | resume task                            |
//!
//! A non-OK status is reported back to the initiator as an error reply
//! (`flags = Error`, status byte populated, empty payload) correlated by
//! task id. Other flags are not consumed; they are logged and ignored.
//! Completed-task results come back through [`Channel::on_result`] and leave
//! as `flags = None` data packets addressed to the initiator.

use alloc::rc::Rc;
use core::cell::RefCell;
use core::marker::PhantomData;
use log::{debug, warn};

use super::{Channel, ChannelHandle};
use crate::envelope::{Envelope, EnvelopeView};
use crate::errors::Result;
use crate::manager::TaskManager;
use crate::protocol::{HeaderFields, HeaderFlag, PacketHeader, Validate, WirePacket};
use crate::status::StatusCode;
use crate::transport::Hub;
use crate::types::{DeviceId, TaskId};

// ----------------------------------------------------------------------------
// External Channel
// ----------------------------------------------------------------------------

/// Wire-facing channel generic over the link's packet shape
pub struct ExternalChannel<P> {
    hub: Hub,
    _packet: PhantomData<P>,
}

impl<P> ExternalChannel<P>
where
    P: WirePacket + Validate + 'static,
{
    /// Create a channel over an already-wired hub
    pub fn new(hub: Hub) -> Self {
        Self {
            hub,
            _packet: PhantomData,
        }
    }

    /// Wrap into the shared handle the manager stores in task records
    pub fn into_handle(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Access the hub, e.g. to toggle transport enable flags
    pub fn hub_mut(&mut self) -> &mut Hub {
        &mut self.hub
    }

    /// Poll the hub once and dispatch whatever arrived.
    ///
    /// Called from the main loop alongside [`TaskManager::update`]. Takes
    /// the shared handle rather than `&mut self` because a successful
    /// register stores a clone of the handle in the new task's record.
    pub fn update(this: &Rc<RefCell<Self>>, manager: &mut TaskManager) -> Result<()> {
        let mut channel = this.borrow_mut();
        let Some(packet) = channel.hub.try_receive::<P>()? else {
            return Ok(());
        };

        let header = packet.header();
        let initiator = header.sender_id();
        let uid = packet.task_id();

        let code = match header.flags() {
            HeaderFlag::None => {
                let params = EnvelopeView::new(packet.payload());
                let handle: ChannelHandle = this.clone();
                manager.register_task(Some(handle), initiator, uid, params)
            }
            HeaderFlag::Abort => manager.abort_task(uid),
            HeaderFlag::Pause => manager.pause_task(uid),
            HeaderFlag::Resume => manager.resume_task(uid),
            other => {
                debug!("ignoring unconsumed flag {other:?} from {initiator}");
                return Ok(());
            }
        };

        if !code.is_ok() {
            debug!("command for {uid} from {initiator} failed: {code}");
            channel.send_error_reply(initiator, uid, code)?;
        }
        Ok(())
    }

    /// Reply to a failed command with an error packet
    fn send_error_reply(
        &mut self,
        receiver: DeviceId,
        uid: TaskId,
        code: StatusCode,
    ) -> Result<()> {
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::Error, P::HAS_FCS, receiver),
            self.hub.board_id(),
        );
        let mut packet = P::zeroed();
        packet.set_header(header);
        packet.set_task_id(uid);
        packet.set_status_code(code);
        self.hub.send(&mut packet)
    }
}

impl<P> Channel for ExternalChannel<P>
where
    P: WirePacket + Validate + 'static,
{
    fn on_result(
        &mut self,
        initiator_id: DeviceId,
        uid: TaskId,
        result: Envelope,
        code: StatusCode,
    ) {
        let header = PacketHeader::build(
            HeaderFields::data(HeaderFlag::None, P::HAS_FCS, initiator_id),
            self.hub.board_id(),
        );
        let mut packet = P::zeroed();
        packet.set_header(header);
        packet.set_task_id(uid);
        packet.set_status_code(code);
        packet.fill_payload(result.data());

        // Results have no failure path back to the manager; a dead link is
        // logged and the result is lost, like any other dropped frame.
        if self.hub.send(&mut packet).is_err() {
            warn!("result for {uid} to {initiator_id} could not be sent");
        }
    }
}

impl<P> core::fmt::Debug for ExternalChannel<P> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ExternalChannel")
            .field("hub", &self.hub)
            .finish()
    }
}
