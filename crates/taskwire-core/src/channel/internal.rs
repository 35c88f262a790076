//! Internal channel: in-process task invocation without the wire
//!
//! Local code uses this channel to drive tasks through the same manager the
//! external channel feeds, with the same status-code contract. Registration
//! forwards the parameter view straight through; pause/resume/abort are
//! thin forwarders. Results are currently discarded — a future extension
//! may hand them to a single-consumer completion handle.

use alloc::rc::Rc;
use core::cell::RefCell;
use log::trace;

use super::{Channel, ChannelHandle};
use crate::envelope::{Envelope, EnvelopeView};
use crate::manager::TaskManager;
use crate::status::StatusCode;
use crate::types::{DeviceId, TaskId};

// ----------------------------------------------------------------------------
// Internal Channel
// ----------------------------------------------------------------------------

/// In-process lifecycle commands sharing the manager with the wire
#[derive(Debug)]
pub struct InternalChannel {
    local_id: DeviceId,
}

impl InternalChannel {
    /// Create a channel whose registrations carry `local_id` as initiator
    pub fn new(local_id: DeviceId) -> Self {
        Self { local_id }
    }

    /// Wrap into the shared handle the manager stores in task records
    pub fn into_handle(self) -> Rc<RefCell<Self>> {
        Rc::new(RefCell::new(self))
    }

    /// Register a task from local code, forwarding `params` directly
    pub fn register_task(
        this: &Rc<RefCell<Self>>,
        manager: &mut TaskManager,
        uid: TaskId,
        params: EnvelopeView<'_>,
    ) -> StatusCode {
        let local_id = this.borrow().local_id;
        let handle: ChannelHandle = this.clone();
        manager.register_task(Some(handle), local_id, uid, params)
    }

    /// Forward a pause request
    pub fn pause_task(manager: &mut TaskManager, uid: TaskId) -> StatusCode {
        manager.pause_task(uid)
    }

    /// Forward a resume request
    pub fn resume_task(manager: &mut TaskManager, uid: TaskId) -> StatusCode {
        manager.resume_task(uid)
    }

    /// Forward an abort request
    pub fn abort_task(manager: &mut TaskManager, uid: TaskId) -> StatusCode {
        manager.abort_task(uid)
    }
}

impl Channel for InternalChannel {
    fn on_result(
        &mut self,
        initiator_id: DeviceId,
        uid: TaskId,
        result: Envelope,
        code: StatusCode,
    ) {
        // TODO: route into a single-consumer completion handle so local
        // callers can await results instead of polling task registration.
        trace!(
            "local result for {uid} (initiator {initiator_id}): {code}, {} bytes",
            result.size()
        );
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
