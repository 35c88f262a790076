//! Lifecycle invariants driven through the public API
//!
//! Exercises the manager/registry contract an application observes:
//! uniqueness of live records, reaping on the pass after completion or
//! abort, slot occupancy tracking registration, idempotence of repeated
//! lifecycle commands, and exactly-once completion.

use std::cell::RefCell;
use std::rc::Rc;

use taskwire_core::channel::{channel_handle, Channel, ChannelHandle, InternalChannel};
use taskwire_core::envelope::{Envelope, EnvelopeView};
use taskwire_core::manager::TaskManager;
use taskwire_core::registry::RegisteredTask;
use taskwire_core::status::StatusCode;
use taskwire_core::task::Task;
use taskwire_core::task_set;
use taskwire_core::types::{DeviceId, TaskId};

const HOST: DeviceId = DeviceId::new(0x01);

// ----------------------------------------------------------------------------
// Fixtures
// ----------------------------------------------------------------------------

/// Counts deliveries per uid
#[derive(Default)]
struct CountingChannel {
    deliveries: Vec<(TaskId, StatusCode)>,
}

impl Channel for CountingChannel {
    fn on_result(
        &mut self,
        _initiator_id: DeviceId,
        uid: TaskId,
        _result: Envelope,
        code: StatusCode,
    ) {
        self.deliveries.push((uid, code));
    }
}

fn counting() -> (Rc<RefCell<CountingChannel>>, ChannelHandle) {
    let channel = channel_handle(CountingChannel::default());
    let handle: ChannelHandle = channel.clone();
    (channel, handle)
}

/// Runs for a fixed number of execute passes
struct Worker {
    remaining: u32,
}

impl Task for Worker {
    fn on_execute(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }

    fn is_finished(&mut self) -> bool {
        self.remaining == 0
    }

    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let code = if interrupted {
            StatusCode::TASK_ABORTED
        } else {
            StatusCode::TASK_FINISHED
        };
        (Envelope::new(), code)
    }
}

impl RegisteredTask for Worker {
    const UID: TaskId = TaskId::new(0x11);

    fn from_params(params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        let remaining = params.unpack().map_err(|_| StatusCode::INVALID_PARAMS)?;
        Ok(Self { remaining })
    }
}

/// Runs forever; abortable only
struct Daemon;

impl Task for Daemon {
    fn is_finished(&mut self) -> bool {
        false
    }

    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let code = if interrupted {
            StatusCode::TASK_ABORTED
        } else {
            StatusCode::TASK_FINISHED
        };
        (Envelope::new(), code)
    }
}

impl RegisteredTask for Daemon {
    const UID: TaskId = TaskId::new(0x12);

    fn from_params(_params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        Ok(Self)
    }
}

fn manager() -> TaskManager {
    TaskManager::new(task_set![Worker, Daemon])
}

fn worker_params(passes: u32) -> Envelope {
    Envelope::packed(&passes).unwrap()
}

// ----------------------------------------------------------------------------
// Record Uniqueness
// ----------------------------------------------------------------------------

#[test]
fn at_most_one_record_per_uid() {
    let mut mgr = manager();
    let (_, handle) = counting();
    let params = worker_params(10);

    assert_eq!(
        mgr.register_task(Some(handle.clone()), HOST, Worker::UID, params.as_view()),
        StatusCode::OK
    );
    for _ in 0..3 {
        assert_eq!(
            mgr.register_task(Some(handle.clone()), HOST, Worker::UID, params.as_view()),
            StatusCode::DUPLICATE_TASK
        );
    }
    assert_eq!(mgr.active_tasks(), 1);
}

// ----------------------------------------------------------------------------
// Reaping
// ----------------------------------------------------------------------------

#[test]
fn finished_record_reaped_in_completing_pass() {
    let mut mgr = manager();
    let (channel, handle) = counting();
    let params = worker_params(1);
    mgr.register_task(Some(handle), HOST, Worker::UID, params.as_view());

    mgr.update(); // start + execute, remaining -> 0
    assert_eq!(mgr.active_tasks(), 1);
    mgr.update(); // observed finished, completed, reaped
    assert_eq!(mgr.active_tasks(), 0);
    assert_eq!(channel.borrow().deliveries.len(), 1);
}

#[test]
fn aborted_record_reaped_on_next_pass() {
    let mut mgr = manager();
    let (channel, handle) = counting();
    mgr.register_task(Some(handle), HOST, Daemon::UID, Envelope::new().as_view());

    mgr.update();
    assert_eq!(mgr.abort_task(Daemon::UID), StatusCode::OK);
    // State latched but nothing delivered until the next pass
    assert_eq!(channel.borrow().deliveries.len(), 0);
    assert_eq!(mgr.active_tasks(), 1);

    mgr.update();
    assert_eq!(channel.borrow().deliveries.len(), 1);
    assert_eq!(channel.borrow().deliveries[0], (Daemon::UID, StatusCode::TASK_ABORTED));
    assert_eq!(mgr.active_tasks(), 0);
}

// ----------------------------------------------------------------------------
// Slot Occupancy
// ----------------------------------------------------------------------------

#[test]
fn slot_constructed_iff_record_live() {
    let mut mgr = manager();
    let (_, handle) = counting();

    assert!(!mgr.registry().is_constructed(Worker::UID));
    let params = worker_params(1);
    mgr.register_task(Some(handle), HOST, Worker::UID, params.as_view());
    assert!(mgr.registry().is_constructed(Worker::UID));
    assert!(mgr.is_registered(Worker::UID));

    mgr.update();
    mgr.update(); // completion reaps
    assert!(!mgr.registry().is_constructed(Worker::UID));
    assert!(!mgr.is_registered(Worker::UID));
}

#[test]
fn failed_registration_leaves_slot_vacant() {
    let mut mgr = manager();
    let (_, handle) = counting();
    // Garbage params the worker cannot decode
    let code = mgr.register_task(Some(handle), HOST, Worker::UID, EnvelopeView::new(&[]));
    assert_eq!(code, StatusCode::INVALID_PARAMS);
    assert!(!mgr.registry().is_constructed(Worker::UID));
    assert!(!mgr.is_registered(Worker::UID));
}

// ----------------------------------------------------------------------------
// Exactly-Once Completion
// ----------------------------------------------------------------------------

#[test]
fn abort_after_completion_does_not_redeliver() {
    let mut mgr = manager();
    let (channel, handle) = counting();
    let params = worker_params(1);
    mgr.register_task(Some(handle), HOST, Worker::UID, params.as_view());

    mgr.update();
    mgr.update(); // completed and reaped
    assert_eq!(channel.borrow().deliveries.len(), 1);

    // Any further command sees an unregistered uid, never a second result
    assert_eq!(mgr.abort_task(Worker::UID), StatusCode::TASK_NOT_REGISTERED);
    mgr.update();
    assert_eq!(channel.borrow().deliveries.len(), 1);
}

#[test]
fn abort_then_more_updates_deliver_once() {
    let mut mgr = manager();
    let (channel, handle) = counting();
    mgr.register_task(Some(handle), HOST, Daemon::UID, Envelope::new().as_view());
    mgr.update();
    mgr.abort_task(Daemon::UID);
    for _ in 0..4 {
        mgr.update();
    }
    assert_eq!(channel.borrow().deliveries.len(), 1);
}

// ----------------------------------------------------------------------------
// Command Idempotence Laws
// ----------------------------------------------------------------------------

#[test]
fn repeated_commands_report_current_state() {
    let mut mgr = manager();
    let (_, handle) = counting();
    mgr.register_task(Some(handle), HOST, Daemon::UID, Envelope::new().as_view());
    mgr.update(); // started

    assert_eq!(mgr.pause_task(Daemon::UID), StatusCode::OK);
    assert_eq!(mgr.pause_task(Daemon::UID), StatusCode::TASK_ALREADY_PAUSED);
    mgr.update(); // pause edge

    assert_eq!(mgr.resume_task(Daemon::UID), StatusCode::OK);
    assert_eq!(mgr.resume_task(Daemon::UID), StatusCode::TASK_ALREADY_RESUMED);
    mgr.update(); // resume edge
    assert_eq!(mgr.resume_task(Daemon::UID), StatusCode::TASK_ALREADY_RUNNING);

    assert_eq!(mgr.abort_task(Daemon::UID), StatusCode::OK);
    assert_eq!(mgr.abort_task(Daemon::UID), StatusCode::TASK_ALREADY_ABORTED);
    assert_eq!(mgr.pause_task(Daemon::UID), StatusCode::TASK_ALREADY_ABORTED);
    assert_eq!(mgr.resume_task(Daemon::UID), StatusCode::TASK_ALREADY_ABORTED);
}

// ----------------------------------------------------------------------------
// Internal Channel Parity
// ----------------------------------------------------------------------------

#[test]
fn internal_channel_shares_manager_state_with_other_channels() {
    let mut mgr = manager();
    let internal = InternalChannel::new(DeviceId::BOARD).into_handle();
    let (_, other) = counting();

    let code = InternalChannel::register_task(
        &internal,
        &mut mgr,
        Daemon::UID,
        Envelope::new().as_view(),
    );
    assert_eq!(code, StatusCode::OK);

    // A second channel cannot double-register the same uid
    assert_eq!(
        mgr.register_task(Some(other), HOST, Daemon::UID, Envelope::new().as_view()),
        StatusCode::DUPLICATE_TASK
    );

    mgr.update();
    assert_eq!(
        InternalChannel::abort_task(&mut mgr, Daemon::UID),
        StatusCode::OK
    );
    mgr.update();
    assert!(!mgr.is_registered(Daemon::UID));
}
