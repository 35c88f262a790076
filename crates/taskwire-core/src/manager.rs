//! Task manager: lifecycle orchestration and result dispatch
//!
//! The manager owns the active-task list and the registry, and drives every
//! task through its lifecycle from a single-threaded cooperative main loop.
//! One [`TaskManager::update`] call visits each live task exactly once,
//! performs at most one lifecycle transition per task (start-first may
//! combine with another in the same pass), delivers results through the
//! recorded channel, and reaps finished or aborted records.
//!
//! All mutating APIs return a [`StatusCode`] — no panics, no callbacks on
//! the failure path. Reentering the manager from inside a lifecycle hook is
//! unrepresentable here: every entry point takes `&mut self`, so the borrow
//! rules reject it at compile time (the wire still reserves
//! `REENTRANCY_CONFLICT` for implementations that cannot).

use alloc::vec::Vec;
use log::{debug, trace};
use smallvec::SmallVec;

use crate::channel::ChannelHandle;
use crate::envelope::EnvelopeView;
use crate::registry::TaskRegistry;
use crate::status::StatusCode;
use crate::task::TaskState;
use crate::types::{DeviceId, TaskId};

// ----------------------------------------------------------------------------
// Task Record
// ----------------------------------------------------------------------------

/// Bookkeeping for one live task.
///
/// The task instance itself lives in the registry's slot for its type; the
/// record reaches it by uid during the pass, which keeps a single owner for
/// every instance.
struct TaskRecord {
    /// Lifecycle flags, mutated only by the manager
    state: TaskState,
    /// Requester to correlate the result with
    initiator_id: DeviceId,
    /// Concrete task type of this record
    uid: TaskId,
    /// Where the completion result is delivered
    channel: ChannelHandle,
}

// ----------------------------------------------------------------------------
// Garbage Mask
// ----------------------------------------------------------------------------

/// Per-pass mark bits for records to reap, one bit per record index
#[derive(Default)]
struct GarbageMask {
    words: SmallVec<[u64; 2]>,
}

impl GarbageMask {
    fn reset(&mut self, bits: usize) {
        self.words.clear();
        self.words.resize(bits.div_ceil(64), 0);
    }

    fn mark(&mut self, index: usize) {
        self.words[index / 64] |= 1 << (index % 64);
    }

    fn is_marked(&self, index: usize) -> bool {
        self.words[index / 64] & (1 << (index % 64)) != 0
    }

    fn any(&self) -> bool {
        self.words.iter().any(|&word| word != 0)
    }
}

// ----------------------------------------------------------------------------
// Task Manager
// ----------------------------------------------------------------------------

/// Orchestrates registration, state transitions, execution and reaping
pub struct TaskManager {
    registry: TaskRegistry,
    tasks: Vec<TaskRecord>,
    garbage: GarbageMask,
    max_task_load: usize,
}

impl TaskManager {
    /// Create a manager over a registry, capped at one live task per
    /// registered type
    pub fn new(registry: TaskRegistry) -> Self {
        let max_task_load = registry.len();
        Self::with_capacity(registry, max_task_load)
    }

    /// Create a manager with an explicit concurrent-task cap
    pub fn with_capacity(registry: TaskRegistry, max_task_load: usize) -> Self {
        Self {
            tasks: Vec::with_capacity(max_task_load),
            garbage: GarbageMask::default(),
            registry,
            max_task_load,
        }
    }

    /// Number of currently live tasks
    pub fn active_tasks(&self) -> usize {
        self.tasks.len()
    }

    /// Whether a record with this uid is currently live
    pub fn is_registered(&self, uid: TaskId) -> bool {
        self.find(uid).is_some()
    }

    /// Shared access to the registry
    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Register a new task for execution.
    ///
    /// Instantiates the task type named by `uid` from `params` and appends
    /// a record for it. The channel receives the result when the task
    /// completes; `initiator_id` is propagated back for correlation.
    pub fn register_task(
        &mut self,
        channel: Option<ChannelHandle>,
        initiator_id: DeviceId,
        uid: TaskId,
        params: EnvelopeView<'_>,
    ) -> StatusCode {
        let Some(channel) = channel else {
            return StatusCode::CHANNEL_NULL;
        };
        if self.find(uid).is_some() {
            return StatusCode::DUPLICATE_TASK;
        }
        if self.tasks.len() >= self.max_task_load {
            return StatusCode::TASK_LIMIT_REACHED;
        }
        if let Err(code) = self.registry.construct(uid, params) {
            return code;
        }
        self.tasks.push(TaskRecord {
            state: TaskState::default(),
            initiator_id,
            uid,
            channel,
        });
        debug!("registered {uid} for {initiator_id}");
        StatusCode::OK
    }

    /// Request a pause of the task named by `uid`
    pub fn pause_task(&mut self, uid: TaskId) -> StatusCode {
        let Some(index) = self.find(uid) else {
            return StatusCode::TASK_NOT_REGISTERED;
        };
        if self.task_reports_finished(uid) {
            return StatusCode::TASK_ALREADY_FINISHED;
        }
        let state = &mut self.tasks[index].state;
        if state.is_aborted() {
            return StatusCode::TASK_ALREADY_ABORTED;
        }
        if state.is_paused() {
            return StatusCode::TASK_ALREADY_PAUSED;
        }
        if !state.is_started() {
            return StatusCode::TASK_NOT_RUNNING;
        }
        state.set_paused();
        debug!("pause requested for {uid}");
        StatusCode::OK
    }

    /// Request a resume of the task named by `uid`
    pub fn resume_task(&mut self, uid: TaskId) -> StatusCode {
        let Some(index) = self.find(uid) else {
            return StatusCode::TASK_NOT_REGISTERED;
        };
        if self.task_reports_finished(uid) {
            return StatusCode::TASK_ALREADY_FINISHED;
        }
        let state = &mut self.tasks[index].state;
        if state.is_aborted() {
            return StatusCode::TASK_ALREADY_ABORTED;
        }
        if state.is_running() {
            return StatusCode::TASK_ALREADY_RUNNING;
        }
        if state.is_resumed() {
            return StatusCode::TASK_ALREADY_RESUMED;
        }
        state.set_resumed();
        debug!("resume requested for {uid}");
        StatusCode::OK
    }

    /// Request an abort of the task named by `uid`.
    ///
    /// Terminal: `on_execute` is never called again, and the next pass
    /// completes the task with `interrupted = true`.
    pub fn abort_task(&mut self, uid: TaskId) -> StatusCode {
        let Some(index) = self.find(uid) else {
            return StatusCode::TASK_NOT_REGISTERED;
        };
        if self.task_reports_finished(uid) {
            return StatusCode::TASK_ALREADY_FINISHED;
        }
        let state = &mut self.tasks[index].state;
        if state.is_aborted() {
            return StatusCode::TASK_ALREADY_ABORTED;
        }
        state.set_aborted();
        debug!("abort requested for {uid}");
        StatusCode::OK
    }

    /// Execute one update pass over every live task.
    ///
    /// Tasks are visited in insertion order. Per task, in priority order:
    ///
    /// 1. start-first: a never-started task runs `on_start` and falls
    ///    through (a single-shot task may start and finish in one pass);
    /// 2. aborted → `on_complete(true)`, result dispatch, reap;
    /// 3. finished (the task reports it) → `on_complete(false)`, result
    ///    dispatch, reap;
    /// 4. pause edge (`paused && running`) → `on_pause`, go idle;
    /// 5. resume edge (`resumed && idle`) → `on_resume`, go running;
    /// 6. otherwise `on_execute`, only while running.
    ///
    /// After the pass, reaped tasks are destroyed in the registry (freeing
    /// their slots for re-registration) and removed from the list.
    pub fn update(&mut self) {
        self.garbage.reset(self.tasks.len());

        for index in 0..self.tasks.len() {
            let record = &mut self.tasks[index];
            let uid = record.uid;
            let Some(task) = self.registry.get(uid) else {
                // Slot emptied behind the manager's back; reap the orphan.
                debug_assert!(false, "record without a live slot");
                self.garbage.mark(index);
                continue;
            };

            if !record.state.is_started() {
                record.state.set_running().set_started();
                trace!("{uid}: on_start");
                task.on_start();
            }

            if record.state.is_aborted() {
                trace!("{uid}: completing (interrupted)");
                let (result, code) = task.on_complete(true);
                record
                    .channel
                    .borrow_mut()
                    .on_result(record.initiator_id, uid, result, code);
                self.garbage.mark(index);
            } else if task.is_finished() {
                trace!("{uid}: completing");
                record.state.set_finished();
                let (result, code) = task.on_complete(false);
                record
                    .channel
                    .borrow_mut()
                    .on_result(record.initiator_id, uid, result, code);
                self.garbage.mark(index);
            } else if record.state.is_paused() && record.state.is_running() {
                trace!("{uid}: pause edge");
                task.on_pause();
                record.state.set_idle();
            } else if record.state.is_resumed() && record.state.is_idle() {
                trace!("{uid}: resume edge");
                task.on_resume();
                record.state.set_running();
            } else if record.state.is_running() {
                task.on_execute();
            }
        }

        self.reap();
    }

    /// Remove every marked record and destroy its slot
    fn reap(&mut self) {
        if !self.garbage.any() {
            return;
        }
        for index in 0..self.tasks.len() {
            if self.garbage.is_marked(index) {
                let uid = self.tasks[index].uid;
                self.registry.destroy(uid);
                trace!("{uid}: reaped");
            }
        }
        let garbage = &self.garbage;
        let mut index = 0;
        self.tasks.retain(|_| {
            let keep = !garbage.is_marked(index);
            index += 1;
            keep
        });
    }

    /// Linear scan for the record with this uid
    fn find(&self, uid: TaskId) -> Option<usize> {
        self.tasks.iter().position(|record| record.uid == uid)
    }

    /// Poll the live instance's own completion predicate
    fn task_reports_finished(&mut self, uid: TaskId) -> bool {
        self.registry
            .get(uid)
            .map(|task| task.is_finished())
            .unwrap_or(false)
    }
}

impl core::fmt::Debug for TaskManager {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TaskManager")
            .field("active_tasks", &self.tasks.len())
            .field("max_task_load", &self.max_task_load)
            .finish()
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
