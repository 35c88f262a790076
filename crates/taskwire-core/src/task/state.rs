//! Task lifecycle state flags
//!
//! A [`TaskState`] is a small bag of bits owned and mutated exclusively by
//! the task manager; tasks never touch their own state. The transition
//! methods keep paired flags coherent: pausing clears the resume edge and
//! vice versa, and running/idle are mutually exclusive. `started`,
//! `finished` and `aborted` are one-way latches.

use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Flag Bits
// ----------------------------------------------------------------------------

const IDLE: u8 = 1 << 0;
const STARTED: u8 = 1 << 1;
const FINISHED: u8 = 1 << 2;
const PAUSED: u8 = 1 << 3;
const RESUMED: u8 = 1 << 4;
const ABORTED: u8 = 1 << 5;
const RUNNING: u8 = 1 << 6;

// ----------------------------------------------------------------------------
// Task State
// ----------------------------------------------------------------------------

/// Bitfield tracking a task's position in its lifecycle
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskState(u8);

impl Default for TaskState {
    /// A fresh task is runnable but not yet started
    fn default() -> Self {
        Self(RUNNING)
    }
}

impl TaskState {
    /// True once the manager has invoked `on_start`
    pub const fn is_started(self) -> bool {
        self.0 & STARTED != 0
    }

    /// True once the manager has latched completion
    pub const fn is_finished(self) -> bool {
        self.0 & FINISHED != 0
    }

    /// True while a pause is requested or in effect
    pub const fn is_paused(self) -> bool {
        self.0 & PAUSED != 0
    }

    /// True while a resume edge is pending or latched
    pub const fn is_resumed(self) -> bool {
        self.0 & RESUMED != 0
    }

    /// True once an abort has been requested
    pub const fn is_aborted(self) -> bool {
        self.0 & ABORTED != 0
    }

    /// True while the task is eligible for execution
    pub const fn is_running(self) -> bool {
        self.0 & RUNNING != 0
    }

    /// True while the task is not executing
    pub const fn is_idle(self) -> bool {
        self.0 & IDLE != 0
    }

    /// Request a pause; clears any pending resume edge
    pub fn set_paused(&mut self) -> &mut Self {
        self.0 = (self.0 | PAUSED) & !RESUMED;
        self
    }

    /// Request a resume; clears the pause flag
    pub fn set_resumed(&mut self) -> &mut Self {
        self.0 = (self.0 | RESUMED) & !PAUSED;
        self
    }

    /// Latch the started flag
    pub fn set_started(&mut self) -> &mut Self {
        self.0 |= STARTED;
        self
    }

    /// Latch the finished flag
    pub fn set_finished(&mut self) -> &mut Self {
        self.0 |= FINISHED;
        self
    }

    /// Latch the aborted flag
    pub fn set_aborted(&mut self) -> &mut Self {
        self.0 |= ABORTED;
        self
    }

    /// Mark the task running, clearing idle
    pub fn set_running(&mut self) -> &mut Self {
        self.0 = (self.0 | RUNNING) & !IDLE;
        self
    }

    /// Mark the task idle, clearing running
    pub fn set_idle(&mut self) -> &mut Self {
        self.0 = (self.0 | IDLE) & !RUNNING;
        self
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
