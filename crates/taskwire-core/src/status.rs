//! Unified status byte shared by manager APIs and the wire protocol
//!
//! Every mutating manager call returns a [`StatusCode`], and the same byte
//! travels in packet offset 4. Codes are partitioned by numeric range:
//! `0x00..0x20` manager/API, `0x20..0x70` task/runtime, `0x70..=0xFF`
//! custom (user-defined). The type is a transparent byte rather than an
//! enum so user extensions in the custom range need no conversion step.

use core::fmt;
use serde::{Deserialize, Serialize};

// ----------------------------------------------------------------------------
// Status Code
// ----------------------------------------------------------------------------

/// One-byte status transmitted in packets and returned from manager APIs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StatusCode(u8);

impl StatusCode {
    // --- Manager/API status codes (0x00–0x1F) ---

    /// General success
    pub const OK: Self = Self(0x00);
    /// Operated on a task that is not registered
    pub const TASK_NOT_REGISTERED: Self = Self(0x01);
    /// Start/resume requested but the task is already running
    pub const TASK_ALREADY_RUNNING: Self = Self(0x02);
    /// Pause requested but the task is already paused
    pub const TASK_ALREADY_PAUSED: Self = Self(0x03);
    /// Resume requested but the task is already marked resumed
    pub const TASK_ALREADY_RESUMED: Self = Self(0x04);
    /// Resume requested but the task is not paused
    pub const TASK_NOT_PAUSED: Self = Self(0x05);
    /// Pause requested but the task is not running
    pub const TASK_NOT_RUNNING: Self = Self(0x06);
    /// Illegal state change for the current task state
    pub const INVALID_STATE_TRANSITION: Self = Self(0x07);
    /// Operation invalid: task already finished
    pub const TASK_ALREADY_FINISHED: Self = Self(0x08);
    /// Operation invalid: task already aborted
    pub const TASK_ALREADY_ABORTED: Self = Self(0x09);
    /// Initiator not authorized for this operation
    pub const PERMISSION_DENIED: Self = Self(0x0A);
    /// Unsafe/forbidden in the current context
    pub const WOULD_BLOCK: Self = Self(0x0B);
    /// Manager API called while an update pass is active
    pub const REENTRANCY_CONFLICT: Self = Self(0x0C);
    /// No channel provided for result delivery
    pub const CHANNEL_NULL: Self = Self(0x0D);
    /// Channel failed or applied backpressure
    pub const CHANNEL_ERROR: Self = Self(0x0E);
    /// Registry knows the uid but has no constructible entry
    pub const CONSTRUCTOR_NOT_FOUND: Self = Self(0x0F);
    /// Envelope invalid/unsupported for this task type
    pub const INVALID_PARAMS: Self = Self(0x10);
    /// Allocation failure while constructing the task
    pub const OUT_OF_MEMORY: Self = Self(0x11);
    /// Manager concurrency cap reached
    pub const TASK_LIMIT_REACHED: Self = Self(0x12);
    /// Duplicate instance disallowed by policy
    pub const DUPLICATE_TASK: Self = Self(0x13);
    /// Task type uid is unknown to the registry
    pub const TASK_UNKNOWN: Self = Self(0x14);
    /// Unexpected manager fault
    pub const INTERNAL_ERROR: Self = Self(0x1F);

    // --- Task/runtime status codes (0x20–0x3F) ---

    /// Task completed successfully (normal termination)
    pub const TASK_FINISHED: Self = Self(0x20);
    /// Task terminated early by an abort request
    pub const TASK_ABORTED: Self = Self(0x21);
    /// Task exceeded its time budget/deadline
    pub const TASK_TIMEOUT: Self = Self(0x22);
    /// Task I/O or subsystem failure
    pub const TASK_IO_ERROR: Self = Self(0x23);
    /// Task rejected inputs/parameters at runtime
    pub const TASK_VALIDATION_FAILED: Self = Self(0x24);
    /// Dependency or service required by the task is unavailable
    pub const TASK_DEPENDENCY_MISSING: Self = Self(0x25);
    /// Task refused the action due to its own constraints
    pub const TASK_BUSY: Self = Self(0x26);

    // --- Custom/user-defined status codes (0x70–0xFF) ---

    /// Base value for user extensions
    pub const CUSTOM_ERROR_START: Self = Self(0x70);

    /// Create a status code from a raw byte
    pub const fn from_u8(value: u8) -> Self {
        Self(value)
    }

    /// Get the raw byte value
    pub const fn as_u8(self) -> u8 {
        self.0
    }

    /// True if this is the success code
    pub const fn is_ok(self) -> bool {
        self.0 == Self::OK.0
    }

    /// True for the manager/API range `0x00..0x20`
    pub const fn is_manager(self) -> bool {
        self.0 < Self::TASK_FINISHED.0
    }

    /// True for the task/runtime range `0x20..0x70`
    pub const fn is_task(self) -> bool {
        self.0 >= Self::TASK_FINISHED.0 && self.0 < Self::CUSTOM_ERROR_START.0
    }

    /// True for the custom range `0x70..=0xFF`
    pub const fn is_custom(self) -> bool {
        self.0 >= Self::CUSTOM_ERROR_START.0
    }
}

impl From<u8> for StatusCode {
    fn from(value: u8) -> Self {
        Self(value)
    }
}

impl From<StatusCode> for u8 {
    fn from(code: StatusCode) -> Self {
        code.0
    }
}

impl fmt::Display for StatusCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match *self {
            Self::OK => "ok",
            Self::TASK_NOT_REGISTERED => "task_not_registered",
            Self::TASK_ALREADY_RUNNING => "task_already_running",
            Self::TASK_ALREADY_PAUSED => "task_already_paused",
            Self::TASK_ALREADY_RESUMED => "task_already_resumed",
            Self::TASK_NOT_PAUSED => "task_not_paused",
            Self::TASK_NOT_RUNNING => "task_not_running",
            Self::INVALID_STATE_TRANSITION => "invalid_state_transition",
            Self::TASK_ALREADY_FINISHED => "task_already_finished",
            Self::TASK_ALREADY_ABORTED => "task_already_aborted",
            Self::PERMISSION_DENIED => "permission_denied",
            Self::WOULD_BLOCK => "would_block",
            Self::REENTRANCY_CONFLICT => "reentrancy_conflict",
            Self::CHANNEL_NULL => "channel_null",
            Self::CHANNEL_ERROR => "channel_error",
            Self::CONSTRUCTOR_NOT_FOUND => "constructor_not_found",
            Self::INVALID_PARAMS => "invalid_params",
            Self::OUT_OF_MEMORY => "out_of_memory",
            Self::TASK_LIMIT_REACHED => "task_limit_reached",
            Self::DUPLICATE_TASK => "duplicate_task",
            Self::TASK_UNKNOWN => "task_unknown",
            Self::INTERNAL_ERROR => "internal_error",
            Self::TASK_FINISHED => "task_finished",
            Self::TASK_ABORTED => "task_aborted",
            Self::TASK_TIMEOUT => "task_timeout",
            Self::TASK_IO_ERROR => "task_io_error",
            Self::TASK_VALIDATION_FAILED => "task_validation_failed",
            Self::TASK_DEPENDENCY_MISSING => "task_dependency_missing",
            Self::TASK_BUSY => "task_busy",
            _ => return write!(f, "status:{:#04x}", self.0),
        };
        f.write_str(name)
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
