//! Task abstraction and lifecycle hooks
//!
//! A task is a discrete unit of work driven to completion by the
//! [`crate::manager::TaskManager`] across cooperative update passes. User
//! code never calls the hooks below directly — they are callbacks the
//! manager invokes at fixed points in the lifecycle:
//!
//! - `on_start` — once, before the first `on_execute`
//! - `on_execute` — every pass while running and not paused
//! - `is_finished` — polled to decide when work is done
//! - `on_pause` / `on_resume` — on the corresponding edges
//! - `on_complete` — exactly once, at normal completion or after an abort
//!
//! All hooks have default implementations; a default task finishes
//! immediately with an empty result. Long-running work is decomposed across
//! passes by returning quickly from `on_execute` — there is no preemption
//! and no yield point.

pub mod state;

pub use state::TaskState;

use crate::envelope::Envelope;
use crate::status::StatusCode;

// ----------------------------------------------------------------------------
// Task Trait
// ----------------------------------------------------------------------------

/// Lifecycle callbacks for a managed task.
///
/// ```
/// use taskwire_core::envelope::Envelope;
/// use taskwire_core::status::StatusCode;
/// use taskwire_core::task::Task;
///
/// struct Countdown {
///     remaining: u32,
/// }
///
/// impl Task for Countdown {
///     fn on_execute(&mut self) {
///         self.remaining = self.remaining.saturating_sub(1);
///     }
///
///     fn is_finished(&mut self) -> bool {
///         self.remaining == 0
///     }
///
///     fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
///         let code = if interrupted {
///             StatusCode::TASK_ABORTED
///         } else {
///             StatusCode::TASK_FINISHED
///         };
///         (Envelope::new(), code)
///     }
/// }
/// ```
pub trait Task {
    /// One-shot initialization before the first `on_execute`
    fn on_start(&mut self) {}

    /// One increment of work; called repeatedly while the task is active
    fn on_execute(&mut self) {}

    /// Whether the task has finished its work.
    ///
    /// The default returns `true`, so a task that overrides nothing
    /// completes on its first pass.
    fn is_finished(&mut self) -> bool {
        true
    }

    /// Finalize and report the result.
    ///
    /// Called exactly once; `interrupted` is true when completion was forced
    /// by an abort. The returned envelope and status byte travel back to the
    /// initiator through the task's channel.
    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let _ = interrupted;
        (Envelope::new(), StatusCode::OK)
    }

    /// Called on the pause edge, before execution stops
    fn on_pause(&mut self) {}

    /// Called on the resume edge, before execution restarts
    fn on_resume(&mut self) {}
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    struct DefaultTask;
    impl Task for DefaultTask {}

    #[test]
    fn test_default_task_finishes_immediately() {
        let mut task = DefaultTask;
        assert!(task.is_finished());
        let (result, code) = task.on_complete(false);
        assert!(result.is_empty());
        assert_eq!(code, StatusCode::OK);
    }

    #[test]
    fn test_default_hooks_are_noops() {
        let mut task = DefaultTask;
        task.on_start();
        task.on_execute();
        task.on_pause();
        task.on_resume();
    }
}
