//! Fixture tasks covering every lifecycle shape
//!
//! Each task keeps the convention that its uid names its own type — ids are
//! assigned once here and never shared. Completion codes follow the runtime
//! range: `TASK_FINISHED` on natural completion, `TASK_ABORTED` when
//! interrupted.

use taskwire_core::envelope::{Envelope, EnvelopeView};
use taskwire_core::registry::RegisteredTask;
use taskwire_core::status::StatusCode;
use taskwire_core::task::Task;
use taskwire_core::types::TaskId;

fn completion_code(interrupted: bool) -> StatusCode {
    if interrupted {
        StatusCode::TASK_ABORTED
    } else {
        StatusCode::TASK_FINISHED
    }
}

// ----------------------------------------------------------------------------
// Ping: single-shot
// ----------------------------------------------------------------------------

/// Finishes on the same pass it starts, with an empty result.
///
/// Completion is gated on `on_start` so lifecycle commands that arrive
/// before the first update pass see a not-yet-running task rather than a
/// finished one.
pub struct PingTask {
    started: bool,
}

impl Task for PingTask {
    fn on_start(&mut self) {
        self.started = true;
    }

    fn is_finished(&mut self) -> bool {
        self.started
    }

    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        (Envelope::new(), completion_code(interrupted))
    }
}

impl RegisteredTask for PingTask {
    const UID: TaskId = TaskId::new(0x07);

    fn from_params(_params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        Ok(Self { started: false })
    }
}

// ----------------------------------------------------------------------------
// Beacon: endless
// ----------------------------------------------------------------------------

/// Never finishes on its own; only an abort ends it
pub struct BeaconTask {
    /// Number of executed passes, reported in the abort result
    pulses: u32,
}

impl Task for BeaconTask {
    fn on_execute(&mut self) {
        self.pulses += 1;
    }

    fn is_finished(&mut self) -> bool {
        false
    }

    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let result = Envelope::packed(&self.pulses).unwrap_or_default();
        (result, completion_code(interrupted))
    }
}

impl RegisteredTask for BeaconTask {
    const UID: TaskId = TaskId::new(0x09);

    fn from_params(_params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        Ok(Self { pulses: 0 })
    }
}

// ----------------------------------------------------------------------------
// Sweep: multi-pass with pause/resume awareness
// ----------------------------------------------------------------------------

/// Steps through `steps` execute passes, tracking pause/resume edges
pub struct SweepTask {
    steps: u32,
    executed: u32,
    suspensions: u32,
}

impl Task for SweepTask {
    fn on_execute(&mut self) {
        self.executed += 1;
    }

    fn is_finished(&mut self) -> bool {
        self.executed >= self.steps
    }

    fn on_pause(&mut self) {
        self.suspensions += 1;
    }

    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let result = Envelope::packed(&(self.executed, self.suspensions)).unwrap_or_default();
        (result, completion_code(interrupted))
    }
}

impl RegisteredTask for SweepTask {
    const UID: TaskId = TaskId::new(0x05);

    fn from_params(params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        let steps: u32 = params.unpack().map_err(|_| StatusCode::INVALID_PARAMS)?;
        if steps == 0 {
            return Err(StatusCode::INVALID_PARAMS);
        }
        Ok(Self {
            steps,
            executed: 0,
            suspensions: 0,
        })
    }
}

// ----------------------------------------------------------------------------
// Echo: parameter round trip
// ----------------------------------------------------------------------------

/// Unpacks a `(u32, u8)` parameter tuple and returns it as its result
pub struct EchoTask {
    value: (u32, u8),
}

impl Task for EchoTask {
    fn on_complete(&mut self, interrupted: bool) -> (Envelope, StatusCode) {
        let result = Envelope::packed(&self.value).unwrap_or_default();
        (result, completion_code(interrupted))
    }
}

impl RegisteredTask for EchoTask {
    const UID: TaskId = TaskId::new(0x0A);

    fn from_params(params: EnvelopeView<'_>) -> Result<Self, StatusCode> {
        let value = params.unpack().map_err(|_| StatusCode::INVALID_PARAMS)?;
        Ok(Self { value })
    }
}

// ----------------------------------------------------------------------------
// Tests
// ----------------------------------------------------------------------------
