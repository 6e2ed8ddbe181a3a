//! Lifecycle sequencing for hosts and tests.
//!
//! The engine guarantees a strict call order: `initialize` once, `step`
//! once per accepted step, `finalize` once. [`DirdynDriver`] carries that
//! guarantee into embeddings that drive the hooks themselves, turning any
//! out-of-order invocation into an error instead of letting misordered
//! instrumentation record garbage.

use crate::engine::{Model, RecordSink};
use crate::error::InstrumentError;
use crate::hooks::DirdynHooks;
use crate::types::RunState;
use crate::Result;

/// Where the driver is in the run lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// `initialize` has not run yet.
    Created,
    /// `initialize` succeeded; steps may be taken.
    Running,
    /// `finalize` has run; the driver is spent.
    Finished,
}

/// Drives a [`DirdynHooks`] implementation in the engine's guaranteed
/// order and owns the [`RunState`] passed down to it.
#[derive(Debug)]
pub struct DirdynDriver<H> {
    hooks: H,
    run: RunState,
    phase: RunPhase,
}

impl<H> DirdynDriver<H> {
    /// Create a driver around a hooks implementation, before any run.
    #[must_use]
    pub fn new(hooks: H) -> Self {
        Self {
            hooks,
            run: RunState::start(),
            phase: RunPhase::Created,
        }
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn phase(&self) -> RunPhase {
        self.phase
    }

    /// Current run state (time and accepted-step count).
    #[must_use]
    pub fn run_state(&self) -> RunState {
        self.run
    }

    /// Borrow the wrapped hooks.
    #[must_use]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// Mutably borrow the wrapped hooks.
    pub fn hooks_mut(&mut self) -> &mut H {
        &mut self.hooks
    }

    /// Consume the driver, returning the hooks.
    #[must_use]
    pub fn into_hooks(self) -> H {
        self.hooks
    }

    /// Run the `initialize` hook. Valid exactly once, before any step.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::Lifecycle`] when called twice or after
    /// `finalize`; otherwise propagates the hook's error.
    pub fn initialize<M, S>(&mut self, model: &M, sink: &mut S) -> Result<()>
    where
        M: Model,
        S: RecordSink,
        H: DirdynHooks<M, S>,
    {
        if self.phase != RunPhase::Created {
            return Err(InstrumentError::lifecycle("initialize called twice"));
        }
        self.hooks.initialize(model, &self.run, sink)?;
        self.phase = RunPhase::Running;
        tracing::debug!("run initialized");
        Ok(())
    }

    /// Record one accepted integration step of duration `dt` and run the
    /// `step` hook with the advanced run state.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::Lifecycle`] before `initialize` or after
    /// `finalize`; otherwise propagates the hook's error.
    pub fn step<M, S>(&mut self, model: &M, sink: &mut S, dt: f64) -> Result<()>
    where
        M: Model,
        S: RecordSink,
        H: DirdynHooks<M, S>,
    {
        if self.phase != RunPhase::Running {
            return Err(InstrumentError::lifecycle("step outside a running run"));
        }
        self.run = self.run.advanced(dt);
        self.hooks.step(model, &self.run, sink)
    }

    /// Run the `finalize` hook and retire the driver.
    ///
    /// Valid from any phase except after a previous `finalize`: finalizing
    /// a run that was never initialized is the documented no-op baseline.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::Lifecycle`] when called twice; otherwise
    /// propagates the hook's error.
    pub fn finalize<M, S>(&mut self, model: &M, sink: &mut S) -> Result<()>
    where
        M: Model,
        S: RecordSink,
        H: DirdynHooks<M, S>,
    {
        if self.phase == RunPhase::Finished {
            return Err(InstrumentError::lifecycle("finalize called twice"));
        }
        self.hooks.finalize(model, &self.run, sink)?;
        self.phase = RunPhase::Finished;
        tracing::debug!(steps = self.run.step, time = self.run.time, "run finalized");
        Ok(())
    }
}
