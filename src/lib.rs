//! User instrumentation hooks for multibody direct-dynamics runs.
//!
//! A direct-dynamics engine integrates the equations of motion forward in
//! time and calls back into user code at three fixed lifecycle points:
//! once before integration starts, once per accepted integration step, and
//! once after the run ends. This crate provides the pieces such user code
//! is made of:
//!
//! - [`SensorHandle`] - a kinematic measurement probe bound to a named
//!   sensor in the engine's model, refreshed each step
//! - [`ChannelRegistry`] - named, fixed-width time-series output channels,
//!   declared before integration and overwritten each step
//! - [`DirdynHooks`] - the three-phase contract the engine invokes
//! - [`DirdynDriver`] - sequences a hooks implementation in the order the
//!   engine guarantees, failing loudly on out-of-order invocation
//! - [`RideInstrumentation`] - a ready-made adapter recording passenger
//!   acceleration and nacelle position channels
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    External engine                           │
//! │  Owns: model, integrator, output recording                  │
//! │  Calls: initialize → step (per accepted step) → finalize    │
//! └─────────────────────────┬───────────────────────────────────┘
//!                           │  Model / RecordSink trait seams
//!                           ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    DirdynHooks impl                          │
//! │  initialize: bind sensors, declare channels                 │
//! │  step:       refresh sensors, write channel values          │
//! │  finalize:   release handles, summarize                     │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Design Philosophy
//!
//! The engine side stays external: equations of motion, sensor kinematics,
//! and output persistence live behind the [`Model`] and [`RecordSink`]
//! traits. What this crate owns is the declare-before-use discipline:
//! every channel written during `step` was declared during `initialize`
//! with a matching width, and every sensor read during `step` was bound
//! during `initialize`. Violations are errors, never silent skips, since
//! continuing with unregistered instrumentation would record invalid
//! output for the whole run.
//!
//! # Example
//!
//! ```ignore
//! use sim_instrument::{DirdynDriver, RideInstrumentation};
//!
//! // `model` and `sink` are provided by the engine embedding.
//! let mut driver = DirdynDriver::new(RideInstrumentation::new());
//! driver.initialize(&model, &mut sink)?;
//! while engine.step()? {
//!     driver.step(&model, &mut sink, engine.timestep())?;
//! }
//! driver.finalize(&model, &mut sink)?;
//! ```

#![deny(clippy::unwrap_used, clippy::expect_used)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]

mod channel;
mod driver;
mod engine;
mod error;
mod hooks;
mod sensor;
mod types;

#[cfg(test)]
pub(crate) mod testkit;

pub use channel::ChannelRegistry;
pub use driver::{DirdynDriver, RunPhase};
pub use engine::{Model, RecordSink};
pub use error::InstrumentError;
pub use hooks::{
    AccelSample, DirdynHooks, RideInstrumentation, NACELLE_POSITION_CHANNEL,
    NACELLE_SENSOR, PASSENGER_ACCEL_CHANNEL, PASSENGER_SENSOR,
};
pub use sensor::SensorHandle;
pub use types::{RunState, SensorFrame, SensorIndex};

/// Result type for instrumentation operations.
pub type Result<T> = std::result::Result<T, InstrumentError>;
