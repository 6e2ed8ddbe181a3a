//! The three-phase lifecycle contract and a ready-made adapter.
//!
//! A direct-dynamics engine calls `initialize` once before integration,
//! `step` once per accepted integration step (not for intermediate
//! sub-steps of multistep integrators), and `finalize` once after the run
//! ends. Hooks borrow the model and sink per call and must not retain
//! references past a single run.

use nalgebra::Vector3;

use crate::channel::ChannelRegistry;
use crate::engine::{Model, RecordSink};
use crate::error::InstrumentError;
use crate::sensor::SensorHandle;
use crate::types::RunState;
use crate::Result;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// User instrumentation invoked by the engine at fixed lifecycle points.
///
/// Errors returned from any hook propagate to the engine and abort the
/// run. That is deliberate: an implementation must not swallow a failed
/// bind or write and keep integrating, because every later step would
/// record output that silently misses the failed channel.
pub trait DirdynHooks<M: Model, S: RecordSink> {
    /// Called once before integration starts.
    ///
    /// Bind sensor handles and declare output channels here; nothing else
    /// may do so later.
    ///
    /// # Errors
    ///
    /// Any error aborts the run before integration starts.
    fn initialize(&mut self, model: &M, run: &RunState, sink: &mut S) -> Result<()>;

    /// Called once per accepted integration step.
    ///
    /// Refresh sensors and overwrite the declared channels with current
    /// values.
    ///
    /// # Errors
    ///
    /// Any error aborts the run at the current step.
    fn step(&mut self, model: &M, run: &RunState, sink: &mut S) -> Result<()>;

    /// Called once after the run ends, whether it completed or stopped.
    ///
    /// Release state attached during `initialize`. Must succeed as a
    /// no-op when `initialize` never ran.
    ///
    /// # Errors
    ///
    /// Any error is reported by the engine after the run.
    fn finalize(&mut self, _model: &M, _run: &RunState, _sink: &mut S) -> Result<()> {
        Ok(())
    }
}

/// Model sensor name for the passenger seat probe.
pub const PASSENGER_SENSOR: &str = "sensor_passenger1";

/// Model sensor name for the nacelle probe.
pub const NACELLE_SENSOR: &str = "sensor_nacelle1";

/// Output channel recording the passenger sensor's acceleration (width 3).
pub const PASSENGER_ACCEL_CHANNEL: &str = "qdd_sensor_passenger1";

/// Output channel recording the nacelle sensor's position (width 3).
pub const NACELLE_POSITION_CHANNEL: &str = "q_sensor_nacelle1";

/// One timestamped acceleration reading kept by [`RideInstrumentation`].
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AccelSample {
    /// Simulation time of the step (s).
    pub time: f64,
    /// Passenger sensor acceleration at that time (m/s²).
    pub acceleration: Vector3<f64>,
}

/// Instrumentation for a passenger-carrying ride model.
///
/// Records two channels per accepted step:
///
/// - [`PASSENGER_ACCEL_CHANNEL`]: the three acceleration components of the
///   passenger seat sensor,
/// - [`NACELLE_POSITION_CHANNEL`]: the three position components of the
///   nacelle sensor.
///
/// It also keeps an in-memory history of the passenger acceleration so the
/// host can inspect or persist it after the run; `finalize` releases the
/// handles and the history.
///
/// All run-scoped state lives in this struct's declared fields rather than
/// being attached to the engine's model.
#[derive(Debug, Clone, Default)]
pub struct RideInstrumentation {
    channels: ChannelRegistry,
    passenger: Option<SensorHandle>,
    nacelle: Option<SensorHandle>,
    history: Vec<AccelSample>,
}

impl RideInstrumentation {
    /// Create instrumentation with no sensors bound yet.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declared output channels.
    #[must_use]
    pub fn channels(&self) -> &ChannelRegistry {
        &self.channels
    }

    /// Passenger acceleration history accumulated so far.
    #[must_use]
    pub fn history(&self) -> &[AccelSample] {
        &self.history
    }

    /// Take ownership of the accumulated history, leaving it empty.
    ///
    /// Call before `finalize` if the host wants to persist the samples.
    #[must_use]
    pub fn take_history(&mut self) -> Vec<AccelSample> {
        std::mem::take(&mut self.history)
    }

    fn bound_sensors(&mut self) -> Result<(&mut SensorHandle, &mut SensorHandle)> {
        match (self.passenger.as_mut(), self.nacelle.as_mut()) {
            (Some(p), Some(n)) => Ok((p, n)),
            _ => Err(InstrumentError::lifecycle("step before initialize")),
        }
    }
}

impl<M: Model, S: RecordSink> DirdynHooks<M, S> for RideInstrumentation {
    fn initialize(&mut self, model: &M, _run: &RunState, sink: &mut S) -> Result<()> {
        let passenger = SensorHandle::bind(model, PASSENGER_SENSOR)?;
        self.channels.declare(sink, PASSENGER_ACCEL_CHANNEL, 3)?;

        let nacelle = SensorHandle::bind(model, NACELLE_SENSOR)?;
        self.channels.declare(sink, NACELLE_POSITION_CHANNEL, 3)?;

        self.passenger = Some(passenger);
        self.nacelle = Some(nacelle);
        tracing::info!(
            channels = self.channels.len(),
            "ride instrumentation initialized"
        );
        Ok(())
    }

    fn step(&mut self, model: &M, run: &RunState, sink: &mut S) -> Result<()> {
        let (passenger, nacelle) = self.bound_sensors()?;
        passenger.refresh(model)?;
        nacelle.refresh(model)?;

        let qdd = passenger.acceleration();
        let q = nacelle.position();

        self.channels
            .write(sink, PASSENGER_ACCEL_CHANNEL, &[qdd.x, qdd.y, qdd.z])?;
        self.channels
            .write(sink, NACELLE_POSITION_CHANNEL, &[q.x, q.y, q.z])?;

        self.history.push(AccelSample {
            time: run.time,
            acceleration: qdd,
        });
        Ok(())
    }

    fn finalize(&mut self, _model: &M, run: &RunState, _sink: &mut S) -> Result<()> {
        tracing::info!(
            samples = self.history.len(),
            time = run.time,
            "ride instrumentation finalized"
        );
        self.passenger = None;
        self.nacelle = None;
        self.history.clear();
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::testkit::{MockModel, RecordingSink, SinkOp};
    use crate::types::SensorFrame;
    use approx::assert_relative_eq;

    fn ride_model() -> MockModel {
        MockModel::new()
            .with_sensor(
                PASSENGER_SENSOR,
                1,
                SensorFrame {
                    acceleration: Vector3::new(0.5, -9.81, 0.02),
                    ..SensorFrame::zero()
                },
            )
            .with_sensor(
                NACELLE_SENSOR,
                2,
                SensorFrame {
                    position: Vector3::new(10.0, 0.0, 25.0),
                    ..SensorFrame::zero()
                },
            )
    }

    #[test]
    fn test_initialize_declares_both_channels() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();

        hooks
            .initialize(&model, &RunState::start(), &mut sink)
            .unwrap();

        assert_eq!(hooks.channels().width_of(PASSENGER_ACCEL_CHANNEL), Some(3));
        assert_eq!(
            hooks.channels().width_of(NACELLE_POSITION_CHANNEL),
            Some(3)
        );
        assert_eq!(
            sink.ops,
            vec![
                SinkOp::Declare {
                    name: PASSENGER_ACCEL_CHANNEL.to_string(),
                    width: 3,
                },
                SinkOp::Declare {
                    name: NACELLE_POSITION_CHANNEL.to_string(),
                    width: 3,
                },
            ]
        );
    }

    #[test]
    fn test_initialize_fails_on_missing_sensor() {
        // Model without the nacelle sensor: the error names the sensor and
        // nothing after the failure point reaches the sink.
        let model = MockModel::new().with_sensor(PASSENGER_SENSOR, 1, SensorFrame::zero());
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();

        let err = hooks
            .initialize(&model, &RunState::start(), &mut sink)
            .unwrap_err();
        assert_eq!(err, InstrumentError::unknown_sensor(NACELLE_SENSOR));
        assert_eq!(sink.ops.len(), 1);
    }

    #[test]
    fn test_step_writes_acceleration_and_position() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();
        let run = RunState::start();

        hooks.initialize(&model, &run, &mut sink).unwrap();
        hooks.step(&model, &run.advanced(0.01), &mut sink).unwrap();

        let qdd = sink.last_write(PASSENGER_ACCEL_CHANNEL).unwrap();
        assert_eq!(qdd, &[0.5, -9.81, 0.02]);

        let q = sink.last_write(NACELLE_POSITION_CHANNEL).unwrap();
        assert_eq!(q, &[10.0, 0.0, 25.0]);
    }

    #[test]
    fn test_step_only_touches_declared_channels() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();
        let run = RunState::start();

        hooks.initialize(&model, &run, &mut sink).unwrap();
        for i in 1..=5 {
            hooks
                .step(&model, &run.advanced(0.01 * f64::from(i)), &mut sink)
                .unwrap();
        }

        // Every write names a channel declared beforehand, with its width.
        for op in &sink.ops {
            if let SinkOp::Write { name, values } = op {
                let declared = hooks.channels().width_of(name);
                assert_eq!(declared, Some(values.len()), "channel {name}");
            }
        }
    }

    #[test]
    fn test_step_is_idempotent_for_unchanged_state() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();
        let run = RunState::start();

        hooks.initialize(&model, &run, &mut sink).unwrap();
        hooks.step(&model, &run, &mut sink).unwrap();
        let first: Vec<f64> = sink.last_write(PASSENGER_ACCEL_CHANNEL).unwrap().to_vec();

        hooks.step(&model, &run, &mut sink).unwrap();
        let second = sink.last_write(PASSENGER_ACCEL_CHANNEL).unwrap();
        assert_eq!(first.as_slice(), second);
    }

    #[test]
    fn test_step_before_initialize_fails() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();

        let err = hooks
            .step(&model, &RunState::start(), &mut sink)
            .unwrap_err();
        assert!(err.is_lifecycle());
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn test_history_accumulates_per_step() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();
        let mut run = RunState::start();

        hooks.initialize(&model, &run, &mut sink).unwrap();
        for _ in 0..3 {
            run = run.advanced(0.01);
            hooks.step(&model, &run, &mut sink).unwrap();
        }

        assert_eq!(hooks.history().len(), 3);
        assert_relative_eq!(hooks.history()[2].time, 0.03, epsilon = 1e-12);
        assert_eq!(
            hooks.history()[0].acceleration,
            Vector3::new(0.5, -9.81, 0.02)
        );

        let taken = hooks.take_history();
        assert_eq!(taken.len(), 3);
        assert!(hooks.history().is_empty());
    }

    #[test]
    fn test_finalize_without_initialize_is_noop() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();

        hooks
            .finalize(&model, &RunState::start(), &mut sink)
            .unwrap();
        assert!(sink.ops.is_empty());
    }

    #[test]
    fn test_finalize_releases_run_state() {
        let model = ride_model();
        let mut sink = RecordingSink::new();
        let mut hooks = RideInstrumentation::new();
        let run = RunState::start();

        hooks.initialize(&model, &run, &mut sink).unwrap();
        hooks.step(&model, &run.advanced(0.01), &mut sink).unwrap();
        hooks
            .finalize(&model, &run.advanced(0.01), &mut sink)
            .unwrap();

        assert!(hooks.history().is_empty());
        let err = hooks
            .step(&model, &RunState::start(), &mut sink)
            .unwrap_err();
        assert!(err.is_lifecycle());
    }
}
