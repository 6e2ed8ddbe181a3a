//! Sensor handles.
//!
//! A handle binds to one sensor in the engine's model and caches the
//! kinematic fields computed for it. Binding resolves the sensor's name in
//! the model's sensor table exactly once, during `initialize`; after that
//! the handle carries its index, so per-step refreshes never repeat the
//! name lookup.

use crate::engine::Model;
use crate::error::InstrumentError;
use crate::types::{SensorFrame, SensorIndex};
use crate::Result;
use nalgebra::Vector3;

/// A kinematic measurement probe bound to one model sensor.
///
/// Created during `initialize` via [`bind`](Self::bind), refreshed once
/// per accepted step via [`refresh`](Self::refresh). Until the first
/// refresh the cached frame is all zeros.
#[derive(Debug, Clone, PartialEq)]
pub struct SensorHandle {
    name: String,
    index: SensorIndex,
    frame: SensorFrame,
}

impl SensorHandle {
    /// Bind a handle to the model sensor registered under `name`.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::UnknownSensor`] when the model's sensor
    /// table has no entry for `name`.
    pub fn bind<M: Model>(model: &M, name: &str) -> Result<Self> {
        let index = model
            .sensor_index(name)
            .ok_or_else(|| InstrumentError::unknown_sensor(name))?;
        tracing::debug!(sensor = name, %index, "bound sensor handle");
        Ok(Self {
            name: name.to_string(),
            index,
            frame: SensorFrame::zero(),
        })
    }

    /// Recompute the sensor's kinematic fields for the current state and
    /// cache them.
    ///
    /// # Errors
    ///
    /// Propagates the engine's failure when the index no longer refers to
    /// a sensor in the model.
    pub fn refresh<M: Model>(&mut self, model: &M) -> Result<()> {
        self.frame = model.compute_sensor(self.index)?;
        Ok(())
    }

    /// Name the handle was bound under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Index of the sensor in the model.
    #[must_use]
    pub fn index(&self) -> SensorIndex {
        self.index
    }

    /// The kinematic fields cached by the last refresh.
    #[must_use]
    pub fn frame(&self) -> &SensorFrame {
        &self.frame
    }

    /// Position of the sensor point (m).
    #[must_use]
    pub fn position(&self) -> Vector3<f64> {
        self.frame.position
    }

    /// Velocity of the sensor point (m/s).
    #[must_use]
    pub fn velocity(&self) -> Vector3<f64> {
        self.frame.velocity
    }

    /// Acceleration of the sensor point (m/s²).
    #[must_use]
    pub fn acceleration(&self) -> Vector3<f64> {
        self.frame.acceleration
    }
}
