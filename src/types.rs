//! Core instrumentation types and identifiers.
//!
//! These types are pure data: the common language between the external
//! engine (which computes them) and the user hooks (which read them).

use nalgebra::Vector3;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Index of a sensor in the engine's model.
///
/// Obtained from the model's name-to-index mapping and stable for the
/// lifetime of the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorIndex(pub u64);

impl SensorIndex {
    /// Create a new sensor index.
    #[must_use]
    pub const fn new(index: u64) -> Self {
        Self(index)
    }

    /// Get the raw index value.
    #[must_use]
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl From<u64> for SensorIndex {
    fn from(index: u64) -> Self {
        Self(index)
    }
}

impl std::fmt::Display for SensorIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Sensor({})", self.0)
    }
}

/// Computed kinematic fields of a sensor at the current state.
///
/// Produced by the engine's sensor computation each time a handle is
/// refreshed. All components are expressed in the model's inertial frame.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SensorFrame {
    /// Position of the sensor point (m).
    pub position: Vector3<f64>,
    /// Velocity of the sensor point (m/s).
    pub velocity: Vector3<f64>,
    /// Acceleration of the sensor point (m/s²).
    pub acceleration: Vector3<f64>,
}

impl SensorFrame {
    /// Frame with all components zero, the state before any compute call.
    #[must_use]
    pub fn zero() -> Self {
        Self {
            position: Vector3::zeros(),
            velocity: Vector3::zeros(),
            acceleration: Vector3::zeros(),
        }
    }
}

impl Default for SensorFrame {
    fn default() -> Self {
        Self::zero()
    }
}

/// Read-only view of the current integration run.
///
/// Passed to every lifecycle hook. Owned and advanced by the engine (or by
/// [`DirdynDriver`](crate::DirdynDriver) when it hosts the hooks); user
/// code never mutates it.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct RunState {
    /// Current simulation time (s).
    pub time: f64,
    /// Number of accepted integration steps so far.
    pub step: u64,
}

impl RunState {
    /// Run state at the start of integration.
    #[must_use]
    pub fn start() -> Self {
        Self { time: 0.0, step: 0 }
    }

    /// State after one more accepted step of duration `dt`.
    #[must_use]
    pub fn advanced(self, dt: f64) -> Self {
        Self {
            time: self.time + dt,
            step: self.step + 1,
        }
    }
}

impl Default for RunState {
    fn default() -> Self {
        Self::start()
    }
}
