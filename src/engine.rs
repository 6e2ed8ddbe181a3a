//! Trait seams for the external dynamics engine.
//!
//! Everything substantive happens on the other side of these traits: the
//! engine owns the mechanical model, integrates the equations of motion,
//! computes sensor kinematics, and records declared output channels. The
//! hooks in this crate only borrow the model per call and forward values
//! to the sink; they never retain references across calls.

use crate::types::{SensorFrame, SensorIndex};
use crate::Result;

/// The engine-owned mechanical model, borrowed for the duration of one
/// lifecycle call.
pub trait Model {
    /// Look up a sensor index by name in the model's sensor table.
    ///
    /// Returns `None` when the model defines no sensor under that name.
    fn sensor_index(&self, name: &str) -> Option<SensorIndex>;

    /// Compute the kinematic fields of the sensor at the current state.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::InvalidSensorIndex`] when the index does
    /// not refer to a sensor in this model.
    ///
    /// [`InstrumentError::InvalidSensorIndex`]: crate::InstrumentError::InvalidSensorIndex
    fn compute_sensor(&self, index: SensorIndex) -> Result<SensorFrame>;
}

/// The engine's output-recording facility.
///
/// A channel must be declared before integration starts and may then be
/// overwritten once per accepted step; the recorded time series has the
/// declared width at every step. [`ChannelRegistry`](crate::ChannelRegistry)
/// enforces that ordering and the width agreement before calls reach the
/// sink.
pub trait RecordSink {
    /// Register a named vector-valued output of fixed width.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine rejects the declaration, e.g. when
    /// recording has already started.
    fn declare_channel(&mut self, name: &str, width: usize) -> Result<()>;

    /// Overwrite the current values of a previously declared channel.
    ///
    /// # Errors
    ///
    /// Returns an error when the engine rejects the write.
    fn write_channel(&mut self, name: &str, values: &[f64]) -> Result<()>;
}
