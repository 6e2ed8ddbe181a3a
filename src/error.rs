//! Error types for instrumentation operations.

use thiserror::Error;

/// Errors that can occur while configuring or feeding instrumentation.
///
/// All of these abort the run when propagated back to the engine; none are
/// recoverable mid-integration, since the output recorded so far would no
/// longer line up with the declared channel schema.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum InstrumentError {
    /// Sensor name missing from the model's sensor index mapping.
    #[error("unknown sensor: {name}")]
    UnknownSensor {
        /// Name that was looked up.
        name: String,
    },

    /// Sensor index rejected by the engine's sensor computation.
    #[error("invalid sensor index: {index}")]
    InvalidSensorIndex {
        /// The rejected index.
        index: u64,
    },

    /// Output channel declared more than once.
    #[error("output channel already declared: {name}")]
    ChannelAlreadyDeclared {
        /// Name of the duplicate channel.
        name: String,
    },

    /// Write to an output channel that was never declared.
    #[error("output channel not declared: {name}")]
    ChannelNotDeclared {
        /// Name of the missing channel.
        name: String,
    },

    /// Written value count differs from the declared channel width.
    #[error("channel {name} width mismatch: declared {declared}, got {got}")]
    WidthMismatch {
        /// Name of the channel.
        name: String,
        /// Width declared at registration.
        declared: usize,
        /// Number of values in the rejected write.
        got: usize,
    },

    /// Output channel declared with zero width.
    #[error("channel {name} must have nonzero width")]
    InvalidWidth {
        /// Name of the channel.
        name: String,
    },

    /// Lifecycle hook invoked out of the engine's guaranteed order.
    #[error("lifecycle violation: {reason}")]
    Lifecycle {
        /// Description of the ordering violation.
        reason: String,
    },
}

impl InstrumentError {
    /// Create an unknown-sensor error.
    #[must_use]
    pub fn unknown_sensor(name: impl Into<String>) -> Self {
        Self::UnknownSensor { name: name.into() }
    }

    /// Create a lifecycle violation error.
    #[must_use]
    pub fn lifecycle(reason: impl Into<String>) -> Self {
        Self::Lifecycle {
            reason: reason.into(),
        }
    }

    /// Check if this is a lifecycle ordering violation.
    #[must_use]
    pub fn is_lifecycle(&self) -> bool {
        matches!(self, Self::Lifecycle { .. })
    }

    /// Check if this is a channel width mismatch.
    #[must_use]
    pub fn is_width_mismatch(&self) -> bool {
        matches!(self, Self::WidthMismatch { .. })
    }
}
