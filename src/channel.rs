//! Output channel registry.
//!
//! Declaration (during `initialize`) and use (during `step`) of a named
//! output channel are two distinct operations on the engine's recording
//! facility, and nothing on the engine side ties them together. The
//! [`ChannelRegistry`] keeps that book locally: a write is forwarded to
//! the sink only for a name previously declared through the same registry,
//! and only with exactly the declared number of values.

use std::collections::HashMap;

use crate::engine::RecordSink;
use crate::error::InstrumentError;
use crate::Result;

/// Bookkeeping for declared output channels.
///
/// Wraps every declare and write to a [`RecordSink`], rejecting duplicate
/// declarations, writes to undeclared names, and writes whose value count
/// differs from the declared width.
#[derive(Debug, Clone, Default)]
pub struct ChannelRegistry {
    widths: HashMap<String, usize>,
}

impl ChannelRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a named channel of fixed width and register it with the sink.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::InvalidWidth`] for a zero width,
    /// [`InstrumentError::ChannelAlreadyDeclared`] for a repeated name, or
    /// the sink's own error when the engine rejects the declaration.
    pub fn declare<S: RecordSink>(&mut self, sink: &mut S, name: &str, width: usize) -> Result<()> {
        if width == 0 {
            return Err(InstrumentError::InvalidWidth {
                name: name.to_string(),
            });
        }
        if self.widths.contains_key(name) {
            return Err(InstrumentError::ChannelAlreadyDeclared {
                name: name.to_string(),
            });
        }
        sink.declare_channel(name, width)?;
        self.widths.insert(name.to_string(), width);
        tracing::debug!(channel = name, width, "declared output channel");
        Ok(())
    }

    /// Write the current values of a declared channel to the sink.
    ///
    /// # Errors
    ///
    /// Returns [`InstrumentError::ChannelNotDeclared`] for an unknown name,
    /// [`InstrumentError::WidthMismatch`] when `values.len()` differs from
    /// the declared width, or the sink's own error when the engine rejects
    /// the write.
    pub fn write<S: RecordSink>(&self, sink: &mut S, name: &str, values: &[f64]) -> Result<()> {
        let declared = *self
            .widths
            .get(name)
            .ok_or_else(|| InstrumentError::ChannelNotDeclared {
                name: name.to_string(),
            })?;
        if values.len() != declared {
            return Err(InstrumentError::WidthMismatch {
                name: name.to_string(),
                declared,
                got: values.len(),
            });
        }
        sink.write_channel(name, values)
    }

    /// Get the declared width of a channel, if declared.
    #[must_use]
    pub fn width_of(&self, name: &str) -> Option<usize> {
        self.widths.get(name).copied()
    }

    /// Check whether a channel has been declared.
    #[must_use]
    pub fn is_declared(&self, name: &str) -> bool {
        self.widths.contains_key(name)
    }

    /// Number of declared channels.
    #[must_use]
    pub fn len(&self) -> usize {
        self.widths.len()
    }

    /// Check whether no channel has been declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.widths.is_empty()
    }
}
