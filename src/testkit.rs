//! Scripted engine stand-ins shared by the unit tests.

use std::collections::HashMap;

use crate::engine::{Model, RecordSink};
use crate::error::InstrumentError;
use crate::types::{SensorFrame, SensorIndex};
use crate::Result;

/// Model with a fixed sensor table and scripted frames per sensor.
#[derive(Debug, Clone, Default)]
pub struct MockModel {
    sensors: HashMap<String, SensorIndex>,
    frames: HashMap<u64, SensorFrame>,
}

impl MockModel {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a sensor under `name` with the frame every compute returns.
    pub fn with_sensor(mut self, name: &str, index: u64, frame: SensorFrame) -> Self {
        self.sensors.insert(name.to_string(), SensorIndex::new(index));
        self.frames.insert(index, frame);
        self
    }

    /// Change the frame a registered sensor computes to.
    pub fn set_frame(&mut self, index: u64, frame: SensorFrame) {
        self.frames.insert(index, frame);
    }
}

impl Model for MockModel {
    fn sensor_index(&self, name: &str) -> Option<SensorIndex> {
        self.sensors.get(name).copied()
    }

    fn compute_sensor(&self, index: SensorIndex) -> Result<SensorFrame> {
        self.frames
            .get(&index.raw())
            .copied()
            .ok_or(InstrumentError::InvalidSensorIndex { index: index.raw() })
    }
}

/// One operation that reached the sink.
#[derive(Debug, Clone, PartialEq)]
pub enum SinkOp {
    Declare { name: String, width: usize },
    Write { name: String, values: Vec<f64> },
}

/// Sink that records every operation in order, for assertions.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    pub ops: Vec<SinkOp>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// All writes to `name`, in order.
    pub fn writes<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a [f64]> + 'a {
        self.ops.iter().filter_map(move |op| match op {
            SinkOp::Write { name: n, values } if n == name => Some(values.as_slice()),
            _ => None,
        })
    }

    /// The most recent write to `name`, if any.
    pub fn last_write<'a>(&'a self, name: &'a str) -> Option<&'a [f64]> {
        self.writes(name).last()
    }
}

impl RecordSink for RecordingSink {
    fn declare_channel(&mut self, name: &str, width: usize) -> Result<()> {
        self.ops.push(SinkOp::Declare {
            name: name.to_string(),
            width,
        });
        Ok(())
    }

    fn write_channel(&mut self, name: &str, values: &[f64]) -> Result<()> {
        self.ops.push(SinkOp::Write {
            name: name.to_string(),
            values: values.to_vec(),
        });
        Ok(())
    }
}
