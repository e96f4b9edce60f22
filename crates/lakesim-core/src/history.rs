//! Per-tick time series and the logging seam.
//!
//! The lake appends one [`TimeSeriesPoint`] per update to its own
//! [`TimeSeries`], which the shutdown summary and the observer read back.
//! External sinks (the CSV writer in the engine, test recorders) implement
//! [`TickLog`] and receive the same point from the run loop.

use std::io;

use lakesim_types::TimeSeriesPoint;
use serde::Serialize;

/// Destination for per-tick time-series points.
pub trait TickLog: Send {
    /// Append one tick's point. Points arrive in tick order.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    fn record(&mut self, point: &TimeSeriesPoint) -> io::Result<()>;

    /// Flush buffered output. The default does nothing.
    ///
    /// # Errors
    ///
    /// Returns the sink's I/O error.
    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

/// In-memory fish, food, and oxygen series in tick order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TimeSeries {
    points: Vec<TimeSeriesPoint>,
}

impl TimeSeries {
    /// Create an empty series.
    pub const fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Append a point.
    pub fn push(&mut self, point: TimeSeriesPoint) {
        self.points.push(point);
    }

    /// All points in tick order.
    pub fn points(&self) -> &[TimeSeriesPoint] {
        &self.points
    }

    /// Points recorded strictly after `tick`.
    pub fn since(&self, tick: u64) -> &[TimeSeriesPoint] {
        let start = self.points.partition_point(|p| p.tick <= tick);
        self.points.get(start..).unwrap_or_default()
    }

    /// Most recent point.
    pub fn last(&self) -> Option<&TimeSeriesPoint> {
        self.points.last()
    }

    /// Number of recorded points.
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether nothing has been recorded.
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Drop the oldest points so at most `count` remain.
    pub fn retain_last(&mut self, count: usize) {
        let excess = self.points.len().saturating_sub(count);
        self.points.drain(..excess);
    }
}

impl TickLog for TimeSeries {
    fn record(&mut self, point: &TimeSeriesPoint) -> io::Result<()> {
        self.push(*point);
        Ok(())
    }
}
