//! Incrementally growing chart state for the similarity plot.
//!
//! Traces are identified by position, never by key. They are only ever
//! appended, and samples within a trace are only ever appended; the one way
//! back to empty is an explicit [`ChartState::clear`].

use crate::protocol::LineSample;

/// One named line on the chart, as parallel (x, y) sample vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct Trace {
    pub name: String,
    pub x: Vec<u64>,
    pub y: Vec<f64>,
}

impl Trace {
    fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            x: Vec::new(),
            y: Vec::new(),
        }
    }
}

/// The full client-side chart model: the traces plus the vertical marker
/// indicating the currently displayed frame.
#[derive(Debug, Clone, Default)]
pub struct ChartState {
    traces: Vec<Trace>,
    marker: Option<u64>,
}

impl ChartState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn traces(&self) -> &[Trace] {
        &self.traces
    }

    pub fn trace_count(&self) -> usize {
        self.traces.len()
    }

    /// X position of the reference marker, if one has been placed since the
    /// last reset.
    pub fn marker(&self) -> Option<u64> {
        self.marker
    }

    /// Folds one full line update into the chart.
    ///
    /// Creates an empty trace for every index beyond the current count,
    /// named after the corresponding sample's title, then appends one
    /// (frame_number, value) point per reported index. Returns the number of
    /// traces created.
    pub fn observe_lines(&mut self, frame_number: u64, lines: &[LineSample]) -> usize {
        let added = lines.len().saturating_sub(self.traces.len());
        for line in lines.iter().skip(self.traces.len()) {
            self.traces.push(Trace::new(&line.title));
        }
        for (trace, line) in self.traces.iter_mut().zip(lines) {
            trace.x.push(frame_number);
            trace.y.push(line.value);
        }
        added
    }

    /// Replaces the reference marker wholesale.
    pub fn set_marker(&mut self, frame_number: u64) {
        self.marker = Some(frame_number);
    }

    /// Discards every trace and the marker, recreating the chart from empty.
    pub fn clear(&mut self) {
        self.traces.clear();
        self.marker = None;
    }
}
