//! The display surface seam.
//!
//! The session core emits incremental display updates; a [`Surface`]
//! implementation turns them into something visible. The provided
//! [`LogSurface`] narrates every update through `tracing` and can mirror the
//! current frame to a file, which stands in for the image element of a
//! graphical frontend.

use std::path::PathBuf;
use tracing::{error, info, warn};

/// Receives the incremental display updates produced by the session.
///
/// Calls arrive in effect order, on the connection task, and are expected to
/// complete synchronously. `notice` in particular must not return until the
/// user-visible notice has been surfaced: the ordering guarantee for error
/// handling (reconnect, then notice, then diagnostic emission) depends on it.
pub trait Surface {
    /// Replace the displayed image with the decoded JPEG bytes of a frame.
    fn show_frame(&mut self, jpeg: &[u8]);
    /// Create a new, empty trace at the end of the chart.
    fn add_trace(&mut self, title: &str);
    /// Append one sample to an existing trace.
    fn append_sample(&mut self, trace: usize, frame_number: u64, value: f64);
    /// Replace the vertical reference marker.
    fn move_marker(&mut self, frame_number: u64);
    /// Recreate the chart from empty.
    fn clear_chart(&mut self);
    /// Surface a user-visible notice.
    fn notice(&mut self, text: &str);
}

/// A headless surface that logs every update and optionally persists the
/// current frame's JPEG bytes to disk.
#[derive(Debug, Default)]
pub struct LogSurface {
    frame_out: Option<PathBuf>,
    trace_titles: Vec<String>,
}

impl LogSurface {
    pub fn new(frame_out: Option<PathBuf>) -> Self {
        Self {
            frame_out,
            trace_titles: Vec::new(),
        }
    }

    fn trace_title(&self, trace: usize) -> &str {
        self.trace_titles
            .get(trace)
            .map(String::as_str)
            .unwrap_or("?")
    }
}

impl Surface for LogSurface {
    fn show_frame(&mut self, jpeg: &[u8]) {
        if let Some(path) = &self.frame_out {
            if let Err(e) = std::fs::write(path, jpeg) {
                error!(path = %path.display(), error = %e, "Failed to write current frame");
            }
        }
        info!(bytes = jpeg.len(), "Frame updated");
    }

    fn add_trace(&mut self, title: &str) {
        self.trace_titles.push(title.to_string());
        info!(title, "New trace added to chart");
    }

    fn append_sample(&mut self, trace: usize, frame_number: u64, value: f64) {
        info!(
            trace = self.trace_title(trace),
            frame_number, value, "Sample appended"
        );
    }

    fn move_marker(&mut self, frame_number: u64) {
        info!(frame_number, "Reference marker moved");
    }

    fn clear_chart(&mut self) {
        self.trace_titles.clear();
        info!("Chart cleared");
    }

    fn notice(&mut self, text: &str) {
        warn!(notice = text, "User notice");
    }
}
