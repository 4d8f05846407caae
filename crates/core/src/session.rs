//! The live session state machine.
//!
//! [`Session`] owns the chart model and maps every inbound server event and
//! every local UI action to an ordered list of [`Effect`]s. The mapping is
//! pure: the runner in `clipview-viewer` executes the effects against the
//! real socket and display surface, and tests execute nothing at all.

use crate::chart::ChartState;
use crate::protocol::{ClientMessage, FramePayload, ServerEvent};

/// Text of the user-visible notice raised on a channel error.
pub const CONNECTION_ERROR_NOTICE: &str =
    "A connection error occurred. Attempting to reconnect to the server.";

/// A local control input, one per UI control.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiAction {
    Start,
    Stop,
    Reset,
    /// Click-to-seek on the chart at the given x position.
    Seek { frame_number: u64 },
}

/// One incremental change to the display surface.
#[derive(Debug, Clone, PartialEq)]
pub enum DisplayUpdate {
    /// Replace the displayed image with these base64-encoded JPEG bytes.
    ShowFrame(String),
    /// Create a new, empty trace at the end of the chart.
    AddTrace { title: String },
    /// Append one sample to the trace at `trace`.
    AppendSample {
        trace: usize,
        frame_number: u64,
        value: f64,
    },
    /// Replace the vertical reference marker, spanning the chart's full height.
    MoveMarker(u64),
    /// Recreate the chart from empty. Click handling must survive this.
    ClearChart,
}

/// A side effect requested by the session, to be executed in order.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    /// Emit a message upstream.
    Send(ClientMessage),
    /// Update the display surface.
    Display(DisplayUpdate),
    /// Re-establish the channel to the server.
    Reconnect,
    /// Surface a user-visible notice.
    Notify(String),
}

/// All client-side state for one live session.
#[derive(Debug, Default)]
pub struct Session {
    chart: ChartState,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read access to the chart model, for rendering and assertions.
    pub fn chart(&self) -> &ChartState {
        &self.chart
    }

    /// Dispatches one inbound server event.
    pub fn handle_event(&mut self, event: ServerEvent) -> Vec<Effect> {
        match event {
            ServerEvent::Frame(payload) => self.handle_frame(payload),
            // Lifecycle notifications carry no state change; the connection
            // layer logs them.
            ServerEvent::Connect | ServerEvent::Disconnect => Vec::new(),
            ServerEvent::Error(detail) => vec![
                Effect::Reconnect,
                Effect::Notify(CONNECTION_ERROR_NOTICE.to_string()),
                Effect::Send(ClientMessage::ClientError { error: detail }),
            ],
        }
    }

    /// Dispatches one local UI action.
    pub fn handle_action(&mut self, action: UiAction) -> Vec<Effect> {
        match action {
            UiAction::Start => vec![Effect::Send(ClientMessage::start())],
            UiAction::Stop => vec![Effect::Send(ClientMessage::stop())],
            UiAction::Reset => {
                self.chart.clear();
                vec![
                    Effect::Send(ClientMessage::Reset),
                    Effect::Display(DisplayUpdate::ClearChart),
                ]
            }
            UiAction::Seek { frame_number } => vec![Effect::Send(ClientMessage::SetFrame {
                frame_number,
                // The server reads the clicked x position under both names.
                time: frame_number,
            })],
        }
    }

    fn handle_frame(&mut self, payload: FramePayload) -> Vec<Effect> {
        let frame_number = payload.frame_number;
        let mut effects = Vec::new();

        if payload.set_frame.is_some() {
            // Seek echo: new image, traces untouched.
            effects.push(Effect::Display(DisplayUpdate::ShowFrame(payload.frame)));
        } else if payload.set_line.is_some() {
            // Replay of an already-charted frame: marker only.
        } else {
            effects.push(Effect::Display(DisplayUpdate::ShowFrame(payload.frame)));
            if let Some(lines) = &payload.lines {
                let known = self.chart.trace_count();
                self.chart.observe_lines(frame_number, lines);
                for line in lines.iter().skip(known) {
                    effects.push(Effect::Display(DisplayUpdate::AddTrace {
                        title: line.title.clone(),
                    }));
                }
                for (trace, line) in lines.iter().enumerate() {
                    effects.push(Effect::Display(DisplayUpdate::AppendSample {
                        trace,
                        frame_number,
                        value: line.value,
                    }));
                }
            }
        }

        // Every branch replaces the marker and acknowledges exactly once.
        self.chart.set_marker(frame_number);
        effects.push(Effect::Display(DisplayUpdate::MoveMarker(frame_number)));
        effects.push(Effect::Send(ClientMessage::SuccessfulFrameNumber {
            frame_number,
        }));
        effects
    }
}
