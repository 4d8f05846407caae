//! Defines the JSON message protocol between the live session client and the server.
//!
//! Every message on the channel is an envelope of the form
//! `{"event": "<name>", "data": <payload>}`; events without a payload omit
//! the `data` member entirely.

use serde::{Deserialize, Serialize};

/// Events sent from the server to the client.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ServerEvent {
    /// A new frame of the stream, optionally carrying per-series values.
    Frame(FramePayload),
    /// The server considers the channel established.
    Connect,
    /// The server is tearing the channel down.
    Disconnect,
    /// A channel-level transport error with opaque diagnostic detail.
    Error(serde_json::Value),
}

/// Payload of a `frame` event.
///
/// The optional `set_frame` and `set_line` members are markers, not values:
/// their mere presence selects the frame-only or marker-only update branch.
/// When neither is present the event is a full update and `lines` carries
/// the current value of every series.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct FramePayload {
    /// Base64-encoded JPEG bytes of the current frame.
    pub frame: String,
    pub frame_number: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_frame: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_line: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lines: Option<Vec<LineSample>>,
}

/// The current value of one chart series, as reported by the server.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineSample {
    pub title: String,
    pub value: f64,
}

/// Messages sent from the client to the server.
///
/// All of these are fire-and-forget; the client never waits for a reply.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(tag = "event", content = "data", rename_all = "snake_case")]
pub enum ClientMessage {
    /// Asks the server to start streaming frames.
    Start { data: String },
    /// Asks the server to pause streaming.
    Stop { data: String },
    /// Asks the server to rewind to frame zero and drop its progress state.
    Reset,
    /// Seeks to a specific frame, as picked on the chart.
    SetFrame { frame_number: u64, time: u64 },
    /// Acknowledges that a `frame` event has been fully processed.
    SuccessfulFrameNumber { frame_number: u64 },
    /// Forwards a channel error back to the server for diagnostics.
    ClientError { error: serde_json::Value },
}

impl ClientMessage {
    /// The `start` request with its fixed literal payload.
    pub fn start() -> Self {
        Self::Start {
            data: "Start".to_string(),
        }
    }

    /// The `stop` request with its fixed literal payload.
    pub fn stop() -> Self {
        Self::Stop {
            data: "Stop".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_frame_event_roundtrip() {
        let wire = json!({
            "event": "frame",
            "data": {
                "frame": "aGVsbG8=",
                "frame_number": 5,
                "lines": [
                    {"title": "A", "value": 0.2},
                    {"title": "B", "value": 0.7},
                ],
            },
        });

        let event: ServerEvent = serde_json::from_value(wire.clone()).unwrap();
        match &event {
            ServerEvent::Frame(payload) => {
                assert_eq!(payload.frame_number, 5);
                assert!(payload.set_frame.is_none());
                assert!(payload.set_line.is_none());
                let lines = payload.lines.as_ref().unwrap();
                assert_eq!(lines.len(), 2);
                assert_eq!(lines[0].title, "A");
                assert_eq!(lines[1].value, 0.7);
            }
            other => panic!("Expected frame event, got {:?}", other),
        }

        assert_eq!(serde_json::to_value(&event).unwrap(), wire);
    }

    #[test]
    fn test_frame_event_markers() {
        let event: ServerEvent = serde_json::from_value(json!({
            "event": "frame",
            "data": {"frame": "x", "frame_number": 3, "set_frame": true},
        }))
        .unwrap();
        let ServerEvent::Frame(payload) = event else {
            panic!("Expected frame event");
        };
        // Marker presence is what matters, not the value.
        assert!(payload.set_frame.is_some());
        assert!(payload.set_line.is_none());
        assert!(payload.lines.is_none());
    }

    #[test]
    fn test_lifecycle_events_have_no_payload() {
        let connect: ServerEvent = serde_json::from_value(json!({"event": "connect"})).unwrap();
        assert_eq!(connect, ServerEvent::Connect);

        let disconnect: ServerEvent =
            serde_json::from_value(json!({"event": "disconnect"})).unwrap();
        assert_eq!(disconnect, ServerEvent::Disconnect);
    }

    #[test]
    fn test_error_event_keeps_opaque_detail() {
        let event: ServerEvent = serde_json::from_value(json!({
            "event": "error",
            "data": {"code": "ECONNRESET", "attempt": 3},
        }))
        .unwrap();
        let ServerEvent::Error(detail) = event else {
            panic!("Expected error event");
        };
        assert_eq!(detail["code"], "ECONNRESET");
        assert_eq!(detail["attempt"], 3);
    }

    #[test]
    fn test_control_messages_wire_shape() {
        assert_eq!(
            serde_json::to_value(ClientMessage::start()).unwrap(),
            json!({"event": "start", "data": {"data": "Start"}}),
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::stop()).unwrap(),
            json!({"event": "stop", "data": {"data": "Stop"}}),
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::Reset).unwrap(),
            json!({"event": "reset"}),
        );
    }

    #[test]
    fn test_seek_and_ack_wire_shape() {
        assert_eq!(
            serde_json::to_value(ClientMessage::SetFrame {
                frame_number: 42,
                time: 42,
            })
            .unwrap(),
            json!({"event": "set_frame", "data": {"frame_number": 42, "time": 42}}),
        );
        assert_eq!(
            serde_json::to_value(ClientMessage::SuccessfulFrameNumber { frame_number: 6 }).unwrap(),
            json!({"event": "successful_frame_number", "data": {"frame_number": 6}}),
        );
    }
}
