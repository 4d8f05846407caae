//! Manages the WebSocket channel to the live session server.
//!
//! One tokio task owns the session state, the socket, and the display
//! surface. It selects over inbound server events and local control actions,
//! runs each through the session dispatch, and executes the resulting
//! effects in order. Effects of one input run to completion before the next
//! input is polled, so no event is ever interleaved with another.

use crate::{config::Config, render::Surface};
use anyhow::{Context, Result};
use base64::{Engine as _, engine::general_purpose::STANDARD as BASE64};
use clipview_core::{
    protocol::ServerEvent,
    session::{DisplayUpdate, Effect, Session, UiAction},
};
use futures_util::{
    SinkExt, StreamExt,
    stream::{SplitSink, SplitStream},
};
use tokio::{net::TcpStream, sync::mpsc};
use tokio_tungstenite::{
    MaybeTlsStream, WebSocketStream, connect_async, tungstenite::protocol::Message,
};
use tracing::{debug, error, info, warn};

type WsSink = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;
type WsStream = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Dials the server and splits the stream into its two halves.
async fn connect(url: &str) -> Result<(WsSink, WsStream)> {
    let (ws_stream, _) = connect_async(url)
        .await
        .with_context(|| format!("Failed to connect to {url}"))?;
    Ok(ws_stream.split())
}

/// Runs one live session until the server closes the channel, the control
/// surface hangs up, or the transport fails.
pub async fn run<S: Surface>(
    config: &Config,
    mut surface: S,
    mut actions: mpsc::Receiver<UiAction>,
) -> Result<()> {
    let mut session = Session::new();
    let (mut ws_tx, mut ws_rx) = connect(&config.server_url).await?;
    info!(url = %config.server_url, "Connected to live session server");

    loop {
        tokio::select! {
            incoming = ws_rx.next() => {
                match incoming {
                    Some(Ok(Message::Text(text))) => {
                        let event = match serde_json::from_str::<ServerEvent>(&text) {
                            Ok(event) => event,
                            Err(e) => {
                                warn!(error = %e, "Dropping malformed server event");
                                continue;
                            }
                        };
                        log_event(&event);
                        let effects = session.handle_event(event);
                        run_effects(effects, &mut ws_tx, &mut ws_rx, &mut surface, &config.server_url).await?;
                    }
                    Some(Ok(Message::Close(_))) | None => {
                        info!("Server closed the channel.");
                        return Ok(());
                    }
                    Some(Ok(_)) => {}
                    Some(Err(e)) => {
                        return Err(e).context("WebSocket receive failed");
                    }
                }
            }
            action = actions.recv() => {
                let Some(action) = action else {
                    info!("Control surface hung up; shutting down.");
                    return Ok(());
                };
                debug!(?action, "Control action");
                let effects = session.handle_action(action);
                run_effects(effects, &mut ws_tx, &mut ws_rx, &mut surface, &config.server_url).await?;
            }
        }
    }
}

fn log_event(event: &ServerEvent) {
    match event {
        ServerEvent::Frame(payload) => {
            debug!(frame_number = payload.frame_number, "Frame event")
        }
        ServerEvent::Connect => info!("Server reported connect"),
        ServerEvent::Disconnect => info!("Server reported disconnect"),
        ServerEvent::Error(detail) => error!(?detail, "Server reported channel error"),
    }
}

/// Executes one batch of effects in order.
///
/// A `Reconnect` effect replaces both stream halves before any later effect
/// in the batch runs, so a diagnostic emitted after it goes out on the fresh
/// channel.
async fn run_effects<S: Surface>(
    effects: Vec<Effect>,
    ws_tx: &mut WsSink,
    ws_rx: &mut WsStream,
    surface: &mut S,
    url: &str,
) -> Result<()> {
    for effect in effects {
        match effect {
            Effect::Send(msg) => {
                let serialized = serde_json::to_string(&msg)?;
                ws_tx
                    .send(Message::Text(serialized.into()))
                    .await
                    .context("WebSocket send failed")?;
            }
            Effect::Display(update) => apply_display(update, surface),
            Effect::Reconnect => {
                info!(url, "Re-establishing channel after server error");
                let (tx, rx) = connect(url).await?;
                *ws_tx = tx;
                *ws_rx = rx;
            }
            Effect::Notify(text) => surface.notice(&text),
        }
    }
    Ok(())
}

fn apply_display<S: Surface>(update: DisplayUpdate, surface: &mut S) {
    match update {
        DisplayUpdate::ShowFrame(encoded) => match BASE64.decode(encoded.as_bytes()) {
            Ok(jpeg) => surface.show_frame(&jpeg),
            Err(e) => warn!(error = %e, "Dropping frame with invalid base64 image"),
        },
        DisplayUpdate::AddTrace { title } => surface.add_trace(&title),
        DisplayUpdate::AppendSample {
            trace,
            frame_number,
            value,
        } => surface.append_sample(trace, frame_number, value),
        DisplayUpdate::MoveMarker(frame_number) => surface.move_marker(frame_number),
        DisplayUpdate::ClearChart => surface.clear_chart(),
    }
}
