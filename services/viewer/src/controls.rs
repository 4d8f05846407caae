//! The headless control surface.
//!
//! Stands in for the four UI controls of a graphical frontend: a
//! line-oriented command language read from stdin, forwarded to the
//! connection task as [`UiAction`]s.

use anyhow::{Result, anyhow};
use clipview_core::session::UiAction;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{info, warn};

/// One parsed control command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Action(UiAction),
    Quit,
}

/// Parses one input line into a command.
///
/// Recognized commands: `start`, `stop`, `reset`, `seek <frame>`, `quit`.
pub fn parse(line: &str) -> Result<Command> {
    let mut words = line.split_whitespace();
    let command = match words.next() {
        Some(word) => word,
        None => return Err(anyhow!("empty command")),
    };

    let command = match (command, words.next()) {
        ("start", None) => Command::Action(UiAction::Start),
        ("stop", None) => Command::Action(UiAction::Stop),
        ("reset", None) => Command::Action(UiAction::Reset),
        ("seek", Some(frame)) => {
            let frame_number = frame
                .parse::<u64>()
                .map_err(|_| anyhow!("'{}' is not a frame number", frame))?;
            Command::Action(UiAction::Seek { frame_number })
        }
        ("seek", None) => return Err(anyhow!("seek requires a frame number")),
        ("quit", None) => Command::Quit,
        (other, _) => return Err(anyhow!("unknown command '{}'", other)),
    };

    if words.next().is_some() {
        return Err(anyhow!("trailing input after command"));
    }
    Ok(command)
}

/// Reads commands from stdin and forwards the resulting actions.
///
/// Returns when the user quits, stdin closes, or the connection task hangs
/// up; dropping the sender tells the connection task to shut down.
pub async fn stdin_controls(actions: mpsc::Sender<UiAction>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    info!("Controls ready: start | stop | reset | seek <frame> | quit");

    while let Ok(Some(line)) = lines.next_line().await {
        if line.trim().is_empty() {
            continue;
        }
        match parse(&line) {
            Ok(Command::Action(action)) => {
                if actions.send(action).await.is_err() {
                    break;
                }
            }
            Ok(Command::Quit) => break,
            Err(e) => warn!(input = %line, error = %e, "Ignoring control input"),
        }
    }
    info!("Control surface closed.");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_simple_commands() {
        assert_eq!(parse("start").unwrap(), Command::Action(UiAction::Start));
        assert_eq!(parse("stop").unwrap(), Command::Action(UiAction::Stop));
        assert_eq!(parse("reset").unwrap(), Command::Action(UiAction::Reset));
        assert_eq!(parse("quit").unwrap(), Command::Quit);
    }

    #[test]
    fn test_parse_seek() {
        assert_eq!(
            parse("seek 42").unwrap(),
            Command::Action(UiAction::Seek { frame_number: 42 }),
        );
        assert!(parse("seek").is_err());
        assert!(parse("seek abc").is_err());
        assert!(parse("seek -3").is_err());
    }

    #[test]
    fn test_parse_tolerates_surrounding_whitespace() {
        assert_eq!(
            parse("  seek   7  ").unwrap(),
            Command::Action(UiAction::Seek { frame_number: 7 }),
        );
    }

    #[test]
    fn test_parse_rejects_garbage() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
        assert!(parse("play").is_err());
        assert!(parse("start now").is_err());
        assert!(parse("seek 1 2").is_err());
    }
}
