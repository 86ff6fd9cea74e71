//! Operator console on stdin.
//!
//! One command per line:
//!
//! | Command | Effect |
//! |---------|--------|
//! | `pause` | Pause the frame loop |
//! | `resume` | Resume the frame loop |
//! | `speed <ms>` | Set the real-time pause between frames |
//! | `warp <minute>` | Jump the clock to the start of minute 1..=6 |
//! | `stop` | Stop after the current frame |
//!
//! The console runs on its own thread with blocking reads, so a quiet
//! stdin never holds up runtime shutdown.

use std::io::BufRead;
use std::sync::Arc;

use paradise_core::controls::RunControls;
use tracing::{info, warn};

/// A parsed operator command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Pause the frame loop.
    Pause,
    /// Resume the frame loop.
    Resume,
    /// New frame interval in milliseconds.
    Speed(u64),
    /// Warp to the start of a minute.
    Warp(u8),
    /// Stop the run.
    Stop,
}

/// A line the console could not understand.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    /// The first word is not a command.
    #[error("unknown command {0:?}")]
    Unknown(String),

    /// The command needs an argument it did not get.
    #[error("{command} needs a number")]
    MissingArgument {
        /// The command as typed.
        command: &'static str,
    },

    /// The argument is not a number.
    #[error("{command}: {value:?} is not a number")]
    BadArgument {
        /// The command as typed.
        command: &'static str,
        /// The argument as typed.
        value: String,
    },
}

impl Command {
    /// Parse one input line. Blank lines yield `None`.
    ///
    /// # Errors
    ///
    /// Returns [`CommandError`] for unknown commands or bad arguments.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let mut words = line.split_whitespace();
        let Some(word) = words.next() else {
            return Ok(None);
        };
        let command = match word.to_ascii_lowercase().as_str() {
            "pause" => Self::Pause,
            "resume" => Self::Resume,
            "stop" | "quit" => Self::Stop,
            "speed" => Self::Speed(argument("speed", words.next())?),
            "warp" => Self::Warp(argument("warp", words.next())?),
            _ => return Err(CommandError::Unknown(word.to_owned())),
        };
        Ok(Some(command))
    }

    /// Apply the command to the shared controls. Returns a reply line.
    pub fn apply(self, controls: &RunControls) -> String {
        match self {
            Self::Pause => {
                controls.pause();
                "Simulation paused".to_owned()
            }
            Self::Resume => {
                controls.resume();
                "Simulation resumed".to_owned()
            }
            Self::Speed(ms) => {
                let previous = controls.set_frame_interval_ms(ms);
                format!("Frame interval changed from {previous}ms to {ms}ms")
            }
            Self::Warp(minute) => match controls.request_warp(minute) {
                Ok(()) => format!("Warping to minute {minute}"),
                Err(e) => format!("Warp refused: {e}"),
            },
            Self::Stop => {
                controls.request_stop();
                "Stopping after this frame".to_owned()
            }
        }
    }
}

fn argument<T: std::str::FromStr>(
    command: &'static str,
    value: Option<&str>,
) -> Result<T, CommandError> {
    let value = value.ok_or(CommandError::MissingArgument { command })?;
    value.parse().map_err(|_| CommandError::BadArgument {
        command,
        value: value.to_owned(),
    })
}

/// Read commands from stdin on a background thread until EOF.
pub fn spawn(controls: Arc<RunControls>) {
    let spawned = std::thread::Builder::new()
        .name("operator-console".to_owned())
        .spawn(move || {
            let stdin = std::io::stdin();
            for line in stdin.lock().lines() {
                let line = match line {
                    Ok(l) => l,
                    Err(e) => {
                        warn!(error = %e, "stdin read error, console closed");
                        break;
                    }
                };
                match Command::parse(&line) {
                    Ok(Some(command)) => info!(?command, "{}", command.apply(&controls)),
                    Ok(None) => {}
                    Err(e) => warn!(error = %e, "Ignored console input"),
                }
            }
        });
    if let Err(e) = spawned {
        warn!(error = %e, "Could not start the operator console");
    }
}
