//! Clipboard access for copy buttons.

use std::io::Write;
use std::process::{Child, Command, ExitStatus, Stdio};

use thiserror::Error;

/// Destination for copied snippets.
pub trait Clipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError>;
}

/// Helpers tried in order; the first one that exists wins.
const HELPERS: &[(&str, &[&str])] = &[
    ("pbcopy", &[]),
    ("wl-copy", &[]),
    ("xclip", &["-selection", "clipboard"]),
    ("xsel", &["--clipboard", "--input"]),
];

/// Pipes text into the platform's clipboard helper.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl Clipboard for SystemClipboard {
    fn write_text(&mut self, text: &str) -> Result<(), ClipboardError> {
        for &(program, args) in HELPERS {
            let child = Command::new(program)
                .args(args)
                .stdin(Stdio::piped())
                .stdout(Stdio::null())
                .stderr(Stdio::null())
                .spawn();
            let mut child = match child {
                Ok(c) => c,
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => continue,
                Err(e) => return Err(ClipboardError::Spawn(program, e)),
            };

            let status = feed(&mut child, program, text)?;
            if !status.success() {
                return Err(ClipboardError::Failed { program, status });
            }
            tracing::debug!(program, bytes = text.len(), "copied to clipboard");
            return Ok(());
        }
        Err(ClipboardError::NoHelper)
    }
}

/// Write `text` to the child's stdin and reap it. The child is always
/// waited on, even when the write fails.
fn feed(child: &mut Child, program: &'static str, text: &str) -> Result<ExitStatus, ClipboardError> {
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    if let Err(e) = written {
        let _ = child.kill();
        let _ = child.wait();
        return Err(ClipboardError::Write(program, e));
    }
    child.wait().map_err(|e| ClipboardError::Write(program, e))
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("No clipboard helper found (tried pbcopy, wl-copy, xclip, xsel)")]
    NoHelper,
    #[error("Failed to start {0}")]
    Spawn(&'static str, #[source] std::io::Error),
    #[error("Failed to write to {0}")]
    Write(&'static str, #[source] std::io::Error),
    #[error("{program} exited with {status}")]
    Failed {
        program: &'static str,
        status: ExitStatus,
    },
}
