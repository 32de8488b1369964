use std::io::Write;
use std::process::{Command, Stdio};

use log::{debug, warn};

use crate::core::error::AppError;

/// Write-only access to the system clipboard.
pub trait Clipboard: Send {
    fn copy(&mut self, text: &str) -> Result<(), AppError>;
}

/// Copies through whichever clipboard tool the platform provides:
/// `pbcopy` on macOS, `wl-copy` under Wayland, `xclip` elsewhere.
#[derive(Debug, Default)]
pub struct SystemClipboard;

impl SystemClipboard {
    fn candidates() -> Vec<(&'static str, &'static [&'static str])> {
        let mut tools: Vec<(&'static str, &'static [&'static str])> = Vec::new();
        if cfg!(target_os = "macos") {
            tools.push(("pbcopy", &[]));
        }
        if std::env::var("WAYLAND_DISPLAY").is_ok() {
            tools.push(("wl-copy", &[]));
        }
        tools.push(("xclip", &["-selection", "clipboard"]));
        tools
    }
}

/// Pipes `text` into one clipboard tool. The child is always waited on,
/// even when the write fails.
fn copy_with(program: &str, args: &[&str], text: &str) -> bool {
    let Ok(mut child) = Command::new(program)
        .args(args)
        .stdin(Stdio::piped())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
    else {
        debug!("Clipboard tool {program} not available");
        return false;
    };

    // Dropping stdin closes the pipe so the tool can exit.
    let written = match child.stdin.take() {
        Some(mut stdin) => stdin.write_all(text.as_bytes()),
        None => Ok(()),
    };
    let status = child.wait();

    if let Err(e) = written {
        warn!("Writing to clipboard tool {program} failed: {e}");
        return false;
    }
    match status {
        Ok(status) if status.success() => {
            debug!("Copied {} bytes with {program}", text.len());
            true
        }
        Ok(status) => {
            warn!("Clipboard tool {program} exited with {status}");
            false
        }
        Err(e) => {
            warn!("Waiting on clipboard tool {program} failed: {e}");
            false
        }
    }
}

impl Clipboard for SystemClipboard {
    fn copy(&mut self, text: &str) -> Result<(), AppError> {
        if Self::candidates()
            .into_iter()
            .any(|(program, args)| copy_with(program, args, text))
        {
            return Ok(());
        }
        Err(AppError::Clipboard(
            "Failed to copy command to clipboard".to_string(),
        ))
    }
}
