//! Clipboard and URL handler backed by the platform's command-line tools.

use std::io::Write;
use std::process::{Command, Stdio};

use crate::model::config::AppConfig;
use crate::ops::share::{CapabilityError, Clipboard, UrlOpener};

/// Copies text by piping it into a clipboard tool.
#[derive(Debug, Clone)]
pub struct SystemClipboard {
    command: Option<Vec<String>>,
}

impl SystemClipboard {
    pub fn from_config(config: &AppConfig) -> Self {
        SystemClipboard {
            command: config.clipboard_command.clone().or_else(default_clipboard_command),
        }
    }
}

fn default_clipboard_command() -> Option<Vec<String>> {
    let wayland = std::env::var_os("WAYLAND_DISPLAY").is_some();
    to_argv(clipboard_argv(std::env::consts::OS, wayland))
}

/// Stock clipboard tool for `os`. Windows `clip` reads stdin in the console
/// code page and garbles non-ASCII, so Windows needs `clipboard_command`.
fn clipboard_argv(os: &str, wayland: bool) -> &'static [&'static str] {
    match os {
        "macos" => &["pbcopy"],
        "linux" if wayland => &["wl-copy"],
        "linux" => &["xclip", "-selection", "clipboard"],
        _ => &[],
    }
}

impl Clipboard for SystemClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), CapabilityError> {
        let (program, args) = split_command(self.command.as_deref(), "clipboard")?;
        tracing::debug!(program, "writing clipboard");
        let mut child = Command::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .spawn()
            .map_err(|e| CapabilityError::Spawn {
                program: program.to_string(),
                source: e,
            })?;
        // stdin is closed at the end of the match so the tool sees EOF
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(text.as_bytes()),
            None => Ok(()),
        };
        let status = child.wait().map_err(|e| CapabilityError::Spawn {
            program: program.to_string(),
            source: e,
        })?;
        check_status(program, status)?;
        written.map_err(|e| CapabilityError::Spawn {
            program: program.to_string(),
            source: e,
        })
    }
}

/// Opens links with the desktop's default handler.
#[derive(Debug, Clone)]
pub struct SystemOpener {
    command: Option<Vec<String>>,
}

impl SystemOpener {
    pub fn from_config(config: &AppConfig) -> Self {
        SystemOpener {
            command: config.open_command.clone().or_else(default_open_command),
        }
    }
}

fn default_open_command() -> Option<Vec<String>> {
    to_argv(open_argv(std::env::consts::OS))
}

/// Stock URL handler for `os`. The URL is appended as the last argument;
/// `cmd /C start` would split it at `&`.
fn open_argv(os: &str) -> &'static [&'static str] {
    match os {
        "macos" => &["open"],
        "linux" => &["xdg-open"],
        "windows" => &["rundll32", "url.dll,FileProtocolHandler"],
        _ => &[],
    }
}

fn to_argv(argv: &[&str]) -> Option<Vec<String>> {
    if argv.is_empty() {
        None
    } else {
        Some(argv.iter().map(|s| s.to_string()).collect())
    }
}

impl UrlOpener for SystemOpener {
    fn open(&mut self, url: &str) -> Result<(), CapabilityError> {
        if !has_dispatchable_scheme(url) {
            return Err(CapabilityError::Rejected(format!(
                "no handler for '{}'",
                url
            )));
        }
        let (program, args) = split_command(self.command.as_deref(), "open")?;
        tracing::debug!(program, url, "opening link");
        let status = Command::new(program)
            .args(args)
            .arg(url)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .status()
            .map_err(|e| CapabilityError::Spawn {
                program: program.to_string(),
                source: e,
            })?;
        check_status(program, status)
    }
}

/// Only web and mail links are ever produced; refuse anything else rather
/// than hand it to a generic opener.
fn has_dispatchable_scheme(url: &str) -> bool {
    let lower = url.to_ascii_lowercase();
    ["https://", "http://", "mailto:"]
        .iter()
        .any(|scheme| lower.starts_with(scheme))
        && !url.chars().any(|c| c.is_whitespace() || c.is_control())
}

fn split_command<'a>(
    command: Option<&'a [String]>,
    what: &'static str,
) -> Result<(&'a str, &'a [String]), CapabilityError> {
    match command {
        Some([program, args @ ..]) if !program.is_empty() => Ok((program.as_str(), args)),
        _ => Err(CapabilityError::Unavailable(what)),
    }
}

fn check_status(program: &str, status: std::process::ExitStatus) -> Result<(), CapabilityError> {
    if status.success() {
        Ok(())
    } else {
        Err(CapabilityError::Failed {
            program: program.to_string(),
            status,
        })
    }
}
