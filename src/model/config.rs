use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Configuration from config.toml. Every key is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub email_format: EmailFormat,
    /// Program and arguments that receive the text to copy on stdin.
    /// Absent = pbcopy / wl-copy / xclip, whichever the platform has.
    #[serde(default)]
    pub clipboard_command: Option<Vec<String>>,
    /// Program and arguments used to open a link; the URL is appended last.
    /// Absent = open (macOS) / xdg-open (Linux) / rundll32 url.dll (Windows).
    #[serde(default)]
    pub open_command: Option<Vec<String>>,
}

/// Which `mailto:` template to produce.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EmailFormat {
    /// `mailto:addr?cc=..&bcc=..&subject=..&body=..`, values percent-encoded.
    #[default]
    Rfc6068,
    /// `mailto:addr?cc..&bcc..&subject..&body..` (no `=`), run through an
    /// encodeURI-style encoder. Kept for links shared by older installs.
    Legacy,
}

impl EmailFormat {
    pub fn as_str(self) -> &'static str {
        match self {
            EmailFormat::Rfc6068 => "rfc6068",
            EmailFormat::Legacy => "legacy",
        }
    }
}

impl fmt::Display for EmailFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid email format '{0}' (expected rfc6068 or legacy)")]
pub struct ParseEmailFormatError(pub String);

impl FromStr for EmailFormat {
    type Err = ParseEmailFormatError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "rfc6068" | "rfc" | "standard" => Ok(EmailFormat::Rfc6068),
            "legacy" => Ok(EmailFormat::Legacy),
            _ => Err(ParseEmailFormatError(s.to_string())),
        }
    }
}
