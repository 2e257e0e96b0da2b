use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::io::profile_store::atomic_write;
use crate::model::config::{AppConfig, EmailFormat, ParseEmailFormatError};

const APP_DIR: &str = "sociomarketer";
pub const CONFIG_FILE: &str = "config.toml";
pub const PROFILE_FILE: &str = "profile.toml";

/// Error type for config I/O operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path}: {source}")]
    ReadError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    WriteError {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    SyntaxError {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("invalid config in {path}: {source}")]
    ParseError {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("unknown config key '{0}' (expected email_format, clipboard_command or open_command)")]
    UnknownKey(String),
    #[error(transparent)]
    InvalidEmailFormat(#[from] ParseEmailFormatError),
}

/// Directory holding config.toml and profile.toml.
///
/// `$SOCIO_HOME` wins, then `$XDG_CONFIG_HOME/sociomarketer`, then
/// `$HOME/.config/sociomarketer`.
pub fn app_dir() -> PathBuf {
    resolve_app_dir(
        std::env::var_os("SOCIO_HOME").map(PathBuf::from),
        std::env::var_os("XDG_CONFIG_HOME").map(PathBuf::from),
        std::env::var_os("HOME").map(PathBuf::from),
    )
}

fn resolve_app_dir(
    socio_home: Option<PathBuf>,
    xdg_config_home: Option<PathBuf>,
    home: Option<PathBuf>,
) -> PathBuf {
    if let Some(dir) = socio_home.filter(|p| !p.as_os_str().is_empty()) {
        return dir;
    }
    let config_dir = xdg_config_home
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| home.unwrap_or_else(|| PathBuf::from("/")).join(".config"));
    config_dir.join(APP_DIR)
}

pub fn default_config_path() -> PathBuf {
    app_dir().join(CONFIG_FILE)
}

pub fn default_profile_path() -> PathBuf {
    app_dir().join(PROFILE_FILE)
}

/// Read config.toml. A missing file means defaults.
pub fn read_config(path: &Path) -> Result<AppConfig, ConfigError> {
    if !path.exists() {
        return Ok(AppConfig::default());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    toml::from_str(&text).map_err(|e| ConfigError::ParseError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Read config.toml as a toml_edit document for round-trip-safe editing.
pub fn read_config_document(path: &Path) -> Result<toml_edit::DocumentMut, ConfigError> {
    if !path.exists() {
        return Ok(toml_edit::DocumentMut::new());
    }
    let text = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    text.parse().map_err(|e| ConfigError::SyntaxError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write the config document back to disk, preserving formatting.
pub fn write_config(path: &Path, doc: &toml_edit::DocumentMut) -> Result<(), ConfigError> {
    atomic_write(path, doc.to_string().as_bytes()).map_err(|e| ConfigError::WriteError {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Keys `config set` may change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfigKey {
    EmailFormat,
    ClipboardCommand,
    OpenCommand,
}

impl ConfigKey {
    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::EmailFormat => "email_format",
            ConfigKey::ClipboardCommand => "clipboard_command",
            ConfigKey::OpenCommand => "open_command",
        }
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().replace('-', "_").as_str() {
            "email_format" => Ok(ConfigKey::EmailFormat),
            "clipboard_command" => Ok(ConfigKey::ClipboardCommand),
            "open_command" => Ok(ConfigKey::OpenCommand),
            _ => Err(ConfigError::UnknownKey(s.to_string())),
        }
    }
}

/// Set a key in the config document. An empty value removes the key, which
/// restores the default. Command values are split on whitespace.
pub fn set_config_value(
    doc: &mut toml_edit::DocumentMut,
    key: ConfigKey,
    value: &str,
) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        doc.remove(key.as_str());
        return Ok(());
    }
    match key {
        ConfigKey::EmailFormat => {
            let format: EmailFormat = value.parse()?;
            doc[key.as_str()] = toml_edit::value(format.as_str());
        }
        ConfigKey::ClipboardCommand | ConfigKey::OpenCommand => {
            let argv: toml_edit::Array = value.split_whitespace().collect();
            doc[key.as_str()] = toml_edit::value(argv);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn app_dir_precedence() {
        assert_eq!(
            resolve_app_dir(
                Some("/opt/socio".into()),
                Some("/xdg".into()),
                Some("/home/u".into())
            ),
            PathBuf::from("/opt/socio")
        );
        assert_eq!(
            resolve_app_dir(None, Some("/xdg".into()), Some("/home/u".into())),
            PathBuf::from("/xdg/sociomarketer")
        );
        assert_eq!(
            resolve_app_dir(Some("".into()), Some("".into()), Some("/home/u".into())),
            PathBuf::from("/home/u/.config/sociomarketer")
        );
    }

    #[test]
    fn missing_config_is_default() {
        let tmp = TempDir::new().unwrap();
        let config = read_config(&tmp.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn bad_email_format_in_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "email_format = \"smtp\"\n").unwrap();
        assert!(matches!(
            read_config(&path),
            Err(ConfigError::ParseError { .. })
        ));
    }

    #[test]
    fn set_values_round_trip_preserving_comments() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join(CONFIG_FILE);
        fs::write(&path, "# links\nemail_format = \"rfc6068\"\n").unwrap();

        let mut doc = read_config_document(&path).unwrap();
        set_config_value(&mut doc, ConfigKey::EmailFormat, "legacy").unwrap();
        set_config_value(&mut doc, ConfigKey::ClipboardCommand, "wl-copy --trim-newline").unwrap();
        write_config(&path, &doc).unwrap();

        let written = fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("# links\n"));
        let config = read_config(&path).unwrap();
        assert_eq!(config.email_format, EmailFormat::Legacy);
        assert_eq!(
            config.clipboard_command,
            Some(vec!["wl-copy".to_string(), "--trim-newline".to_string()])
        );
    }

    #[test]
    fn empty_value_resets_to_default() {
        let mut doc: toml_edit::DocumentMut = "email_format = \"legacy\"\n".parse().unwrap();
        set_config_value(&mut doc, ConfigKey::EmailFormat, "").unwrap();
        let config: AppConfig = toml::from_str(&doc.to_string()).unwrap();
        assert_eq!(config.email_format, EmailFormat::Rfc6068);
    }

    #[test]
    fn rejects_unknown_key_and_bad_value() {
        assert!(matches!(
            "colour".parse::<ConfigKey>(),
            Err(ConfigError::UnknownKey(_))
        ));
        assert_eq!("open-command".parse::<ConfigKey>().unwrap(), ConfigKey::OpenCommand);
        let mut doc = toml_edit::DocumentMut::new();
        match set_config_value(&mut doc, ConfigKey::EmailFormat, "smtp") {
            Err(ConfigError::InvalidEmailFormat(err)) => {
                assert_eq!(err, ParseEmailFormatError("smtp".into()));
            }
            other => panic!("unexpected result: {other:?}"),
        }
        assert!(doc.get("email_format").is_none());
    }
}
