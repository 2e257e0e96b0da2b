use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tempfile::NamedTempFile;

use crate::model::profile::{ProfileField, ProfileRecord};

/// Error type for profile store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("could not read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not write {path}: {source}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("could not parse {path}: {source}")]
    Syntax {
        path: PathBuf,
        source: toml_edit::TomlError,
    },
    #[error("invalid profile in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
}

/// Flat, persisted mapping from profile fields to string values.
///
/// `set` stores the value verbatim and is visible to the next `get` on the
/// same handle. Nothing is validated here; whether a value is usable for a
/// link is decided by the link builder.
pub trait ProfileStore {
    /// Current value, or `""` if the field was never set.
    fn get(&self, field: ProfileField) -> String;

    fn set(&mut self, field: ProfileField, value: &str) -> Result<(), StoreError>;

    /// Copy of every field at this moment.
    fn snapshot(&self) -> ProfileRecord;
}

/// Store that lives only as long as the process.
#[derive(Debug, Clone, Default)]
pub struct MemoryProfileStore {
    record: ProfileRecord,
}

impl MemoryProfileStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_record(record: ProfileRecord) -> Self {
        MemoryProfileStore { record }
    }
}

impl ProfileStore for MemoryProfileStore {
    fn get(&self, field: ProfileField) -> String {
        self.record.get(field).to_string()
    }

    fn set(&mut self, field: ProfileField, value: &str) -> Result<(), StoreError> {
        self.record.set(field, value);
        Ok(())
    }

    fn snapshot(&self) -> ProfileRecord {
        self.record.clone()
    }
}

/// Store backed by a flat TOML file (`key = "value"` per field).
///
/// Writes go through `toml_edit`, so comments and keys this crate does not
/// know about are left alone. Every `set` re-reads the file, changes the one
/// key and writes it back, so fields written by other handles survive.
#[derive(Debug)]
pub struct FileProfileStore {
    path: PathBuf,
    record: ProfileRecord,
}

impl FileProfileStore {
    /// Open the store at `path`. A missing file reads as all defaults and is
    /// only created on the first `set`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let (_, record) = read_document(&path)?;
        Ok(FileProfileStore { path, record })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Re-read the file, picking up writes made through other handles.
    pub fn reload(&mut self) -> Result<(), StoreError> {
        *self = FileProfileStore::open(self.path.clone())?;
        Ok(())
    }
}

impl ProfileStore for FileProfileStore {
    fn get(&self, field: ProfileField) -> String {
        self.record.get(field).to_string()
    }

    fn set(&mut self, field: ProfileField, value: &str) -> Result<(), StoreError> {
        let (mut doc, _) = read_document(&self.path)?;
        if let Some(old) = field.legacy_key() {
            doc.remove(old);
        }
        doc[field.key()] = toml_edit::value(value);

        let text = doc.to_string();
        let record = parse_record(&self.path, &text)?;
        atomic_write(&self.path, text.as_bytes()).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e,
        })?;
        self.record = record;
        tracing::debug!(field = field.key(), path = %self.path.display(), "profile field written");
        Ok(())
    }

    fn snapshot(&self) -> ProfileRecord {
        self.record.clone()
    }
}

/// Current contents of the profile file. A missing file is an empty document.
fn read_document(path: &Path) -> Result<(toml_edit::DocumentMut, ProfileRecord), StoreError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "profile file absent, using defaults");
        return Ok((toml_edit::DocumentMut::new(), ProfileRecord::default()));
    }

    let text = fs::read_to_string(path).map_err(|e| StoreError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let doc: toml_edit::DocumentMut = text.parse().map_err(|e| StoreError::Syntax {
        path: path.to_path_buf(),
        source: e,
    })?;
    let record = parse_record(path, &text)?;
    tracing::debug!(path = %path.display(), "profile loaded");
    Ok((doc, record))
}

fn parse_record(path: &Path, text: &str) -> Result<ProfileRecord, StoreError> {
    toml::from_str(text).map_err(|e| StoreError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}

/// Write `content` to `path` via a sibling temp file and rename, creating the
/// parent directory if needed.
pub fn atomic_write(path: &Path, content: &[u8]) -> std::io::Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir)?;
    let mut tmp = NamedTempFile::new_in(dir)?;
    tmp.write_all(content)?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| e.error)?;
    Ok(())
}
