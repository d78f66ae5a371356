//! Error types for shorthand-core.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Errors that can occur when working with configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to deserialize configuration.
    #[error("invalid configuration: {0}")]
    Deserialize(#[from] Box<figment::Error>),
}

/// Result type alias using [`ConfigError`].
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Errors that can occur while reading corpus text or word lists.
#[derive(Error, Debug)]
pub enum CorpusError {
    /// Walking the corpus directory failed.
    #[error("failed to walk {root}: {source}")]
    Walk {
        /// Root directory of the walk.
        root: Utf8PathBuf,
        /// Underlying walkdir error.
        source: walkdir::Error,
    },

    /// A file could not be read.
    #[error("failed to read {path}: {source}")]
    Read {
        /// Path of the unreadable file.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A file could not be written.
    #[error("failed to write {path}: {source}")]
    Write {
        /// Path of the file being written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// A Slack export file did not contain a JSON message array.
    #[error("malformed slack export file {path}: {source}")]
    Json {
        /// Path of the malformed file.
        path: Utf8PathBuf,
        /// Underlying JSON error.
        source: serde_json::Error,
    },
}

/// Result type alias using [`CorpusError`].
pub type CorpusResult<T> = Result<T, CorpusError>;

/// Errors that can occur when exporting or re-importing shortcuts.
#[derive(Error, Debug)]
pub enum ExportError {
    /// Filesystem failure while reading or writing an export.
    #[error("I/O error on {path}: {source}")]
    Io {
        /// Path being read or written.
        path: Utf8PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },

    /// The shortcut file is not valid YAML or not a string mapping.
    #[error("invalid shortcut file {path}: {source}")]
    Yaml {
        /// Path of the shortcut file.
        path: Utf8PathBuf,
        /// Underlying YAML error.
        source: serde_yaml::Error,
    },

    /// A shortcut file entry was not a string-to-string pair.
    #[error("invalid shortcut entry in {path}: keys and values must be strings")]
    NonStringEntry {
        /// Path of the shortcut file.
        path: Utf8PathBuf,
    },

    /// Failed to serialize an AutoKey configuration.
    #[error("failed to serialize autokey config for {phrase:?}: {source}")]
    Json {
        /// Phrase whose config failed to serialize.
        phrase: String,
        /// Underlying JSON error.
        source: serde_json::Error,
    },

    /// Serialized AutoKey configuration was not valid UTF-8.
    #[error("autokey config for {phrase:?} is not UTF-8: {source}")]
    Utf8 {
        /// Phrase whose config failed to encode.
        phrase: String,
        /// Underlying conversion error.
        source: std::string::FromUtf8Error,
    },
}

/// Result type alias using [`ExportError`].
pub type ExportResult<T> = Result<T, ExportError>;
