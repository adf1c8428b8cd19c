//! Error types for the exporter.
//!
//! Only [`ExportError`] ever reaches the binary. The other enums are
//! soft failures: callers log them and carry on with a default.

use std::path::PathBuf;
use thiserror::Error;

use fmg_model::DocumentError;

/// Fatal failures that abort a run.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error(transparent)]
    Document(#[from] DocumentError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("failed to prepare vault directory {path}: {source}")]
    Vault {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Invalid or unreadable configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("match mode 'regex' requires a pattern")]
    MissingPattern,

    #[error("invalid match pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("match mode 'map' requires a mapping file")]
    MissingMapFile,

    #[error("failed to read mapping file {path}: {source}")]
    MapRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid mapping file {path}: {source}")]
    MapParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// A single emblem could not be persisted.
#[derive(Debug, Error)]
pub enum EmblemError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("download of {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    #[error("local emblem file not found: {0}")]
    NotFound(PathBuf),
}

/// A single bundle entry could not be copied or archived.
#[derive(Debug, Error)]
pub enum BundleError {
    #[error("i/o error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to walk: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to write archive: {0}")]
    Zip(#[from] zip::result::ZipError),
}

impl BundleError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        BundleError::Io {
            path: path.into(),
            source,
        }
    }
}

impl EmblemError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EmblemError::Io {
            path: path.into(),
            source,
        }
    }
}
