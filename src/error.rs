// ============================================================================
// error.rs — Error types shared by the library modules
// ============================================================================

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config file '{}' not found", .0.display())]
    NotFound(PathBuf),

    #[error("failed to read config file '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("invalid value for '{key}': {reason}")]
    Invalid { key: &'static str, reason: String },
}

/// Failure of a single icon target. Never aborts the run except `SourceMissing`.
#[derive(Debug, Error)]
pub enum IconError {
    #[error("source image '{}' does not exist", .0.display())]
    SourceMissing(PathBuf),

    #[error("cannot decode source image: {0}")]
    Decode(String),

    #[error("failed to create directory '{}': {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode {what}: {reason}")]
    Encode { what: String, reason: String },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("failed to read manifest '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write manifest '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("directory '{}' does not exist", .0.display())]
    RootMissing(PathBuf),

    #[error("failed to walk '{}': {source}", path.display())]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid color pattern for '{literal}': {source}")]
    Pattern {
        literal: String,
        #[source]
        source: regex::Error,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PromoError {
    #[error("requested code count is zero; nothing to insert")]
    EmptyBatch,

    #[error("promo code prefix must not be empty")]
    EmptyPrefix,
}
