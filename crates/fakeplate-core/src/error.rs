//! Unified error types for the fakeplate toolkit.

use std::path::PathBuf;
use thiserror::Error;

/// Failure while evaluating an expression path against a provider.
///
/// A segment that names no method is *not* an error (it resolves to null).
/// Only asking for a further segment after a step produced null is.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolutionError {
    /// `segment` was requested on the null result of `resolved`.
    #[error("cannot call '{segment}' on null: '{resolved}' resolved to null in expression '{expression}'")]
    NullDereference {
        expression: String,
        segment: String,
        resolved: String,
    },
}

/// All errors that can occur during fakeplate operations.
#[derive(Error, Debug)]
pub enum FakeplateError {
    // --- Configuration ---

    /// The configuration file (`fakeplate.config.json`) was not found.
    #[error("config file not found at {path}")]
    ConfigNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file exists but contains invalid JSON.
    #[error("failed to parse config at {path}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// The configuration parsed but holds values the generator cannot use.
    #[error("invalid config: {0}")]
    InvalidConfig(String),

    /// The sink kind is not one of: `stdout`, `directory`.
    #[error("unknown sink: {0} (supported: stdout, directory)")]
    UnknownSink(String),

    // --- Rendering ---

    /// An expression could not be evaluated.
    #[error(transparent)]
    Resolution(#[from] ResolutionError),

    /// The template named on the command line or in the config does not exist.
    #[error("template not found: {0}")]
    TemplateNotFound(PathBuf),

    /// Handlebars scaffold rendering failed (invalid template or missing variables).
    #[error("scaffold rendering failed: {0}")]
    ScaffoldRender(String),

    // --- Output ---

    /// A rendered record could not be handed to its sink.
    #[error("failed to publish record {key} to {sink}: {reason}")]
    Publish {
        sink: String,
        key: String,
        reason: String,
    },

    // --- Project ---

    /// Attempted to create a project in a directory that already exists.
    #[error("project directory already exists: {0}")]
    ProjectExists(PathBuf),

    // --- General ---

    /// A filesystem I/O error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// A catch-all for errors from dependencies.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Alias for `Result<T, FakeplateError>`.
pub type Result<T> = std::result::Result<T, FakeplateError>;
