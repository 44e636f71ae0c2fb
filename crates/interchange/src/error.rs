//! Errors raised while reading and compiling definitions.

use std::path::PathBuf;

use thiserror::Error;
use waypoint_core::GraphError;

#[derive(Debug, Error)]
pub enum DefinitionError {
    /// The document is not well-formed JSON / TOML or does not match the
    /// definition shape.
    #[error("failed to parse {format} definition: {message}")]
    Parse {
        format: &'static str,
        message: String,
    },

    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A path lists a step id that no step declares.
    #[error("path '{path}' refers to unknown step '{step}'")]
    UnknownStep { path: String, step: String },

    /// `first`, `next` or a branch target names no declared path.
    #[error("{context} refers to unknown path '{path}'")]
    UnknownPath { context: String, path: String },

    #[error("duplicate {kind} id '{id}'")]
    DuplicateId { kind: &'static str, id: String },

    /// A path's fields contradict its kind.
    #[error("path '{path}': {message}")]
    InvalidPath { path: String, message: String },

    #[error("invalid fact assignment '{0}' (expected name=value)")]
    InvalidFact(String),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
