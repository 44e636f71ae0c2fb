//! Errors raised while building, validating and walking a step graph.

use std::fmt;

use thiserror::Error;

use crate::path::PathId;
use crate::step::StepId;

/// Which end of a path a step sits at when a positional move runs off it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Boundary {
    First,
    Last,
}

impl fmt::Display for Boundary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Boundary::First => write!(f, "first"),
            Boundary::Last => write!(f, "last"),
        }
    }
}

/// Graph-shape and path-contract errors.
///
/// Every variant names the offending path and/or step so that a host can
/// report exactly which part of its wizard definition is broken.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GraphError {
    /// The reachable graph has no linear path without a successor.
    #[error("unable to locate a terminal path: every reachable linear path has a successor")]
    NoTerminalPath,

    /// More than one reachable linear path has no successor.
    #[error("multiple terminal paths: '{first}' and '{second}' both have no next path")]
    MultipleTerminalPaths { first: String, second: String },

    /// A path with zero steps was reached by the graph walk, or queried.
    #[error("path '{path}' has no steps")]
    EmptyPath { path: String },

    /// A step is a member of more than one path (or appears twice in one).
    #[error("step '{step}' appears in path '{first}' and again in path '{second}'")]
    DuplicateStep {
        step: String,
        first: String,
        second: String,
    },

    /// A positional query named a step that the path does not contain.
    #[error("step '{step}' is not a member of path '{path}'")]
    StepNotFound { step: String, path: String },

    /// `next_step` on the last step or `previous_step` on the first.
    #[error("step '{step}' is the {boundary} step of path '{path}'")]
    OutOfRange {
        step: String,
        path: String,
        boundary: Boundary,
    },

    /// None of a branching path's conditions matched the model.
    #[error("no branch of path '{path}' selected a next path")]
    NoBranchSelected { path: String },

    /// A step handle that does not belong to this graph.
    #[error("unknown step handle {0}")]
    UnknownStep(StepId),

    /// A path handle that does not belong to this graph.
    #[error("unknown path handle {0}")]
    UnknownPath(PathId),

    /// A builder call that does not fit the path variant it targets.
    #[error("invalid graph construction: {0}")]
    InvalidBuild(String),
}
