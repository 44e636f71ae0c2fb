//! Step declarations and their arena handles.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Handle to a step declared on a [`GraphBuilder`](crate::GraphBuilder).
///
/// Steps compare by handle, never by value: two steps with the same name are
/// still distinct steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StepId(pub(crate) usize);

impl StepId {
    /// Position of the step in its graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "step#{}", self.0)
    }
}

/// A step as declared by the host application.
///
/// `complete` and `busy` are the initial values; once a graph is handed to a
/// navigation engine the live flags are tracked there.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub busy: bool,
}

impl Step {
    pub fn new(name: impl Into<String>) -> Self {
        Step {
            name: name.into(),
            summary: None,
            complete: false,
            busy: false,
        }
    }

    pub fn with_summary(mut self, summary: impl Into<String>) -> Self {
        self.summary = Some(summary.into());
        self
    }

    pub fn with_complete(mut self, complete: bool) -> Self {
        self.complete = complete;
        self
    }

    pub fn with_busy(mut self, busy: bool) -> Self {
        self.busy = busy;
        self
    }
}
