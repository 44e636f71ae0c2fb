//! Navigation-contract errors.

use thiserror::Error;
use waypoint_core::{GraphError, StepId};

/// Errors returned by [`NavigationEngine`](crate::NavigationEngine).
///
/// `IllegalNavigation` and `NoHistory` mean the host ignored an availability
/// query; `Graph` carries construction failures and branch resolution
/// failures. None of them leave the engine in a changed state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("illegal navigation from step '{step}': {reason}")]
    IllegalNavigation { step: String, reason: String },

    #[error("no history to retreat to")]
    NoHistory,

    #[error("step {0} is not part of this wizard")]
    UnknownStep(StepId),

    #[error(transparent)]
    Graph(#[from] GraphError),
}
