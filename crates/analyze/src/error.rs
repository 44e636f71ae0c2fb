use std::fmt;

use waypoint_core::GraphError;

/// Error type for analysis operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// A walk hit a handle the graph does not own.
    Graph(GraphError),
    /// `analyze_selected` was asked for an analysis that does not exist.
    UnknownAnalysis(String),
}

impl fmt::Display for AnalysisError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalysisError::Graph(err) => write!(f, "graph error: {}", err),
            AnalysisError::UnknownAnalysis(name) => write!(
                f,
                "unknown analysis '{}' (expected one of: {})",
                name,
                crate::ANALYSES.join(", ")
            ),
        }
    }
}

impl std::error::Error for AnalysisError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalysisError::Graph(err) => Some(err),
            AnalysisError::UnknownAnalysis(_) => None,
        }
    }
}

impl From<GraphError> for AnalysisError {
    fn from(err: GraphError) -> Self {
        AnalysisError::Graph(err)
    }
}
