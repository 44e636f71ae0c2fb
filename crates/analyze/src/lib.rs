//! Waypoint static analyzer: structural checks over a wizard graph.
//!
//! Each analysis is a separate module producing a serializable result
//! struct. `analyze()` runs them all and aggregates the results into an
//! [`AnalysisReport`]. Analyses never evaluate branch conditions, so they
//! work on any `PathGraph<M>` regardless of the host model type.

pub mod complexity;
pub mod error;
pub mod reachability;
pub mod report;
pub mod routes;

use std::collections::BTreeSet;

use waypoint_core::{GraphIndex, PathGraph};

pub use complexity::ComplexityResult;
pub use error::AnalysisError;
pub use reachability::ReachabilityResult;
pub use report::{AnalysisReport, Finding, FindingSeverity, ValidationResult};
pub use routes::{Route, RouteChoice, RouteEnding, RoutesResult};

/// Analysis names accepted by [`analyze_selected`], in run order.
pub const ANALYSES: [&str; 4] = ["validation", "reachability", "routes", "complexity"];

/// Run every analysis on `graph`.
pub fn analyze<M>(graph: &PathGraph<M>) -> Result<AnalysisReport, AnalysisError> {
    analyze_selected(graph, &ANALYSES)
}

/// Run the requested analyses (and their dependencies).
///
/// `complexity` needs both `reachability` and `routes`.
pub fn analyze_selected<M>(
    graph: &PathGraph<M>,
    analyses: &[&str],
) -> Result<AnalysisReport, AnalysisError> {
    let mut needed: BTreeSet<&str> = BTreeSet::new();
    for name in analyses {
        let known = ANALYSES
            .iter()
            .find(|a| *a == name)
            .ok_or_else(|| AnalysisError::UnknownAnalysis(name.to_string()))?;
        needed.insert(*known);
    }
    if needed.contains("complexity") {
        needed.insert("reachability");
        needed.insert("routes");
    }

    let mut report = AnalysisReport::new();

    if needed.contains("validation") {
        report.validation = Some(validate(graph));
        report.analyses_run.push("validation".to_string());
    }

    if needed.contains("reachability") {
        report.reachability = Some(reachability::analyze_reachability(graph)?);
        report.analyses_run.push("reachability".to_string());
    }

    if needed.contains("routes") {
        report.routes = Some(routes::analyze_routes(graph)?);
        report.analyses_run.push("routes".to_string());
    }

    if needed.contains("complexity") {
        if let (Some(reach), Some(routes)) = (&report.reachability, &report.routes) {
            report.complexity = Some(complexity::analyze_complexity(graph, reach, routes));
            report.analyses_run.push("complexity".to_string());
        }
    }

    report.extract_findings();

    Ok(report)
}

fn validate<M>(graph: &PathGraph<M>) -> ValidationResult {
    match GraphIndex::build(graph) {
        Ok(index) => ValidationResult {
            valid: true,
            error: None,
            terminal_path: Some(graph.path_name(index.terminal_path())),
            terminal_step: Some(graph.step_name(index.terminal_step())),
        },
        Err(err) => ValidationResult {
            valid: false,
            error: Some(err.to_string()),
            terminal_path: None,
            terminal_step: None,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::GraphBuilder;

    #[test]
    fn unknown_analysis_is_rejected() {
        let (b, path, _) = GraphBuilder::<()>::linear(["a"]);
        let graph = b.build(path).unwrap();
        let err = analyze_selected(&graph, &["routes", "s9"]).unwrap_err();
        assert_eq!(err, AnalysisError::UnknownAnalysis("s9".to_string()));
    }

    #[test]
    fn complexity_pulls_in_its_dependencies() {
        let (b, path, _) = GraphBuilder::<()>::linear(["a", "b"]);
        let graph = b.build(path).unwrap();
        let report = analyze_selected(&graph, &["complexity"]).unwrap();
        assert_eq!(
            report.analyses_run,
            vec!["reachability", "routes", "complexity"]
        );
        assert!(report.validation.is_none());
        let complexity = report.complexity.unwrap();
        assert_eq!(complexity.shortest_route, Some(2));
        assert_eq!(complexity.reachable_steps, 2);
    }
}
