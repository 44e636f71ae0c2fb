//! AnalysisReport: aggregated output of the wizard analyses.
//!
//! The report collects each analysis result and extracts notable findings
//! (warnings, info) for summary display.

use serde::Serialize;

use crate::complexity::ComplexityResult;
use crate::reachability::ReachabilityResult;
use crate::routes::{RouteEnding, RoutesResult, MAX_ROUTES};

/// Severity level for an analysis finding.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub enum FindingSeverity {
    Info,
    Warning,
}

/// A notable finding from analysis.
#[derive(Debug, Clone, Serialize)]
pub struct Finding {
    pub analysis: String,
    pub severity: FindingSeverity,
    pub message: String,
    pub path: Option<String>,
    pub details: Option<serde_json::Value>,
}

/// Outcome of building the graph index.
#[derive(Debug, Clone, Serialize)]
pub struct ValidationResult {
    pub valid: bool,
    pub error: Option<String>,
    pub terminal_path: Option<String>,
    pub terminal_step: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub validation: Option<ValidationResult>,
    pub reachability: Option<ReachabilityResult>,
    pub routes: Option<RoutesResult>,
    pub complexity: Option<ComplexityResult>,
    pub analyses_run: Vec<String>,
    pub findings: Vec<Finding>,
}

impl AnalysisReport {
    /// Create a new empty report.
    pub fn new() -> Self {
        AnalysisReport {
            validation: None,
            reachability: None,
            routes: None,
            complexity: None,
            analyses_run: Vec::new(),
            findings: Vec::new(),
        }
    }

    pub fn has_warnings(&self) -> bool {
        self.findings
            .iter()
            .any(|f| f.severity == FindingSeverity::Warning)
    }

    /// Extract findings from populated analysis results.
    pub fn extract_findings(&mut self) {
        self.findings.clear();

        if let Some(ref validation) = self.validation {
            if let Some(ref error) = validation.error {
                self.findings.push(Finding {
                    analysis: "validation".to_string(),
                    severity: FindingSeverity::Warning,
                    message: format!("Graph is not navigable: {}", error),
                    path: None,
                    details: None,
                });
            }
        }

        if let Some(ref reachability) = self.reachability {
            for path in &reachability.unreachable_paths {
                self.findings.push(Finding {
                    analysis: "reachability".to_string(),
                    severity: FindingSeverity::Warning,
                    message: format!("Path '{}' is not reachable from the first path", path),
                    path: Some(path.clone()),
                    details: None,
                });
            }
            if !reachability.orphan_steps.is_empty() {
                let orphans: Vec<String> = reachability.orphan_steps.iter().cloned().collect();
                self.findings.push(Finding {
                    analysis: "reachability".to_string(),
                    severity: FindingSeverity::Warning,
                    message: format!(
                        "{} step(s) belong to no path: {}",
                        orphans.len(),
                        orphans.join(", ")
                    ),
                    path: None,
                    details: Some(serde_json::json!({ "orphan_steps": orphans })),
                });
            }
            for path in &reachability.dead_ends {
                self.findings.push(Finding {
                    analysis: "reachability".to_string(),
                    severity: FindingSeverity::Warning,
                    message: format!(
                        "Branching path '{}' has no branches; advancing past it always fails",
                        path
                    ),
                    path: Some(path.clone()),
                    details: None,
                });
            }
        }

        if let Some(ref routes) = self.routes {
            if routes.truncated {
                self.findings.push(Finding {
                    analysis: "routes".to_string(),
                    severity: FindingSeverity::Warning,
                    message: format!("Route enumeration truncated at {} routes", MAX_ROUTES),
                    path: None,
                    details: Some(serde_json::json!({ "route_count": routes.route_count })),
                });
            }
            let cycles: Vec<&str> = routes
                .routes
                .iter()
                .filter(|r| r.ending == RouteEnding::Cycle)
                .filter_map(|r| r.reentered.as_deref())
                .collect();
            if !cycles.is_empty() {
                let mut reentered: Vec<&str> = cycles.clone();
                reentered.sort_unstable();
                reentered.dedup();
                self.findings.push(Finding {
                    analysis: "routes".to_string(),
                    severity: FindingSeverity::Info,
                    message: format!(
                        "{} route(s) revisit a path: {}",
                        cycles.len(),
                        reentered.join(", ")
                    ),
                    path: None,
                    details: Some(serde_json::json!({ "reentered_paths": reentered })),
                });
            }
        }

        if let Some(ref complexity) = self.complexity {
            if complexity.max_fan_out == 1 {
                self.findings.push(Finding {
                    analysis: "complexity".to_string(),
                    severity: FindingSeverity::Info,
                    message: "Every branching path has a single branch".to_string(),
                    path: None,
                    details: None,
                });
            }
        }

        // Sort findings for deterministic output
        self.findings.sort_by(|a, b| {
            a.analysis
                .cmp(&b.analysis)
                .then_with(|| format!("{:?}", a.severity).cmp(&format!("{:?}", b.severity)))
                .then_with(|| a.message.cmp(&b.message))
        });
    }
}

impl Default for AnalysisReport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeSet;

    fn reachability(unreachable: &[&str]) -> ReachabilityResult {
        ReachabilityResult {
            first_path: "main".to_string(),
            reachable_paths: BTreeSet::from(["main".to_string()]),
            unreachable_paths: unreachable.iter().map(|s| s.to_string()).collect(),
            reachable_steps: BTreeSet::new(),
            unreachable_steps: BTreeSet::new(),
            orphan_steps: BTreeSet::new(),
            dead_ends: BTreeSet::new(),
            reachable_path_ids: BTreeSet::new(),
        }
    }

    #[test]
    fn new_report_is_empty() {
        let report = AnalysisReport::new();
        assert!(report.validation.is_none());
        assert!(report.reachability.is_none());
        assert!(report.routes.is_none());
        assert!(report.complexity.is_none());
        assert!(report.findings.is_empty());
        assert!(!report.has_warnings());
    }

    #[test]
    fn unreachable_paths_become_sorted_warnings() {
        let mut report = AnalysisReport::new();
        report.reachability = Some(reachability(&["zeta", "alpha"]));
        report.extract_findings();

        assert_eq!(report.findings.len(), 2);
        assert!(report.has_warnings());
        assert_eq!(report.findings[0].path.as_deref(), Some("alpha"));
        assert_eq!(report.findings[1].path.as_deref(), Some("zeta"));
    }

    #[test]
    fn validation_failure_is_reported() {
        let mut report = AnalysisReport::new();
        report.validation = Some(ValidationResult {
            valid: false,
            error: Some("no terminal path".to_string()),
            terminal_path: None,
            terminal_step: None,
        });
        report.extract_findings();
        assert_eq!(report.findings[0].analysis, "validation");
        assert!(report.findings[0].message.contains("no terminal path"));
    }
}
