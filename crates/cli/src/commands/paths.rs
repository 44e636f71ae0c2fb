use std::path::Path;
use std::process;

use waypoint_analyze::{FindingSeverity, RouteEnding, ANALYSES};

use crate::commands::load_wizard;
use crate::{report_error, OutputFormat};

pub(crate) fn cmd_paths(file: &Path, analysis: Option<&str>, output: OutputFormat, quiet: bool) {
    let wizard = load_wizard(file, output, quiet);

    let selected: Option<Vec<&str>> = analysis.map(|a| {
        let selected: Vec<&str> = a.split(',').map(|s| s.trim()).collect();
        for s in &selected {
            if !ANALYSES.contains(s) {
                let msg = format!("invalid analysis '{}'. Valid: {}", s, ANALYSES.join(", "));
                report_error(&msg, output, quiet);
                process::exit(1);
            }
        }
        selected
    });

    let report = match &selected {
        None => waypoint_analyze::analyze(&wizard.graph),
        Some(analyses) => waypoint_analyze::analyze_selected(&wizard.graph, analyses),
    };
    let report = match report {
        Ok(r) => r,
        Err(e) => {
            let msg = format!("analysis error: {}", e);
            report_error(&msg, output, quiet);
            process::exit(1);
        }
    };

    if !quiet {
        match output {
            OutputFormat::Json => {
                let json = serde_json::to_string_pretty(&report)
                    .unwrap_or_else(|e| format!("{{\"error\": \"serialization: {}\"}}", e));
                println!("{}", json);
            }
            OutputFormat::Text => {
                println!("Path Analysis: {}", wizard.title.as_deref().unwrap_or(&wizard.id));
                println!("==============");
                println!();

                if let Some(ref validation) = report.validation {
                    match (&validation.terminal_path, &validation.terminal_step) {
                        (Some(path), Some(step)) if validation.valid => {
                            println!("  Validation: ok, final step '{}' on path '{}'", step, path);
                        }
                        _ => println!(
                            "  Validation: FAILED: {}",
                            validation.error.as_deref().unwrap_or("unknown error")
                        ),
                    }
                }

                if let Some(ref reach) = report.reachability {
                    if reach.has_unreachable() {
                        println!(
                            "  Reachability: WARNING: {} unreachable path(s), {} unreachable step(s)",
                            reach.unreachable_paths.len(),
                            reach.unreachable_steps.len() + reach.orphan_steps.len()
                        );
                    } else {
                        println!(
                            "  Reachability: {} paths, {} steps, all reachable",
                            reach.reachable_paths.len(),
                            reach.reachable_steps.len()
                        );
                    }
                }

                if let Some(ref routes) = report.routes {
                    let truncated = if routes.truncated { " (truncated)" } else { "" };
                    println!(
                        "  Routes: {} total, {} reach the final path{}",
                        routes.route_count, routes.terminal_routes, truncated
                    );
                    for route in routes.routes.iter().take(ROUTE_LISTING_LIMIT) {
                        let ending = match route.ending {
                            RouteEnding::Terminal => String::new(),
                            RouteEnding::Cycle => format!(
                                " (cycle back to {})",
                                route.reentered.as_deref().unwrap_or("?")
                            ),
                            RouteEnding::DeadEnd => " (dead end)".to_string(),
                            RouteEnding::MaxDepth => " (max depth)".to_string(),
                        };
                        println!("    {}{}", route.steps.join(" -> "), ending);
                    }
                    if routes.routes.len() > ROUTE_LISTING_LIMIT {
                        println!(
                            "    ... {} more",
                            routes.routes.len() - ROUTE_LISTING_LIMIT
                        );
                    }
                }

                if let Some(ref complexity) = report.complexity {
                    let range = match (complexity.shortest_route, complexity.longest_route) {
                        (Some(min), Some(max)) => format!("{}..{} steps", min, max),
                        _ => "no complete routes".to_string(),
                    };
                    println!(
                        "  Complexity: {} branching path(s), max fan-out {}, route length {}",
                        complexity.branching_paths, complexity.max_fan_out, range
                    );
                }

                println!();
                println!("Findings:");

                if report.findings.is_empty() {
                    println!("  No findings.");
                } else {
                    for finding in &report.findings {
                        let severity = match finding.severity {
                            FindingSeverity::Warning => "WARNING",
                            FindingSeverity::Info => "INFO",
                        };
                        let context = finding
                            .path
                            .as_ref()
                            .map(|p| format!(" [{}]", p))
                            .unwrap_or_default();
                        println!(
                            "  [{}/{}]{}: {}",
                            finding.analysis, severity, context, finding.message
                        );
                    }
                }
            }
        }
    }

    if report.has_warnings() {
        process::exit(1);
    }
}

const ROUTE_LISTING_LIMIT: usize = 20;
