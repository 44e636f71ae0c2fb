//! Wizard complexity bounds.
//!
//! Summarises the shape of the reachable graph and the length of the routes
//! found by route enumeration.

use serde::Serialize;
use waypoint_core::PathGraph;

use crate::reachability::ReachabilityResult;
use crate::routes::{RouteEnding, RoutesResult};

#[derive(Debug, Clone, Serialize)]
pub struct ComplexityResult {
    pub reachable_paths: usize,
    pub reachable_steps: usize,
    pub branching_paths: usize,
    /// Largest number of branches on one reachable branching path.
    pub max_fan_out: usize,
    /// Fewest steps on a route that reaches the terminal path.
    pub shortest_route: Option<usize>,
    /// Most steps on a route that reaches the terminal path.
    pub longest_route: Option<usize>,
    /// Most paths on any enumerated route.
    pub max_route_depth: usize,
    pub has_cycles: bool,
}

pub fn analyze_complexity<M>(
    graph: &PathGraph<M>,
    reachability: &ReachabilityResult,
    routes: &RoutesResult,
) -> ComplexityResult {
    let reachable: Vec<_> = graph
        .paths()
        .filter(|p| reachability.is_path_reachable(p.id()))
        .collect();

    let branching_paths = reachable.iter().filter(|p| p.is_branching()).count();
    let max_fan_out = reachable
        .iter()
        .map(|p| p.branches().len())
        .max()
        .unwrap_or(0);

    let terminal_lengths = routes
        .routes
        .iter()
        .filter(|r| r.ending == RouteEnding::Terminal)
        .map(|r| r.length());

    ComplexityResult {
        reachable_paths: reachable.len(),
        reachable_steps: reachable.iter().map(|p| p.steps().len()).sum(),
        branching_paths,
        max_fan_out,
        shortest_route: terminal_lengths.clone().min(),
        longest_route: terminal_lengths.max(),
        max_route_depth: routes.routes.iter().map(|r| r.paths.len()).max().unwrap_or(0),
        has_cycles: routes.has_cycles,
    }
}
