//! Route enumeration.
//!
//! Enumerates every sequence of paths a session could take from the first
//! path, choosing each branch of every branching path in turn. Conditions are
//! not evaluated; a route is a structural possibility, not a prediction.
//! Enumeration is depth-first with per-route cycle detection and is capped at
//! [`MAX_ROUTES`] routes and [`MAX_DEPTH`] paths per route.

use std::collections::BTreeSet;

use serde::Serialize;
use waypoint_core::{GraphError, PathGraph, PathId, PathKind};

/// Maximum number of routes to enumerate before truncation.
pub const MAX_ROUTES: usize = 10_000;
/// Maximum number of paths in a single route.
pub const MAX_DEPTH: usize = 1_000;

/// Branch taken when a route leaves a branching path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteChoice {
    pub path: String,
    /// Position of the branch in insertion order.
    pub branch: usize,
    pub label: Option<String>,
    pub target: String,
}

/// How a route stops.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RouteEnding {
    /// Reached a linear path with no successor.
    Terminal,
    /// Re-entered a path already on the route.
    Cycle,
    /// Reached a branching path with no branches.
    DeadEnd,
    /// Hit [`MAX_DEPTH`].
    MaxDepth,
}

#[derive(Debug, Clone, Serialize)]
pub struct Route {
    pub paths: Vec<String>,
    pub steps: Vec<String>,
    pub choices: Vec<RouteChoice>,
    pub ending: RouteEnding,
    /// For cycles, the path that was re-entered.
    pub reentered: Option<String>,
}

impl Route {
    pub fn length(&self) -> usize {
        self.steps.len()
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RoutesResult {
    pub routes: Vec<Route>,
    pub route_count: usize,
    pub terminal_routes: usize,
    pub truncated: bool,
    pub has_cycles: bool,
}

struct Partial {
    at: PathId,
    paths: Vec<PathId>,
    choices: Vec<RouteChoice>,
    on_route: BTreeSet<PathId>,
}

/// Enumerate routes from the first path.
pub fn analyze_routes<M>(graph: &PathGraph<M>) -> Result<RoutesResult, GraphError> {
    let mut routes = Vec::new();
    let mut truncated = false;

    let mut stack = vec![Partial {
        at: graph.first_path(),
        paths: Vec::new(),
        choices: Vec::new(),
        on_route: BTreeSet::new(),
    }];

    while let Some(partial) = stack.pop() {
        if routes.len() >= MAX_ROUTES {
            truncated = true;
            break;
        }

        if partial.paths.len() >= MAX_DEPTH {
            routes.push(finish(graph, partial, RouteEnding::MaxDepth, None));
            continue;
        }

        if partial.on_route.contains(&partial.at) {
            let reentered = graph.path_name(partial.at);
            routes.push(finish(graph, partial, RouteEnding::Cycle, Some(reentered)));
            continue;
        }

        let path = graph.path(partial.at)?;
        let Partial {
            at,
            mut paths,
            choices,
            mut on_route,
        } = partial;
        paths.push(at);
        on_route.insert(at);

        match path.kind() {
            PathKind::Linear { next: Some(next) } => stack.push(Partial {
                at: *next,
                paths,
                choices,
                on_route,
            }),
            PathKind::Linear { next: None } => {
                let done = Partial {
                    at,
                    paths,
                    choices,
                    on_route,
                };
                routes.push(finish(graph, done, RouteEnding::Terminal, None));
            }
            PathKind::Branching { branches } if branches.is_empty() => {
                let done = Partial {
                    at,
                    paths,
                    choices,
                    on_route,
                };
                routes.push(finish(graph, done, RouteEnding::DeadEnd, None));
            }
            PathKind::Branching { branches } => {
                // Pushed in reverse so the first branch is explored first.
                for (position, branch) in branches.iter().enumerate().rev() {
                    let mut choices = choices.clone();
                    choices.push(RouteChoice {
                        path: path.name(),
                        branch: position,
                        label: branch.label().map(str::to_string),
                        target: graph.path_name(branch.target()),
                    });
                    stack.push(Partial {
                        at: branch.target(),
                        paths: paths.clone(),
                        choices,
                        on_route: on_route.clone(),
                    });
                }
            }
        }
    }

    let terminal_routes = routes
        .iter()
        .filter(|r| r.ending == RouteEnding::Terminal)
        .count();
    let has_cycles = routes.iter().any(|r| r.ending == RouteEnding::Cycle);

    Ok(RoutesResult {
        route_count: routes.len(),
        routes,
        terminal_routes,
        truncated,
        has_cycles,
    })
}

fn finish<M>(
    graph: &PathGraph<M>,
    partial: Partial,
    ending: RouteEnding,
    reentered: Option<String>,
) -> Route {
    let steps = partial
        .paths
        .iter()
        .filter_map(|id| graph.path(*id).ok())
        .flat_map(|path| path.steps().iter().map(|s| graph.step_name(*s)))
        .collect();
    Route {
        paths: partial.paths.iter().map(|id| graph.path_name(*id)).collect(),
        steps,
        choices: partial.choices,
        ending,
        reentered,
    }
}
