//! Graph index: step membership and terminal path discovery.
//!
//! Both tasks are one-pass visitors over the paths reachable from the first
//! path. [`GraphIndex::build`] runs them to completion; a graph that fails
//! either walk produces no index at all.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::GraphError;
use crate::graph::PathGraph;
use crate::path::{Branch, Path, PathId};
use crate::step::StepId;
use crate::visit::{visit_branches, visit_next, walk, PathVisitor, Pending, Visited};

// ──────────────────────────────────────────────
// Membership
// ──────────────────────────────────────────────

/// Records which path owns each reachable step.
#[derive(Debug, Default)]
pub struct MembershipVisitor {
    visited: Visited,
    owners: BTreeMap<StepId, PathId>,
}

impl MembershipVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn into_parts(self) -> (BTreeMap<StepId, PathId>, Vec<PathId>) {
        (self.owners, self.visited.into_order())
    }

    fn record<M>(&mut self, graph: &PathGraph<M>, path: &Path<M>) -> Result<(), GraphError> {
        if path.steps().is_empty() {
            return Err(GraphError::EmptyPath { path: path.name() });
        }
        for &step in path.steps() {
            graph.step(step)?;
            if let Some(previous) = self.owners.insert(step, path.id()) {
                return Err(GraphError::DuplicateStep {
                    step: graph.step_name(step),
                    first: graph.path_name(previous),
                    second: path.name(),
                });
            }
        }
        Ok(())
    }
}

impl<M> PathVisitor<M> for MembershipVisitor {
    fn visit_linear(
        &mut self,
        graph: &PathGraph<M>,
        path: &Path<M>,
        next: Option<PathId>,
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if self.visited.enter(path.id()) {
            self.record(graph, path)?;
            visit_next(next, pending);
        }
        Ok(())
    }

    fn visit_branching(
        &mut self,
        graph: &PathGraph<M>,
        path: &Path<M>,
        branches: &[Branch<M>],
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if self.visited.enter(path.id()) {
            self.record(graph, path)?;
            visit_branches(branches, pending);
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Terminal discovery
// ──────────────────────────────────────────────

/// Finds the single reachable linear path without a successor.
#[derive(Debug, Default)]
pub struct TerminalVisitor {
    visited: Visited,
    terminal: Option<PathId>,
}

impl TerminalVisitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// The terminal candidate found so far.
    pub fn terminal(&self) -> Option<PathId> {
        self.terminal
    }
}

impl<M> PathVisitor<M> for TerminalVisitor {
    fn visit_linear(
        &mut self,
        graph: &PathGraph<M>,
        path: &Path<M>,
        next: Option<PathId>,
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if !self.visited.enter(path.id()) {
            return Ok(());
        }
        match next {
            None => {
                if let Some(existing) = self.terminal {
                    return Err(GraphError::MultipleTerminalPaths {
                        first: graph.path_name(existing),
                        second: path.name(),
                    });
                }
                self.terminal = Some(path.id());
                Ok(())
            }
            Some(_) => {
                visit_next(next, pending);
                Ok(())
            }
        }
    }

    fn visit_branching(
        &mut self,
        _graph: &PathGraph<M>,
        path: &Path<M>,
        branches: &[Branch<M>],
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if self.visited.enter(path.id()) {
            visit_branches(branches, pending);
        }
        Ok(())
    }
}

// ──────────────────────────────────────────────
// Index
// ──────────────────────────────────────────────

/// Validated, immutable lookup structure over a [`PathGraph`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GraphIndex {
    step_to_path: BTreeMap<StepId, PathId>,
    reachable: Vec<PathId>,
    first_path: PathId,
    terminal_path: PathId,
    first_step: StepId,
    terminal_step: StepId,
}

impl GraphIndex {
    /// Walk the graph from its first path and validate its shape.
    ///
    /// Fails with `EmptyPath` or `DuplicateStep` from the membership walk,
    /// `MultipleTerminalPaths` from the terminal walk, and `NoTerminalPath`
    /// when the completed terminal walk found no candidate.
    pub fn build<M>(graph: &PathGraph<M>) -> Result<Self, GraphError> {
        let first_path = graph.first_path();

        let mut membership = MembershipVisitor::new();
        walk(graph, first_path, &mut membership)?;
        let (step_to_path, reachable) = membership.into_parts();

        let mut terminal = TerminalVisitor::new();
        walk(graph, first_path, &mut terminal)?;
        let terminal_path = terminal.terminal().ok_or(GraphError::NoTerminalPath)?;

        let first_step = graph.path(first_path)?.first_step()?;
        let terminal_step = graph.path(terminal_path)?.last_step()?;

        tracing::debug!(
            steps = step_to_path.len(),
            paths = reachable.len(),
            first = %graph.path_name(first_path),
            terminal = %graph.path_name(terminal_path),
            "indexed step graph"
        );

        Ok(GraphIndex {
            step_to_path,
            reachable,
            first_path,
            terminal_path,
            first_step,
            terminal_step,
        })
    }

    pub fn path_for_step(&self, step: StepId) -> Option<PathId> {
        self.step_to_path.get(&step).copied()
    }

    pub fn contains_step(&self, step: StepId) -> bool {
        self.step_to_path.contains_key(&step)
    }

    /// Every reachable step, in declaration order.
    pub fn steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.step_to_path.keys().copied()
    }

    pub fn step_count(&self) -> usize {
        self.step_to_path.len()
    }

    /// Reachable paths in the order the walk entered them.
    pub fn reachable_paths(&self) -> &[PathId] {
        &self.reachable
    }

    pub fn first_path(&self) -> PathId {
        self.first_path
    }

    pub fn terminal_path(&self) -> PathId {
        self.terminal_path
    }

    pub fn first_step(&self) -> StepId {
        self.first_step
    }

    /// Last step of the terminal path: the wizard's final step.
    pub fn terminal_step(&self) -> StepId {
        self.terminal_step
    }
}
