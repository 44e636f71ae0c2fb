//! Reachability analysis.
//!
//! Walks every branch from the first path, without evaluating conditions,
//! and reports declared paths and steps the walk never touches. Unlike the
//! graph index this walk tolerates empty and duplicate-step paths, so it can
//! describe graphs that fail validation.

use std::collections::BTreeSet;

use serde::Serialize;
use waypoint_core::{
    visit_branches, visit_next, walk, Branch, GraphError, Path, PathGraph, PathId, PathVisitor,
    Pending, StepId, Visited,
};

/// Reachability of paths and steps from the first path.
#[derive(Debug, Clone, Serialize)]
pub struct ReachabilityResult {
    pub first_path: String,
    pub reachable_paths: BTreeSet<String>,
    pub unreachable_paths: BTreeSet<String>,
    pub reachable_steps: BTreeSet<String>,
    /// Steps that belong only to unreachable paths.
    pub unreachable_steps: BTreeSet<String>,
    /// Declared steps that belong to no path at all.
    pub orphan_steps: BTreeSet<String>,
    /// Reachable branching paths that declare no branch.
    pub dead_ends: BTreeSet<String>,
    /// Handles behind `reachable_paths`; labels need not be unique.
    #[serde(skip)]
    pub reachable_path_ids: BTreeSet<PathId>,
}

impl ReachabilityResult {
    pub fn has_unreachable(&self) -> bool {
        !self.unreachable_paths.is_empty()
            || !self.unreachable_steps.is_empty()
            || !self.orphan_steps.is_empty()
    }

    pub fn is_path_reachable(&self, path: PathId) -> bool {
        self.reachable_path_ids.contains(&path)
    }
}

#[derive(Default)]
struct ReachabilityVisitor {
    visited: Visited,
    dead_ends: Vec<PathId>,
}

impl<M> PathVisitor<M> for ReachabilityVisitor {
    fn visit_linear(
        &mut self,
        _graph: &PathGraph<M>,
        path: &Path<M>,
        next: Option<PathId>,
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if self.visited.enter(path.id()) {
            visit_next(next, pending);
        }
        Ok(())
    }

    fn visit_branching(
        &mut self,
        _graph: &PathGraph<M>,
        path: &Path<M>,
        branches: &[Branch<M>],
        pending: &mut Pending,
    ) -> Result<(), GraphError> {
        if !self.visited.enter(path.id()) {
            return Ok(());
        }
        if branches.is_empty() {
            self.dead_ends.push(path.id());
        }
        visit_branches(branches, pending);
        Ok(())
    }
}

/// Reachability of every declared path and step.
pub fn analyze_reachability<M>(graph: &PathGraph<M>) -> Result<ReachabilityResult, GraphError> {
    let mut visitor = ReachabilityVisitor::default();
    walk(graph, graph.first_path(), &mut visitor)?;

    let mut reachable_paths = BTreeSet::new();
    let mut reachable_path_ids = BTreeSet::new();
    let mut unreachable_paths = BTreeSet::new();
    let mut reachable_step_ids: BTreeSet<StepId> = BTreeSet::new();
    let mut member_step_ids: BTreeSet<StepId> = BTreeSet::new();

    for path in graph.paths() {
        member_step_ids.extend(path.steps().iter().copied());
        if visitor.visited.contains(path.id()) {
            reachable_paths.insert(path.name());
            reachable_path_ids.insert(path.id());
            reachable_step_ids.extend(path.steps().iter().copied());
        } else {
            unreachable_paths.insert(path.name());
        }
    }

    let mut reachable_steps = BTreeSet::new();
    let mut unreachable_steps = BTreeSet::new();
    let mut orphan_steps = BTreeSet::new();
    for (id, step) in graph.steps() {
        if reachable_step_ids.contains(&id) {
            reachable_steps.insert(step.name.clone());
        } else if member_step_ids.contains(&id) {
            unreachable_steps.insert(step.name.clone());
        } else {
            orphan_steps.insert(step.name.clone());
        }
    }

    Ok(ReachabilityResult {
        first_path: graph.path_name(graph.first_path()),
        reachable_paths,
        unreachable_paths,
        reachable_steps,
        unreachable_steps,
        orphan_steps,
        dead_ends: visitor
            .dead_ends
            .iter()
            .map(|id| graph.path_name(*id))
            .collect(),
        reachable_path_ids,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use waypoint_core::GraphBuilder;

    #[test]
    fn stray_paths_and_loose_steps_are_reported() {
        let mut b = GraphBuilder::<()>::new();
        let main = b.linear_path_labeled("main");
        let stray = b.linear_path_labeled("stray");
        let s1 = b.step("welcome");
        let s2 = b.step("hidden");
        b.step("loose");
        b.add_step(main, s1).unwrap();
        b.add_step(stray, s2).unwrap();
        let graph = b.build(main).unwrap();

        let result = analyze_reachability(&graph).unwrap();
        assert!(result.has_unreachable());
        assert!(result.reachable_paths.contains("main"));
        assert!(result.unreachable_paths.contains("stray"));
        assert!(result.reachable_steps.contains("welcome"));
        assert!(result.unreachable_steps.contains("hidden"));
        assert!(result.orphan_steps.contains("loose"));
    }

    #[test]
    fn branching_path_without_branches_is_a_dead_end() {
        let mut b = GraphBuilder::<()>::new();
        let head = b.branching_path_labeled("head");
        let step = b.step("only");
        b.add_step(head, step).unwrap();
        let graph = b.build(head).unwrap();

        let result = analyze_reachability(&graph).unwrap();
        assert!(result.dead_ends.contains("head"));
        assert!(!result.has_unreachable());
    }

    #[test]
    fn shared_labels_do_not_merge_reachability() {
        let mut b = GraphBuilder::<()>::new();
        let main = b.linear_path_labeled("page");
        let twin = b.linear_path_labeled("page");
        let shown = b.step("shown");
        let hidden = b.step("hidden");
        b.add_step(main, shown).unwrap();
        b.add_step(twin, hidden).unwrap();
        let graph = b.build(main).unwrap();

        let result = analyze_reachability(&graph).unwrap();
        assert!(result.is_path_reachable(main));
        assert!(!result.is_path_reachable(twin));
        assert!(result.unreachable_paths.contains("page"));
        assert!(result.unreachable_steps.contains("hidden"));
        assert!(!result.reachable_steps.contains("hidden"));
    }
}
