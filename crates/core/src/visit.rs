//! Visitor traversal over the path graph.
//!
//! Traversal logic lives in [`PathVisitor`] implementations rather than on
//! [`Path`]. Visitors that walk the whole graph carry a [`Visited`] set so
//! that every path is processed at most once, which keeps diamond-shaped and
//! cyclic graphs finite.
//!
//! A walk never recurses: visitors hand successor paths to a [`Pending`]
//! worklist and [`walk`] drains it, so the depth of the graph does not
//! bound the depth of the call stack.

use std::collections::HashSet;

use crate::error::GraphError;
use crate::graph::PathGraph;
use crate::path::{Branch, Path, PathId};

/// Variant-specific callbacks invoked by [`Path::accept`].
pub trait PathVisitor<M> {
    fn visit_linear(
        &mut self,
        graph: &PathGraph<M>,
        path: &Path<M>,
        next: Option<PathId>,
        pending: &mut Pending,
    ) -> Result<(), GraphError>;

    fn visit_branching(
        &mut self,
        graph: &PathGraph<M>,
        path: &Path<M>,
        branches: &[Branch<M>],
        pending: &mut Pending,
    ) -> Result<(), GraphError>;
}

/// Paths queued for a walk, taken last-in first-out.
#[derive(Debug, Default)]
pub struct Pending {
    stack: Vec<PathId>,
}

impl Pending {
    fn push(&mut self, path: PathId) {
        self.stack.push(path);
    }

    fn pop(&mut self) -> Option<PathId> {
        self.stack.pop()
    }

    pub fn len(&self) -> usize {
        self.stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stack.is_empty()
    }
}

/// Set of paths already entered by a walk, in first-entry order.
#[derive(Debug, Default, Clone)]
pub struct Visited {
    seen: HashSet<PathId>,
    order: Vec<PathId>,
}

impl Visited {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `path`; returns `false` if it had already been entered.
    pub fn enter(&mut self, path: PathId) -> bool {
        if self.seen.insert(path) {
            self.order.push(path);
            true
        } else {
            false
        }
    }

    pub fn contains(&self, path: PathId) -> bool {
        self.seen.contains(&path)
    }

    pub fn order(&self) -> &[PathId] {
        &self.order
    }

    pub fn into_order(self) -> Vec<PathId> {
        self.order
    }
}

/// Walk the graph from `from` until no path is pending.
///
/// Paths are entered depth-first in branch insertion order, the same order
/// a recursive walk would produce.
pub fn walk<M, V>(graph: &PathGraph<M>, from: PathId, visitor: &mut V) -> Result<(), GraphError>
where
    V: PathVisitor<M> + ?Sized,
{
    let mut pending = Pending::default();
    pending.push(from);
    while let Some(id) = pending.pop() {
        graph.path(id)?.accept(graph, visitor, &mut pending)?;
    }
    Ok(())
}

/// Queue a linear path's successor, if it has one.
pub fn visit_next(next: Option<PathId>, pending: &mut Pending) {
    if let Some(next) = next {
        pending.push(next);
    }
}

/// Queue every branch target so they are entered in insertion order.
pub fn visit_branches<M>(branches: &[Branch<M>], pending: &mut Pending) {
    for branch in branches.iter().rev() {
        pending.push(branch.target());
    }
}
