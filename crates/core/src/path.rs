//! Paths: ordered runs of steps and the edge that follows them.
//!
//! A path is either linear (one fixed successor, or none for the terminal
//! path) or branching (successor chosen at runtime by the first matching
//! condition). The two variants are a tagged union; traversal code that needs
//! to tell them apart goes through [`Path::accept`] and a [`PathVisitor`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::condition::Condition;
use crate::error::{Boundary, GraphError};
use crate::graph::PathGraph;
use crate::step::StepId;
use crate::visit::{PathVisitor, Pending};

/// Handle to a path declared on a [`GraphBuilder`](crate::GraphBuilder).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PathId(pub(crate) usize);

impl PathId {
    /// Position of the path in its graph's arena.
    pub fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for PathId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "path#{}", self.0)
    }
}

/// One outgoing edge of a branching path.
pub struct Branch<M> {
    pub(crate) condition: Box<dyn Condition<M>>,
    pub(crate) target: PathId,
    pub(crate) label: Option<String>,
}

impl<M> Branch<M> {
    pub fn target(&self) -> PathId {
        self.target
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn evaluate(&self, model: &M) -> bool {
        self.condition.evaluate(model)
    }
}

impl<M> fmt::Debug for Branch<M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Branch")
            .field("target", &self.target)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// The edge that follows a path once its steps are exhausted.
#[derive(Debug)]
pub enum PathKind<M> {
    Linear { next: Option<PathId> },
    Branching { branches: Vec<Branch<M>> },
}

/// An ordered, non-empty (once validated) sequence of steps.
#[derive(Debug)]
pub struct Path<M> {
    pub(crate) id: PathId,
    pub(crate) label: Option<String>,
    pub(crate) steps: Vec<StepId>,
    pub(crate) kind: PathKind<M>,
}

impl<M> Path<M> {
    pub(crate) fn new(id: PathId, label: Option<String>, kind: PathKind<M>) -> Self {
        Path {
            id,
            label,
            steps: Vec::new(),
            kind,
        }
    }

    pub fn id(&self) -> PathId {
        self.id
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label if one was given, otherwise the handle (`path#3`).
    pub fn name(&self) -> String {
        match &self.label {
            Some(label) => label.clone(),
            None => self.id.to_string(),
        }
    }

    pub fn steps(&self) -> &[StepId] {
        &self.steps
    }

    pub fn kind(&self) -> &PathKind<M> {
        &self.kind
    }

    pub fn is_linear(&self) -> bool {
        matches!(self.kind, PathKind::Linear { .. })
    }

    pub fn is_branching(&self) -> bool {
        matches!(self.kind, PathKind::Branching { .. })
    }

    pub fn contains(&self, step: StepId) -> bool {
        self.steps.contains(&step)
    }

    pub fn first_step(&self) -> Result<StepId, GraphError> {
        self.steps.first().copied().ok_or_else(|| self.empty())
    }

    pub fn last_step(&self) -> Result<StepId, GraphError> {
        self.steps.last().copied().ok_or_else(|| self.empty())
    }

    pub fn next_step(&self, current: StepId) -> Result<StepId, GraphError> {
        let index = self.position(current)?;
        self.steps
            .get(index + 1)
            .copied()
            .ok_or_else(|| self.out_of_range(current, Boundary::Last))
    }

    pub fn previous_step(&self, current: StepId) -> Result<StepId, GraphError> {
        let index = self.position(current)?;
        index
            .checked_sub(1)
            .map(|i| self.steps[i])
            .ok_or_else(|| self.out_of_range(current, Boundary::First))
    }

    /// `false` when `step` is not a member.
    pub fn is_first_step(&self, step: StepId) -> bool {
        self.steps.first() == Some(&step)
    }

    /// `false` when `step` is not a member.
    pub fn is_last_step(&self, step: StepId) -> bool {
        self.steps.last() == Some(&step)
    }

    /// Fixed successor of a linear path; `None` for the terminal path and for
    /// branching paths.
    pub fn next_path(&self) -> Option<PathId> {
        match &self.kind {
            PathKind::Linear { next } => *next,
            PathKind::Branching { .. } => None,
        }
    }

    /// Branches in insertion order; empty for linear paths.
    pub fn branches(&self) -> &[Branch<M>] {
        match &self.kind {
            PathKind::Linear { .. } => &[],
            PathKind::Branching { branches } => branches,
        }
    }

    /// Successor to follow once this path is exhausted.
    ///
    /// Linear paths return their fixed successor (`None` when terminal).
    /// Branching paths evaluate their conditions in insertion order and
    /// return the target of the first one that holds; there is no fallback.
    pub fn resolve_next(&self, model: &M) -> Result<Option<PathId>, GraphError> {
        match &self.kind {
            PathKind::Linear { next } => Ok(*next),
            PathKind::Branching { branches } => {
                for (position, branch) in branches.iter().enumerate() {
                    let selected = branch.evaluate(model);
                    tracing::trace!(
                        path = %self.name(),
                        branch = position,
                        target = %branch.target,
                        selected,
                        "evaluated branch condition"
                    );
                    if selected {
                        return Ok(Some(branch.target));
                    }
                }
                Err(GraphError::NoBranchSelected { path: self.name() })
            }
        }
    }

    /// Dispatch to the visitor method matching this path's variant.
    pub fn accept<V>(
        &self,
        graph: &PathGraph<M>,
        visitor: &mut V,
        pending: &mut Pending,
    ) -> Result<(), GraphError>
    where
        V: PathVisitor<M> + ?Sized,
    {
        match &self.kind {
            PathKind::Linear { next } => visitor.visit_linear(graph, self, *next, pending),
            PathKind::Branching { branches } => {
                visitor.visit_branching(graph, self, branches, pending)
            }
        }
    }

    fn position(&self, step: StepId) -> Result<usize, GraphError> {
        self.steps
            .iter()
            .position(|s| *s == step)
            .ok_or_else(|| GraphError::StepNotFound {
                step: step.to_string(),
                path: self.name(),
            })
    }

    fn empty(&self) -> GraphError {
        GraphError::EmptyPath { path: self.name() }
    }

    fn out_of_range(&self, step: StepId, boundary: Boundary) -> GraphError {
        GraphError::OutOfRange {
            step: step.to_string(),
            path: self.name(),
            boundary,
        }
    }
}
