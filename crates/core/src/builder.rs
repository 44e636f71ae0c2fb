//! Mutable construction phase of a step graph.
//!
//! Steps and paths are declared on a [`GraphBuilder`], linked together, and
//! then frozen with [`GraphBuilder::build`]. Builder calls validate handles
//! and path variants eagerly; graph-shape checks (terminal path, duplicate
//! membership, empty paths) happen when a [`GraphIndex`](crate::GraphIndex)
//! is built.
//!
//! ```
//! use waypoint_core::{Always, GraphBuilder};
//!
//! struct Answers { include_optional: bool }
//!
//! let mut b = GraphBuilder::<Answers>::new();
//! let intro = b.branching_path_labeled("intro");
//! let optional = b.linear_path_labeled("optional");
//! let finish = b.linear_path_labeled("finish");
//!
//! let welcome = b.step("Welcome");
//! let extras = b.step("Extras");
//! let done = b.step("Done");
//! b.add_step(intro, welcome).unwrap();
//! b.add_step(optional, extras).unwrap();
//! b.add_step(finish, done).unwrap();
//!
//! b.add_branch(intro, optional, |a: &Answers| a.include_optional).unwrap();
//! b.add_branch(intro, finish, Always).unwrap();
//! b.set_next_path(optional, finish).unwrap();
//!
//! let graph = b.build(intro).unwrap();
//! assert_eq!(graph.step_count(), 3);
//! ```

use crate::condition::Condition;
use crate::error::GraphError;
use crate::graph::PathGraph;
use crate::path::{Branch, Path, PathId, PathKind};
use crate::step::{Step, StepId};

#[derive(Debug)]
pub struct GraphBuilder<M> {
    steps: Vec<Step>,
    paths: Vec<Path<M>>,
}

impl<M> Default for GraphBuilder<M> {
    fn default() -> Self {
        Self::new()
    }
}

impl<M> GraphBuilder<M> {
    pub fn new() -> Self {
        GraphBuilder {
            steps: Vec::new(),
            paths: Vec::new(),
        }
    }

    /// Builder holding a single linear path with one step per name, in order.
    ///
    /// This is the plain list wizard: no branching, the one path is terminal.
    pub fn linear<I, S>(names: I) -> (Self, PathId, Vec<StepId>)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut builder = Self::new();
        let path = builder.linear_path();
        let steps: Vec<StepId> = names
            .into_iter()
            .map(|name| {
                let step = builder.step(name);
                builder.paths[path.0].steps.push(step);
                step
            })
            .collect();
        (builder, path, steps)
    }

    /// Declare an incomplete, idle step.
    pub fn step(&mut self, name: impl Into<String>) -> StepId {
        self.step_with(Step::new(name))
    }

    pub fn step_with(&mut self, step: Step) -> StepId {
        self.steps.push(step);
        StepId(self.steps.len() - 1)
    }

    pub fn linear_path(&mut self) -> PathId {
        self.push_path(None, PathKind::Linear { next: None })
    }

    pub fn linear_path_labeled(&mut self, label: impl Into<String>) -> PathId {
        self.push_path(Some(label.into()), PathKind::Linear { next: None })
    }

    pub fn branching_path(&mut self) -> PathId {
        self.push_path(
            None,
            PathKind::Branching {
                branches: Vec::new(),
            },
        )
    }

    pub fn branching_path_labeled(&mut self, label: impl Into<String>) -> PathId {
        self.push_path(
            Some(label.into()),
            PathKind::Branching {
                branches: Vec::new(),
            },
        )
    }

    /// Append a step to a path. Steps are traversed in the order added.
    pub fn add_step(&mut self, path: PathId, step: StepId) -> Result<(), GraphError> {
        if step.0 >= self.steps.len() {
            return Err(GraphError::UnknownStep(step));
        }
        self.path_mut(path)?.steps.push(step);
        Ok(())
    }

    /// Add a branch to a branching path. Branches are evaluated in the order
    /// they are added.
    pub fn add_branch<C>(
        &mut self,
        path: PathId,
        target: PathId,
        condition: C,
    ) -> Result<(), GraphError>
    where
        C: Condition<M> + 'static,
    {
        self.push_branch(path, target, None, Box::new(condition))
    }

    pub fn add_labeled_branch<C>(
        &mut self,
        path: PathId,
        target: PathId,
        label: impl Into<String>,
        condition: C,
    ) -> Result<(), GraphError>
    where
        C: Condition<M> + 'static,
    {
        self.push_branch(path, target, Some(label.into()), Box::new(condition))
    }

    /// Set the fixed successor of a linear path.
    pub fn set_next_path(&mut self, path: PathId, next: PathId) -> Result<(), GraphError> {
        self.check_path(next)?;
        let owner = self.path_mut(path)?;
        match &mut owner.kind {
            PathKind::Linear { next: slot } => {
                *slot = Some(next);
                Ok(())
            }
            PathKind::Branching { .. } => Err(GraphError::InvalidBuild(format!(
                "cannot set a next path on branching path '{}'",
                owner.name()
            ))),
        }
    }

    /// Freeze the graph with `first` as its root.
    pub fn build(self, first: PathId) -> Result<PathGraph<M>, GraphError> {
        self.check_path(first)?;
        Ok(PathGraph {
            steps: self.steps,
            paths: self.paths,
            first,
        })
    }

    fn push_path(&mut self, label: Option<String>, kind: PathKind<M>) -> PathId {
        let id = PathId(self.paths.len());
        self.paths.push(Path::new(id, label, kind));
        id
    }

    fn push_branch(
        &mut self,
        path: PathId,
        target: PathId,
        label: Option<String>,
        condition: Box<dyn Condition<M>>,
    ) -> Result<(), GraphError> {
        self.check_path(target)?;
        let owner = self.path_mut(path)?;
        match &mut owner.kind {
            PathKind::Branching { branches } => {
                branches.push(Branch {
                    condition,
                    target,
                    label,
                });
                Ok(())
            }
            PathKind::Linear { .. } => Err(GraphError::InvalidBuild(format!(
                "cannot add a branch to linear path '{}'",
                owner.name()
            ))),
        }
    }

    fn check_path(&self, id: PathId) -> Result<(), GraphError> {
        if id.0 < self.paths.len() {
            Ok(())
        } else {
            Err(GraphError::UnknownPath(id))
        }
    }

    fn path_mut(&mut self, id: PathId) -> Result<&mut Path<M>, GraphError> {
        self.paths.get_mut(id.0).ok_or(GraphError::UnknownPath(id))
    }
}
