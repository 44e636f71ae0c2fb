//! The frozen step graph produced by [`GraphBuilder::build`](crate::GraphBuilder::build).

use crate::error::GraphError;
use crate::path::{Path, PathId};
use crate::step::{Step, StepId};

/// Arena of steps and paths rooted at a designated first path.
///
/// Nothing on a `PathGraph` mutates it; the structure is fixed from the moment
/// the builder is consumed.
#[derive(Debug)]
pub struct PathGraph<M> {
    pub(crate) steps: Vec<Step>,
    pub(crate) paths: Vec<Path<M>>,
    pub(crate) first: PathId,
}

impl<M> PathGraph<M> {
    pub fn first_path(&self) -> PathId {
        self.first
    }

    pub fn path(&self, id: PathId) -> Result<&Path<M>, GraphError> {
        self.paths.get(id.0).ok_or(GraphError::UnknownPath(id))
    }

    pub fn step(&self, id: StepId) -> Result<&Step, GraphError> {
        self.steps.get(id.0).ok_or(GraphError::UnknownStep(id))
    }

    /// Declared name of a step, or its handle when the handle is foreign.
    pub fn step_name(&self, id: StepId) -> String {
        match self.steps.get(id.0) {
            Some(step) => step.name.clone(),
            None => id.to_string(),
        }
    }

    /// Path label (or handle) for error messages and reports.
    pub fn path_name(&self, id: PathId) -> String {
        match self.paths.get(id.0) {
            Some(path) => path.name(),
            None => id.to_string(),
        }
    }

    /// [`Path::next_step`] with the step named by its declaration.
    pub fn next_step(&self, path: &Path<M>, step: StepId) -> Result<StepId, GraphError> {
        path.next_step(step).map_err(|err| self.name_step(err, step))
    }

    /// [`Path::previous_step`] with the step named by its declaration.
    pub fn previous_step(&self, path: &Path<M>, step: StepId) -> Result<StepId, GraphError> {
        path.previous_step(step)
            .map_err(|err| self.name_step(err, step))
    }

    /// Every declared path, reachable or not, in declaration order.
    pub fn paths(&self) -> impl Iterator<Item = &Path<M>> {
        self.paths.iter()
    }

    /// Every declared step, in declaration order.
    pub fn steps(&self) -> impl Iterator<Item = (StepId, &Step)> {
        self.steps
            .iter()
            .enumerate()
            .map(|(index, step)| (StepId(index), step))
    }

    /// Step declarations indexed by [`StepId::index`].
    pub fn declared_steps(&self) -> &[Step] {
        &self.steps
    }

    pub fn step_count(&self) -> usize {
        self.steps.len()
    }

    pub fn path_count(&self) -> usize {
        self.paths.len()
    }

    /// Find a path by label.
    pub fn path_by_label(&self, label: &str) -> Option<&Path<M>> {
        self.paths.iter().find(|p| p.label() == Some(label))
    }

    /// Find a step by its declared name. Names are not required to be
    /// unique; the first declaration wins.
    pub fn step_by_name(&self, name: &str) -> Option<StepId> {
        self.steps
            .iter()
            .position(|s| s.name == name)
            .map(StepId)
    }

    fn name_step(&self, err: GraphError, step: StepId) -> GraphError {
        match err {
            GraphError::StepNotFound { path, .. } => GraphError::StepNotFound {
                step: self.step_name(step),
                path,
            },
            GraphError::OutOfRange { path, boundary, .. } => GraphError::OutOfRange {
                step: self.step_name(step),
                path,
                boundary,
            },
            other => other,
        }
    }
}
