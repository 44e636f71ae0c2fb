//! Compilation of a [`Definition`] into a step graph.
//!
//! Compilation resolves string ids into arena handles and enforces the
//! per-path shape rules (a linear path has no branches, a branching path no
//! successor). It does not check graph-level properties such as the unique
//! terminal path; those are reported when the graph is indexed, e.g. by
//! `NavigationEngine::new`.

use std::collections::BTreeMap;

use waypoint_core::{GraphBuilder, PathGraph, PathId, Step, StepId};

use crate::error::DefinitionError;
use crate::facts::{FactCondition, FactSet};
use crate::types::{Definition, PathKindDef};

/// A compiled definition: the graph, its default facts, and the id tables
/// needed to talk about steps and paths by their document ids.
#[derive(Debug)]
pub struct CompiledWizard {
    pub id: String,
    pub title: Option<String>,
    pub graph: PathGraph<FactSet>,
    pub facts: FactSet,
    step_ids: BTreeMap<String, StepId>,
    path_ids: BTreeMap<String, PathId>,
    step_keys: Vec<String>,
}

impl CompiledWizard {
    pub fn step(&self, id: &str) -> Option<StepId> {
        self.step_ids.get(id).copied()
    }

    pub fn path(&self, id: &str) -> Option<PathId> {
        self.path_ids.get(id).copied()
    }

    /// Document id of a compiled step.
    pub fn step_key(&self, step: StepId) -> Option<&str> {
        self.step_keys.get(step.index()).map(String::as_str)
    }

    /// Split into the graph and the default facts, ready for an engine.
    pub fn into_parts(self) -> (PathGraph<FactSet>, FactSet) {
        (self.graph, self.facts)
    }
}

impl Definition {
    /// Resolve ids and build the step graph.
    pub fn compile(&self) -> Result<CompiledWizard, DefinitionError> {
        let mut builder = GraphBuilder::<FactSet>::new();

        let mut step_ids = BTreeMap::new();
        let mut step_keys = Vec::with_capacity(self.steps.len());
        for def in &self.steps {
            let mut step = Step::new(def.name.clone())
                .with_complete(def.complete)
                .with_busy(def.busy);
            if let Some(summary) = &def.summary {
                step = step.with_summary(summary.clone());
            }
            let id = builder.step_with(step);
            if step_ids.insert(def.id.clone(), id).is_some() {
                return Err(DefinitionError::DuplicateId {
                    kind: "step",
                    id: def.id.clone(),
                });
            }
            step_keys.push(def.id.clone());
        }

        // Declare every path before linking so forward references resolve.
        let mut path_ids = BTreeMap::new();
        for def in &self.paths {
            let id = match def.kind {
                PathKindDef::Linear => builder.linear_path_labeled(def.id.clone()),
                PathKindDef::Branching => builder.branching_path_labeled(def.id.clone()),
            };
            if path_ids.insert(def.id.clone(), id).is_some() {
                return Err(DefinitionError::DuplicateId {
                    kind: "path",
                    id: def.id.clone(),
                });
            }
        }

        let resolve_path = |context: String, id: &str| {
            path_ids
                .get(id)
                .copied()
                .ok_or_else(|| DefinitionError::UnknownPath {
                    context,
                    path: id.to_string(),
                })
        };

        for def in &self.paths {
            let path = resolve_path(format!("path '{}'", def.id), &def.id)?;

            for step_key in &def.steps {
                let step = step_ids
                    .get(step_key)
                    .copied()
                    .ok_or_else(|| DefinitionError::UnknownStep {
                        path: def.id.clone(),
                        step: step_key.clone(),
                    })?;
                builder.add_step(path, step)?;
            }

            match def.kind {
                PathKindDef::Linear => {
                    if !def.branches.is_empty() {
                        return Err(DefinitionError::InvalidPath {
                            path: def.id.clone(),
                            message: "a linear path cannot declare branches".to_string(),
                        });
                    }
                    if let Some(next) = &def.next {
                        let next = resolve_path(format!("next of path '{}'", def.id), next)?;
                        builder.set_next_path(path, next)?;
                    }
                }
                PathKindDef::Branching => {
                    if def.next.is_some() {
                        return Err(DefinitionError::InvalidPath {
                            path: def.id.clone(),
                            message: "a branching path cannot declare a next path".to_string(),
                        });
                    }
                    for branch in &def.branches {
                        let target =
                            resolve_path(format!("branch of path '{}'", def.id), &branch.to)?;
                        let condition = FactCondition::from(&branch.when);
                        match &branch.label {
                            Some(label) => {
                                builder.add_labeled_branch(path, target, label.clone(), condition)?
                            }
                            None => builder.add_branch(path, target, condition)?,
                        }
                    }
                }
            }
        }

        let first = resolve_path("first".to_string(), &self.first)?;
        let graph = builder.build(first)?;

        tracing::debug!(
            wizard = %self.id,
            steps = graph.step_count(),
            paths = graph.path_count(),
            "compiled definition"
        );

        Ok(CompiledWizard {
            id: self.id.clone(),
            title: self.title.clone(),
            graph,
            facts: self.facts.clone(),
            step_ids,
            path_ids,
            step_keys,
        })
    }
}
