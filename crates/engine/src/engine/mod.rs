//! Navigation engine: a state machine walk over a validated step graph.
//!
//! The engine's only navigation state is the active step and a history stack
//! of previously active steps. Every forward move pushes the step being left;
//! every backward move pops. Legality of each control is derived from the
//! active step's position in its path and in the graph, recomputed after each
//! mutation and pushed to observers.
//!
//! The graph and its index never change once the engine exists. Conditions
//! see the host model through a shared reference only, so branch resolution
//! cannot disturb the active step or history.

use waypoint_core::{GraphIndex, Path, PathGraph, PathId, StepId};

use crate::availability::Availability;
use crate::error::NavigationError;
use crate::observer::{
    NavigationEvent, NavigationObserver, NavigationView, ObserverId, Observers, StepStatus,
};

pub struct NavigationEngine<M> {
    graph: PathGraph<M>,
    index: GraphIndex,
    model: M,
    status: Vec<StepStatus>,
    active: StepId,
    history: Vec<StepId>,
    availability: Availability,
    jump_visible: bool,
    observers: Observers,
}

impl<M> NavigationEngine<M> {
    /// Validate `graph` and start a session on its first step.
    ///
    /// The engine starts in the state `reset()` produces: the first step is
    /// active and is the only history entry. On failure no engine exists.
    pub fn new(graph: PathGraph<M>, model: M) -> Result<Self, NavigationError> {
        let index = GraphIndex::build(&graph)?;
        let status = graph
            .declared_steps()
            .iter()
            .map(StepStatus::from)
            .collect();
        let first = index.first_step();

        let mut engine = NavigationEngine {
            graph,
            index,
            model,
            status,
            active: first,
            history: vec![first],
            availability: Availability::default(),
            jump_visible: true,
            observers: Observers::default(),
        };
        engine.availability = engine.compute_availability();

        tracing::debug!(
            first = %engine.graph.step_name(first),
            terminal = %engine.graph.step_name(engine.index.terminal_step()),
            steps = engine.index.step_count(),
            "navigation engine ready"
        );
        Ok(engine)
    }

    // ──────────────────────────────────────────────
    // Navigation
    // ──────────────────────────────────────────────

    /// Return to the first step with a fresh history holding only that step.
    pub fn reset(&mut self) {
        let first = self.index.first_step();
        self.history.clear();
        self.history.push(first);
        tracing::debug!(step = %self.graph.step_name(first), "reset");
        let events = self.move_to(first);
        self.publish(events);
    }

    /// Move forward one step, resolving the next path when the active step is
    /// the last of its path.
    ///
    /// Fails with `IllegalNavigation` on the final step and with
    /// `NoBranchSelected` when a branching path matches nothing; in both cases
    /// the engine is unchanged.
    pub fn advance(&mut self) -> Result<StepId, NavigationError> {
        let current = self.active;
        if self.is_terminal_step(current) {
            return Err(NavigationError::IllegalNavigation {
                step: self.graph.step_name(current),
                reason: "the active step is the final step".to_string(),
            });
        }

        let path = self.path_of(current)?;
        let target = if path.is_last_step(current) {
            let next = path.resolve_next(&self.model)?.ok_or_else(|| {
                NavigationError::IllegalNavigation {
                    step: self.graph.step_name(current),
                    reason: format!("path '{}' has no next path", path.name()),
                }
            })?;
            self.graph.path(next)?.first_step()?
        } else {
            self.graph.next_step(path, current)?
        };

        self.history.push(current);
        tracing::debug!(
            from = %self.graph.step_name(current),
            to = %self.graph.step_name(target),
            depth = self.history.len(),
            "advance"
        );
        let events = self.move_to(target);
        self.publish(events);
        Ok(target)
    }

    /// Return to the most recently left step.
    pub fn retreat(&mut self) -> Result<StepId, NavigationError> {
        let previous = self.history.pop().ok_or(NavigationError::NoHistory)?;
        tracing::debug!(
            from = %self.graph.step_name(self.active),
            to = %self.graph.step_name(previous),
            depth = self.history.len(),
            "retreat"
        );
        let events = self.move_to(previous);
        self.publish(events);
        Ok(previous)
    }

    /// Move straight to the final step, remembering the step being left.
    pub fn jump_to_last(&mut self) -> StepId {
        let current = self.active;
        let last = self.index.terminal_step();
        self.history.push(current);
        tracing::debug!(
            from = %self.graph.step_name(current),
            to = %self.graph.step_name(last),
            "jump to last"
        );
        let events = self.move_to(last);
        self.publish(events);
        last
    }

    // ──────────────────────────────────────────────
    // Step status
    // ──────────────────────────────────────────────

    /// Record a completeness change for `step` and recompute availability.
    pub fn set_step_complete(&mut self, step: StepId, complete: bool) -> Result<(), NavigationError> {
        let status = self.status_mut(step)?;
        if status.complete == complete {
            return Ok(());
        }
        status.complete = complete;

        let mut events = vec![NavigationEvent::StepCompletionChanged { step, complete }];
        self.recompute(&mut events);
        self.publish(events);
        Ok(())
    }

    /// Record a busy-state change for `step`. Busy steps only affect the
    /// action layer, so availability is left alone.
    pub fn set_step_busy(&mut self, step: StepId, busy: bool) -> Result<(), NavigationError> {
        let status = self.status_mut(step)?;
        if status.busy == busy {
            return Ok(());
        }
        status.busy = busy;
        self.publish(vec![NavigationEvent::StepBusyChanged { step, busy }]);
        Ok(())
    }

    pub fn is_step_complete(&self, step: StepId) -> Result<bool, NavigationError> {
        self.status_of(step).map(|s| s.complete)
    }

    pub fn is_step_busy(&self, step: StepId) -> Result<bool, NavigationError> {
        self.status_of(step).map(|s| s.busy)
    }

    /// True iff every reachable step is complete.
    pub fn all_steps_complete(&self) -> bool {
        self.index
            .steps()
            .all(|step| self.status[step.index()].complete)
    }

    /// Recompute availability on demand, e.g. after a model change that the
    /// host wants reflected immediately.
    pub fn refresh(&mut self) {
        let mut events = Vec::new();
        self.recompute(&mut events);
        self.publish(events);
    }

    // ──────────────────────────────────────────────
    // Availability
    // ──────────────────────────────────────────────

    pub fn availability(&self) -> Availability {
        self.availability
    }

    pub fn is_advance_available(&self) -> bool {
        self.availability.advance
    }

    pub fn is_retreat_available(&self) -> bool {
        self.availability.retreat
    }

    pub fn is_jump_available(&self) -> bool {
        self.availability.jump
    }

    pub fn is_cancel_available(&self) -> bool {
        self.availability.cancel
    }

    /// Whether a "last" control should be shown at all.
    pub fn is_jump_visible(&self) -> bool {
        self.jump_visible
    }

    pub fn set_jump_visible(&mut self, visible: bool) {
        if self.jump_visible == visible {
            return;
        }
        let old = self.jump_visible;
        self.jump_visible = visible;
        self.publish(vec![NavigationEvent::JumpVisibilityChanged { old, new: visible }]);
    }

    /// True iff `step` is the last step of the terminal path.
    pub fn is_terminal_step(&self, step: StepId) -> bool {
        self.index.path_for_step(step) == Some(self.index.terminal_path())
            && self.index.terminal_step() == step
    }

    // ──────────────────────────────────────────────
    // Queries
    // ──────────────────────────────────────────────

    pub fn active_step(&self) -> StepId {
        self.active
    }

    /// History stack, oldest first.
    pub fn history(&self) -> &[StepId] {
        &self.history
    }

    /// Every reachable step. Order is declaration order, not traversal order.
    pub fn steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.index.steps()
    }

    pub fn step_name(&self, step: StepId) -> String {
        self.graph.step_name(step)
    }

    pub fn path_for_step(&self, step: StepId) -> Option<PathId> {
        self.index.path_for_step(step)
    }

    pub fn first_path(&self) -> PathId {
        self.index.first_path()
    }

    pub fn terminal_path(&self) -> PathId {
        self.index.terminal_path()
    }

    pub fn terminal_step(&self) -> StepId {
        self.index.terminal_step()
    }

    pub fn graph(&self) -> &PathGraph<M> {
        &self.graph
    }

    pub fn index(&self) -> &GraphIndex {
        &self.index
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Mutable access to the host model. Conditions read it the next time a
    /// branching path is exhausted.
    pub fn model_mut(&mut self) -> &mut M {
        &mut self.model
    }

    pub fn into_model(self) -> M {
        self.model
    }

    pub fn view(&self) -> NavigationView<'_> {
        NavigationView {
            active: self.active,
            history: &self.history,
            availability: self.availability,
            jump_visible: self.jump_visible,
            index: &self.index,
            status: &self.status,
            steps: self.graph.declared_steps(),
        }
    }

    // ──────────────────────────────────────────────
    // Observers
    // ──────────────────────────────────────────────

    pub fn subscribe<O>(&mut self, observer: O) -> ObserverId
    where
        O: NavigationObserver + 'static,
    {
        self.observers.add(Box::new(observer))
    }

    /// Closure form of [`subscribe`](Self::subscribe).
    pub fn subscribe_fn<F>(&mut self, callback: F) -> ObserverId
    where
        F: FnMut(&NavigationEvent, &NavigationView<'_>) + 'static,
    {
        self.observers.add(Box::new(callback))
    }

    pub fn unsubscribe(&mut self, id: ObserverId) -> bool {
        self.observers.remove(id)
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    // ──────────────────────────────────────────────
    // Internals
    // ──────────────────────────────────────────────

    fn path_of(&self, step: StepId) -> Result<&Path<M>, NavigationError> {
        let id = self
            .index
            .path_for_step(step)
            .ok_or(NavigationError::UnknownStep(step))?;
        Ok(self.graph.path(id)?)
    }

    fn status_of(&self, step: StepId) -> Result<&StepStatus, NavigationError> {
        if !self.index.contains_step(step) {
            return Err(NavigationError::UnknownStep(step));
        }
        self.status
            .get(step.index())
            .ok_or(NavigationError::UnknownStep(step))
    }

    fn status_mut(&mut self, step: StepId) -> Result<&mut StepStatus, NavigationError> {
        if !self.index.contains_step(step) {
            return Err(NavigationError::UnknownStep(step));
        }
        self.status
            .get_mut(step.index())
            .ok_or(NavigationError::UnknownStep(step))
    }

    fn compute_availability(&self) -> Availability {
        let active = self.active;
        let terminal = self.is_terminal_step(active);
        let complete = self
            .status
            .get(active.index())
            .is_some_and(|s| s.complete);
        let on_first_step = self.index.path_for_step(active) == Some(self.index.first_path())
            && self.index.first_step() == active;

        Availability {
            advance: complete && !terminal,
            retreat: !on_first_step,
            jump: self.all_steps_complete() && !terminal,
            cancel: true,
        }
    }

    /// Set the active step and recompute availability, returning the events
    /// in mutation order.
    fn move_to(&mut self, target: StepId) -> Vec<NavigationEvent> {
        let mut events = Vec::new();
        let old = self.active;
        self.active = target;
        if old != target {
            events.push(NavigationEvent::ActiveStepChanged { old, new: target });
        }
        self.recompute(&mut events);
        events
    }

    fn recompute(&mut self, events: &mut Vec<NavigationEvent>) {
        let next = self.compute_availability();
        let changes = self.availability.changes(&next);
        self.availability = next;
        events.extend(
            changes
                .into_iter()
                .map(|(control, old, new)| NavigationEvent::AvailabilityChanged { control, old, new }),
        );
    }

    fn publish(&mut self, events: Vec<NavigationEvent>) {
        if events.is_empty() || self.observers.is_empty() {
            return;
        }
        let view = NavigationView {
            active: self.active,
            history: &self.history,
            availability: self.availability,
            jump_visible: self.jump_visible,
            index: &self.index,
            status: &self.status,
            steps: self.graph.declared_steps(),
        };
        self.observers.notify(&events, &view);
    }
}

#[cfg(test)]
mod tests;
