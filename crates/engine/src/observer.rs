//! Change notifications pushed to a presentation layer.
//!
//! Observers are invoked synchronously, after a mutating call has finished
//! updating the engine, once per event in mutation order. The
//! [`NavigationView`] handed to each callback already reflects the new state.

use serde::Serialize;
use waypoint_core::{GraphIndex, Step, StepId};

use crate::availability::{Availability, Control};

/// Live per-step flags held by the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct StepStatus {
    pub complete: bool,
    pub busy: bool,
}

impl From<&Step> for StepStatus {
    fn from(step: &Step) -> Self {
        StepStatus {
            complete: step.complete,
            busy: step.busy,
        }
    }
}

/// A state change observed on the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum NavigationEvent {
    ActiveStepChanged { old: StepId, new: StepId },
    AvailabilityChanged { control: Control, old: bool, new: bool },
    StepCompletionChanged { step: StepId, complete: bool },
    StepBusyChanged { step: StepId, busy: bool },
    JumpVisibilityChanged { old: bool, new: bool },
}

/// Read-only view of the engine, valid for the duration of a callback.
#[derive(Debug, Clone, Copy)]
pub struct NavigationView<'a> {
    pub(crate) active: StepId,
    pub(crate) history: &'a [StepId],
    pub(crate) availability: Availability,
    pub(crate) jump_visible: bool,
    pub(crate) index: &'a GraphIndex,
    pub(crate) status: &'a [StepStatus],
    pub(crate) steps: &'a [Step],
}

impl<'a> NavigationView<'a> {
    pub fn active_step(&self) -> StepId {
        self.active
    }

    pub fn history(&self) -> &'a [StepId] {
        self.history
    }

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

    pub fn is_jump_visible(&self) -> bool {
        self.jump_visible
    }

    pub fn is_terminal_step(&self, step: StepId) -> bool {
        self.index.terminal_step() == step
    }

    pub fn is_step_complete(&self, step: StepId) -> bool {
        self.status.get(step.index()).is_some_and(|s| s.complete)
    }

    pub fn is_step_busy(&self, step: StepId) -> bool {
        self.status.get(step.index()).is_some_and(|s| s.busy)
    }

    pub fn step_name(&self, step: StepId) -> Option<&'a str> {
        self.steps.get(step.index()).map(|s| s.name.as_str())
    }
}

/// Receiver of [`NavigationEvent`]s.
pub trait NavigationObserver {
    fn on_event(&mut self, event: &NavigationEvent, view: &NavigationView<'_>);
}

impl<F> NavigationObserver for F
where
    F: FnMut(&NavigationEvent, &NavigationView<'_>),
{
    fn on_event(&mut self, event: &NavigationEvent, view: &NavigationView<'_>) {
        self(event, view)
    }
}

/// Token returned by `subscribe`, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

#[derive(Default)]
pub(crate) struct Observers {
    next_id: u64,
    entries: Vec<(ObserverId, Box<dyn NavigationObserver>)>,
}

impl Observers {
    pub(crate) fn add(&mut self, observer: Box<dyn NavigationObserver>) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.entries.push((id, observer));
        id
    }

    pub(crate) fn remove(&mut self, id: ObserverId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(entry, _)| *entry != id);
        self.entries.len() != before
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn notify(&mut self, events: &[NavigationEvent], view: &NavigationView<'_>) {
        for event in events {
            for (_, observer) in &mut self.entries {
                observer.on_event(event, view);
            }
        }
    }
}
