//! Wizard actions: the user-facing buttons expressed over the engine.
//!
//! An [`Action`] bundles an availability rule with a transition. Actions also
//! honour the busy flag of the active step and give the host a chance to apply
//! (or refuse) the step's state before moving forward.

use std::fmt;

use serde::Serialize;
use thiserror::Error;
use waypoint_core::StepId;

use crate::engine::NavigationEngine;
use crate::error::NavigationError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Action {
    Previous,
    Next,
    Last,
    Finish,
    Cancel,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::Previous,
        Action::Next,
        Action::Last,
        Action::Finish,
        Action::Cancel,
    ];
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Action::Previous => "previous",
            Action::Next => "next",
            Action::Last => "last",
            Action::Finish => "finish",
            Action::Cancel => "cancel",
        };
        f.write_str(name)
    }
}

/// A step's refusal to hand over its state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InvalidState {
    pub message: String,
    /// Whether the message is meant for the person driving the wizard.
    pub show_user: bool,
}

impl InvalidState {
    pub fn new(message: impl Into<String>) -> Self {
        InvalidState {
            message: message.into(),
            show_user: true,
        }
    }

    /// A refusal the host should log but not display.
    pub fn silent(message: impl Into<String>) -> Self {
        InvalidState {
            message: message.into(),
            show_user: false,
        }
    }
}

impl fmt::Display for InvalidState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// Host hooks invoked by [`NavigationEngine::perform`].
pub trait StepHandler<M> {
    /// Copy the step's pending input into the model. Returning an error
    /// vetoes the action.
    fn apply_state(&mut self, step: StepId, model: &mut M) -> Result<(), InvalidState> {
        let _ = (step, model);
        Ok(())
    }

    /// Stop whatever background work made `step` busy.
    fn abort_busy(&mut self, step: StepId) {
        let _ = step;
    }
}

/// Handler that accepts every step and has nothing to abort.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopHandler;

impl<M> StepHandler<M> for NoopHandler {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ActionOutcome {
    /// The active step changed to `step`.
    Moved { step: StepId },
    /// The final step was applied; the wizard is done.
    Finished { step: StepId },
    /// The host should close the wizard. `aborted` is set when busy work on
    /// the active step was interrupted.
    Cancelled { aborted: bool },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
    #[error("action '{0}' is not available")]
    Disabled(Action),

    #[error("step refused to apply its state: {0}")]
    Refused(InvalidState),

    #[error(transparent)]
    Navigation(#[from] NavigationError),
}

impl<M> NavigationEngine<M> {
    pub fn is_enabled(&self, action: Action) -> bool {
        let active = self.active_step();
        let busy = self.is_step_busy(active).unwrap_or(false);
        match action {
            Action::Previous => self.is_retreat_available() && !busy,
            Action::Next => self.is_advance_available() && !busy,
            Action::Last => self.is_jump_available() && self.is_jump_visible() && !busy,
            Action::Finish => {
                self.is_terminal_step(active)
                    && self.is_step_complete(active).unwrap_or(false)
                    && !busy
            }
            Action::Cancel => self.is_cancel_available(),
        }
    }

    /// Run `action` against the engine.
    ///
    /// Next, Last and Finish first ask `handler` to apply the active step's
    /// state; a refusal returns [`ActionError::Refused`] with the active step
    /// and history exactly as they were.
    pub fn perform<H>(&mut self, action: Action, handler: &mut H) -> Result<ActionOutcome, ActionError>
    where
        H: StepHandler<M> + ?Sized,
    {
        if !self.is_enabled(action) {
            tracing::debug!(%action, "action disabled");
            return Err(ActionError::Disabled(action));
        }

        let active = self.active_step();
        match action {
            Action::Previous => Ok(ActionOutcome::Moved {
                step: self.retreat()?,
            }),
            Action::Next => {
                self.apply(active, action, handler)?;
                Ok(ActionOutcome::Moved {
                    step: self.advance()?,
                })
            }
            Action::Last => {
                self.apply(active, action, handler)?;
                Ok(ActionOutcome::Moved {
                    step: self.jump_to_last(),
                })
            }
            Action::Finish => {
                self.apply(active, action, handler)?;
                tracing::debug!(step = %self.step_name(active), "finished");
                Ok(ActionOutcome::Finished { step: active })
            }
            Action::Cancel => {
                let busy = self.is_step_busy(active)?;
                if busy {
                    tracing::debug!(step = %self.step_name(active), "aborting busy step");
                    handler.abort_busy(active);
                }
                Ok(ActionOutcome::Cancelled { aborted: busy })
            }
        }
    }

    fn apply<H>(&mut self, step: StepId, action: Action, handler: &mut H) -> Result<(), ActionError>
    where
        H: StepHandler<M> + ?Sized,
    {
        handler.apply_state(step, self.model_mut()).map_err(|refusal| {
            tracing::info!(
                %action,
                step = %self.step_name(step),
                reason = %refusal.message,
                "step refused to apply its state"
            );
            ActionError::Refused(refusal)
        })
    }
}
