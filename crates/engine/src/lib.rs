//! waypoint-engine: drives a session over a validated step graph.
//!
//! # Public API
//!
//! - [`NavigationEngine`] -- active step, history stack, availability
//! - [`Availability`] / [`Control`] -- which navigation controls are legal
//! - [`NavigationObserver`] / [`NavigationEvent`] -- synchronous change pushes
//! - [`Action`] / [`StepHandler`] -- previous / next / last / finish / cancel
//!   with busy gating and step-state refusal
//! - [`NavigationError`] / [`ActionError`]

pub mod actions;
pub mod availability;
pub mod engine;
pub mod error;
pub mod observer;

pub use actions::{Action, ActionError, ActionOutcome, InvalidState, NoopHandler, StepHandler};
pub use availability::{Availability, Control};
pub use engine::NavigationEngine;
pub use error::NavigationError;
pub use observer::{NavigationEvent, NavigationObserver, NavigationView, ObserverId, StepStatus};
