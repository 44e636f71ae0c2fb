//! waypoint-core: the step graph behind a multi-step wizard.
//!
//! A wizard is described as a graph of ordered step sequences ([`Path`]s)
//! joined by fixed successors or conditional branches. This crate holds the
//! data model and the graph checks; driving a session over the graph is the
//! job of `waypoint-engine`.
//!
//! # Public API
//!
//! - [`GraphBuilder`] -- declare steps and paths, link them, then freeze into
//!   a [`PathGraph`]
//! - [`Path`] / [`PathKind`] / [`Branch`] -- linear and branching paths
//! - [`Condition`] -- branch predicates over the host model
//! - [`PathVisitor`] / [`Visited`] / [`Pending`] -- cycle-safe graph walks
//! - [`GraphIndex`] -- step membership and terminal path, validated
//! - [`GraphError`] -- construction and path-contract errors

pub mod builder;
pub mod condition;
pub mod error;
pub mod graph;
pub mod index;
pub mod path;
pub mod step;
pub mod visit;

pub use builder::GraphBuilder;
pub use condition::{Always, Condition, Not};
pub use error::{Boundary, GraphError};
pub use graph::PathGraph;
pub use index::{GraphIndex, MembershipVisitor, TerminalVisitor};
pub use path::{Branch, Path, PathId, PathKind};
pub use step::{Step, StepId};
pub use visit::{visit_branches, visit_next, walk, PathVisitor, Pending, Visited};
