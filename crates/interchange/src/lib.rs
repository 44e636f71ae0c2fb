//! waypoint-interchange: serialized wizard definitions.
//!
//! A [`Definition`] describes steps, paths and branch conditions by string
//! id, in JSON or TOML. Conditions are evaluated over a [`FactSet`], so a
//! compiled definition drives a `NavigationEngine<FactSet>` with no host
//! code at all. Entry points are [`load`] / [`from_json_str`] /
//! [`from_toml_str`] followed by [`Definition::compile`].

pub mod compile;
pub mod deserialize;
pub mod error;
pub mod facts;
pub mod types;

pub use compile::CompiledWizard;
pub use deserialize::{from_json_str, from_str, from_toml_str, from_value, load, Format};
pub use error::DefinitionError;
pub use facts::{parse_assignment, FactCondition, FactSet};
pub use types::*;
