//! Typed structs for the wizard definition document.
//!
//! A definition names every step and path by a string id. Paths refer to
//! steps and to other paths by those ids; [`Definition::compile`] resolves
//! them into arena handles.
//!
//! [`Definition::compile`]: crate::Definition::compile

use serde::{Deserialize, Serialize};

use crate::facts::FactSet;

/// Top-level definition document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Definition {
    /// Wizard identifier.
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Id of the path the wizard starts on.
    pub first: String,
    /// Default facts, used as the initial model.
    #[serde(default, skip_serializing_if = "FactSet::is_empty")]
    pub facts: FactSet,
    pub steps: Vec<StepDef>,
    pub paths: Vec<PathDef>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StepDef {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub complete: bool,
    #[serde(default)]
    pub busy: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PathKindDef {
    Linear,
    Branching,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PathDef {
    pub id: String,
    pub kind: PathKindDef,
    /// Step ids, in traversal order.
    pub steps: Vec<String>,
    /// Successor path id. Linear paths only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    /// Branching paths only, evaluated in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub branches: Vec<BranchDef>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BranchDef {
    pub when: ConditionSpec,
    /// Target path id.
    pub to: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

/// Bare-word conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Keyword {
    Always,
    Never,
}

/// A branch condition over the fact set.
///
/// ```json
/// "always"
/// { "fact": "plan", "equals": "pro" }
/// { "not": { "fact": "trial", "equals": true } }
/// { "all": [ ... ] }
/// { "any": [ ... ] }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ConditionSpec {
    Keyword(Keyword),
    Equals(EqualsSpec),
    Not(NotSpec),
    All(AllSpec),
    Any(AnySpec),
}

// Each object form rejects stray keys, so a misspelt condition fails to
// match any variant instead of compiling as something else.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct EqualsSpec {
    pub fact: String,
    pub equals: serde_json::Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NotSpec {
    pub not: Box<ConditionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AllSpec {
    pub all: Vec<ConditionSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AnySpec {
    pub any: Vec<ConditionSpec>,
}
