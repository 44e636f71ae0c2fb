//! The fact set model and conditions over it.

use std::collections::BTreeMap;

use serde_json::Value;
use waypoint_core::Condition;

use crate::error::DefinitionError;
use crate::types::{AllSpec, AnySpec, ConditionSpec, EqualsSpec, Keyword, NotSpec};

/// Model type for wizards loaded from a definition: named JSON values.
pub type FactSet = BTreeMap<String, Value>;

/// A [`ConditionSpec`] ready to be evaluated.
///
/// A fact that is absent from the set compares equal to `null`.
#[derive(Debug, Clone, PartialEq)]
pub enum FactCondition {
    Always,
    Never,
    Equals { fact: String, value: Value },
    Not(Box<FactCondition>),
    All(Vec<FactCondition>),
    Any(Vec<FactCondition>),
}

impl From<&ConditionSpec> for FactCondition {
    fn from(spec: &ConditionSpec) -> Self {
        match spec {
            ConditionSpec::Keyword(Keyword::Always) => FactCondition::Always,
            ConditionSpec::Keyword(Keyword::Never) => FactCondition::Never,
            ConditionSpec::Equals(EqualsSpec { fact, equals }) => FactCondition::Equals {
                fact: fact.clone(),
                value: equals.clone(),
            },
            ConditionSpec::Not(NotSpec { not }) => {
                FactCondition::Not(Box::new(not.as_ref().into()))
            }
            ConditionSpec::All(AllSpec { all }) => {
                FactCondition::All(all.iter().map(Into::into).collect())
            }
            ConditionSpec::Any(AnySpec { any }) => {
                FactCondition::Any(any.iter().map(Into::into).collect())
            }
        }
    }
}

impl FactCondition {
    pub fn holds(&self, facts: &FactSet) -> bool {
        match self {
            FactCondition::Always => true,
            FactCondition::Never => false,
            FactCondition::Equals { fact, value } => {
                facts.get(fact).unwrap_or(&Value::Null) == value
            }
            FactCondition::Not(inner) => !inner.holds(facts),
            FactCondition::All(all) => all.iter().all(|c| c.holds(facts)),
            FactCondition::Any(any) => any.iter().any(|c| c.holds(facts)),
        }
    }
}

impl Condition<FactSet> for FactCondition {
    fn evaluate(&self, model: &FactSet) -> bool {
        self.holds(model)
    }
}

/// Parse a `name=value` assignment.
///
/// The value is read as JSON when it parses (`true`, `3`, `"quoted"`,
/// `[1, 2]`) and as a plain string otherwise.
pub fn parse_assignment(input: &str) -> Result<(String, Value), DefinitionError> {
    let (name, raw) = input
        .split_once('=')
        .ok_or_else(|| DefinitionError::InvalidFact(input.to_string()))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(DefinitionError::InvalidFact(input.to_string()));
    }
    let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
    Ok((name.to_string(), value))
}
