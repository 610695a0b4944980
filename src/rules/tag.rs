//! Tag parsing.
//!
//! A tag like `omitempty,min=1,hostname|ip` compiles into a [`TagChain`]: an
//! ordered list of steps whose rule names are resolved against a registry
//! once, at compile time.

use serde_json::Value;

use super::registry::{Rule, RuleRegistry};
use super::{is_empty_value, FieldLevel, RuleError};
use crate::path::Path;

pub(crate) const OMIT_EMPTY: &str = "omitempty";

/// One rule invocation with its resolved predicate.
#[derive(Debug, Clone)]
pub struct RuleCall {
    name: String,
    param: String,
    rule: Rule,
}

impl RuleCall {
    /// The rule name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The parameter, empty when none was given.
    pub fn param(&self) -> &str {
        &self.param
    }

    fn passes(&self, value: &Value, path: &Path) -> bool {
        self.rule.test(&FieldLevel::new(value, path, &self.param))
    }
}

/// A set of alternatives separated by `|`; passes when any alternative does.
#[derive(Debug, Clone)]
pub struct RuleGroup {
    text: String,
    alternatives: Vec<RuleCall>,
}

impl RuleGroup {
    /// The tag reported when the group fails: the rule name for a single
    /// rule, the full `a|b` text for alternatives.
    pub fn tag(&self) -> &str {
        match self.alternatives.as_slice() {
            [single] => single.name(),
            _ => &self.text,
        }
    }

    /// The parameter reported when the group fails.
    pub fn param(&self) -> &str {
        match self.alternatives.as_slice() {
            [single] => single.param(),
            _ => "",
        }
    }

    /// The alternatives, in tag order.
    pub fn alternatives(&self) -> &[RuleCall] {
        &self.alternatives
    }

    fn passes(&self, value: &Value, path: &Path) -> bool {
        self.alternatives.iter().any(|call| call.passes(value, path))
    }
}

/// One step of a compiled tag.
#[derive(Debug, Clone)]
pub enum Step {
    /// Stop evaluation if the value is empty.
    OmitEmpty,
    /// Evaluate a rule group.
    Group(RuleGroup),
}

/// A compiled tag.
#[derive(Debug, Clone)]
pub struct TagChain {
    text: String,
    steps: Vec<Step>,
}

impl TagChain {
    /// Parses `tag` and resolves every rule name against `registry`.
    ///
    /// # Errors
    ///
    /// - `RuleError::EmptyTag` for an empty tag or an empty rule between separators
    /// - `RuleError::UnknownRule` for a rule name missing from the registry
    /// - `RuleError::InvalidParam` when a parameter breaks the rule's contract
    pub fn compile(tag: &str, registry: &RuleRegistry) -> Result<Self, RuleError> {
        let mut steps = Vec::new();
        for token in tag.split(',').map(str::trim) {
            if token.is_empty() {
                return Err(RuleError::EmptyTag(tag.to_string()));
            }
            if token == OMIT_EMPTY {
                steps.push(Step::OmitEmpty);
                continue;
            }
            let alternatives = token
                .split('|')
                .map(|alt| compile_call(alt.trim(), tag, registry))
                .collect::<Result<Vec<_>, _>>()?;
            steps.push(Step::Group(RuleGroup {
                text: token.to_string(),
                alternatives,
            }));
        }
        Ok(Self {
            text: tag.to_string(),
            steps,
        })
    }

    /// The tag text this chain was compiled from.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The compiled steps.
    pub fn steps(&self) -> &[Step] {
        &self.steps
    }

    /// Evaluates the chain and returns the first failing group, if any.
    pub fn first_failure(&self, value: &Value, path: &Path) -> Option<&RuleGroup> {
        for step in &self.steps {
            match step {
                Step::OmitEmpty if is_empty_value(value) => return None,
                Step::OmitEmpty => {}
                Step::Group(group) => {
                    if !group.passes(value, path) {
                        return Some(group);
                    }
                }
            }
        }
        None
    }
}

fn compile_call(text: &str, tag: &str, registry: &RuleRegistry) -> Result<RuleCall, RuleError> {
    if text.is_empty() {
        return Err(RuleError::EmptyTag(tag.to_string()));
    }
    let (name, param) = match text.split_once('=') {
        Some((name, param)) => (name.trim(), Some(param.trim())),
        None => (text, None),
    };
    let rule = registry.get(name).ok_or_else(|| RuleError::UnknownRule {
        rule: name.to_string(),
        tag: tag.to_string(),
    })?;
    rule.check_param(name, param)?;
    Ok(RuleCall {
        name: name.to_string(),
        param: param.unwrap_or_default().to_string(),
        rule: rule.clone(),
    })
}
