//! RuleSet - a validator assembled from per-field rules.
//!
//! ```ignore
//! let rules = RuleSet::new()
//!     .rule_with("game", Cascade::Stop, |c: &CreateOrUpdateGame| c.game.is_some(), "Game is null")
//!     .rule("game.title", |c: &CreateOrUpdateGame| has_title(c), "Title is required");
//! ```

use super::{ValidationFailure, Validator};

/// What to do after a rule fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cascade {
    /// Keep evaluating the remaining rules.
    #[default]
    Continue,
    /// Stop evaluating this rule set.
    Stop,
}

struct Rule<C> {
    field_path: String,
    message: String,
    cascade: Cascade,
    check: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

/// Ordered list of rules. Failures are reported in rule order.
pub struct RuleSet<C> {
    rules: Vec<Rule<C>>,
}

impl<C> Default for RuleSet<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> RuleSet<C> {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    /// Add a rule that passes when `check` returns true.
    pub fn rule<F>(self, field_path: &str, check: F, message: &str) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.rule_with(field_path, Cascade::Continue, check, message)
    }

    /// Add a rule with an explicit cascade mode.
    pub fn rule_with<F>(mut self, field_path: &str, cascade: Cascade, check: F, message: &str) -> Self
    where
        F: Fn(&C) -> bool + Send + Sync + 'static,
    {
        self.rules.push(Rule {
            field_path: field_path.to_string(),
            message: message.to_string(),
            cascade,
            check: Box::new(check),
        });
        self
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl<C> Validator<C> for RuleSet<C> {
    fn validate(&self, request: &C) -> Vec<ValidationFailure> {
        let mut failures = Vec::new();
        for rule in &self.rules {
            if (rule.check)(request) {
                continue;
            }
            failures.push(ValidationFailure::new(&rule.field_path, &rule.message));
            if rule.cascade == Cascade::Stop {
                break;
            }
        }
        failures
    }
}

/// True when `value` has at least one non-whitespace character.
pub(crate) fn not_blank(value: &str) -> bool {
    !value.trim().is_empty()
}
