//! Rule Registry - disambiguating questions keyed by five-bit prefix.

use car_rules::{DisambiguationRule, Prefix};
use std::collections::BTreeMap;
use tracing::{debug, warn};

/// At most one rule per prefix.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RuleRegistry {
    rules: BTreeMap<Prefix, DisambiguationRule>,
}

impl RuleRegistry {
    /// Create a new empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the rule registered for a prefix.
    pub fn get(&self, key: Prefix) -> Option<&DisambiguationRule> {
        self.rules.get(&key)
    }

    /// Register a question for `key`, replacing any earlier one.
    ///
    /// The last write wins even when the question text differs. Cars already
    /// extended under the old question keep their sixth bit.
    pub fn set(&mut self, key: Prefix, question: impl Into<String>) -> Option<DisambiguationRule> {
        let rule = DisambiguationRule {
            key,
            question: question.into(),
        };
        let previous = self.rules.insert(key, rule);
        match &previous {
            Some(old) => warn!(%key, old = %old.question, "overwriting disambiguation rule"),
            None => debug!(%key, "registered disambiguation rule"),
        }
        previous
    }

    /// All rules ordered by prefix.
    pub fn iter(&self) -> impl Iterator<Item = &DisambiguationRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}
