//! Knowledge Base module - the cars and rules the guesser knows about.
//!
//! - **EntityStore**: known cars in insertion order, with prefix lookup and nearest ranking
//! - **RuleRegistry**: one disambiguating question per five-bit prefix
//! - **KnowledgeBase**: owns both for the lifetime of a session

mod registry;
mod store;

pub use registry::*;
pub use store::*;

use car_rules::{seed_entities, seed_rules, Entity};

/// Everything the guesser knows. Mutated only through [`crate::learning::Learner`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct KnowledgeBase {
    pub entities: EntityStore,
    pub rules: RuleRegistry,
}

impl KnowledgeBase {
    /// Create an empty knowledge base.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a knowledge base holding the built-in seed catalog.
    pub fn seeded() -> Self {
        let mut kb = Self::new();
        for entity in seed_entities() {
            kb.entities.add(entity);
        }
        for rule in seed_rules() {
            kb.rules.set(rule.key, rule.question);
        }
        kb
    }

    /// All cars in display order.
    pub fn catalog(&self) -> impl Iterator<Item = &Entity> {
        self.entities.iter()
    }
}
