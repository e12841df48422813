//! Session - owns the knowledge base for one run and keeps the snapshot current.

use crate::error::Result;
use crate::knowledge_base::KnowledgeBase;
use crate::learning::{Informant, Learned, Learner, NewEntity};
use crate::persistence::SnapshotGateway;
use crate::resolver::{Resolver, DEFAULT_SUGGESTIONS};

/// A knowledge base hydrated from a gateway, dehydrated after every successful change.
pub struct Session<G: SnapshotGateway> {
    kb: KnowledgeBase,
    gateway: G,
    suggestions: usize,
}

impl<G: SnapshotGateway> Session<G> {
    /// Hydrate from the gateway, reseeding if needed.
    pub fn open(gateway: G) -> Self {
        let kb = gateway.load_or_seed();
        Self {
            kb,
            gateway,
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }

    /// Set how many suggestions a failed guess carries.
    pub fn with_suggestions(mut self, suggestions: usize) -> Self {
        self.suggestions = suggestions;
        self
    }

    pub fn knowledge(&self) -> &KnowledgeBase {
        &self.kb
    }

    /// Start a guessing session over the current knowledge.
    pub fn resolver(&self) -> Resolver<'_> {
        Resolver::with_suggestions(&self.kb, self.suggestions)
    }

    /// Learn a car and persist the result. Nothing is written on failure.
    pub fn learn(&mut self, new: NewEntity, informant: &mut dyn Informant) -> Result<Learned> {
        let learned = Learner::new(&mut self.kb).add_entity(new, informant)?;
        self.gateway.save(&self.kb)?;
        Ok(learned)
    }
}
