//! Knowledge Mutator - learning a new car.
//!
//! A car whose prefix is unused is stored with its five-bit code. A car that
//! collides with known ones gets a sixth bit from the prefix's rule question;
//! when no rule exists yet, the informant supplies one and every colliding car
//! that still has a five-bit code is extended with its answer to it.
//!
//! All informant input is gathered before the first write, so a failure at
//! any point leaves the knowledge base untouched.

use car_rules::{require_text, Code, Entity, Prefix, ValidationError};
use std::collections::HashMap;
use tracing::info;

use crate::error::{Error, Result};
use crate::knowledge_base::KnowledgeBase;

/// Supplies the answers learning needs from whoever is teaching the guesser.
pub trait Informant {
    /// A yes/no question separating `newcomer` from the cars already coded `prefix`.
    fn new_question(&mut self, prefix: Prefix, newcomer: &str, colliding: &[&Entity])
        -> Result<String>;

    /// The answer to `question` for the car called `subject`.
    fn answer(&mut self, question: &str, subject: &str) -> Result<bool>;
}

/// A car to be learned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEntity {
    pub name: String,
    pub prefix: Prefix,
    pub image: Option<String>,
}

impl NewEntity {
    /// Validate raw input: a non-blank name and exactly five binary digits.
    pub fn parse(
        name: &str,
        bits: &str,
        image: Option<String>,
    ) -> std::result::Result<Self, ValidationError> {
        let name = require_text("name", name)?;
        Ok(Self {
            name: name.to_string(),
            prefix: bits.parse()?,
            image,
        })
    }
}

/// How the prefix's rule was involved in learning a car.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RuleUse {
    /// The prefix was free, no question asked.
    NotNeeded,
    /// An existing rule supplied the sixth bit.
    Reused,
    /// A new rule was registered for the prefix.
    Created,
}

/// What learning a car changed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Learned {
    pub name: String,
    pub code: Code,
    pub rule: RuleUse,
    /// Cars that already shared the prefix.
    pub colliding: Vec<String>,
    /// Colliding cars whose code was extended to six bits.
    pub extended: Vec<String>,
}

/// Applies the learning protocol to a borrowed knowledge base.
pub struct Learner<'kb> {
    kb: &'kb mut KnowledgeBase,
}

impl<'kb> Learner<'kb> {
    pub fn new(kb: &'kb mut KnowledgeBase) -> Self {
        Self { kb }
    }

    /// Learn a new car.
    pub fn add_entity(&mut self, new: NewEntity, informant: &mut dyn Informant) -> Result<Learned> {
        let name = require_text("name", &new.name)?.to_string();
        let prefix = new.prefix;
        let positions = self.kb.entities.matching_positions(prefix);
        let colliding: Vec<String> = positions
            .iter()
            .filter_map(|&i| self.kb.entities.get(i))
            .map(|e| e.name.clone())
            .collect();

        if positions.is_empty() {
            let entity = Entity::new(name, Code::base(prefix))?.with_image(new.image);
            return Ok(self.store(entity, RuleUse::NotNeeded, colliding, Vec::new()));
        }

        if let Some(rule) = self.kb.rules.get(prefix) {
            let question = rule.question.clone();
            let special = informant.answer(&question, &name)?;
            let entity = Entity::new(name, Code::extended(prefix, special))?.with_image(new.image);
            return Ok(self.store(entity, RuleUse::Reused, colliding, Vec::new()));
        }

        let question = {
            let existing: Vec<&Entity> = positions
                .iter()
                .filter_map(|&i| self.kb.entities.get(i))
                .collect();
            informant.new_question(prefix, &name, &existing)?
        };
        let question = require_text("question", &question)?.to_string();
        let special = informant.answer(&question, &name)?;

        let mut retro = Vec::new();
        for &i in &positions {
            match self.kb.entities.get(i) {
                Some(existing) if !existing.code.is_disambiguated() => {
                    retro.push((i, informant.answer(&question, &existing.name)?));
                }
                _ => {}
            }
        }

        let entity = Entity::new(name, Code::extended(prefix, special))?.with_image(new.image);

        self.kb.rules.set(prefix, question);
        let mut extended = Vec::with_capacity(retro.len());
        for (i, bit) in retro {
            if let Some(existing) = self.kb.entities.get_mut(i) {
                existing.code.extend(bit)?;
                info!(name = %existing.name, code = %existing.code, "extended existing car");
                extended.push(existing.name.clone());
            }
        }

        Ok(self.store(entity, RuleUse::Created, colliding, extended))
    }

    fn store(
        &mut self,
        entity: Entity,
        rule: RuleUse,
        colliding: Vec<String>,
        extended: Vec<String>,
    ) -> Learned {
        info!(name = %entity.name, code = %entity.code, rule = ?rule, "learned car");
        let learned = Learned {
            name: entity.name.clone(),
            code: entity.code,
            rule,
            colliding,
            extended,
        };
        self.kb.entities.add(entity);
        learned
    }
}

/// An informant answering from a prepared script, for tests and batch imports.
#[derive(Debug, Clone, Default)]
pub struct ScriptedInformant {
    question: Option<String>,
    answers: HashMap<String, bool>,
    asked: Vec<(String, String)>,
}

impl ScriptedInformant {
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the question offered when a new rule is needed.
    pub fn with_question(mut self, question: impl Into<String>) -> Self {
        self.question = Some(question.into());
        self
    }

    /// Set the answer given for a car, whatever the question.
    pub fn with_answer(mut self, subject: impl Into<String>, yes: bool) -> Self {
        self.answers.insert(subject.into(), yes);
        self
    }

    /// Every `(question, subject)` pair asked so far.
    pub fn asked(&self) -> &[(String, String)] {
        &self.asked
    }
}

impl Informant for ScriptedInformant {
    fn new_question(
        &mut self,
        prefix: Prefix,
        _newcomer: &str,
        _colliding: &[&Entity],
    ) -> Result<String> {
        self.question
            .clone()
            .ok_or_else(|| Error::aborted(format!("no question scripted for {prefix}")))
    }

    fn answer(&mut self, question: &str, subject: &str) -> Result<bool> {
        self.asked.push((question.to_string(), subject.to_string()));
        self.answers
            .get(subject)
            .copied()
            .ok_or_else(|| Error::aborted(format!("no answer scripted for {subject}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kb(cars: &[(&str, &str)], rules: &[(&str, &str)]) -> KnowledgeBase {
        let mut kb = KnowledgeBase::new();
        for (name, bits) in cars {
            kb.entities.add(Entity::parse(*name, bits).unwrap());
        }
        for (key, question) in rules {
            kb.rules.set(key.parse().unwrap(), *question);
        }
        kb
    }

    fn new(name: &str, bits: &str) -> NewEntity {
        NewEntity::parse(name, bits, None).unwrap()
    }

    #[test]
    fn test_free_prefix_stored_bare() {
        let mut kb = kb(&[("Ferrari F40", "1-1-0-1-1")], &[]);
        let mut informant = ScriptedInformant::new();

        let learned = Learner::new(&mut kb)
            .add_entity(new("Audi R8", "1-0-1-0-1"), &mut informant)
            .unwrap();

        assert_eq!(learned.code.to_string(), "1-0-1-0-1");
        assert_eq!(learned.rule, RuleUse::NotNeeded);
        assert!(informant.asked().is_empty());
        assert_eq!(kb.entities.len(), 2);
    }

    #[test]
    fn test_existing_rule_reused() {
        let mut kb = kb(
            &[("McLaren F1", "1-1-0-0-1-1"), ("Bare", "1-1-0-0-1")],
            &[("1-1-0-0-1", "¿Asiento central?")],
        );
        let mut informant = ScriptedInformant::new().with_answer("Gordon T.50", true);

        let learned = Learner::new(&mut kb)
            .add_entity(new("Gordon T.50", "1-1-0-0-1"), &mut informant)
            .unwrap();

        assert_eq!(learned.code.to_string(), "1-1-0-0-1-1");
        assert_eq!(learned.rule, RuleUse::Reused);
        assert!(learned.extended.is_empty());
        assert_eq!(learned.colliding, ["McLaren F1", "Bare"]);
        // Existing bare cars are not touched when the rule already exists.
        assert_eq!(kb.entities.get(1).unwrap().code.len(), 5);
        assert_eq!(informant.asked().len(), 1);
    }

    #[test]
    fn test_new_rule_extends_bare_cars_only() {
        let mut kb = kb(
            &[("Old Six", "0-0-1-1-0-1"), ("Bare", "0-0-1-1-0")],
            &[],
        );
        let mut informant = ScriptedInformant::new()
            .with_question("¿Tiene alerón?")
            .with_answer("New", true)
            .with_answer("Bare", false);

        let learned = Learner::new(&mut kb)
            .add_entity(new("New", "0-0-1-1-0"), &mut informant)
            .unwrap();

        assert_eq!(learned.rule, RuleUse::Created);
        assert_eq!(learned.extended, ["Bare"]);
        assert_eq!(kb.entities.get(0).unwrap().code.to_string(), "0-0-1-1-0-1");
        assert_eq!(kb.entities.get(1).unwrap().code.to_string(), "0-0-1-1-0-0");
        assert_eq!(kb.entities.get(2).unwrap().code.to_string(), "0-0-1-1-0-1");
        assert_eq!(
            kb.rules.get("0-0-1-1-0".parse().unwrap()).unwrap().question,
            "¿Tiene alerón?"
        );
    }

    #[test]
    fn test_blank_name_rejected() {
        assert!(NewEntity::parse("", "1-1-1-1-1", None).is_err());
        assert!(NewEntity::parse("Car", "1-1-1-1", None).is_err());
        assert!(NewEntity::parse("Car", "1-1-1-1-1-1", None).is_err());
    }

    #[test]
    fn test_blank_name_rejected_by_learner() {
        let mut kb = kb(&[("A", "1-1-1-1-1")], &[]);
        let bad = NewEntity {
            name: "  ".into(),
            prefix: "1-1-1-1-1".parse().unwrap(),
            image: None,
        };
        let result = Learner::new(&mut kb).add_entity(bad, &mut ScriptedInformant::new());
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(kb.entities.len(), 1);
    }

    #[test]
    fn test_blank_question_leaves_base_unchanged() {
        let mut kb = kb(&[("A", "1-1-1-1-1")], &[]);
        let before = kb.clone();
        let mut informant = ScriptedInformant::new()
            .with_question("   ")
            .with_answer("B", true)
            .with_answer("A", false);

        let result = Learner::new(&mut kb).add_entity(new("B", "1-1-1-1-1"), &mut informant);
        assert!(matches!(result, Err(Error::Validation(_))));
        assert_eq!(kb, before);
    }

    #[test]
    fn test_informant_failure_leaves_base_unchanged() {
        let mut kb = kb(&[("A", "1-1-1-1-1")], &[]);
        let before = kb.clone();
        // No answer for "A": fails during the retroactive pass.
        let mut informant = ScriptedInformant::new()
            .with_question("¿Es rojo?")
            .with_answer("B", true);

        let result = Learner::new(&mut kb).add_entity(new("B", "1-1-1-1-1"), &mut informant);
        assert!(matches!(result, Err(Error::Aborted(_))));
        assert_eq!(kb, before);
    }

    #[test]
    fn test_name_trimmed_and_image_kept() {
        let mut kb = KnowledgeBase::new();
        let entity = NewEntity::parse("  Audi R8 ", "1-0-1-0-1", Some("r8.jpg".into())).unwrap();
        Learner::new(&mut kb)
            .add_entity(entity, &mut ScriptedInformant::new())
            .unwrap();

        let stored = kb.entities.get(0).unwrap();
        assert_eq!(stored.name, "Audi R8");
        assert_eq!(stored.image.as_deref(), Some("r8.jpg"));
    }
}
