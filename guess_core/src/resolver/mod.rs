//! Query Resolver - turns a session of yes/no answers into a guess.
//!
//! The resolver is a small state machine:
//! 1. **Base**: collect one answer per [`BaseAttribute`], in order
//! 2. **Lookup**: find every car sharing the five-bit prefix
//! 3. **Special**: if the prefix has a rule, ask its question and apply [`tie_break`]
//! 4. **Result**: a unique car, an ambiguous set, or ranked suggestions

mod tie_break;

pub use tie_break::*;

use car_rules::{BaseAttribute, DisambiguationRule, Entity, Prefix, PREFIX_BITS};
use tracing::debug;

use crate::error::{Error, Result};
use crate::knowledge_base::{KnowledgeBase, Suggestion};

/// How many suggestions a failed lookup carries unless configured otherwise.
pub const DEFAULT_SUGGESTIONS: usize = 6;

/// The question the front end should put to the user next.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt<'kb> {
    Base {
        index: usize,
        attribute: BaseAttribute,
    },
    Special {
        question: &'kb str,
    },
}

impl Prompt<'_> {
    pub fn text(&self) -> &str {
        match self {
            Prompt::Base { attribute, .. } => attribute.question(),
            Prompt::Special { question } => *question,
        }
    }
}

/// Terminal result of a session. None of these is an error.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<'kb> {
    Unique(&'kb Entity),
    Ambiguous(Vec<&'kb Entity>),
    /// No car shares the prefix; the closest ones, nearest first.
    NoMatch(Vec<Suggestion<'kb>>),
}

/// A finished session.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution<'kb> {
    pub prefix: Prefix,
    /// Set when a disambiguating question was asked.
    pub tie_break: Option<TieBreak>,
    pub outcome: Outcome<'kb>,
}

#[derive(Debug, Clone)]
enum State<'kb> {
    AskingBase {
        answers: [bool; PREFIX_BITS],
        answered: usize,
    },
    AskingSpecial {
        prefix: Prefix,
        rule: &'kb DisambiguationRule,
        candidates: Vec<&'kb Entity>,
    },
    Resolved(Resolution<'kb>),
}

/// Drives one guessing session against a borrowed knowledge base.
#[derive(Debug, Clone)]
pub struct Resolver<'kb> {
    kb: &'kb KnowledgeBase,
    suggestions: usize,
    state: State<'kb>,
}

impl<'kb> Resolver<'kb> {
    /// Start a session with the default suggestion count.
    pub fn new(kb: &'kb KnowledgeBase) -> Self {
        Self::with_suggestions(kb, DEFAULT_SUGGESTIONS)
    }

    /// Start a session that ranks `suggestions` cars on a failed lookup.
    pub fn with_suggestions(kb: &'kb KnowledgeBase, suggestions: usize) -> Self {
        Self {
            kb,
            suggestions,
            state: State::AskingBase {
                answers: [false; PREFIX_BITS],
                answered: 0,
            },
        }
    }

    /// The next question, or `None` once the session is resolved.
    pub fn prompt(&self) -> Option<Prompt<'kb>> {
        match &self.state {
            State::AskingBase { answered, .. } => Some(Prompt::Base {
                index: *answered,
                attribute: BaseAttribute::ALL[*answered],
            }),
            State::AskingSpecial { rule, .. } => Some(Prompt::Special {
                question: rule.question.as_str(),
            }),
            State::Resolved(_) => None,
        }
    }

    /// Feed the answer to the current prompt.
    pub fn answer(&mut self, yes: bool) -> Result<()> {
        let kb = self.kb;
        let limit = self.suggestions;

        let next = match &mut self.state {
            State::AskingBase { answers, answered } => {
                answers[*answered] = yes;
                *answered += 1;
                debug!(answered = *answered, yes, "base answer");
                if *answered < PREFIX_BITS {
                    return Ok(());
                }
                lookup(kb, Prefix::from_answers(*answers), limit)
            }
            State::AskingSpecial {
                prefix, candidates, ..
            } => {
                let (record, chosen) = tie_break(candidates, yes);
                debug!(%prefix, tier = ?record.tier, remaining = chosen.len(), "special answer");
                State::Resolved(Resolution {
                    prefix: *prefix,
                    tie_break: Some(record),
                    outcome: settle(chosen),
                })
            }
            State::Resolved(_) => return Err(Error::OutOfTurn("session already resolved")),
        };

        self.state = next;
        Ok(())
    }

    /// The result, once the session has reached one.
    pub fn resolution(&self) -> Option<&Resolution<'kb>> {
        match &self.state {
            State::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    /// Consume the resolver, yielding its result if it has one.
    pub fn into_resolution(self) -> Option<Resolution<'kb>> {
        match self.state {
            State::Resolved(resolution) => Some(resolution),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.state, State::Resolved(_))
    }
}

/// Run a whole session from a sequence of answers.
///
/// Answers are consumed only while the resolver is asking; any left over once
/// a result is reached are ignored. Running out early is an error.
pub fn resolve<'kb>(
    kb: &'kb KnowledgeBase,
    answers: impl IntoIterator<Item = bool>,
    suggestions: usize,
) -> Result<Resolution<'kb>> {
    let mut resolver = Resolver::with_suggestions(kb, suggestions);
    let mut answers = answers.into_iter();
    while !resolver.is_resolved() {
        let yes = answers
            .next()
            .ok_or(Error::OutOfTurn("answers ran out before a result"))?;
        resolver.answer(yes)?;
    }
    resolver
        .into_resolution()
        .ok_or(Error::OutOfTurn("session did not resolve"))
}

fn lookup<'kb>(kb: &'kb KnowledgeBase, prefix: Prefix, limit: usize) -> State<'kb> {
    let candidates = kb.entities.matching_prefix(prefix);
    debug!(%prefix, candidates = candidates.len(), "prefix lookup");

    if candidates.is_empty() {
        return State::Resolved(Resolution {
            prefix,
            tie_break: None,
            outcome: Outcome::NoMatch(kb.entities.nearest(prefix, limit)),
        });
    }

    if let Some(rule) = kb.rules.get(prefix) {
        return State::AskingSpecial {
            prefix,
            rule,
            candidates,
        };
    }

    State::Resolved(Resolution {
        prefix,
        tie_break: None,
        outcome: settle(candidates),
    })
}

/// Turn a non-empty candidate set into a unique or ambiguous outcome.
fn settle(mut candidates: Vec<&Entity>) -> Outcome<'_> {
    if candidates.len() == 1 {
        Outcome::Unique(candidates.remove(0))
    } else {
        Outcome::Ambiguous(candidates)
    }
}
