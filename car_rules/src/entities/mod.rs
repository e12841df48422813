//! Car and rule definitions.

mod code;

pub use code::*;

use serde::{Deserialize, Serialize};

use crate::error::{require_text, ValidationError};

/// A known car: its display name, its answer code and an optional image
/// reference (local path or URL) that front ends may render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entity {
    pub name: String,
    pub code: Code,
    pub image: Option<String>,
}

impl Entity {
    /// Create a car, rejecting a blank name. The name is kept verbatim.
    pub fn new(name: impl Into<String>, code: Code) -> Result<Self, ValidationError> {
        let name = name.into();
        require_text("name", &name)?;
        Ok(Self {
            name,
            code,
            image: None,
        })
    }

    /// Create a car from its written code, e.g. `"1-1-0-0-1-1"`.
    pub fn parse(name: impl Into<String>, bits: &str) -> Result<Self, ValidationError> {
        Self::new(name, bits.parse()?)
    }

    /// Attach an image reference. Blank references are dropped.
    pub fn with_image(mut self, image: Option<String>) -> Self {
        self.image = image.filter(|s| !s.trim().is_empty());
        self
    }

    /// The first five bits of the code.
    pub fn prefix(&self) -> Prefix {
        self.code.prefix()
    }
}

/// A learned yes/no question that tells apart the cars sharing one prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisambiguationRule {
    pub key: Prefix,
    pub question: String,
}

impl DisambiguationRule {
    /// Create a rule, rejecting a blank question.
    pub fn new(key: Prefix, question: impl Into<String>) -> Result<Self, ValidationError> {
        let question = question.into();
        require_text("question", &question)?;
        Ok(Self { key, question })
    }
}
