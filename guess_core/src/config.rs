//! Configuration loaded from a TOML file.
//!
//! ```toml
//! [knowledge]
//! snapshot = "knowledge.json"
//!
//! [matching]
//! suggestions = 6
//! ```

use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::error::Result;
use crate::resolver::DEFAULT_SUGGESTIONS;

/// Top-level configuration. Every field has a default.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuessConfig {
    pub knowledge: KnowledgeConfig,
    pub matching: MatchingConfig,
}

/// Where the knowledge base snapshot lives.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct KnowledgeConfig {
    pub snapshot: PathBuf,
}

impl Default for KnowledgeConfig {
    fn default() -> Self {
        Self {
            snapshot: PathBuf::from("knowledge.json"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MatchingConfig {
    /// Cars suggested when nothing matches.
    pub suggestions: usize,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            suggestions: DEFAULT_SUGGESTIONS,
        }
    }
}

impl GuessConfig {
    /// Parse configuration from TOML text.
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Load configuration from a file. A missing file yields the defaults.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        match fs::read_to_string(path) {
            Ok(text) => Self::from_toml(&text),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                debug!(path = %path.display(), "no config file, using defaults");
                Ok(Self::default())
            }
            Err(e) => Err(e.into()),
        }
    }
}
