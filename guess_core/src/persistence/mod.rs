//! Persistence Gateway - the flat JSON snapshot of cars and rules.
//!
//! ```json
//! {
//!   "cars": [ { "name": "McLaren F1", "bits": "1-1-0-0-1-1", "img": null } ],
//!   "duplex_rules": { "1-1-0-0-1": { "question": "..." } }
//! }
//! ```
//!
//! Records are validated here, before they reach the knowledge base. A missing,
//! unreadable or invalid snapshot is replaced by the seed catalog.

use car_rules::{require_text, Code, Entity, Prefix};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::error::{Error, Result};
use crate::knowledge_base::KnowledgeBase;

/// One car as written in the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarRecord {
    pub name: String,
    pub bits: Code,
    pub img: Option<String>,
}

/// One rule as written in the snapshot, keyed by its prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    pub question: String,
}

/// The whole knowledge base in its on-disk shape.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    pub cars: Vec<CarRecord>,
    #[serde(default)]
    pub duplex_rules: BTreeMap<Prefix, RuleRecord>,
}

impl Snapshot {
    /// Capture a knowledge base.
    pub fn from_knowledge_base(kb: &KnowledgeBase) -> Self {
        Self {
            cars: kb
                .entities
                .iter()
                .map(|e| CarRecord {
                    name: e.name.clone(),
                    bits: e.code,
                    img: e.image.clone(),
                })
                .collect(),
            duplex_rules: kb
                .rules
                .iter()
                .map(|r| {
                    (
                        r.key,
                        RuleRecord {
                            question: r.question.clone(),
                        },
                    )
                })
                .collect(),
        }
    }

    /// Validate the records and build a knowledge base from them.
    pub fn into_knowledge_base(self) -> Result<KnowledgeBase> {
        let mut kb = KnowledgeBase::new();
        for car in self.cars {
            let entity = Entity::new(car.name, car.bits)?.with_image(car.img);
            kb.entities.add(entity);
        }
        for (key, rule) in self.duplex_rules {
            require_text("question", &rule.question)?;
            kb.rules.set(key, rule.question);
        }
        Ok(kb)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Where a session's knowledge base is hydrated from and dehydrated to.
pub trait SnapshotGateway {
    fn load(&self) -> Result<KnowledgeBase>;

    fn save(&self, kb: &KnowledgeBase) -> Result<()>;

    /// Load the snapshot, or reseed from the built-in catalog and write the
    /// seed back. Never fails and never yields an empty base.
    fn load_or_seed(&self) -> KnowledgeBase {
        match self.load() {
            Ok(kb) => return kb,
            Err(Error::Io(e)) if e.kind() == io::ErrorKind::NotFound => {
                info!("no snapshot found, seeding default catalog");
            }
            Err(e) => warn!(error = %e, "snapshot unusable, reseeding default catalog"),
        }

        let kb = KnowledgeBase::seeded();
        if let Err(e) = self.save(&kb) {
            warn!(error = %e, "failed to write seeded snapshot");
        }
        kb
    }
}

/// A snapshot kept in a single JSON file.
#[derive(Debug, Clone)]
pub struct SnapshotFile {
    path: PathBuf,
}

impl SnapshotFile {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "knowledge.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

impl SnapshotGateway for SnapshotFile {
    fn load(&self) -> Result<KnowledgeBase> {
        let json = fs::read_to_string(&self.path)?;
        let kb = Snapshot::from_json(&json)?.into_knowledge_base()?;
        info!(
            path = %self.path.display(),
            cars = kb.entities.len(),
            rules = kb.rules.len(),
            "loaded snapshot"
        );
        Ok(kb)
    }

    fn save(&self, kb: &KnowledgeBase) -> Result<()> {
        let mut json = Snapshot::from_knowledge_base(kb).to_json()?;
        json.push('\n');

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }
        // Write beside the target and rename so readers never see a partial file.
        let tmp = self.temp_path();
        fs::write(&tmp, json.as_bytes())?;
        fs::rename(&tmp, &self.path)?;

        info!(path = %self.path.display(), bytes = json.len(), "saved snapshot");
        Ok(())
    }
}
