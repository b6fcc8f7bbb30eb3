use std::path::Path;

use anyhow::{Context, Result};
use rand::Rng;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::character::Character;
use crate::config::Config;
use crate::daily_log::DayLogBook;
use crate::learning::LearningLedger;
use crate::memory::MemoryBook;
use crate::relationship::RelationshipBook;

/// Owns the five persisted documents for one character. The only component
/// allowed to construct default documents; everything else mutates these in
/// memory and relies on `save_all` at day end.
pub struct StateStore {
    config: Config,
    name: String,
    pub character: Character,
    pub memories: MemoryBook,
    pub relationships: RelationshipBook,
    pub daily_logs: DayLogBook,
    pub learning: LearningLedger,
}

impl StateStore {
    /// Load every document for `name`, creating documented defaults for any
    /// that do not exist yet. Creation draws from the injected RNG.
    pub fn open(config: &Config, name: &str, rng: &mut impl Rng) -> Result<Self> {
        let character = load_or_create(&config.character_file(name), "character", || {
            Character::create(name, rng)
        })?;
        let memories =
            load_or_create(&config.memories_file(name), "memories", MemoryBook::default)?;
        let relationships = load_or_create(
            &config.relationships_file(name),
            "relationships",
            RelationshipBook::starter,
        )?;
        let daily_logs = load_or_create(
            &config.daily_logs_file(name),
            "daily logs",
            DayLogBook::default,
        )?;
        let learning = load_or_create(
            &config.learning_file(name),
            "learning",
            LearningLedger::default,
        )?;

        Ok(StateStore {
            config: config.clone(),
            name: name.to_string(),
            character,
            memories,
            relationships,
            daily_logs,
            learning,
        })
    }

    pub fn character_name(&self) -> &str {
        &self.name
    }

    /// Persist all five documents. Any single write failure is fatal to the
    /// run; there is no partial silent success.
    pub fn save_all(&self) -> Result<()> {
        write_document(
            &self.config.character_file(&self.name),
            &self.character,
            "character",
        )?;
        write_document(
            &self.config.memories_file(&self.name),
            &self.memories,
            "memories",
        )?;
        write_document(
            &self.config.relationships_file(&self.name),
            &self.relationships,
            "relationships",
        )?;
        write_document(
            &self.config.daily_logs_file(&self.name),
            &self.daily_logs,
            "daily logs",
        )?;
        write_document(
            &self.config.learning_file(&self.name),
            &self.learning,
            "learning",
        )?;
        Ok(())
    }
}

fn load_or_create<T, F>(path: &Path, label: &str, default: F) -> Result<T>
where
    T: DeserializeOwned,
    F: FnOnce() -> T,
{
    if !path.exists() {
        return Ok(default());
    }

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {} document", label))?;
    serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {} document", label))
}

fn write_document<T: Serialize>(path: &Path, document: &T, label: &str) -> Result<()> {
    let content = serde_json::to_string_pretty(document)
        .with_context(|| format!("Failed to serialize {} document", label))?;
    std::fs::write(path, content)
        .with_context(|| format!("Failed to write {} document", label))?;
    Ok(())
}
