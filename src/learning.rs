use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Learning document. The strategy sets are the only collections the hourly
/// loop writes; the mappings are persisted for future use.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LearningLedger {
    pub action_outcomes: BTreeMap<String, f64>,
    pub pattern_recognition: BTreeMap<String, String>,
    pub relationship_learning: BTreeMap<String, String>,
    pub mood_triggers: BTreeMap<String, f64>,
    pub successful_strategies: StrategySet,
    pub failed_strategies: StrategySet,
}

/// The dedup key for a learned strategy.
pub fn strategy_key(decision: &str, outcome: &str) -> String {
    format!("{} -> {}", decision, outcome)
}

/// Growth-only ordered set of strategy keys. Insertion order is preserved
/// and duplicates are structurally impossible.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StrategySet {
    entries: Vec<String>,
}

impl StrategySet {
    /// Insert a key, returning false if it was already present.
    pub fn insert(&mut self, key: impl Into<String>) -> bool {
        let key = key.into();
        if self.entries.iter().any(|existing| *existing == key) {
            return false;
        }
        self.entries.push(key);
        true
    }

    pub fn contains(&self, key: &str) -> bool {
        self.entries.iter().any(|existing| existing == key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The most recent `n` entries, oldest first.
    pub fn last(&self, n: usize) -> &[String] {
        let start = self.entries.len().saturating_sub(n);
        &self.entries[start..]
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.entries.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_dedupes() {
        let mut set = StrategySet::default();
        assert!(set.insert("rest -> positive recovery"));
        assert!(!set.insert("rest -> positive recovery"));
        assert_eq!(set.len(), 1);
        assert!(set.contains("rest -> positive recovery"));
    }

    #[test]
    fn insertion_order_is_preserved() {
        let mut set = StrategySet::default();
        set.insert("a -> b");
        set.insert("c -> d");
        set.insert("a -> b");
        set.insert("e -> f");

        let tail: Vec<_> = set.last(2).to_vec();
        assert_eq!(tail, vec!["c -> d".to_string(), "e -> f".to_string()]);
    }

    #[test]
    fn last_handles_short_sets() {
        let mut set = StrategySet::default();
        set.insert("only -> one");
        assert_eq!(set.last(5).len(), 1);
        assert!(StrategySet::default().last(2).is_empty());
    }

    #[test]
    fn strategy_key_format() {
        assert_eq!(strategy_key("rest", "felt better"), "rest -> felt better");
    }
}
