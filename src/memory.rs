use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Only this many recent actions are retained; older entries are evicted.
pub const RECENT_ACTION_CAP: usize = 50;

/// Memory document. `recent_actions` is the working memory fed back into
/// prompts; the remaining collections are persisted but not written by the
/// hourly loop yet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemoryBook {
    pub significant_events: Vec<String>,
    pub recent_actions: Vec<ActionRecord>,
    pub learned_patterns: BTreeMap<String, String>,
    pub emotional_memories: Vec<String>,
    pub daily_summaries: Vec<String>,
}

/// One hour's decision and how it went.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRecord {
    pub hour: u32,
    pub decision: String,
    pub outcome: String,
    pub happiness_impact: f64,
    pub insight: String,
    pub summary: String,
}

impl MemoryBook {
    /// Append an action record, evicting the oldest entries beyond the cap.
    pub fn record_action(&mut self, record: ActionRecord) {
        self.recent_actions.push(record);
        if self.recent_actions.len() > RECENT_ACTION_CAP {
            let excess = self.recent_actions.len() - RECENT_ACTION_CAP;
            self.recent_actions.drain(..excess);
        }
    }

    /// The display summaries of the most recent `n` actions, oldest first.
    pub fn last_summaries(&self, n: usize) -> Vec<&str> {
        let start = self.recent_actions.len().saturating_sub(n);
        self.recent_actions[start..]
            .iter()
            .map(|action| action.summary.as_str())
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(hour: u32, decision: &str) -> ActionRecord {
        ActionRecord {
            hour,
            decision: decision.to_string(),
            outcome: "fine".to_string(),
            happiness_impact: 0.5,
            insight: "ok".to_string(),
            summary: format!("{} - felt +0.5", decision),
        }
    }

    #[test]
    fn recent_actions_never_exceed_cap() {
        let mut memories = MemoryBook::default();
        for i in 0..60 {
            memories.record_action(record(i % 24 + 1, &format!("act-{}", i)));
        }
        assert_eq!(memories.recent_actions.len(), RECENT_ACTION_CAP);
    }

    #[test]
    fn fifty_first_append_evicts_the_oldest() {
        let mut memories = MemoryBook::default();
        for i in 0..51 {
            memories.record_action(record(1, &format!("act-{}", i)));
        }
        assert_eq!(memories.recent_actions.len(), 50);
        assert_eq!(memories.recent_actions[0].decision, "act-1");
        assert_eq!(memories.recent_actions[49].decision, "act-50");
    }

    #[test]
    fn last_summaries_returns_tail_in_order() {
        let mut memories = MemoryBook::default();
        for i in 0..5 {
            memories.record_action(record(1, &format!("act-{}", i)));
        }
        let summaries = memories.last_summaries(3);
        assert_eq!(summaries.len(), 3);
        assert!(summaries[0].starts_with("act-2"));
        assert!(summaries[2].starts_with("act-4"));
    }

    #[test]
    fn last_summaries_on_empty_book() {
        let memories = MemoryBook::default();
        assert!(memories.last_summaries(3).is_empty());
    }
}
