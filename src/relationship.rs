use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationshipKind {
    BestFriend,
    Family,
    Coworker,
    Friend,
    Acquaintance,
}

impl std::fmt::Display for RelationshipKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RelationshipKind::BestFriend => write!(f, "best_friend"),
            RelationshipKind::Family => write!(f, "family"),
            RelationshipKind::Coworker => write!(f, "coworker"),
            RelationshipKind::Friend => write!(f, "friend"),
            RelationshipKind::Acquaintance => write!(f, "acquaintance"),
        }
    }
}

/// One person the character knows. Durable context only; the hourly loop
/// reads but never mutates these.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
    #[serde(rename = "type")]
    pub kind: RelationshipKind,
    pub closeness: f64,
    pub last_contact: String,
    pub personality: String,
    pub history: String,
    pub interaction_count: u32,
}

/// Relationship document: person name -> relationship record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelationshipBook {
    pub people: BTreeMap<String, Relationship>,
}

impl RelationshipBook {
    /// The default roster a new character starts with.
    pub fn starter() -> Self {
        let mut people = BTreeMap::new();

        people.insert(
            "Sarah".to_string(),
            Relationship {
                kind: RelationshipKind::BestFriend,
                closeness: 8.2,
                last_contact: "3_days_ago".to_string(),
                personality: "caring, funny, supportive".to_string(),
                history: "Met in college, stayed close friends".to_string(),
                interaction_count: 0,
            },
        );
        people.insert(
            "Mom".to_string(),
            Relationship {
                kind: RelationshipKind::Family,
                closeness: 9.1,
                last_contact: "1_week_ago".to_string(),
                personality: "loving, worried, wise".to_string(),
                history: "Always been supportive".to_string(),
                interaction_count: 0,
            },
        );
        people.insert(
            "Jake".to_string(),
            Relationship {
                kind: RelationshipKind::Coworker,
                closeness: 6.5,
                last_contact: "yesterday".to_string(),
                personality: "professional, friendly, smart".to_string(),
                history: "Work colleague, potential friend".to_string(),
                interaction_count: 0,
            },
        );

        RelationshipBook { people }
    }

    pub fn len(&self) -> usize {
        self.people.len()
    }

    pub fn is_empty(&self) -> bool {
        self.people.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starter_roster_has_three_people() {
        let book = RelationshipBook::starter();
        assert_eq!(book.len(), 3);
        assert_eq!(book.people["Sarah"].kind, RelationshipKind::BestFriend);
        assert_eq!(book.people["Mom"].kind, RelationshipKind::Family);
        assert_eq!(book.people["Jake"].interaction_count, 0);
    }

    #[test]
    fn kind_serializes_as_snake_case() {
        let json = serde_json::to_string(&RelationshipKind::BestFriend).unwrap();
        assert_eq!(json, "\"best_friend\"");
    }
}
