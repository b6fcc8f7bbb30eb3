use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub const MAX_GOALS: usize = 3;

/// Trait order is fixed; creation and drift both index into this array, so
/// a seeded run always touches the same traits.
pub const PERSONALITY_TRAITS: [&str; 8] = [
    "openness",
    "conscientiousness",
    "extraversion",
    "agreeableness",
    "neuroticism",
    "spontaneity",
    "ambition",
    "creativity",
];

/// Initial value ranges, parallel to `PERSONALITY_TRAITS`.
const TRAIT_RANGES: [(f64, f64); 8] = [
    (3.0, 9.0),
    (3.0, 9.0),
    (2.0, 9.0),
    (3.0, 9.0),
    (2.0, 8.0),
    (3.0, 8.0),
    (3.0, 8.0),
    (3.0, 9.0),
];

pub const STAT_NAMES: [&str; 8] = [
    "happiness",
    "energy",
    "social_need",
    "stress",
    "health",
    "motivation",
    "curiosity",
    "loneliness",
];

/// Initial value ranges, parallel to `STAT_NAMES`.
const STAT_RANGES: [(f64, f64); 8] = [
    (4.0, 7.0),
    (5.0, 8.0),
    (3.0, 8.0),
    (2.0, 6.0),
    (6.0, 9.0),
    (4.0, 7.0),
    (4.0, 8.0),
    (2.0, 6.0),
];

const OCCUPATIONS: [&str; 17] = [
    "freelance writer",
    "coffee shop barista",
    "graphic designer",
    "yoga instructor",
    "bookstore clerk",
    "photographer",
    "musician",
    "social worker",
    "teacher",
    "chef",
    "artist",
    "therapist",
    "librarian",
    "researcher",
    "software developer",
    "marketing coordinator",
    "nurse",
];

/// What the character physically has on hand. The hourly decision prompt
/// and the scripted fallback both branch on sufficiency of these items.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Inventory {
    pub skincare_kit: bool,
    pub money: u32,
    pub food_items: Vec<String>,
    pub phone_credit: u32,
}

impl Inventory {
    fn draw(rng: &mut impl Rng) -> Self {
        Inventory {
            skincare_kit: rng.random_bool(0.5),
            money: rng.random_range(0..=50),
            food_items: if rng.random_bool(0.7) {
                vec!["bread".to_string(), "cheese".to_string()]
            } else {
                Vec::new()
            },
            phone_credit: rng.random_range(0..=20),
        }
    }

    /// One-line inventory description for prompt composition.
    pub fn describe(&self) -> String {
        let food = if self.food_items.is_empty() {
            "none".to_string()
        } else {
            self.food_items.join(", ")
        };
        format!(
            "skincare kit: {}, money: ${}, food: {}, phone credit: ${}",
            if self.skincare_kit { "yes" } else { "no" },
            self.money,
            food,
            self.phone_credit
        )
    }
}

/// One applied personality shift, kept for the character's history.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TraitChange {
    pub day: u32,
    pub trait_name: String,
    pub change: f64,
    pub trigger: String,
    pub new_value: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonalityEvolution {
    pub changes: Vec<TraitChange>,
    pub last_major_shift: Option<DateTime<Utc>>,
}

/// The character document. Created once with randomized starting values,
/// then mutated hour by hour and persisted at day end.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Character {
    pub name: String,
    pub current_day: u32,
    pub age: u32,
    pub personality: BTreeMap<String, f64>,
    pub current_stats: BTreeMap<String, f64>,
    pub current_situation: String,
    pub location: String,
    pub occupation: String,
    pub core_desire: String,
    pub current_goals: Vec<String>,
    pub inventory: Inventory,
    pub personality_evolution: PersonalityEvolution,
}

impl Character {
    /// A brand-new character on day 1, with traits, stats and inventory
    /// drawn from the documented ranges.
    pub fn create(name: &str, rng: &mut impl Rng) -> Self {
        let personality = PERSONALITY_TRAITS
            .iter()
            .zip(TRAIT_RANGES)
            .map(|(trait_name, (low, high))| (trait_name.to_string(), rng.random_range(low..high)))
            .collect();
        let current_stats = STAT_NAMES
            .iter()
            .zip(STAT_RANGES)
            .map(|(stat_name, (low, high))| (stat_name.to_string(), rng.random_range(low..high)))
            .collect();

        Character {
            name: name.to_string(),
            current_day: 1,
            age: rng.random_range(22..=35),
            personality,
            current_stats,
            current_situation: "Trying to figure out what matters".to_string(),
            location: "home".to_string(),
            occupation: OCCUPATIONS[rng.random_range(0..OCCUPATIONS.len())].to_string(),
            core_desire: "To feel genuinely happy and fulfilled".to_string(),
            current_goals: Vec::new(),
            inventory: Inventory::draw(rng),
            personality_evolution: PersonalityEvolution::default(),
        }
    }

    pub fn stat(&self, name: &str) -> f64 {
        self.current_stats.get(name).copied().unwrap_or(0.0)
    }

    pub fn happiness(&self) -> f64 {
        self.stat("happiness")
    }

    /// Apply an hourly happiness delta, clamped to [0, 10]. Returns the
    /// new value.
    pub fn adjust_happiness(&mut self, delta: f64) -> f64 {
        let value = (self.happiness() + delta).clamp(0.0, 10.0);
        self.current_stats.insert("happiness".to_string(), value);
        value
    }

    /// Shift one personality trait, clamped to [1, 10], and record the
    /// change in the evolution history. Returns the new value.
    pub fn shift_trait(&mut self, trait_name: &str, change: f64, trigger: &str) -> f64 {
        let current = self.personality.get(trait_name).copied().unwrap_or(5.0);
        let new_value = (current + change).clamp(1.0, 10.0);
        self.personality.insert(trait_name.to_string(), new_value);

        self.personality_evolution.changes.push(TraitChange {
            day: self.current_day,
            trait_name: trait_name.to_string(),
            change,
            trigger: trigger.to_string(),
            new_value,
        });
        self.personality_evolution.last_major_shift = Some(Utc::now());

        new_value
    }

    /// Replace the goal list, keeping at most `MAX_GOALS` entries.
    pub fn set_goals(&mut self, mut goals: Vec<String>) {
        goals.truncate(MAX_GOALS);
        self.current_goals = goals;
    }
}
