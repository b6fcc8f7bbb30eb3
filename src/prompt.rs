use rand::Rng;

use crate::character::Character;
use crate::learning::LearningLedger;
use crate::memory::MemoryBook;

/// Sentinel recency digest for a character with no history yet.
pub const FRESH_START: &str = "fresh start";

/// Sentinel learning digest before anything has worked.
pub const NOTHING_LEARNED: &str = "Still figuring out what works";

/// The random positive/negative flavor injected into each hour's narrative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Twist {
    Positive,
    Negative,
}

impl Twist {
    pub fn draw(rng: &mut impl Rng) -> Self {
        if rng.random_bool(0.5) {
            Twist::Positive
        } else {
            Twist::Negative
        }
    }
}

impl std::fmt::Display for Twist {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Twist::Positive => write!(f, "positive"),
            Twist::Negative => write!(f, "negative"),
        }
    }
}

pub fn time_period(hour: u32) -> &'static str {
    match hour {
        6..=11 => "Morning",
        12..=17 => "Afternoon",
        18..=22 => "Evening",
        _ => "Night",
    }
}

/// The last 3 action summaries joined into a one-line digest.
pub fn recent_digest(memories: &MemoryBook) -> String {
    let summaries = memories.last_summaries(3);
    if summaries.is_empty() {
        FRESH_START.to_string()
    } else {
        summaries.join(" → ")
    }
}

/// The last 2 successful strategies as a one-line digest.
pub fn learning_digest(learning: &LearningLedger) -> String {
    let recent = learning.successful_strategies.last(2);
    if recent.is_empty() {
        NOTHING_LEARNED.to_string()
    } else {
        format!("I learned that: {}", recent.join(", "))
    }
}

fn goals_line(character: &Character) -> String {
    if character.current_goals.is_empty() {
        "none yet".to_string()
    } else {
        character.current_goals.join("; ")
    }
}

/// Compose the situation description for one hour's decision. Pure function
/// of the given state; the twist is drawn by the caller.
pub fn hourly_situation(
    character: &Character,
    memories: &MemoryBook,
    learning: &LearningLedger,
    hour: u32,
    twist: Twist,
) -> String {
    format!(
        "I am {name}.\n\
         Day {day}, Hour {hour} ({period}). Today is {date}.\n\
         I'm at {location}, working as a {occupation}.\n\
         Happiness: {happiness:.1}/10, Energy: {energy:.1}/10, \
         Loneliness: {loneliness:.1}/10, Stress: {stress:.1}/10.\n\
         Core desire: {desire}.\n\
         My current goals: {goals}.\n\
         My inventory: {inventory}.\n\
         Recent actions: {recent}.\n\
         Learning context: {learned}.\n\n\
         I decide what to do next, thinking as myself. First I check my \
         inventory and plan around what I lack, then I carry the plan out. \
         Along the way an unplanned {twist} event happens and I deal with it. \
         I speak in first-person informal English and only describe what \
         actually happened.\n\n\
         Output exactly these five lines with no extra explanation:\n\
         DECISION: [what I decide to do, including the inventory check]\n\
         ACTION: [what I actually do, including the unexpected event]\n\
         OUTCOME: [how it went and how I feel at the end]\n\
         HAPPINESS_CHANGE: [a number between -2 and +3]\n\
         INSIGHT: [one sentence about what I realize about life or happiness]\n",
        name = character.name,
        day = character.current_day,
        hour = hour,
        period = time_period(hour),
        date = chrono::Utc::now().format("%Y-%m-%d"),
        location = character.location,
        occupation = character.occupation,
        happiness = character.stat("happiness"),
        energy = character.stat("energy"),
        loneliness = character.stat("loneliness"),
        stress = character.stat("stress"),
        desire = character.core_desire,
        goals = goals_line(character),
        inventory = character.inventory.describe(),
        recent = recent_digest(memories),
        learned = learning_digest(learning),
        twist = twist,
    )
}

/// Compose the motivational context used when regenerating goals.
pub fn goal_situation(
    character: &Character,
    memories: &MemoryBook,
    learning: &LearningLedger,
) -> String {
    format!(
        "I am {name}. Right now I feel:\n\
         - Happiness: {happiness:.1}/10\n\
         - Loneliness: {loneliness:.1}/10\n\
         - Stress: {stress:.1}/10\n\
         - Core desire: {desire}\n\
         - Inventory: {inventory}\n\
         - Recent actions: {recent}\n\
         - Learned so far: {learned}\n\n\
         As this character, in first-person informal English, write 2-3 \
         personal goals that feel meaningful right now. Check the inventory; \
         if something is missing, plan how to get it. Write each goal as a \
         bullet starting with '-', in casual real-life language. No extra \
         explanation, just the bullet points.\n",
        name = character.name,
        happiness = character.stat("happiness"),
        loneliness = character.stat("loneliness"),
        stress = character.stat("stress"),
        desire = character.core_desire,
        inventory = character.inventory.describe(),
        recent = recent_digest(memories),
        learned = learning_digest(learning),
    )
}
