use anyhow::Result;
use colored::*;
use rand::rngs::SmallRng;
use rand::Rng;

use crate::character::{Character, TraitChange, PERSONALITY_TRAITS};
use crate::daily_log::{DaySummary, HourlyEvent};
use crate::fallback;
use crate::generator::DecisionGenerator;
use crate::interpreter::{self, HourOutcome};
use crate::learning::strategy_key;
use crate::memory::ActionRecord;
use crate::prompt::{self, Twist};
use crate::store::StateStore;

pub const HOURS_PER_DAY: u32 = 24;

// Reinforcement and drift thresholds are fixed design constants.
const SUCCESS_THRESHOLD: f64 = 1.0;
const FAILURE_THRESHOLD: f64 = -0.5;
const DRIFT_TRIGGER: f64 = 1.5;
const DRIFT_PROBABILITY: f64 = 0.1;

const NARRATIVE_MAX_TOKENS: u32 = 2000;

const FALLBACK_GOALS: [&str; 10] = [
    "find something to eat because I'm really hungry",
    "text Sarah to see if she wants to hang out",
    "take a short walk outside to clear my head",
    "work on a small project to feel productive",
    "put some music on to lift my mood",
    "take a quick nap if I'm too tired",
    "call Mom to check in on her",
    "read a bit of a book to relax",
    "do a brief workout because I feel restless",
    "try cooking something new with what's in the kitchen",
];

/// Goals are regenerated before hour 1 iff any of these hold.
pub fn goal_refresh_due(day: u32, happiness: f64, goal_count: usize) -> bool {
    day % 3 == 0 || happiness < 4.0 || goal_count == 0
}

/// Personality drift policy: with fixed probability, shift one uniformly
/// chosen trait by a magnitude in [0.1, 0.3), signed by the sentiment of
/// the triggering outcome text. Returns the applied change, if any.
pub(crate) fn maybe_evolve_personality(
    character: &mut Character,
    trigger: &str,
    rng: &mut impl Rng,
) -> Option<TraitChange> {
    if rng.random_range(0.0..1.0) >= DRIFT_PROBABILITY {
        return None;
    }

    let trait_name = PERSONALITY_TRAITS[rng.random_range(0..PERSONALITY_TRAITS.len())];
    let magnitude = rng.random_range(0.1..0.3);

    let lower = trigger.to_lowercase();
    let change = if lower.contains("positive") || lower.contains("happy") {
        magnitude
    } else {
        -magnitude
    };

    character.shift_trait(trait_name, change, trigger);
    character.personality_evolution.changes.last().cloned()
}

/// The life-state machine: advances one character by exactly one simulated
/// day of 24 hourly decision cycles, then persists everything at once.
pub struct LifeEngine<G> {
    store: StateStore,
    generator: G,
    rng: SmallRng,
    generator_down: bool,
}

impl<G: DecisionGenerator> LifeEngine<G> {
    pub fn new(store: StateStore, generator: G, rng: SmallRng) -> Self {
        LifeEngine {
            store,
            generator,
            rng,
            generator_down: false,
        }
    }

    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Run one full simulated day. The returned summary is also appended to
    /// the daily log history. The only fatal condition is a failed save.
    pub async fn live_one_day(&mut self) -> Result<DaySummary> {
        let day = self.store.character.current_day;
        let start_happiness = self.store.character.happiness();

        println!(
            "\n{}",
            format!("Day {} begins for {}", day, self.store.character.name)
                .cyan()
                .bold()
        );
        println!("Starting happiness: {:.1}/10", start_happiness);

        self.refresh_goals_if_due().await;

        let mut events = Vec::with_capacity(HOURS_PER_DAY as usize);

        for hour in 1..=HOURS_PER_DAY {
            let twist = Twist::draw(&mut self.rng);
            let situation = prompt::hourly_situation(
                &self.store.character,
                &self.store.memories,
                &self.store.learning,
                hour,
                twist,
            );

            let narrative = match self.request_narrative(&situation).await {
                Some(text) => text,
                None => fallback::scripted_narrative(
                    &situation,
                    &self.store.character.inventory,
                    twist,
                ),
            };

            let outcome = interpreter::parse_narrative(&narrative, &mut self.rng);
            self.apply_hour(hour, &outcome);

            events.push(HourlyEvent {
                hour,
                decision: outcome.decision.clone(),
                happiness_change: outcome.happiness_change,
                insight: outcome.insight.clone(),
            });

            println!(
                "{}",
                format!("Hour {}/24 ({})", hour, prompt::time_period(hour)).dimmed()
            );
            println!("  {} {}", "Decision:".cyan(), outcome.decision);
            println!(
                "  {} {:.1}/10 ({:+.1})",
                "Happiness:".cyan(),
                self.store.character.happiness(),
                outcome.happiness_change
            );
        }

        let end_happiness = self.store.character.happiness();
        let total_change = end_happiness - start_happiness;

        let summary = DaySummary {
            day,
            start_happiness,
            end_happiness,
            total_change,
            events,
            goals_at_day_end: self.store.character.current_goals.clone(),
            personality_snapshot: self.store.character.personality.clone(),
        };

        self.store.daily_logs.logs.push(summary.clone());
        self.store.character.current_day += 1;
        self.store.save_all()?;

        println!("\n{}", format!("Day {} complete", day).cyan().bold());
        println!("Happiness change: {:+.1}", total_change);
        println!(
            "Current goals: {}",
            if summary.goals_at_day_end.is_empty() {
                "none".to_string()
            } else {
                summary.goals_at_day_end.join("; ")
            }
        );

        Ok(summary)
    }

    /// Ask the generator for a narrative. The first failure switches the
    /// run to the scripted fallback permanently; returns None once down.
    async fn request_narrative(&mut self, situation: &str) -> Option<String> {
        if self.generator_down {
            return None;
        }
        match self.generator.generate(situation, NARRATIVE_MAX_TOKENS).await {
            Ok(text) => Some(text),
            Err(e) => {
                eprintln!(
                    "{}",
                    format!(
                        "Decision generator unavailable ({}); using scripted fallback",
                        e
                    )
                    .yellow()
                );
                self.generator_down = true;
                None
            }
        }
    }

    /// Apply one hour's structured outcome: stat update, learning
    /// reinforcement, memory append, conditional personality drift.
    fn apply_hour(&mut self, hour: u32, outcome: &HourOutcome) {
        let delta = outcome.happiness_change;
        self.store.character.adjust_happiness(delta);

        let key = strategy_key(&outcome.decision, &outcome.outcome);
        if delta > SUCCESS_THRESHOLD {
            self.store.learning.successful_strategies.insert(key);
        } else if delta < FAILURE_THRESHOLD {
            self.store.learning.failed_strategies.insert(key);
        }

        self.store.memories.record_action(ActionRecord {
            hour,
            decision: outcome.decision.clone(),
            outcome: outcome.outcome.clone(),
            happiness_impact: delta,
            insight: outcome.insight.clone(),
            summary: format!("{} - felt {:+.1}", outcome.decision, delta),
        });

        if delta.abs() > DRIFT_TRIGGER {
            if let Some(change) = maybe_evolve_personality(
                &mut self.store.character,
                &outcome.outcome,
                &mut self.rng,
            ) {
                println!(
                    "{}",
                    format!(
                        "Personality shift: {} changed by {:+.2}",
                        change.trait_name, change.change
                    )
                    .magenta()
                );
            }
        }
    }

    /// Regenerate goals when the policy says so, replacing the prior list.
    async fn refresh_goals_if_due(&mut self) {
        let character = &self.store.character;
        if !goal_refresh_due(
            character.current_day,
            character.happiness(),
            character.current_goals.len(),
        ) {
            return;
        }

        let situation = prompt::goal_situation(
            &self.store.character,
            &self.store.memories,
            &self.store.learning,
        );

        let goals = match self.request_narrative(&situation).await {
            Some(text) => {
                let extracted = interpreter::extract_goals(&text);
                if extracted.is_empty() {
                    self.fallback_goals()
                } else {
                    extracted
                }
            }
            None => self.fallback_goals(),
        };

        self.store.character.set_goals(goals);
        println!(
            "{} {}",
            "New goals:".green(),
            self.store.character.current_goals.join("; ")
        );
    }

    /// Exactly two distinct goals from the fixed catalogue.
    fn fallback_goals(&mut self) -> Vec<String> {
        let first = self.rng.random_range(0..FALLBACK_GOALS.len());
        let mut second = self.rng.random_range(0..FALLBACK_GOALS.len() - 1);
        if second >= first {
            second += 1;
        }
        vec![
            FALLBACK_GOALS[first].to_string(),
            FALLBACK_GOALS[second].to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use anyhow::anyhow;
    use rand::SeedableRng;

    struct Scripted(&'static str);

    impl DecisionGenerator for Scripted {
        async fn generate(&self, _situation: &str, _max_tokens: u32) -> Result<String> {
            Ok(self.0.to_string())
        }
    }

    struct Offline;

    impl DecisionGenerator for Offline {
        async fn generate(&self, _situation: &str, _max_tokens: u32) -> Result<String> {
            Err(anyhow!("model offline"))
        }
    }

    fn test_engine<G: DecisionGenerator>(generator: G, seed: u64) -> LifeEngine<G> {
        let dir = std::env::temp_dir().join(format!("ailife-test-{}", uuid::Uuid::new_v4()));
        let config = Config::new(Some(dir)).unwrap();
        let mut rng = SmallRng::seed_from_u64(seed);
        let store = StateStore::open(&config, "Alex", &mut rng).unwrap();
        LifeEngine::new(store, generator, rng)
    }

    fn outcome(decision: &str, result: &str, delta: f64) -> HourOutcome {
        HourOutcome {
            decision: decision.to_string(),
            action: String::new(),
            outcome: result.to_string(),
            happiness_change: delta,
            insight: "noted".to_string(),
        }
    }

    #[test]
    fn goal_refresh_predicate_matrix() {
        // day=4, happiness=6, one goal: nothing triggers
        assert!(!goal_refresh_due(4, 6.0, 1));
        // every-third-day trigger
        assert!(goal_refresh_due(3, 6.0, 1));
        assert!(goal_refresh_due(6, 6.0, 1));
        // low-happiness trigger
        assert!(goal_refresh_due(4, 3.9, 1));
        assert!(!goal_refresh_due(4, 4.0, 1));
        // empty-goals trigger
        assert!(goal_refresh_due(4, 6.0, 0));
    }

    #[test]
    fn reinforcement_thresholds_are_strict() {
        let mut engine = test_engine(Scripted(""), 21);

        engine.apply_hour(1, &outcome("rest", "fine", 1.0));
        assert!(engine.store.learning.successful_strategies.is_empty());

        engine.apply_hour(2, &outcome("rest", "great", 1.1));
        assert!(engine
            .store
            .learning
            .successful_strategies
            .contains("rest -> great"));

        engine.apply_hour(3, &outcome("gamble", "meh", -0.5));
        assert!(engine.store.learning.failed_strategies.is_empty());

        engine.apply_hour(4, &outcome("gamble", "lost", -0.6));
        assert!(engine
            .store
            .learning
            .failed_strategies
            .contains("gamble -> lost"));
    }

    #[test]
    fn repeated_success_is_deduplicated() {
        let mut engine = test_engine(Scripted(""), 22);
        engine.apply_hour(1, &outcome("rest", "positive recovery", 2.0));
        engine.apply_hour(2, &outcome("rest", "positive recovery", 2.0));
        assert_eq!(engine.store.learning.successful_strategies.len(), 1);
    }

    #[test]
    fn hour_application_records_memory() {
        let mut engine = test_engine(Scripted(""), 23);
        engine.apply_hour(7, &outcome("walk", "nice air", 0.4));

        let record = engine.store.memories.recent_actions.last().unwrap();
        assert_eq!(record.hour, 7);
        assert_eq!(record.summary, "walk - felt +0.4");
    }

    #[test]
    fn drift_requires_large_delta() {
        // Many small-delta hours must never move personality.
        let mut engine = test_engine(Scripted(""), 24);
        let before = engine.store.character.personality.clone();
        for hour in 1..=24 {
            engine.apply_hour(hour, &outcome("idle", "fine", 1.5));
        }
        assert_eq!(engine.store.character.personality, before);
        assert!(engine
            .store
            .character
            .personality_evolution
            .changes
            .is_empty());
    }

    #[test]
    fn drift_rate_is_statistically_one_in_ten() {
        let mut rng = SmallRng::seed_from_u64(99);
        let mut character = {
            let mut creation_rng = SmallRng::seed_from_u64(1);
            Character::create("Alex", &mut creation_rng)
        };

        let trials = 10_000;
        let mut drifts = 0;
        for _ in 0..trials {
            if maybe_evolve_personality(&mut character, "a happy ending", &mut rng).is_some() {
                drifts += 1;
            }
        }

        // p = 0.10, sigma = 30 for 10k trials; allow 5 sigma.
        assert!((850..=1150).contains(&drifts), "drift count {}", drifts);

        for value in character.personality.values() {
            assert!(*value >= 1.0 && *value <= 10.0);
        }
    }

    #[test]
    fn drift_sign_follows_outcome_sentiment() {
        let mut rng = SmallRng::seed_from_u64(3);
        let mut character = {
            let mut creation_rng = SmallRng::seed_from_u64(1);
            Character::create("Alex", &mut creation_rng)
        };

        let mut positive_seen = false;
        let mut negative_seen = false;
        for _ in 0..500 {
            if let Some(change) =
                maybe_evolve_personality(&mut character, "a positive turn", &mut rng)
            {
                assert!(change.change > 0.0);
                positive_seen = true;
            }
            if let Some(change) =
                maybe_evolve_personality(&mut character, "it all went wrong", &mut rng)
            {
                assert!(change.change < 0.0);
                negative_seen = true;
            }
        }
        assert!(positive_seen && negative_seen);
    }

    #[tokio::test]
    async fn generator_failure_switches_to_fallback_for_the_run() {
        let mut engine = test_engine(Offline, 31);
        let summary = engine.live_one_day().await.unwrap();

        // The day still completes with 24 scripted hours.
        assert_eq!(summary.events.len(), 24);
        assert!(engine.generator_down);
        assert_eq!(engine.store.character.current_day, 2);
        for event in &summary.events {
            assert!(!event.decision.is_empty());
        }
    }

    #[tokio::test]
    async fn fallback_goals_are_two_distinct_catalogue_entries() {
        let mut engine = test_engine(Offline, 32);
        engine.refresh_goals_if_due().await;

        let goals = &engine.store.character.current_goals;
        assert_eq!(goals.len(), 2);
        assert_ne!(goals[0], goals[1]);
        assert!(FALLBACK_GOALS.contains(&goals[0].as_str()));
        assert!(FALLBACK_GOALS.contains(&goals[1].as_str()));
    }

    #[tokio::test]
    async fn goal_bullets_from_generator_are_used() {
        let mut engine = test_engine(
            Scripted("- stretch my legs with a long walk\n- text Sarah about the weekend\n"),
            33,
        );
        engine.refresh_goals_if_due().await;

        let goals = &engine.store.character.current_goals;
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0], "stretch my legs with a long walk");
    }

    #[tokio::test]
    async fn goal_refresh_skipped_when_not_due() {
        let mut engine = test_engine(Scripted("- should never be applied here\n"), 34);
        engine.store.character.current_day = 4;
        engine
            .store
            .character
            .current_stats
            .insert("happiness".to_string(), 6.0);
        engine.store.character.set_goals(vec!["keep at it".to_string()]);

        engine.refresh_goals_if_due().await;
        assert_eq!(engine.store.character.current_goals, vec!["keep at it"]);
    }
}
