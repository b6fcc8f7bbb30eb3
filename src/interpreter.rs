use rand::Rng;

use crate::character::MAX_GOALS;

/// Goal bullets shorter than this are discarded as noise.
const MIN_GOAL_LEN: usize = 10;

/// Structured result of one hour's narrative. Always fully populated; the
/// parser fills defaults instead of failing.
#[derive(Debug, Clone, Default)]
pub struct HourOutcome {
    pub decision: String,
    pub action: String,
    pub outcome: String,
    pub happiness_change: f64,
    pub insight: String,
}

/// Parse a five-field narrative. Line-oriented and label-prefix based;
/// tolerant of extra whitespace and missing fields. An absent or non-numeric
/// happiness delta is replaced with a uniform draw from [-0.5, 1.5). Never
/// errors: generator output is untrusted by design.
pub fn parse_narrative(text: &str, rng: &mut impl Rng) -> HourOutcome {
    let mut result = HourOutcome::default();
    let mut happiness: Option<f64> = None;

    for line in text.lines() {
        let trimmed = line.trim();
        if let Some(rest) = trimmed.strip_prefix("DECISION:") {
            result.decision = rest.trim().to_string();
        } else if let Some(rest) = trimmed.strip_prefix("ACTION:") {
            result.action = rest.trim().to_string();
        } else if let Some(rest) = trimmed.strip_prefix("OUTCOME:") {
            result.outcome = rest.trim().to_string();
        } else if let Some(rest) = trimmed.strip_prefix("HAPPINESS_CHANGE:") {
            happiness = rest.trim().trim_start_matches('+').parse().ok();
        } else if let Some(rest) = trimmed.strip_prefix("INSIGHT:") {
            result.insight = rest.trim().to_string();
        }
    }

    result.happiness_change = happiness.unwrap_or_else(|| rng.random_range(-0.5..1.5));
    result
}

/// Extract goal bullets from generator output: lines starting with '-' or
/// containing the word "goal", trimmed and length-filtered, at most
/// MAX_GOALS kept. An empty result means the caller should fall back.
pub fn extract_goals(text: &str) -> Vec<String> {
    let mut goals = Vec::new();

    for line in text.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('-') || trimmed.to_lowercase().contains("goal") {
            let goal_text = trimmed.trim_start_matches('-').trim();
            if goal_text.len() > MIN_GOAL_LEN {
                goals.push(goal_text.to_string());
            }
        }
        if goals.len() == MAX_GOALS {
            break;
        }
    }

    goals
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::SmallRng;
    use rand::SeedableRng;

    fn rng() -> SmallRng {
        SmallRng::seed_from_u64(42)
    }

    #[test]
    fn parses_well_formed_narrative() {
        let text = "DECISION: make a sandwich\n\
                    ACTION: toast bread in a pan\n\
                    OUTCOME: it turned out tasty\n\
                    HAPPINESS_CHANGE: +1.0\n\
                    INSIGHT: simple food helps\n";
        let outcome = parse_narrative(text, &mut rng());

        assert_eq!(outcome.decision, "make a sandwich");
        assert_eq!(outcome.action, "toast bread in a pan");
        assert_eq!(outcome.outcome, "it turned out tasty");
        assert_eq!(outcome.happiness_change, 1.0);
        assert_eq!(outcome.insight, "simple food helps");
    }

    #[test]
    fn tolerates_whitespace_and_negative_delta() {
        let text = "   DECISION:   rest   \n  HAPPINESS_CHANGE:  -0.8  ";
        let outcome = parse_narrative(text, &mut rng());
        assert_eq!(outcome.decision, "rest");
        assert_eq!(outcome.happiness_change, -0.8);
    }

    #[test]
    fn missing_labels_default_to_empty() {
        let outcome = parse_narrative("just rambling prose, no labels", &mut rng());
        assert!(outcome.decision.is_empty());
        assert!(outcome.action.is_empty());
        assert!(outcome.outcome.is_empty());
        assert!(outcome.insight.is_empty());
    }

    #[test]
    fn garbled_delta_draws_from_default_range() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = parse_narrative("HAPPINESS_CHANGE: lots!", &mut rng);
            assert!(outcome.happiness_change >= -0.5);
            assert!(outcome.happiness_change < 1.5);
        }
    }

    #[test]
    fn absent_delta_draws_from_default_range() {
        for seed in 0..50 {
            let mut rng = SmallRng::seed_from_u64(seed);
            let outcome = parse_narrative("DECISION: wander", &mut rng);
            assert!(outcome.happiness_change >= -0.5);
            assert!(outcome.happiness_change < 1.5);
        }
    }

    #[test]
    fn extracts_bullet_goals() {
        let text = "- grab something to eat because I'm starving\n\
                    random chatter\n\
                    - text Sarah and see if she wants to hang out\n";
        let goals = extract_goals(text);
        assert_eq!(goals.len(), 2);
        assert_eq!(goals[0], "grab something to eat because I'm starving");
    }

    #[test]
    fn extracts_goal_keyword_lines_and_caps_at_three() {
        let text = "My goal is to walk more often\n\
                    - read a bit of a book tonight\n\
                    - do a short workout at home\n\
                    - call Mom and catch up properly\n";
        let goals = extract_goals(text);
        assert_eq!(goals.len(), 3);
    }

    #[test]
    fn short_bullets_are_filtered_out() {
        assert!(extract_goals("- nap\n- eat").is_empty());
    }
}
