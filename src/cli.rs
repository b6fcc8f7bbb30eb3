use std::path::PathBuf;

use anyhow::Result;
use colored::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;

use crate::config::Config;
use crate::engine::LifeEngine;
use crate::generator::AIProviderClient;
use crate::store::StateStore;

pub async fn handle_live(
    name: String,
    data_dir: Option<PathBuf>,
    provider: Option<String>,
    model: Option<String>,
    seed: Option<u64>,
) -> Result<()> {
    let config = Config::new(data_dir)?;

    let mut rng = match seed {
        Some(seed) => SmallRng::seed_from_u64(seed),
        None => SmallRng::from_os_rng(),
    };

    let store = StateStore::open(&config, &name, &mut rng)?;

    println!("{}", "AI Life Simulation".cyan().bold());
    println!("Character: {}", store.character.name);
    println!("Current day: {}", store.character.current_day);
    println!("Memories: {} recent actions", store.memories.recent_actions.len());
    println!("Relationships: {} people", store.relationships.len());

    let generator_config = config.get_generator_config(provider, model)?;
    let generator = AIProviderClient::new(generator_config);

    let mut engine = LifeEngine::new(store, generator, rng);
    let summary = engine.live_one_day().await?;

    println!("\n{}", "Daily Summary".cyan().bold());
    println!("Total happiness change: {:+.1}", summary.total_change);
    println!("Significant moments: {}", summary.significant_moments());

    println!(
        "\nAll data saved to {}",
        config.data_dir.display().to_string().dimmed()
    );
    println!(
        "Run again to continue living day {}",
        engine.store().character.current_day
    );

    Ok(())
}

pub async fn handle_status(name: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut rng = SmallRng::from_os_rng();
    let store = StateStore::open(&config, &name, &mut rng)?;

    let character = &store.character;
    println!("{}", format!("{} - Day {}", character.name, character.current_day).cyan().bold());
    println!("{}, working as a {}", character.location, character.occupation);
    println!("Core desire: {}", character.core_desire);

    println!("\n{}", "Current Stats".cyan().bold());
    for (stat_name, value) in &character.current_stats {
        println!("{}: {:.1}/10", stat_name.cyan(), value);
    }

    println!("\n{}", "Personality".cyan().bold());
    for (trait_name, value) in &character.personality {
        println!("{}: {:.2}", trait_name.cyan(), value);
    }
    if !character.personality_evolution.changes.is_empty() {
        println!(
            "{}",
            format!(
                "({} recorded trait shifts)",
                character.personality_evolution.changes.len()
            )
            .dimmed()
        );
    }

    println!("\n{}", "Goals".cyan().bold());
    if character.current_goals.is_empty() {
        println!("{}", "No goals yet".yellow());
    } else {
        for goal in &character.current_goals {
            println!("- {}", goal);
        }
    }

    println!("\n{}", "Inventory".cyan().bold());
    println!("{}", character.inventory.describe());

    Ok(())
}

pub async fn handle_relationships(name: String, data_dir: Option<PathBuf>) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut rng = SmallRng::from_os_rng();
    let store = StateStore::open(&config, &name, &mut rng)?;

    if store.relationships.is_empty() {
        println!("{}", "No relationships yet".yellow());
        return Ok(());
    }

    println!("{}", "Relationships".cyan().bold());
    println!();
    for (person, relationship) in &store.relationships.people {
        println!(
            "{:<12} {:<12} {:<6} {}",
            person.cyan(),
            relationship.kind,
            format!("{:.1}", relationship.closeness),
            relationship.last_contact.dimmed()
        );
    }

    Ok(())
}

pub async fn handle_logs(name: String, data_dir: Option<PathBuf>, limit: usize) -> Result<()> {
    let config = Config::new(data_dir)?;
    let mut rng = SmallRng::from_os_rng();
    let store = StateStore::open(&config, &name, &mut rng)?;

    if store.daily_logs.logs.is_empty() {
        println!("{}", "No completed days yet".yellow());
        return Ok(());
    }

    println!("{}", "Daily Logs".cyan().bold());
    let start = store.daily_logs.logs.len().saturating_sub(limit);
    for summary in &store.daily_logs.logs[start..] {
        let change = format!("{:+.1}", summary.total_change);
        let change_display = if summary.total_change >= 0.0 {
            change.green()
        } else {
            change.red()
        };
        println!(
            "Day {:<4} happiness {:.1} -> {:.1} ({}), {} significant moments",
            summary.day,
            summary.start_happiness,
            summary.end_happiness,
            change_display,
            summary.significant_moments()
        );
    }

    Ok(())
}
