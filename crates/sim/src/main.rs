//! Headless duel simulator.
//!
//! Loads content, builds two companions and plays them against each other,
//! printing the rendered narrative to stdout. Logs go to stderr.
mod config;
mod duel;
mod render;

use anyhow::{Context, Result};
use config::SimConfig;
use duel_content::ContentFactory;
use duel_core::{Battle, CombatantId, Team};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

fn main() -> Result<()> {
    // Load .env file if it exists (silently ignore if not found)
    let _ = dotenvy::dotenv();

    setup_logging();
    let config = SimConfig::from_env();

    let content = ContentFactory::new(&config.data_dir)
        .load_all()
        .with_context(|| format!("Failed to load content from {}", config.data_dir.display()))?;

    let mut combatants = Vec::with_capacity(2);
    for (id, team, key) in [(1, Team::Left, &config.left), (2, Team::Right, &config.right)] {
        let species = content
            .companions
            .get(key)
            .with_context(|| format!("Unknown companion species `{key}`"))?;
        let companion = species.build(
            config.level,
            CombatantId(id),
            team,
            &content.items,
            &content.config,
        )?;
        combatants.push(companion);
    }

    let seed = config.seed.unwrap_or_else(rand::random);
    tracing::info!(seed, left = %config.left, right = %config.right, level = config.level, "starting duel");
    let mut rng = ChaCha8Rng::seed_from_u64(seed);

    let mut battle = Battle::new(combatants, content.config.clone());
    let log = duel::run(&mut battle, &content.abilities, &mut rng, config.max_rounds)?;

    for line in &log.lines {
        println!("{line}");
    }
    println!();
    match log.winner {
        Some(team) => {
            let winner = battle
                .combatants()
                .iter()
                .find(|c| c.team == team)
                .map(|c| c.name.as_str())
                .unwrap_or("?");
            println!("{winner} wins after {} rounds (seed {seed}).", log.rounds);
        }
        None => println!("Draw after {} rounds (seed {seed}).", log.rounds),
    }

    for combatant in battle.finish() {
        let stats = &combatant.lifetime_stats;
        println!(
            "{:<10} HP {:>3}/{:<3} dealt {:>4} taken {:>4} blocked {:>4} healed {:>4} dodges {:>2} crits {:>2}",
            combatant.name,
            combatant.resources.hp.max(0),
            combatant.resources.max_hp,
            stats.damage_dealt,
            stats.damage_taken,
            stats.damage_blocked_or_reduced,
            stats.healing_done,
            stats.dodges,
            stats.crits,
        );
    }
    Ok(())
}

/// Logs to stderr; `RUST_LOG` overrides the default `info` level.
fn setup_logging() {
    let env_filter = tracing_subscriber::EnvFilter::from_default_env()
        .add_directive(tracing::Level::INFO.into());

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(stderr_layer)
        .init();
}
