//! Simulator configuration from the process environment.
use std::env;
use std::path::PathBuf;

/// Which duel to run and where content lives.
#[derive(Clone, Debug)]
pub struct SimConfig {
    pub data_dir: PathBuf,
    pub left: String,
    pub right: String,
    pub level: u32,
    /// Fixed seed for a reproducible duel; random when unset.
    pub seed: Option<u64>,
    pub max_rounds: u32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            left: "boar".to_string(),
            right: "viper".to_string(),
            level: 20,
            seed: None,
            max_rounds: 50,
        }
    }
}

impl SimConfig {
    /// Construct configuration from process environment variables.
    ///
    /// Environment variables:
    /// - `DUEL_DATA_DIR` - Content directory (default: `crates/game/content/data`)
    /// - `DUEL_LEFT` / `DUEL_RIGHT` - Companion species keys (default: boar, viper)
    /// - `DUEL_LEVEL` - Level for both companions (default: 20)
    /// - `DUEL_SEED` - RNG seed (default: random)
    /// - `DUEL_MAX_ROUNDS` - Round limit before a draw (default: 50)
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(dir) = env::var("DUEL_DATA_DIR") {
            config.data_dir = PathBuf::from(dir);
        }
        if let Ok(left) = env::var("DUEL_LEFT") {
            config.left = left;
        }
        if let Ok(right) = env::var("DUEL_RIGHT") {
            config.right = right;
        }
        if let Some(level) = read_env::<u32>("DUEL_LEVEL") {
            config.level = level.clamp(1, 50);
        }
        config.seed = read_env::<u64>("DUEL_SEED");
        if let Some(rounds) = read_env::<u32>("DUEL_MAX_ROUNDS") {
            config.max_rounds = rounds.max(1);
        }

        config
    }
}

/// The content directory shipped with `duel-content`, resolved at build time.
fn default_data_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../game/content/data")
}

fn read_env<T>(key: &str) -> Option<T>
where
    T: std::str::FromStr,
{
    env::var(key).ok()?.parse().ok()
}
