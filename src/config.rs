// Configuration module for reading Agent.toml
// All heuristic magnitudes live here as plain data; nothing mutates them after load.

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub scores: ScoresConfig,
    pub arena: ArenaConfig,
    pub debug: DebugConfig,
}

/// Heuristic magnitudes used to score a candidate move
#[derive(Debug, Deserialize, Clone)]
pub struct ScoresConfig {
    // Terminal outcomes, from the acting agent's side
    pub win: f64,
    pub loss: f64,
    pub tie: f64,
    // Sentinel for "the game goes on"; kept distinct from `tie`
    pub not_ended: f64,

    // Safety
    pub unsafe_wall_threshold: u32,
    pub unsafe_penalty: f64,

    // Centrality
    pub center_weight: f64,
    pub center_bonus: f64,

    // Proximity to the opponent
    pub proximity_weight: f64,

    // Walling the side that faces an adjacent opponent
    pub aggression_bonus: f64,
}

/// Board shapes accepted from the game loop
#[derive(Debug, Deserialize, Clone)]
pub struct ArenaConfig {
    pub min_board_size: usize,
    pub max_board_size: usize,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Agent.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        Self::from_toml_str(&contents)
    }

    /// Parses configuration from TOML text
    pub fn from_toml_str(contents: &str) -> Result<Self, String> {
        let config: Config =
            toml::from_str(contents).map_err(|e| format!("Failed to parse config file: {}", e))?;
        config.validate()?;
        Ok(config)
    }

    /// Loads default configuration from Agent.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Agent.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Agent.toml
    pub fn default_hardcoded() -> Self {
        Config {
            scores: ScoresConfig {
                win: 100.0,
                loss: -100.0,
                tie: 0.0,
                not_ended: 1.0,
                unsafe_wall_threshold: 3,
                unsafe_penalty: -50.0,
                center_weight: 2.0,
                center_bonus: 4.0,
                proximity_weight: 3.0,
                aggression_bonus: 5.0,
            },
            arena: ArenaConfig {
                min_board_size: 2,
                max_board_size: 32,
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "colosseum_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Agent.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }

    /// Rejects values that would break the decision procedure
    fn validate(&self) -> Result<(), String> {
        if self.scores.win <= 0.0 {
            return Err(format!("scores.win must be positive, got {}", self.scores.win));
        }
        if self.scores.loss >= 0.0 {
            return Err(format!("scores.loss must be negative, got {}", self.scores.loss));
        }
        if self.scores.unsafe_wall_threshold > 4 {
            return Err(format!(
                "scores.unsafe_wall_threshold must be at most 4, got {}",
                self.scores.unsafe_wall_threshold
            ));
        }
        if self.arena.min_board_size == 0 || self.arena.min_board_size > self.arena.max_board_size
        {
            return Err(format!(
                "arena sizes must satisfy 0 < min <= max, got {}..={}",
                self.arena.min_board_size, self.arena.max_board_size
            ));
        }
        Ok(())
    }
}
