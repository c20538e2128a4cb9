// Configuration module for reading Snake.toml
// This module provides OOP-style configuration management for the Battlesnake bot

use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Main configuration structure containing all tunable parameters
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub heuristics: HeuristicsConfig,
    pub appearance: AppearanceConfig,
    pub debug: DebugConfig,
}

/// Thresholds used by the move selector
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct HeuristicsConfig {
    /// Health strictly below this value means we are hungry and seek food
    pub hungry_health_threshold: i32,
    /// Tail-chasing requires a body strictly longer than this
    pub tail_chase_min_length: usize,
    /// Health right after eating; the tail does not move on that turn
    pub health_max: i32,
}

/// Appearance returned from GET /
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct AppearanceConfig {
    pub author: String,
    pub color: String,
    pub head: String,
    pub tail: String,
}

/// Debug configuration
#[derive(Debug, Deserialize, Clone, PartialEq)]
pub struct DebugConfig {
    pub enabled: bool,
    pub log_file_path: String,
}

impl Config {
    /// Loads configuration from a TOML file
    ///
    /// # Arguments
    /// * `path` - Path to the Snake.toml configuration file
    ///
    /// # Returns
    /// * `Result<Config, String>` - Parsed configuration or error message
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, String> {
        let contents = fs::read_to_string(path.as_ref())
            .map_err(|e| format!("Failed to read config file: {}", e))?;

        toml::from_str(&contents).map_err(|e| format!("Failed to parse config file: {}", e))
    }

    /// Loads default configuration from Snake.toml in the project root
    pub fn load_default() -> Result<Self, String> {
        Self::from_file("Snake.toml")
    }

    /// Creates a configuration with hardcoded default values as fallback
    /// This should match the constants defined in Snake.toml
    pub fn default_hardcoded() -> Self {
        Config {
            heuristics: HeuristicsConfig {
                hungry_health_threshold: 20,
                tail_chase_min_length: 4,
                health_max: 100,
            },
            appearance: AppearanceConfig {
                author: "tailchaser".to_string(),
                color: "#888888".to_string(),
                head: "default".to_string(),
                tail: "default".to_string(),
            },
            debug: DebugConfig {
                enabled: false,
                log_file_path: "battlesnake_debug.jsonl".to_string(),
            },
        }
    }

    /// Attempts to load from file, falls back to hardcoded defaults on error
    pub fn load_or_default() -> Self {
        Self::load_default().unwrap_or_else(|e| {
            eprintln!("Warning: Could not load Snake.toml ({}), using hardcoded defaults", e);
            Self::default_hardcoded()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_can_be_created() {
        let config = Config::default_hardcoded();
        assert_eq!(config.heuristics.hungry_health_threshold, 20);
        assert_eq!(config.heuristics.tail_chase_min_length, 4);
        assert_eq!(config.heuristics.health_max, 100);
    }

    #[test]
    fn test_snake_toml_can_be_parsed() {
        // This test ensures Snake.toml is valid and can be parsed
        let result = Config::from_file("Snake.toml");
        assert!(
            result.is_ok(),
            "Failed to parse Snake.toml: {:?}",
            result.err()
        );
    }

    #[test]
    fn test_all_config_values_match_hardcoded_defaults() {
        let file_config = Config::from_file("Snake.toml").expect("Snake.toml should be parseable");
        assert_eq!(file_config, Config::default_hardcoded());
    }

    #[test]
    fn test_load_or_default_works() {
        let config = Config::load_or_default();
        assert_eq!(config.heuristics.hungry_health_threshold, 20);
        assert!(!config.debug.log_file_path.is_empty());
    }

    #[test]
    fn test_missing_section_is_an_error() {
        let result: Result<Config, _> = toml::from_str("[heuristics]\nhungry_health_threshold = 20\n");
        assert!(result.is_err());
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        // Test with a non-existent file
        let result = Config::from_file("nonexistent.toml");
        assert!(result.is_err());
    }
}
