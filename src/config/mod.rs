//! Configuration loading and validation.
//!
//! Every season rule parameter lives here and is passed into the engine
//! explicitly. Nothing in the rule logic hardcodes a season year, the
//! magic round, or a grace period.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    ValidationError(String),
}

/// Season rule configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeasonConfig {
    /// Season year being played
    #[serde(default = "default_season")]
    pub season: u32,

    /// Round exempt from the home/away venue quota
    #[serde(default = "default_magic_round")]
    pub magic_round: u32,

    /// How many times one team may be tipped across the season
    #[serde(default = "default_max_tips_per_team")]
    pub max_tips_per_team: u32,

    /// Home (and, symmetrically, away) pick quota, magic round excluded
    #[serde(default = "default_max_home_away_tips")]
    pub max_home_away_tips: u32,

    /// Minutes past kickoff a selection is still shown in the menu
    ///
    /// Intentionally distinct from `commit_grace_minutes`; the two
    /// values disagreeing is inherited behavior that stakeholders have
    /// not reconciled. Keep them separately named so the gap is visible.
    #[serde(default = "default_display_grace_minutes")]
    pub display_grace_minutes: i64,

    /// Minutes past kickoff a submission is still accepted
    #[serde(default = "default_commit_grace_minutes")]
    pub commit_grace_minutes: i64,

    /// How many duplicate deletion candidates one cleanup run processes
    #[serde(default = "default_cleanup_batch_size")]
    pub cleanup_batch_size: usize,

    /// Salt for PIN derivation
    #[serde(default = "default_pin_salt")]
    pub pin_salt: String,
}

fn default_season() -> u32 {
    2026
}

fn default_magic_round() -> u32 {
    9
}

fn default_max_tips_per_team() -> u32 {
    3
}

fn default_max_home_away_tips() -> u32 {
    13
}

fn default_display_grace_minutes() -> i64 {
    5
}

fn default_commit_grace_minutes() -> i64 {
    10
}

fn default_cleanup_batch_size() -> usize {
    1
}

fn default_pin_salt() -> String {
    "TIP_TRACKER_PIN".to_string()
}

impl Default for SeasonConfig {
    fn default() -> Self {
        Self {
            season: default_season(),
            magic_round: default_magic_round(),
            max_tips_per_team: default_max_tips_per_team(),
            max_home_away_tips: default_max_home_away_tips(),
            display_grace_minutes: default_display_grace_minutes(),
            commit_grace_minutes: default_commit_grace_minutes(),
            cleanup_batch_size: default_cleanup_batch_size(),
            pin_salt: default_pin_salt(),
        }
    }
}

/// Server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_cors_origin")]
    pub cors_origin: String,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_cors_origin() -> String {
    "*".to_string()
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origin: default_cors_origin(),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    #[serde(default)]
    pub season: SeasonConfig,

    #[serde(default)]
    pub server: ServerConfig,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("./data")
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
            season: SeasonConfig::default(),
            server: ServerConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &PathBuf) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: AppConfig = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.season.season == 0 {
            return Err(ConfigError::ValidationError(
                "Season year must be set".to_string(),
            ));
        }

        if self.season.max_tips_per_team == 0 {
            return Err(ConfigError::ValidationError(
                "Per-team tip cap must be greater than 0".to_string(),
            ));
        }

        if self.season.display_grace_minutes < 0 || self.season.commit_grace_minutes < 0 {
            return Err(ConfigError::ValidationError(
                "Grace periods cannot be negative".to_string(),
            ));
        }

        if self.season.cleanup_batch_size == 0 {
            return Err(ConfigError::ValidationError(
                "Cleanup batch size must be greater than 0".to_string(),
            ));
        }

        if self.server.port == 0 {
            return Err(ConfigError::ValidationError(
                "Server port must be greater than 0".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();

        assert_eq!(config.data_dir, PathBuf::from("./data"));
        assert_eq!(config.log_level, "info");
        assert_eq!(config.season.season, 2026);
        assert_eq!(config.server.port, 8080);
    }

    #[test]
    fn test_season_defaults_match_competition_rules() {
        let season = SeasonConfig::default();

        assert_eq!(season.magic_round, 9);
        assert_eq!(season.max_tips_per_team, 3);
        assert_eq!(season.max_home_away_tips, 13);
        assert_eq!(season.cleanup_batch_size, 1);
    }

    #[test]
    fn test_grace_periods_are_intentionally_different() {
        // The menu shows selections for 5 minutes past kickoff but the
        // validator accepts them for 10. Inherited inconsistency, kept
        // visible as two named values until stakeholders reconcile it.
        // If this assertion starts failing, someone unified them: update
        // this test and the docs together.
        let season = SeasonConfig::default();

        assert_eq!(season.display_grace_minutes, 5);
        assert_eq!(season.commit_grace_minutes, 10);
        assert_ne!(season.display_grace_minutes, season.commit_grace_minutes);
    }

    #[test]
    fn test_config_validation_ok() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_config_validation_bad_cap() {
        let mut config = AppConfig::default();
        config.season.max_tips_per_team = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_batch_size() {
        let mut config = AppConfig::default();
        config.season.cleanup_batch_size = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_bad_port() {
        let mut config = AppConfig::default();
        config.server.port = 0;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_validation_negative_grace() {
        let mut config = AppConfig::default();
        config.season.display_grace_minutes = -1;

        assert!(config.validate().is_err());
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();

        let parsed: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(config.season.season, parsed.season.season);
    }

    #[test]
    fn test_partial_toml_uses_defaults() {
        let parsed: AppConfig = toml::from_str(
            r#"
            [season]
            season = 2027
            "#,
        )
        .unwrap();

        assert_eq!(parsed.season.season, 2027);
        assert_eq!(parsed.season.magic_round, 9);
        assert_eq!(parsed.server.port, 8080);
    }
}
