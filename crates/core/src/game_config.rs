//! Static gameplay configuration: level table, discount rules, sheet music.
//!
//! Built once at start-up and shared behind an `Arc`. Everything here is
//! read-only after [`GameConfig::from_file`] / [`GameConfig::from_json`]
//! returns, so handlers never need to lock it.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Default multiplier for the friend capacity budget.
pub const DEFAULT_FRIEND_CAPACITY_MULTIPLIER: i64 = 3;

/// Default unlock level granted to freshly created accounts.
pub const DEFAULT_INITIAL_UNLOCK_LEVEL: i32 = 5;

/// One playable level.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelSpec {
    pub level: i32,
    /// Tempo in beats per minute.
    pub speed: i32,
    /// Number of notes the player has to hit.
    pub notes: i32,
}

/// A quota-limited coupon granted on reaching `pass_level`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscountRule {
    pub id: String,
    pub pass_level: i32,
    pub amount: i32,
    pub max_qty: i64,
    #[serde(default)]
    pub description: String,
}

fn default_multiplier() -> i64 {
    DEFAULT_FRIEND_CAPACITY_MULTIPLIER
}

fn default_initial_unlock() -> i32 {
    DEFAULT_INITIAL_UNLOCK_LEVEL
}

/// Immutable gameplay configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub levels: Vec<LevelSpec>,
    #[serde(default)]
    pub discount_rules: Vec<DiscountRule>,
    #[serde(default)]
    pub sheet_music: Vec<String>,
    #[serde(default = "default_multiplier")]
    pub friend_capacity_multiplier: i64,
    #[serde(default = "default_initial_unlock")]
    pub initial_unlock_level: i32,
}

/// Failures while loading or validating a [`GameConfig`].
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read game config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed game config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid game config: {0}")]
    Invalid(String),
}

impl GameConfig {
    /// Read and validate a JSON configuration file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Self::from_json(&raw)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Replace the capacity multiplier, e.g. from an environment override.
    pub fn with_friend_capacity_multiplier(mut self, multiplier: i64) -> Result<Self, ConfigError> {
        if multiplier < 1 {
            return Err(ConfigError::Invalid(format!(
                "friend_capacity_multiplier must be positive, got {multiplier}"
            )));
        }
        self.friend_capacity_multiplier = multiplier;
        Ok(self)
    }

    /// Check structural invariants. Called by the constructors.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut seen_levels = HashSet::new();
        for level in &self.levels {
            if level.level < 1 {
                return Err(ConfigError::Invalid(format!(
                    "level numbers start at 1, got {}",
                    level.level
                )));
            }
            if level.speed <= 0 {
                return Err(ConfigError::Invalid(format!(
                    "level {} has non-positive speed {}",
                    level.level, level.speed
                )));
            }
            if level.notes < 0 {
                return Err(ConfigError::Invalid(format!(
                    "level {} has negative note count",
                    level.level
                )));
            }
            if !seen_levels.insert(level.level) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate level {}",
                    level.level
                )));
            }
        }

        let mut seen_rules = HashSet::new();
        for rule in &self.discount_rules {
            if rule.id.trim().is_empty() {
                return Err(ConfigError::Invalid("discount rule id is empty".into()));
            }
            if rule.max_qty < 1 {
                return Err(ConfigError::Invalid(format!(
                    "discount rule {} has non-positive max_qty",
                    rule.id
                )));
            }
            if !seen_rules.insert(rule.id.as_str()) {
                return Err(ConfigError::Invalid(format!(
                    "duplicate discount rule {}",
                    rule.id
                )));
            }
        }

        if self.friend_capacity_multiplier < 1 {
            return Err(ConfigError::Invalid(
                "friend_capacity_multiplier must be positive".into(),
            ));
        }
        if self.initial_unlock_level < 1 {
            return Err(ConfigError::Invalid(
                "initial_unlock_level must be at least 1".into(),
            ));
        }
        Ok(())
    }

    /// Look up the level record for `level`.
    pub fn level(&self, level: i32) -> Option<&LevelSpec> {
        self.levels.iter().find(|l| l.level == level)
    }

    /// The first `notes` entries of the sheet music, or `None` when the sheet
    /// is too short for the level.
    pub fn sheet_for(&self, level: &LevelSpec) -> Option<&[String]> {
        let notes = usize::try_from(level.notes).ok()?;
        self.sheet_music.get(..notes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "levels": [
            {"level": 1, "speed": 120, "notes": 4},
            {"level": 2, "speed": 60, "notes": 30}
        ],
        "discount_rules": [
            {"id": "level-5", "pass_level": 5, "amount": 50, "max_qty": 1, "description": "Clear level 5"},
            {"id": "level-1", "pass_level": 1, "amount": 10, "max_qty": 100}
        ],
        "sheet_music": ["C4", "D4", "E4", "F4", "G4"]
    }"#;

    #[test]
    fn test_parse_applies_defaults() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.levels.len(), 2);
        assert_eq!(
            config.friend_capacity_multiplier,
            DEFAULT_FRIEND_CAPACITY_MULTIPLIER
        );
        assert_eq!(config.initial_unlock_level, DEFAULT_INITIAL_UNLOCK_LEVEL);
        assert_eq!(config.discount_rules[1].description, "");
    }

    #[test]
    fn test_level_lookup() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        assert_eq!(config.level(2).map(|l| l.notes), Some(30));
        assert!(config.level(3).is_none());
    }

    #[test]
    fn test_sheet_slice() {
        let config = GameConfig::from_json(SAMPLE).unwrap();
        let level1 = config.level(1).unwrap().clone();
        assert_eq!(config.sheet_for(&level1).unwrap(), &["C4", "D4", "E4", "F4"]);

        let level2 = config.level(2).unwrap().clone();
        assert!(config.sheet_for(&level2).is_none());
    }

    #[test]
    fn test_rejects_duplicate_levels() {
        let raw = r#"{"levels": [
            {"level": 1, "speed": 60, "notes": 1},
            {"level": 1, "speed": 60, "notes": 2}
        ]}"#;
        assert!(matches!(
            GameConfig::from_json(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_zero_speed() {
        let raw = r#"{"levels": [{"level": 1, "speed": 0, "notes": 1}]}"#;
        assert!(matches!(
            GameConfig::from_json(raw),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_duplicate_rules_and_zero_quota() {
        let dup = r#"{"levels": [], "discount_rules": [
            {"id": "a", "pass_level": 1, "amount": 1, "max_qty": 1},
            {"id": "a", "pass_level": 2, "amount": 1, "max_qty": 1}
        ]}"#;
        assert!(matches!(
            GameConfig::from_json(dup),
            Err(ConfigError::Invalid(_))
        ));

        let zero = r#"{"levels": [], "discount_rules": [
            {"id": "a", "pass_level": 1, "amount": 1, "max_qty": 0}
        ]}"#;
        assert!(matches!(
            GameConfig::from_json(zero),
            Err(ConfigError::Invalid(_))
        ));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            GameConfig::from_json("{not json"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_multiplier_override() {
        let config = GameConfig::from_json(SAMPLE)
            .unwrap()
            .with_friend_capacity_multiplier(7)
            .unwrap();
        assert_eq!(config.friend_capacity_multiplier, 7);

        let config = GameConfig::from_json(SAMPLE).unwrap();
        assert!(config.with_friend_capacity_multiplier(0).is_err());
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("game.json");
        std::fs::write(&path, SAMPLE).unwrap();
        let config = GameConfig::from_file(&path).unwrap();
        assert_eq!(config.discount_rules.len(), 2);

        let missing = GameConfig::from_file(dir.path().join("nope.json"));
        assert!(matches!(missing, Err(ConfigError::Io { .. })));
    }
}
