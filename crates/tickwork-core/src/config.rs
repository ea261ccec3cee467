//! Configuration loading and typed config structures for tickwork.
//!
//! The canonical configuration lives in `tickwork-config.yaml` at the
//! workspace root. Every field has a default, so an empty file (or no
//! section at all) yields a runnable engine.

use std::path::Path;

use serde::Deserialize;
use tickwork_actions::inventory::DEFAULT_CAPACITY;
use tickwork_actions::{CraftingConfig, WoodcuttingConfig};
use tracing::warn;

/// Environment variable overriding `world.seed`.
pub const SEED_ENV: &str = "TICKWORK_SEED";

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read the configuration file from disk.
    #[error("failed to read config file: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: std::io::Error,
    },

    /// Failed to parse YAML content.
    #[error("failed to parse config YAML: {source}")]
    Yaml {
        /// The underlying YAML parse error.
        source: serde_yml::Error,
    },
}

impl From<serde_yml::Error> for ConfigError {
    fn from(source: serde_yml::Error) -> Self {
        Self::Yaml { source }
    }
}

/// Top-level engine configuration, mirroring `tickwork-config.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EngineConfig {
    /// World-level settings (name, seed, tick timing).
    #[serde(default)]
    pub world: WorldConfig,

    /// Woodcutting tuning.
    #[serde(default)]
    pub woodcutting: WoodcuttingConfig,

    /// Crafting tuning.
    #[serde(default)]
    pub crafting: CraftingConfig,

    /// Player inventory settings.
    #[serde(default)]
    pub inventory: InventoryConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl EngineConfig {
    /// Load configuration from a YAML file at the given path.
    ///
    /// `TICKWORK_SEED` overrides `world.seed` when set to a valid integer.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Io`] if the file cannot be read, or
    /// [`ConfigError::Yaml`] if the content is not valid YAML.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse configuration from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Yaml`] if the string is not valid YAML.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let mut config: Self = serde_yml::from_str(yaml)?;
        config.world.apply_env_overrides();
        Ok(config)
    }
}

/// World-level configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WorldConfig {
    /// Human-readable world name.
    #[serde(default = "default_world_name")]
    pub name: String,

    /// Seed for the host's random source.
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Real-time milliseconds per tick.
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,

    /// Stop after this many ticks. 0 runs until interrupted.
    #[serde(default = "default_max_ticks")]
    pub max_ticks: u64,
}

impl WorldConfig {
    /// Override the seed from `TICKWORK_SEED` when set.
    pub fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var(SEED_ENV) {
            match val.trim().parse() {
                Ok(seed) => self.seed = seed,
                Err(err) => warn!(value = %val, %err, "ignoring invalid {SEED_ENV}"),
            }
        }
    }
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            name: default_world_name(),
            seed: default_seed(),
            tick_interval_ms: default_tick_interval_ms(),
            max_ticks: default_max_ticks(),
        }
    }
}

/// Player inventory configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct InventoryConfig {
    /// Slots per backpack.
    #[serde(default = "default_capacity")]
    pub capacity: u32,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error), used when `RUST_LOG` is
    /// unset.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Emit JSON lines instead of human-readable output.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            json: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Default value functions for serde
// ---------------------------------------------------------------------------

fn default_world_name() -> String {
    "tickwork".to_owned()
}

const fn default_seed() -> u64 {
    42
}

const fn default_tick_interval_ms() -> u64 {
    600
}

const fn default_max_ticks() -> u64 {
    500
}

const fn default_capacity() -> u32 {
    DEFAULT_CAPACITY
}

fn default_log_level() -> String {
    "info".to_owned()
}

#[cfg(test)]
mod tests {
    use tickwork_actions::FullInventoryPolicy;

    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = EngineConfig::default();
        assert_eq!(config.world.tick_interval_ms, 600);
        assert_eq!(config.woodcutting.base_cut_rate, 25);
        assert_eq!(config.crafting.delay, 2);
        assert_eq!(config.inventory.capacity, 28);
        assert_eq!(config.logging.level, "info");
    }

    #[test]
    fn parse_full_yaml() {
        let yaml = r#"
world:
  name: "Lumbridge"
  seed: 123
  tick_interval_ms: 300
  max_ticks: 50

woodcutting:
  base_cut_rate: 20
  fail_rate:
    min: 2
    max: 4
  nest_chance: 100
  swing_interval: 4
  sound_echo_ticks: 1
  on_inventory_full: interrupt

crafting:
  delay: 3
  on_inventory_full: complete

inventory:
  capacity: 10

logging:
  level: "debug"
  json: true
"#;
        let config = EngineConfig::parse(yaml);
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();

        assert_eq!(config.world.name, "Lumbridge");
        assert_eq!(config.world.max_ticks, 50);
        assert_eq!(config.woodcutting.fail_rate.max, 4);
        assert_eq!(config.woodcutting.nest_chance, 100);
        assert_eq!(config.woodcutting.on_inventory_full, FullInventoryPolicy::Interrupt);
        assert_eq!(config.crafting.on_inventory_full, FullInventoryPolicy::Complete);
        assert_eq!(config.inventory.capacity, 10);
        assert!(config.logging.json);
    }

    #[test]
    fn parse_minimal_yaml() {
        let config = EngineConfig::parse("crafting:\n  delay: 5\n");
        assert!(config.is_ok());
        let config = config.ok().unwrap_or_default();
        assert_eq!(config.crafting.delay, 5);
        assert_eq!(config.woodcutting, WoodcuttingConfig::default());
    }

    #[test]
    fn parse_empty_yaml() {
        assert!(EngineConfig::parse("").is_ok());
    }

    #[test]
    fn invalid_yaml_is_an_error() {
        assert!(matches!(
            EngineConfig::parse("world: [unclosed"),
            Err(ConfigError::Yaml { .. })
        ));
    }

    #[test]
    fn load_project_config_file() {
        let path = Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("..")
            .join("..")
            .join("tickwork-config.yaml");
        if path.exists() {
            let config = EngineConfig::from_file(&path);
            assert!(config.is_ok(), "Failed to load project config: {config:?}");
        }
    }
}
