//! Load — config loading from file and environment variables.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use super::model::{DispatchConfig, EngineConfig};

impl EngineConfig {
    /// Load configuration from file or environment variables
    /// Priority: Environment Variables > Config File > Defaults
    pub fn load() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = std::env::var("ENGINE_CONFIG_FILE")
            .unwrap_or_else(|_| "/etc/gamewatch/engine.toml".to_string());

        let mut config = if Path::new(&config_path).exists() {
            tracing::info!("Loading configuration from: {}", config_path);
            Self::from_file(&config_path)?
        } else {
            tracing::info!(
                "Config file not found at {}, using environment variables",
                config_path
            );
            Self::from_env()
        };

        // Environment variables override file config for critical settings
        if let Some(interval) = env_u64("ENGINE_POLL_INTERVAL") {
            config.poll_interval_secs = interval;
        }
        if let Some(timeout) = env_u64("ENGINE_FETCH_TIMEOUT") {
            config.fetch_timeout_secs = timeout;
        }

        Ok(config)
    }

    /// Load configuration from TOML file
    pub fn from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut file = File::open(path)?;
        let mut contents = String::new();
        file.read_to_string(&mut contents)?;

        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from environment variables with sensible defaults
    pub fn from_env() -> Self {
        let defaults = EngineConfig::default();
        Self {
            poll_interval_secs: env_u64("ENGINE_POLL_INTERVAL")
                .unwrap_or(defaults.poll_interval_secs),
            initial_delay_secs: env_u64("ENGINE_INITIAL_DELAY")
                .unwrap_or(defaults.initial_delay_secs),
            fetch_timeout_secs: env_u64("ENGINE_FETCH_TIMEOUT")
                .unwrap_or(defaults.fetch_timeout_secs),
            sources: Vec::new(),
            dispatch: DispatchConfig {
                summary_threshold: env_usize("ENGINE_SUMMARY_THRESHOLD")
                    .unwrap_or(defaults.dispatch.summary_threshold),
                summary_display_cap: env_usize("ENGINE_SUMMARY_DISPLAY_CAP")
                    .unwrap_or(defaults.dispatch.summary_display_cap),
            },
        }
    }
}

fn env_u64(name: &str) -> Option<u64> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}

fn env_usize(name: &str) -> Option<usize> {
    std::env::var(name).ok().and_then(|s| s.parse().ok())
}
