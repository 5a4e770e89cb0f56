use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Seconds between poll cycles for every registered source.
    pub poll_interval_secs: u64,
    /// Cold-start stagger before the first tick, so this job does not
    /// burst together with other scheduled jobs in the host process.
    pub initial_delay_secs: u64,
    /// Upper bound on a single remote fetch; a timeout is treated as a
    /// transient failure and retried on the next cycle.
    pub fetch_timeout_secs: u64,
    /// Sources registered at boot. The registry collaborator may add and
    /// remove more at runtime.
    pub sources: Vec<SourceConfig>,
    pub dispatch: DispatchConfig,
}

/// One log source known at boot time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Stable source key (e.g. the server name).
    pub key: String,
    /// Remote path of the log file.
    pub path: String,
}

/// Join/leave summarization knobs.
///
/// Named configuration values rather than embedded literals, so behavior
/// stays reproducible and test-overridable.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DispatchConfig {
    /// More than this many distinct joins (or leaves) in one cycle
    /// triggers a single summary notification.
    pub summary_threshold: usize,
    /// At most this many player names are listed in a summary; the rest
    /// collapse into an "and N more" overflow count.
    pub summary_display_cap: usize,
}

impl EngineConfig {
    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), String> {
        if self.poll_interval_secs == 0 {
            return Err("poll_interval_secs must be > 0".to_string());
        }
        if self.fetch_timeout_secs == 0 {
            return Err("fetch_timeout_secs must be > 0".to_string());
        }
        for source in &self.sources {
            if source.key.is_empty() {
                return Err("source key must not be empty".to_string());
            }
            if source.path.is_empty() {
                return Err(format!("source {} has an empty path", source.key));
            }
        }
        self.dispatch.validate()
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: 60,
            initial_delay_secs: 5,
            fetch_timeout_secs: 10,
            sources: Vec::new(),
            dispatch: DispatchConfig::default(),
        }
    }
}

impl DispatchConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.summary_display_cap == 0 {
            return Err("summary_display_cap must be > 0".to_string());
        }
        Ok(())
    }
}

impl Default for DispatchConfig {
    fn default() -> Self {
        Self {
            summary_threshold: 3,
            summary_display_cap: 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // ── EngineConfig validation ─────────────────────────────────

    #[test]
    fn test_defaults_are_valid() {
        assert!(EngineConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_zero_poll_interval() {
        let mut config = EngineConfig::default();
        config.poll_interval_secs = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("poll_interval"));
    }

    #[test]
    fn test_validate_zero_fetch_timeout() {
        let mut config = EngineConfig::default();
        config.fetch_timeout_secs = 0;
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("fetch_timeout"));
    }

    #[test]
    fn test_validate_empty_source_key() {
        let mut config = EngineConfig::default();
        config.sources.push(SourceConfig {
            key: String::new(),
            path: "/logs/server.log".to_string(),
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_source_path() {
        let mut config = EngineConfig::default();
        config.sources.push(SourceConfig {
            key: "emerald-eu".to_string(),
            path: String::new(),
        });
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().contains("emerald-eu"));
    }

    // ── DispatchConfig validation ───────────────────────────────

    #[test]
    fn test_validate_zero_display_cap() {
        let config = DispatchConfig {
            summary_display_cap: 0,
            ..DispatchConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_dispatch_defaults() {
        let config = DispatchConfig::default();
        assert_eq!(config.summary_threshold, 3);
        assert_eq!(config.summary_display_cap, 10);
    }

    // ── Default values ──────────────────────────────────────────

    #[test]
    fn test_engine_config_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.poll_interval_secs, 60);
        assert_eq!(config.initial_delay_secs, 5);
        assert_eq!(config.fetch_timeout_secs, 10);
        assert!(config.sources.is_empty());
    }
}
