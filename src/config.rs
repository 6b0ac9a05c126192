use serde::Deserialize;

use crate::models::ConnectivityState;
use crate::reports::ReportSettings;
use crate::reports::rollup::DEFAULT_RANKING_SIZE;

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    #[serde(default)]
    pub reports: ReportsConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub port: u16,
    pub host: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    pub path: String,
    pub max_pool_size: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReportsConfig {
    /// State assumed for a report window with no connectivity samples at all.
    #[serde(default = "default_state")]
    pub default_state: ConnectivityState,
    /// Days listed in busiestDays / quietestDays.
    #[serde(default = "default_ranking_size")]
    pub ranking_size: usize,
}

impl Default for ReportsConfig {
    fn default() -> Self {
        Self {
            default_state: default_state(),
            ranking_size: default_ranking_size(),
        }
    }
}

fn default_state() -> ConnectivityState {
    ConnectivityState::Disconnected
}

fn default_ranking_size() -> usize {
    DEFAULT_RANKING_SIZE
}

impl ReportsConfig {
    pub fn settings(&self) -> ReportSettings {
        ReportSettings {
            default_state: self.default_state,
            ranking_size: self.ranking_size,
        }
    }
}

impl AppConfig {
    pub fn load() -> anyhow::Result<Self> {
        let path = std::env::var("CONFIG_FILE").unwrap_or_else(|_| "config.toml".into());
        let s = std::fs::read_to_string(&path)?;
        Self::load_from_str(&s)
    }

    /// Parse and validate config from a string (e.g. for tests).
    pub fn load_from_str(s: &str) -> anyhow::Result<Self> {
        let config: AppConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        anyhow::ensure!(
            self.server.port > 0,
            "server.port must be between 1 and 65535, got {}",
            self.server.port
        );
        anyhow::ensure!(
            !self.database.path.is_empty(),
            "database.path must be non-empty"
        );
        anyhow::ensure!(
            self.database.max_pool_size > 0,
            "database.max_pool_size must be > 0, got {}",
            self.database.max_pool_size
        );
        anyhow::ensure!(
            self.reports.ranking_size > 0,
            "reports.ranking_size must be > 0, got {}",
            self.reports.ranking_size
        );
        Ok(())
    }
}
