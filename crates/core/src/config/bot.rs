//! Configuration management with profile support.
//!
//! Provides the subgraph endpoint, query filter and run limits with
//! support for named profiles (default, testing) and TOML files.

use std::time::Duration;

use anyhow::{ensure, Context};
use liquidator_api::{AccountFilter, TRADER_JOE_LENDING_GRAPH_URL};
use serde::{Deserialize, Serialize};

/// Environment variable naming a TOML config file.
pub const CONFIG_PATH_ENV: &str = "LIQUIDATOR_CONFIG";
/// Environment variable selecting a built-in profile.
pub const PROFILE_ENV: &str = "BOT_PROFILE";
/// Environment variable overriding the subgraph URL.
pub const SUBGRAPH_URL_ENV: &str = "SUBGRAPH_URL";

/// Main configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Profile name (for logging/identification)
    #[serde(default = "default_profile_name")]
    pub profile: String,

    /// Subgraph endpoint
    #[serde(default)]
    pub subgraph: SubgraphConfig,

    /// Underwater-account filter
    #[serde(default)]
    pub query: QueryConfig,

    /// Processing limits
    #[serde(default)]
    pub run: RunConfig,
}

fn default_profile_name() -> String {
    "default".to_string()
}

/// Subgraph endpoint settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubgraphConfig {
    /// Endpoint URL, `${VAR}` placeholders are expanded from the environment
    #[serde(default = "default_subgraph_url")]
    pub url: String,

    /// Per-request timeout in seconds (0 = none)
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_subgraph_url() -> String {
    TRADER_JOE_LENDING_GRAPH_URL.to_string()
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for SubgraphConfig {
    fn default() -> Self {
        Self {
            url: default_subgraph_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl SubgraphConfig {
    pub fn request_timeout(&self) -> Option<Duration> {
        (self.request_timeout_secs > 0).then(|| Duration::from_secs(self.request_timeout_secs))
    }
}

/// Account filter thresholds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryConfig {
    /// Exclusive lower bound on health
    #[serde(default)]
    pub health_gt: f64,

    /// Exclusive upper bound on health
    #[serde(default = "default_health_lt")]
    pub health_lt: f64,

    /// Exclusive lower bound on total borrow value (USD)
    #[serde(default)]
    pub min_total_borrow_usd: f64,

    /// Maximum accounts requested from the subgraph
    #[serde(default)]
    pub first: Option<u32>,
}

fn default_health_lt() -> f64 {
    1.0
}

impl Default for QueryConfig {
    fn default() -> Self {
        Self {
            health_gt: 0.0,
            health_lt: default_health_lt(),
            min_total_borrow_usd: 0.0,
            first: None,
        }
    }
}

impl QueryConfig {
    /// Subgraph filter for these thresholds.
    pub fn filter(&self) -> AccountFilter {
        AccountFilter {
            health_gt: self.health_gt,
            health_lt: self.health_lt,
            total_borrow_value_in_usd_gt: self.min_total_borrow_usd,
            first: self.first,
        }
    }
}

/// Processing limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunConfig {
    /// Number of returned accounts to plan, in response order
    #[serde(default = "default_account_limit")]
    pub account_limit: usize,
}

fn default_account_limit() -> usize {
    1
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            account_limit: default_account_limit(),
        }
    }
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            profile: default_profile_name(),
            subgraph: SubgraphConfig::default(),
            query: QueryConfig::default(),
            run: RunConfig::default(),
        }
    }
}

impl BotConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Create a testing profile that plans every returned account.
    pub fn testing() -> Self {
        Self {
            profile: "testing".to_string(),
            subgraph: SubgraphConfig {
                request_timeout_secs: 10,
                ..Default::default()
            },
            query: QueryConfig {
                first: Some(25),
                ..Default::default()
            },
            run: RunConfig { account_limit: 25 },
        }
    }

    /// Built-in profile by name.
    /// Supported values: default, traderjoe, testing
    pub fn from_profile(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "testing" | "test" => Self::testing(),
            _ => Self::default(),
        }
    }

    /// Load from `LIQUIDATOR_CONFIG` or `BOT_PROFILE`, then apply `SUBGRAPH_URL`.
    pub fn from_env() -> anyhow::Result<Self> {
        let mut config = match std::env::var(CONFIG_PATH_ENV) {
            Ok(path) => Self::from_file(&path)
                .with_context(|| format!("Failed to load config from {}", path))?,
            Err(_) => {
                let profile =
                    std::env::var(PROFILE_ENV).unwrap_or_else(|_| "default".to_string());
                Self::from_profile(&profile)
            }
        };

        if let Ok(url) = std::env::var(SUBGRAPH_URL_ENV) {
            config.subgraph.url = url;
        }
        config.expand_env_vars();
        config.validate()?;

        Ok(config)
    }

    /// Expand environment variables in config values.
    pub fn expand_env_vars(&mut self) {
        self.subgraph.url = expand_env(&self.subgraph.url);
    }

    /// Reject settings that cannot produce a query.
    pub fn validate(&self) -> anyhow::Result<()> {
        ensure!(!self.subgraph.url.trim().is_empty(), "subgraph url is empty");
        ensure!(
            self.query.health_gt < self.query.health_lt,
            "health_gt ({}) must be below health_lt ({})",
            self.query.health_gt,
            self.query.health_lt
        );
        ensure!(self.run.account_limit > 0, "account_limit must be at least 1");
        Ok(())
    }

    /// Log the current configuration.
    pub fn log_config(&self) {
        tracing::info!(profile = %self.profile, "Bot configuration loaded");
        tracing::info!(
            url = %self.subgraph.url,
            timeout_secs = self.subgraph.request_timeout_secs,
            "Subgraph endpoint"
        );
        tracing::info!(
            health_gt = self.query.health_gt,
            health_lt = self.query.health_lt,
            min_total_borrow_usd = self.query.min_total_borrow_usd,
            first = ?self.query.first,
            account_limit = self.run.account_limit,
            "Account filter"
        );
    }
}

/// Expand ${VAR_NAME} patterns with environment variable values.
fn expand_env(s: &str) -> String {
    let mut result = s.to_string();
    let re = regex_lite::Regex::new(r"\$\{([^}]+)\}").expect("static pattern");

    for cap in re.captures_iter(s) {
        if let (Some(full_match), Some(var_match)) = (cap.get(0), cap.get(1)) {
            if let Ok(value) = std::env::var(var_match.as_str()) {
                result = result.replace(full_match.as_str(), &value);
            }
        }
    }

    result
}
