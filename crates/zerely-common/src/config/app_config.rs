//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when
//! present). Every setting has a default; malformed values are rejected.

use serde::Deserialize;
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Main application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct AppConfig {
    pub app: AppSettings,
    pub rewards: RewardConfig,
    pub feed: FeedConfig,
    pub reactions: ReactionConfig,
    pub expiry: ExpiryConfig,
    pub snowflake: SnowflakeConfig,
}

/// General application settings
#[derive(Debug, Clone, Deserialize)]
pub struct AppSettings {
    #[serde(default = "default_app_name")]
    pub name: String,
    #[serde(default)]
    pub env: Environment,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            name: default_app_name(),
            env: Environment::default(),
        }
    }
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    #[must_use]
    pub fn is_development(&self) -> bool {
        matches!(self, Self::Development)
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" | "dev" => Ok(Self::Development),
            "staging" => Ok(Self::Staging),
            "production" | "prod" => Ok(Self::Production),
            other => Err(format!("unknown environment '{other}'")),
        }
    }
}

/// Token rewards
#[derive(Debug, Clone, Deserialize)]
pub struct RewardConfig {
    /// Tokens credited to the author when a post is created
    #[serde(default = "default_post_reward")]
    pub post_reward: u64,
    /// Most reaction tokens one post can earn its author; 0 disables them
    #[serde(default = "default_reaction_reward_cap")]
    pub reaction_reward_cap: u32,
}

impl Default for RewardConfig {
    fn default() -> Self {
        Self {
            post_reward: default_post_reward(),
            reaction_reward_cap: default_reaction_reward_cap(),
        }
    }
}

/// Feed paging and post limits
#[derive(Debug, Clone, Deserialize)]
pub struct FeedConfig {
    #[serde(default = "default_page_size")]
    pub page_size: u32,
    #[serde(default = "default_max_auto_delete_hours")]
    pub max_auto_delete_hours: u32,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            max_auto_delete_hours: default_max_auto_delete_hours(),
        }
    }
}

/// Reaction write settings
#[derive(Debug, Clone, Deserialize)]
pub struct ReactionConfig {
    /// Attempts at the conditional write before a conflict is surfaced
    #[serde(default = "default_max_write_attempts")]
    pub max_write_attempts: u32,
}

impl Default for ReactionConfig {
    fn default() -> Self {
        Self {
            max_write_attempts: default_max_write_attempts(),
        }
    }
}

/// Auto-delete sweeper
#[derive(Debug, Clone, Deserialize)]
pub struct ExpiryConfig {
    #[serde(default = "default_sweep_interval_secs")]
    pub sweep_interval_secs: u64,
}

impl ExpiryConfig {
    #[must_use]
    pub fn sweep_interval(&self) -> Duration {
        Duration::from_secs(self.sweep_interval_secs.max(1))
    }
}

impl Default for ExpiryConfig {
    fn default() -> Self {
        Self {
            sweep_interval_secs: default_sweep_interval_secs(),
        }
    }
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct SnowflakeConfig {
    #[serde(default)]
    pub worker_id: u16,
}

// Default value functions
fn default_app_name() -> String {
    "zerely".to_string()
}

fn default_post_reward() -> u64 {
    5
}

fn default_reaction_reward_cap() -> u32 {
    10
}

fn default_page_size() -> u32 {
    10
}

fn default_max_auto_delete_hours() -> u32 {
    168 // one week
}

fn default_max_write_attempts() -> u32 {
    5
}

fn default_sweep_interval_secs() -> u64 {
    60
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if a variable is set to a value that does not parse
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&'static str) -> Option<String>,
    {
        let worker_id = parse_var(&lookup, "WORKER_ID", 0u16)?;
        if worker_id >= 1024 {
            return Err(ConfigError::InvalidValue(
                "WORKER_ID",
                format!("{worker_id} (must be < 1024)"),
            ));
        }

        let page_size = parse_var(&lookup, "FEED_PAGE_SIZE", default_page_size())?;
        if page_size == 0 {
            return Err(ConfigError::InvalidValue("FEED_PAGE_SIZE", "0".to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: lookup("APP_NAME").unwrap_or_else(default_app_name),
                env: parse_var(&lookup, "APP_ENV", Environment::default())?,
            },
            rewards: RewardConfig {
                post_reward: parse_var(&lookup, "POST_REWARD_TOKENS", default_post_reward())?,
                reaction_reward_cap: parse_var(
                    &lookup,
                    "REACTION_REWARD_CAP",
                    default_reaction_reward_cap(),
                )?,
            },
            feed: FeedConfig {
                page_size,
                max_auto_delete_hours: parse_var(
                    &lookup,
                    "AUTO_DELETE_MAX_HOURS",
                    default_max_auto_delete_hours(),
                )?,
            },
            reactions: ReactionConfig {
                max_write_attempts: parse_var(
                    &lookup,
                    "REACTION_MAX_WRITE_ATTEMPTS",
                    default_max_write_attempts(),
                )?
                .max(1),
            },
            expiry: ExpiryConfig {
                sweep_interval_secs: parse_var(
                    &lookup,
                    "EXPIRY_SWEEP_INTERVAL_SECS",
                    default_sweep_interval_secs(),
                )?,
            },
            snowflake: SnowflakeConfig { worker_id },
        })
    }
}

fn parse_var<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&'static str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::InvalidValue(key, raw)),
        _ => Ok(default),
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
