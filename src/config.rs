use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::ScoringBaseline;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
    #[serde(default)]
    pub verification: VerificationSettings,
    #[serde(default)]
    pub seed: SeedSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

fn default_host() -> String { "0.0.0.0".to_string() }
fn default_port() -> u16 { 5001 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MatchingSettings {
    pub default_limit: Option<u16>,
    pub max_limit: Option<u16>,
    #[serde(default)]
    pub baseline: BaselineConfig,
}

impl MatchingSettings {
    /// Clamp a requested limit to the configured bounds
    pub fn effective_limit(&self, requested: Option<u16>) -> usize {
        let max = self.max_limit.unwrap_or(500);
        requested
            .unwrap_or_else(|| self.default_limit.unwrap_or(100))
            .min(max) as usize
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct BaselineConfig {
    #[serde(default = "default_neutral_habits")]
    pub neutral_habits: u8,
    #[serde(default = "default_budget_score")]
    pub budget: u8,
    #[serde(default = "default_location_score")]
    pub location: u8,
    #[serde(default = "default_lifestyle_score")]
    pub lifestyle: u8,
}

impl Default for BaselineConfig {
    fn default() -> Self {
        Self {
            neutral_habits: default_neutral_habits(),
            budget: default_budget_score(),
            location: default_location_score(),
            lifestyle: default_lifestyle_score(),
        }
    }
}

impl From<&BaselineConfig> for ScoringBaseline {
    fn from(config: &BaselineConfig) -> Self {
        Self {
            neutral_habits: config.neutral_habits.min(100),
            budget: config.budget.min(100),
            location: config.location.min(100),
            lifestyle: config.lifestyle.min(100),
        }
    }
}

fn default_neutral_habits() -> u8 { 50 }
fn default_budget_score() -> u8 { 85 }
fn default_location_score() -> u8 { 75 }
fn default_lifestyle_score() -> u8 { 90 }

#[derive(Debug, Clone, Deserialize)]
pub struct VerificationSettings {
    #[serde(default = "default_otp_ttl_secs")]
    pub otp_ttl_secs: u64,
    #[serde(default = "default_max_sessions")]
    pub max_sessions: u64,
}

impl Default for VerificationSettings {
    fn default() -> Self {
        Self {
            otp_ttl_secs: default_otp_ttl_secs(),
            max_sessions: default_max_sessions(),
        }
    }
}

fn default_otp_ttl_secs() -> u64 { 300 }
fn default_max_sessions() -> u64 { 10_000 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SeedSettings {
    /// JSON array of profiles loaded into an empty store at startup
    pub data_file: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_log_level() -> String { "info".to_string() }
fn default_log_format() -> String { "json".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with FLATMATE__)
    /// 5. `PORT`, when set
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., FLATMATE__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("FLATMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        apply_port_override(settings)?.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("FLATMATE")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    pub fn scoring_baseline(&self) -> ScoringBaseline {
        ScoringBaseline::from(&self.matching.baseline)
    }
}

/// Hosting platforms hand the listen port over as a bare `PORT` variable
fn apply_port_override(settings: Config) -> Result<Config, ConfigError> {
    match std::env::var("PORT").ok().and_then(|p| p.parse::<u16>().ok()) {
        Some(port) => Config::builder()
            .add_source(settings)
            .set_override("server.port", i64::from(port))?
            .build(),
        None => Ok(settings),
    }
}
