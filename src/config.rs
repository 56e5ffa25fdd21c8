use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

use crate::core::{RankingStrategy, RecommenderSettings};
use crate::models::ScoringWeights;
use crate::services::SafetyPolicy;

/// Application configuration
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub completion: CompletionSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub matching: MatchingSettings,
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
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct CompletionSettings {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default)]
    pub api_key: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for CompletionSettings {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

fn default_endpoint() -> String { "https://generativelanguage.googleapis.com/v1beta".to_string() }
fn default_model() -> String { "gemini-1.5-flash-latest".to_string() }
fn default_timeout_secs() -> u64 { 30 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct StoreSettings {
    /// TOML file replacing the built-in catalogue
    pub seed_path: Option<String>,
    #[serde(default)]
    pub simulated_latency_ms: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingSettings {
    #[serde(default = "default_strategy")]
    pub strategy: String,
    #[serde(default = "default_max_recommendations")]
    pub max_recommendations: usize,
    #[serde(default)]
    pub weights: WeightsConfig,
}

impl Default for MatchingSettings {
    fn default() -> Self {
        Self {
            strategy: default_strategy(),
            max_recommendations: default_max_recommendations(),
            weights: WeightsConfig::default(),
        }
    }
}

fn default_strategy() -> String { "completion".to_string() }
fn default_max_recommendations() -> usize { 3 }

impl MatchingSettings {
    /// Parse the configured strategy name
    pub fn ranking_strategy(&self) -> Result<RankingStrategy, ConfigError> {
        match self.strategy.to_lowercase().as_str() {
            "completion" | "llm" => Ok(RankingStrategy::Completion),
            "lexical" => Ok(RankingStrategy::Lexical),
            other => Err(ConfigError::Message(format!(
                "unknown matching strategy {:?} (expected \"completion\" or \"lexical\")",
                other
            ))),
        }
    }

    /// Build engine settings, capping the list length at three
    pub fn recommender_settings(&self) -> Result<RecommenderSettings, ConfigError> {
        Ok(RecommenderSettings {
            strategy: self.ranking_strategy()?,
            max_recommendations: self.max_recommendations.clamp(1, 3),
            weights: ScoringWeights {
                name: self.weights.name,
                expertise: self.weights.expertise,
                summary: self.weights.summary,
            },
            safety: SafetyPolicy::permissive(),
        })
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct WeightsConfig {
    #[serde(default = "default_name_weight")]
    pub name: f64,
    #[serde(default = "default_expertise_weight")]
    pub expertise: f64,
    #[serde(default = "default_summary_weight")]
    pub summary: f64,
}

impl Default for WeightsConfig {
    fn default() -> Self {
        Self {
            name: default_name_weight(),
            expertise: default_expertise_weight(),
            summary: default_summary_weight(),
        }
    }
}

fn default_name_weight() -> f64 { 0.20 }
fn default_expertise_weight() -> f64 { 0.55 }
fn default_summary_weight() -> f64 { 0.25 }

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
fn default_log_format() -> String { "compact".to_string() }

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with WISDOM__)
    /// 5. GEMINI_API_KEY / GOOGLE_API_KEY for the completion key
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., WISDOM__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("WISDOM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_api_key_override(settings)?;
        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("WISDOM")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        let settings = apply_api_key_override(settings)?;
        settings.try_deserialize()
    }
}

/// Take the completion API key from the conventional Google variables
fn apply_api_key_override(settings: Config) -> Result<Config, ConfigError> {
    use std::env;

    let api_key = env::var("GEMINI_API_KEY")
        .or_else(|_| env::var("GOOGLE_API_KEY"))
        .ok();

    match api_key {
        Some(key) => Config::builder()
            .add_source(settings)
            .set_override("completion.api_key", key)?
            .build(),
        None => Ok(settings),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_weights() {
        let weights = WeightsConfig::default();
        assert_eq!(weights.name, 0.20);
        assert_eq!(weights.expertise, 0.55);
        assert_eq!(weights.summary, 0.25);
    }

    #[test]
    fn test_default_logging() {
        let level = default_log_level();
        let format = default_log_format();
        assert_eq!(level, "info");
        assert_eq!(format, "compact");
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let settings: Settings = Config::builder()
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.completion.model, "gemini-1.5-flash-latest");
        assert_eq!(settings.matching.max_recommendations, 3);
        assert!(settings.store.seed_path.is_none());
    }

    #[test]
    fn test_strategy_parsing() {
        let mut matching = MatchingSettings::default();
        assert_eq!(matching.ranking_strategy().unwrap(), RankingStrategy::Completion);

        matching.strategy = "Lexical".to_string();
        assert_eq!(matching.ranking_strategy().unwrap(), RankingStrategy::Lexical);

        matching.strategy = "embedding".to_string();
        assert!(matching.ranking_strategy().is_err());
    }

    #[test]
    fn test_max_recommendations_capped() {
        let matching = MatchingSettings {
            max_recommendations: 10,
            ..MatchingSettings::default()
        };
        assert_eq!(matching.recommender_settings().unwrap().max_recommendations, 3);
    }

    #[test]
    fn test_toml_file_source() {
        let settings: Settings = Config::builder()
            .add_source(config::File::from_str(
                "[store]\nsimulated_latency_ms = 50\n[matching]\nstrategy = \"lexical\"\n",
                config::FileFormat::Toml,
            ))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(settings.store.simulated_latency_ms, 50);
        assert_eq!(settings.matching.strategy, "lexical");
    }
}
