use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;
use crate::models::{BlendWeights, ContentWeights, ScoringWeights};

/// Application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub artifact: ArtifactSettings,
    #[serde(default)]
    pub recommendation: RecommendationSettings,
    #[serde(default)]
    pub scoring: ScoringSettings,
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

fn default_host() -> String { "127.0.0.1".to_string() }
fn default_port() -> u16 { 8080 }

#[derive(Debug, Clone, Deserialize)]
pub struct ArtifactSettings {
    #[serde(default = "default_artifact_path")]
    pub path: String,
}

impl Default for ArtifactSettings {
    fn default() -> Self {
        Self { path: default_artifact_path() }
    }
}

fn default_artifact_path() -> String { "data/model.json".to_string() }

#[derive(Debug, Clone, Deserialize)]
pub struct RecommendationSettings {
    #[serde(default = "default_limit")]
    pub default_limit: usize,
    #[serde(default = "default_max_limit")]
    pub max_limit: usize,
}

impl Default for RecommendationSettings {
    fn default() -> Self {
        Self {
            default_limit: default_limit(),
            max_limit: default_max_limit(),
        }
    }
}

fn default_limit() -> usize { 10 }
fn default_max_limit() -> usize { 50 }

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScoringSettings {
    #[serde(default)]
    pub content: ContentWeightsConfig,
    #[serde(default)]
    pub blend: BlendWeightsConfig,
}

impl ScoringSettings {
    pub fn weights(&self) -> ScoringWeights {
        ScoringWeights {
            content: ContentWeights {
                skills: self.content.skills,
                location: self.content.location,
                gender: self.content.gender,
                rating: self.content.rating,
            },
            blend: BlendWeights {
                content: self.blend.content,
                collaborative: self.blend.collaborative,
                collaborative_scale: self.blend.collaborative_scale,
                overfetch: self.blend.overfetch,
            },
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ContentWeightsConfig {
    #[serde(default = "default_skills_weight")]
    pub skills: f64,
    #[serde(default = "default_location_weight")]
    pub location: f64,
    #[serde(default = "default_gender_weight")]
    pub gender: f64,
    #[serde(default = "default_rating_weight")]
    pub rating: f64,
}

impl Default for ContentWeightsConfig {
    fn default() -> Self {
        Self {
            skills: default_skills_weight(),
            location: default_location_weight(),
            gender: default_gender_weight(),
            rating: default_rating_weight(),
        }
    }
}

fn default_skills_weight() -> f64 { 0.6 }
fn default_location_weight() -> f64 { 0.2 }
fn default_gender_weight() -> f64 { 0.1 }
fn default_rating_weight() -> f64 { 0.1 }

#[derive(Debug, Clone, Deserialize)]
pub struct BlendWeightsConfig {
    #[serde(default = "default_content_blend")]
    pub content: f64,
    #[serde(default = "default_collaborative_blend")]
    pub collaborative: f64,
    #[serde(default = "default_collaborative_scale")]
    pub collaborative_scale: f64,
    #[serde(default = "default_overfetch")]
    pub overfetch: usize,
}

impl Default for BlendWeightsConfig {
    fn default() -> Self {
        Self {
            content: default_content_blend(),
            collaborative: default_collaborative_blend(),
            collaborative_scale: default_collaborative_scale(),
            overfetch: default_overfetch(),
        }
    }
}

fn default_content_blend() -> f64 { 0.6 }
fn default_collaborative_blend() -> f64 { 0.4 }
fn default_collaborative_scale() -> f64 { 20.0 }
fn default_overfetch() -> usize { 2 }

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
    /// 4. Environment variables (prefixed with AUPAIR__)
    pub fn load() -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., AUPAIR__ARTIFACT__PATH -> artifact.path
            .add_source(environment())
            .build()?
            .try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(environment())
            .build()?
            .try_deserialize()
    }
}

fn environment() -> Environment {
    Environment::with_prefix("AUPAIR")
        .prefix_separator("__")
        .separator("__")
        .try_parsing(true)
}
