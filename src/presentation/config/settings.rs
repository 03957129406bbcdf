use config::{Config, ConfigError, File};
use serde::Deserialize;

use crate::application::services::{AnalysisOptions, ContentBounding, GenerationFailurePolicy};
use crate::application::services::content_chunker::{
    DEFAULT_CHUNK_OVERLAP, DEFAULT_CHUNK_SIZE, DEFAULT_TRUNCATION_LENGTH,
};

use super::Environment;

const API_KEY_FALLBACK_VAR: &str = "OPENAI_API_KEY";

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub server: ServerSettings,
    pub llm: LlmSettings,
    pub analysis: AnalysisSettings,
    pub upload: UploadSettings,
    pub logging: LoggingSettings,
}

impl Settings {
    /// Layers `appsettings.toml`, `appsettings.{environment}.toml` and
    /// `APP__SECTION__KEY` variables, later sources winning.
    pub fn load(environment: Environment) -> Result<Self, ConfigError> {
        let configuration = Config::builder()
            .add_source(File::with_name("appsettings").required(false))
            .add_source(
                File::with_name(&format!("appsettings.{}", environment.file_suffix()))
                    .required(false),
            )
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("__")
                    .separator("__"),
            )
            .build()?;

        let mut settings: Settings = configuration.try_deserialize()?;

        if settings.llm.api_key.is_empty() {
            if let Ok(key) = std::env::var(API_KEY_FALLBACK_VAR) {
                settings.llm.api_key = key;
            }
        }

        Ok(settings)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSettings {
    /// `openai`, `azure` or any OpenAI-compatible server (`lmstudio`, `ollama`).
    pub provider: String,
    pub base_url: Option<String>,
    pub azure_endpoint: Option<String>,
    pub api_key: String,
    pub chat_model: String,
    pub max_tokens: usize,
    pub temperature: f32,
    pub request_timeout_secs: u64,
}

impl Default for LlmSettings {
    fn default() -> Self {
        Self {
            provider: "openai".to_string(),
            base_url: None,
            azure_endpoint: None,
            api_key: String::new(),
            chat_model: "gpt-3.5-turbo-16k".to_string(),
            max_tokens: 4000,
            temperature: 0.3,
            request_timeout_secs: 120,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AnalysisSettings {
    pub bounding: ContentBounding,
    pub max_content_chars: usize,
    pub chunk_size: usize,
    pub chunk_overlap: usize,
    pub failure_policy: GenerationFailurePolicy,
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            bounding: ContentBounding::default(),
            max_content_chars: DEFAULT_TRUNCATION_LENGTH,
            chunk_size: DEFAULT_CHUNK_SIZE,
            chunk_overlap: DEFAULT_CHUNK_OVERLAP,
            failure_policy: GenerationFailurePolicy::default(),
        }
    }
}

impl From<&AnalysisSettings> for AnalysisOptions {
    fn from(settings: &AnalysisSettings) -> Self {
        Self {
            bounding: settings.bounding,
            max_content_chars: settings.max_content_chars,
            chunk_size: settings.chunk_size,
            chunk_overlap: settings.chunk_overlap,
            failure_policy: settings.failure_policy,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct UploadSettings {
    pub max_file_size_mb: usize,
}

impl UploadSettings {
    pub fn max_body_bytes(&self) -> usize {
        self.max_file_size_mb.saturating_mul(1024 * 1024)
    }
}

impl Default for UploadSettings {
    fn default() -> Self {
        Self {
            max_file_size_mb: 25,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub enable_json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            enable_json: false,
        }
    }
}
