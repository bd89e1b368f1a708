//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Environment variables consulted when a key is absent from the file.
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";
pub const OCR_KEY_ENV: &str = "AZURE_FORM_RECOGNIZER_KEY";
pub const OCR_ENDPOINT_ENV: &str = "AZURE_FORM_RECOGNIZER_ENDPOINT";
pub const SERPAPI_KEY_ENV: &str = "SERPAPI_KEY";

/// Provider id that [`OPENAI_API_KEY_ENV`] fills in.
pub const OPENAI_PROVIDER_ID: &str = "openai";

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub ocr: OcrConfig,

    #[serde(default)]
    pub vision: VisionConfig,

    #[serde(default)]
    pub tutorial: TutorialConfig,

    #[serde(default)]
    pub search: SearchConfig,

    #[serde(default)]
    pub fetch: FetchConfig,

    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

impl Config {
    /// Fill unset credentials from the process environment.
    pub fn apply_env_fallbacks(&mut self) {
        self.apply_env_fallbacks_with(|name| std::env::var(name).ok());
    }

    /// Fill unset credentials using `lookup` as the environment.
    ///
    /// Values already present in the file always win. Empty lookups are
    /// ignored.
    pub fn apply_env_fallbacks_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let env = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        fill(&mut self.ocr.api_key, || env(OCR_KEY_ENV));
        fill(&mut self.ocr.endpoint, || env(OCR_ENDPOINT_ENV));
        fill(&mut self.search.api_key, || env(SERPAPI_KEY_ENV));

        if let Some(key) = env(OPENAI_API_KEY_ENV) {
            let openai = self
                .providers
                .entry(OPENAI_PROVIDER_ID.to_string())
                .or_default();
            if openai.api_key.is_none() {
                openai.api_key = Some(key);
            }
        }
    }

    /// Look up a provider section by id.
    pub fn provider(&self, id: &str) -> Option<&ProviderConfig> {
        self.providers.get(id)
    }
}

fn fill<F>(slot: &mut Option<String>, value: F)
where
    F: FnOnce() -> Option<String>,
{
    if slot.is_none() {
        *slot = value();
    }
}

/// HTTP server configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Origins allowed by CORS. `"*"` allows any origin.
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Maximum request body size, screenshots included.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            cors_origins: default_cors_origins(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_cors_origins() -> Vec<String> {
    vec![
        "http://localhost:3000".to_string(),
        "http://localhost:8000".to_string(),
    ]
}

fn default_max_upload_bytes() -> usize {
    20 * 1024 * 1024
}

/// OCR service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_ocr_model")]
    pub model_id: String,

    #[serde(default = "default_ocr_api_version")]
    pub api_version: String,

    /// Delay between status polls of a running analysis.
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    #[serde(default = "default_max_polls")]
    pub max_polls: u32,
}

impl Default for OcrConfig {
    fn default() -> Self {
        Self {
            endpoint: None,
            api_key: None,
            model_id: default_ocr_model(),
            api_version: default_ocr_api_version(),
            poll_interval_ms: default_poll_interval_ms(),
            max_polls: default_max_polls(),
        }
    }
}

fn default_ocr_model() -> String {
    "prebuilt-layout".to_string()
}

fn default_ocr_api_version() -> String {
    "2023-07-31".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

fn default_max_polls() -> u32 {
    60
}

/// Vision fallback configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VisionConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Key into `[providers]`.
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_vision_model")]
    pub model: String,

    #[serde(default = "default_vision_max_tokens")]
    pub max_tokens: u32,

    /// Prompt template; `{element}` is replaced with the element name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prompt: Option<String>,
}

impl Default for VisionConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            provider: default_provider(),
            model: default_vision_model(),
            max_tokens: default_vision_max_tokens(),
            prompt: None,
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_provider() -> String {
    OPENAI_PROVIDER_ID.to_string()
}

fn default_vision_model() -> String {
    "gpt-4o".to_string()
}

fn default_vision_max_tokens() -> u32 {
    200
}

/// Tutorial discovery and extraction configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TutorialConfig {
    #[serde(default = "default_provider")]
    pub provider: String,

    #[serde(default = "default_tutorial_model")]
    pub model: String,

    #[serde(default = "default_ranking_temperature")]
    pub ranking_temperature: f32,

    #[serde(default)]
    pub extraction_temperature: f32,
}

impl Default for TutorialConfig {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_tutorial_model(),
            ranking_temperature: default_ranking_temperature(),
            extraction_temperature: 0.0,
        }
    }
}

fn default_tutorial_model() -> String {
    "gpt-4".to_string()
}

fn default_ranking_temperature() -> f32 {
    0.4
}

/// Web search configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(default = "default_search_url")]
    pub base_url: String,

    #[serde(default = "default_num_results")]
    pub num_results: u32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_search_url(),
            num_results: default_num_results(),
        }
    }
}

fn default_search_url() -> String {
    "https://serpapi.com/search".to_string()
}

fn default_num_results() -> u32 {
    15
}

/// Page fetch configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    #[serde(default = "default_user_agent")]
    pub user_agent: String,

    #[serde(default = "default_fetch_timeout")]
    pub timeout_seconds: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: default_user_agent(),
            timeout_seconds: default_fetch_timeout(),
        }
    }
}

fn default_user_agent() -> String {
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) \
     Chrome/120.0 Safari/537.36"
        .to_string()
}

fn default_fetch_timeout() -> u64 {
    30
}

/// Language-model provider configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProviderConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_model: Option<String>,

    #[serde(default)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
#[path = "schema_tests.rs"]
mod tests;
