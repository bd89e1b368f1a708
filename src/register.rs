//! Builds providers and services from configuration.

use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use guidepost_api::AppState;
use guidepost_config::Config;
use guidepost_locate::{StepResolver, VisionFallback};
use guidepost_ocr_azure::{AzureOcrConfig, AzureOcrProvider};
use guidepost_protocols::{LLMProvider, OcrProvider, ProviderError};
use guidepost_provider_openai::OpenAIProvider;
use guidepost_tools_web::{HttpPageFetcher, SerpApiSearch};
use guidepost_tutorial::{TutorialService, TutorialSettings};

/// Build the chat/vision provider registered under `id`.
///
/// Returns `None` when the provider has no API key or the id is unknown.
pub(crate) fn build_llm_provider(config: &Config, id: &str) -> Option<Arc<dyn LLMProvider>> {
    let provider_config = config.provider(id)?;
    let Some(api_key) = provider_config.api_key.clone() else {
        info!("Skipping provider '{}': no API key configured or in environment", id);
        return None;
    };

    match id {
        "openai" => {
            let provider = match provider_config.base_url {
                Some(ref base_url) => OpenAIProvider::with_url(api_key, base_url.clone()),
                None => OpenAIProvider::new(api_key),
            };
            info!("Registered OpenAI provider");
            Some(Arc::new(provider))
        }
        other => {
            warn!("Unknown provider type: '{}', skipping", other);
            None
        }
    }
}

/// Build the OCR provider when both endpoint and key are configured.
pub(crate) fn build_ocr(config: &Config) -> Option<Arc<dyn OcrProvider>> {
    let (Some(endpoint), Some(api_key)) = (&config.ocr.endpoint, &config.ocr.api_key) else {
        warn!("OCR endpoint or key missing, /process_image will be unavailable");
        return None;
    };

    let mut ocr_config = AzureOcrConfig::new(endpoint.clone(), api_key.clone());
    ocr_config.model_id = config.ocr.model_id.clone();
    ocr_config.api_version = config.ocr.api_version.clone();
    ocr_config.poll_interval = Duration::from_millis(config.ocr.poll_interval_ms);
    ocr_config.max_polls = config.ocr.max_polls;

    info!(model = %ocr_config.model_id, "Registered Azure OCR provider");
    Some(Arc::new(AzureOcrProvider::new(ocr_config)))
}

/// Build the step resolver, with vision fallback when enabled and available.
pub(crate) fn build_resolver(config: &Config) -> StepResolver {
    if !config.vision.enabled {
        info!("Vision fallback disabled");
        return StepResolver::new();
    }

    let Some(provider) = build_llm_provider(config, &config.vision.provider) else {
        warn!(
            provider = %config.vision.provider,
            "Vision provider unavailable, unmatched elements stay unresolved"
        );
        return StepResolver::new();
    };

    let mut fallback = VisionFallback::new(provider, config.vision.model.clone())
        .with_max_tokens(config.vision.max_tokens);
    if let Some(ref prompt) = config.vision.prompt {
        fallback = fallback.with_prompt_template(prompt.clone());
    }
    info!(model = %config.vision.model, "Vision fallback enabled");
    StepResolver::with_fallback(fallback)
}

/// Build the tutorial service when search and a model provider are available.
pub(crate) fn build_tutorial(config: &Config) -> Result<Option<TutorialService>, ProviderError> {
    let Some(ref search_key) = config.search.api_key else {
        warn!("Search API key missing, tutorial routes will be unavailable");
        return Ok(None);
    };
    let Some(llm) = build_llm_provider(config, &config.tutorial.provider) else {
        warn!(
            provider = %config.tutorial.provider,
            "Tutorial provider unavailable, tutorial routes will be unavailable"
        );
        return Ok(None);
    };

    let search = SerpApiSearch::with_url(search_key.clone(), config.search.base_url.clone());
    let fetcher = HttpPageFetcher::new(
        &config.fetch.user_agent,
        Duration::from_secs(config.fetch.timeout_seconds),
    )?;

    let settings = TutorialSettings {
        model: config.tutorial.model.clone(),
        ranking_temperature: config.tutorial.ranking_temperature,
        extraction_temperature: config.tutorial.extraction_temperature,
        num_results: config.search.num_results,
    };

    info!(model = %settings.model, "Tutorial service enabled");
    Ok(Some(TutorialService::new(
        Arc::new(search),
        Arc::new(fetcher),
        llm,
        settings,
    )))
}

/// Assemble the shared API state.
pub(crate) fn build_state(config: &Config) -> Result<AppState, ProviderError> {
    let mut state = AppState::new(build_resolver(config));
    if let Some(ocr) = build_ocr(config) {
        state = state.with_ocr(ocr);
    }
    if let Some(tutorial) = build_tutorial(config)? {
        state = state.with_tutorial(tutorial);
    }
    Ok(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use guidepost_config::ProviderConfig;

    fn configured() -> Config {
        let mut config = Config::default();
        config.ocr.endpoint = Some("https://ocr.example.com".to_string());
        config.ocr.api_key = Some("ocr-key".to_string());
        config.search.api_key = Some("serp-key".to_string());
        config.providers.insert(
            "openai".to_string(),
            ProviderConfig {
                api_key: Some("sk-test".to_string()),
                ..Default::default()
            },
        );
        config
    }

    #[test]
    fn test_default_config_builds_bare_state() {
        let state = build_state(&Config::default()).unwrap();
        assert!(state.ocr.is_none());
        assert!(state.tutorial.is_none());
        assert!(!state.resolver.has_fallback());
    }

    #[test]
    fn test_full_config_builds_everything() {
        let state = build_state(&configured()).unwrap();
        assert_eq!(state.ocr.as_ref().map(|o| o.id()), Some("azure"));
        assert!(state.tutorial.is_some());
        assert!(state.resolver.has_fallback());
    }

    #[test]
    fn test_vision_disabled() {
        let mut config = configured();
        config.vision.enabled = false;
        assert!(!build_resolver(&config).has_fallback());
    }

    #[test]
    fn test_provider_without_key_skipped() {
        let mut config = Config::default();
        config
            .providers
            .insert("openai".to_string(), ProviderConfig::default());
        assert!(build_llm_provider(&config, "openai").is_none());
    }

    #[test]
    fn test_unknown_provider_skipped() {
        let mut config = configured();
        let openai = config.providers["openai"].clone();
        config.providers.insert("mystery".to_string(), openai);
        assert!(build_llm_provider(&config, "mystery").is_none());
    }

    #[test]
    fn test_ocr_requires_endpoint() {
        let mut config = configured();
        config.ocr.endpoint = None;
        assert!(build_ocr(&config).is_none());
    }

    #[test]
    fn test_shipped_config_is_valid() {
        let config =
            guidepost_config::ConfigLoader::load_str(include_str!("../config/default.toml")).unwrap();
        assert!(guidepost_config::ConfigValidator::validate(&config).is_valid());
        assert_eq!(config.server.port, 8000);
        assert!(config.provider("openai").is_some());
    }

    #[test]
    fn test_tutorial_requires_search_key() {
        let mut config = configured();
        config.search.api_key = None;
        assert!(build_tutorial(&config).unwrap().is_none());
    }
}
