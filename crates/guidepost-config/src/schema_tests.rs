use super::*;

fn env_of(pairs: &'static [(&'static str, &'static str)]) -> impl Fn(&str) -> Option<String> {
    move |name: &str| {
        pairs
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| v.to_string())
    }
}

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.server.port, 8000);
    assert_eq!(config.server.host, "127.0.0.1");
    assert_eq!(config.ocr.model_id, "prebuilt-layout");
    assert_eq!(config.ocr.max_polls, 60);
    assert!(config.vision.enabled);
    assert_eq!(config.vision.max_tokens, 200);
    assert_eq!(config.vision.provider, "openai");
    assert_eq!(config.tutorial.ranking_temperature, 0.4);
    assert_eq!(config.tutorial.extraction_temperature, 0.0);
    assert_eq!(config.search.num_results, 15);
    assert!(config.providers.is_empty());
}

#[test]
fn test_env_fallbacks_fill_missing_values() {
    let mut config = Config::default();
    config.apply_env_fallbacks_with(env_of(&[
        ("AZURE_FORM_RECOGNIZER_KEY", "ocr-key"),
        ("AZURE_FORM_RECOGNIZER_ENDPOINT", "https://ocr.example.com"),
        ("SERPAPI_KEY", "serp-key"),
        ("OPENAI_API_KEY", "sk-env"),
    ]));

    assert_eq!(config.ocr.api_key.as_deref(), Some("ocr-key"));
    assert_eq!(config.ocr.endpoint.as_deref(), Some("https://ocr.example.com"));
    assert_eq!(config.search.api_key.as_deref(), Some("serp-key"));
    assert_eq!(
        config.provider("openai").and_then(|p| p.api_key.as_deref()),
        Some("sk-env")
    );
}

#[test]
fn test_file_values_win_over_env() {
    let mut config = Config::default();
    config.ocr.api_key = Some("from-file".to_string());
    config.providers.insert(
        "openai".to_string(),
        ProviderConfig {
            api_key: Some("sk-file".to_string()),
            ..Default::default()
        },
    );

    config.apply_env_fallbacks_with(env_of(&[
        ("AZURE_FORM_RECOGNIZER_KEY", "ocr-env"),
        ("OPENAI_API_KEY", "sk-env"),
    ]));

    assert_eq!(config.ocr.api_key.as_deref(), Some("from-file"));
    assert_eq!(config.providers["openai"].api_key.as_deref(), Some("sk-file"));
}

#[test]
fn test_blank_env_values_ignored() {
    let mut config = Config::default();
    config.apply_env_fallbacks_with(env_of(&[("SERPAPI_KEY", "  "), ("OPENAI_API_KEY", "")]));
    assert!(config.search.api_key.is_none());
    assert!(config.providers.is_empty());
}

#[test]
fn test_serialize_skips_unset_secrets() {
    let toml = toml::to_string(&Config::default()).unwrap();
    assert!(toml.contains("[server]"));
    assert!(!toml.contains("api_key"));
}
