//! Configuration loader.

use std::fs;
use std::path::Path;
use std::sync::OnceLock;

use regex::Regex;

use crate::error::ConfigError;
use crate::schema::Config;

fn env_placeholder() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\$\{([^}]+)\}").expect("placeholder pattern is valid"))
}

/// Configuration loader with environment variable substitution.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Config, ConfigError> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path)?;
        Self::load_str(&content)
    }

    /// Load configuration from a string.
    pub fn load_str(content: &str) -> Result<Config, ConfigError> {
        let expanded = Self::expand_env_vars(content)?;
        let config: Config = toml::from_str(&expanded)?;
        Ok(config)
    }

    /// Load `path` if it exists, otherwise start from defaults. Unset
    /// credentials are then filled from the environment.
    pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
        let mut config = match Self::load(path) {
            Ok(config) => config,
            Err(ConfigError::NotFound(_)) => Config::default(),
            Err(e) => return Err(e),
        };
        config.apply_env_fallbacks();
        Ok(config)
    }

    /// Expand environment variables in the format `${VAR}`.
    fn expand_env_vars(content: &str) -> Result<String, ConfigError> {
        let mut result = content.to_string();

        for cap in env_placeholder().captures_iter(content) {
            let var_name = &cap[1];
            let var_value = std::env::var(var_name)
                .map_err(|_| ConfigError::EnvVarNotSet(var_name.to_string()))?;
            result = result.replace(&cap[0], &var_value);
        }

        Ok(result)
    }

    /// Expand shell-style paths (e.g., `~/.guidepost`).
    pub fn expand_path(path: &str) -> String {
        shellexpand::tilde(path).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_empty_config() {
        let config = ConfigLoader::load_str("").unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_sections() {
        let content = r#"
            [server]
            host = "0.0.0.0"
            port = 9000
            cors_origins = ["chrome-extension://abc"]

            [ocr]
            endpoint = "https://ocr.example.com"
            poll_interval_ms = 250

            [vision]
            enabled = false
            model = "gpt-4o-mini"
            prompt = "Which label is {element}?"

            [tutorial]
            extraction_temperature = 0.1

            [search]
            num_results = 5
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.cors_origins, vec!["chrome-extension://abc"]);
        assert_eq!(config.ocr.endpoint.as_deref(), Some("https://ocr.example.com"));
        assert_eq!(config.ocr.poll_interval_ms, 250);
        assert_eq!(config.ocr.model_id, "prebuilt-layout");
        assert!(!config.vision.enabled);
        assert_eq!(config.vision.model, "gpt-4o-mini");
        assert_eq!(config.vision.max_tokens, 200);
        assert_eq!(config.tutorial.extraction_temperature, 0.1);
        assert_eq!(config.search.num_results, 5);
    }

    #[test]
    fn test_load_with_providers() {
        let content = r#"
            [providers.openai]
            api_key = "sk-test"
            base_url = "https://api.openai.com/v1/chat/completions"
        "#;
        let config = ConfigLoader::load_str(content).unwrap();
        let openai = config.provider("openai").unwrap();
        assert_eq!(openai.api_key.as_deref(), Some("sk-test"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server]").unwrap();
        writeln!(file, "port = 5000").unwrap();

        let config = ConfigLoader::load(file.path()).unwrap();
        assert_eq!(config.server.port, 5000);
    }

    #[test]
    fn test_load_nonexistent_file() {
        let result = ConfigLoader::load(Path::new("/nonexistent/path/guidepost.toml"));
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_or_default_missing_file() {
        let config = ConfigLoader::load_or_default(Path::new("/nonexistent/guidepost.toml")).unwrap();
        assert_eq!(config.server.port, 8000);
    }

    #[test]
    fn test_load_or_default_reports_parse_errors() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[server").unwrap();
        let result = ConfigLoader::load_or_default(file.path());
        assert!(matches!(result, Err(ConfigError::TomlParse(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let result = ConfigLoader::load_str("invalid = [unclosed");
        assert!(result.is_err());
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: This test sets a unique test-only env var
        unsafe {
            std::env::set_var("GUIDEPOST_TEST_CONFIG_VAR", "test_value");
        }
        let content = "value = \"${GUIDEPOST_TEST_CONFIG_VAR}\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, "value = \"test_value\"");
        unsafe {
            std::env::remove_var("GUIDEPOST_TEST_CONFIG_VAR");
        }
    }

    #[test]
    fn test_expand_env_vars_not_set() {
        let content = "value = \"${GUIDEPOST_NONEXISTENT_VAR_12345}\"";
        let result = ConfigLoader::expand_env_vars(content);
        assert!(matches!(result, Err(ConfigError::EnvVarNotSet(name)) if name == "GUIDEPOST_NONEXISTENT_VAR_12345"));
    }

    #[test]
    fn test_expand_env_vars_no_vars() {
        let content = "value = \"no variables here\"";
        let expanded = ConfigLoader::expand_env_vars(content).unwrap();
        assert_eq!(expanded, content);
    }

    #[test]
    fn test_expand_path_no_tilde() {
        assert_eq!(ConfigLoader::expand_path("/usr/local/etc"), "/usr/local/etc");
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let expanded = ConfigLoader::expand_path("~/.guidepost");
        assert!(!expanded.starts_with('~'));
        assert!(expanded.ends_with("/.guidepost"));
    }
}
