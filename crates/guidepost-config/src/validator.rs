//! Configuration validation.

use url::Url;

use crate::error::ConfigError;
use crate::schema::Config;

/// Validation result.
#[derive(Debug, Default)]
pub struct ValidationResult {
    pub errors: Vec<ValidationError>,
    pub warnings: Vec<ValidationWarning>,
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn add_warning(&mut self, warning: ValidationWarning) {
        self.warnings.push(warning);
    }

    /// Turn the first error into a [`ConfigError`].
    pub fn into_result(self) -> Result<Vec<ValidationWarning>, ConfigError> {
        match self.errors.into_iter().next() {
            Some(error) => Err(ConfigError::InvalidValue {
                field: error.path,
                message: error.message,
            }),
            None => Ok(self.warnings),
        }
    }
}

/// A validation error.
#[derive(Debug)]
pub struct ValidationError {
    pub path: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// A validation warning.
#[derive(Debug)]
pub struct ValidationWarning {
    pub path: String,
    pub message: String,
}

impl ValidationWarning {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Configuration validator.
pub struct ConfigValidator;

impl ConfigValidator {
    /// Validate the configuration.
    pub fn validate(config: &Config) -> ValidationResult {
        let mut result = ValidationResult::default();

        Self::validate_server(config, &mut result);
        Self::validate_ocr(config, &mut result);
        Self::validate_vision(config, &mut result);
        Self::validate_tutorial(config, &mut result);
        Self::validate_search(config, &mut result);
        Self::validate_providers(config, &mut result);

        result
    }

    fn validate_server(config: &Config, result: &mut ValidationResult) {
        if config.server.port == 0 {
            result.add_error(ValidationError::new("server.port", "Port cannot be 0"));
        }

        if config.server.host.is_empty() {
            result.add_error(ValidationError::new("server.host", "Host cannot be empty"));
        }

        if config.server.max_upload_bytes == 0 {
            result.add_error(ValidationError::new(
                "server.max_upload_bytes",
                "max_upload_bytes must be greater than 0",
            ));
        }

        if config.server.cors_origins.is_empty() {
            result.add_warning(ValidationWarning::new(
                "server.cors_origins",
                "No CORS origins configured, browser extensions will be rejected",
            ));
        }
    }

    fn validate_ocr(config: &Config, result: &mut ValidationResult) {
        match &config.ocr.endpoint {
            None => result.add_warning(ValidationWarning::new(
                "ocr.endpoint",
                "OCR endpoint is not set, /process_image will be unavailable",
            )),
            Some(endpoint) => check_http_url("ocr.endpoint", endpoint, result),
        }

        if config.ocr.endpoint.is_some() && config.ocr.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "ocr.api_key",
                "OCR API key is not set",
            ));
        }

        if config.ocr.max_polls == 0 {
            result.add_error(ValidationError::new(
                "ocr.max_polls",
                "max_polls must be greater than 0",
            ));
        }

        if config.ocr.model_id.is_empty() {
            result.add_error(ValidationError::new("ocr.model_id", "model_id cannot be empty"));
        }
    }

    fn validate_vision(config: &Config, result: &mut ValidationResult) {
        let vision = &config.vision;
        if !vision.enabled {
            return;
        }

        if vision.max_tokens == 0 {
            result.add_error(ValidationError::new(
                "vision.max_tokens",
                "max_tokens must be greater than 0",
            ));
        }

        if !config.providers.contains_key(&vision.provider) {
            result.add_warning(ValidationWarning::new(
                "vision.provider",
                format!(
                    "Provider '{}' is not configured, vision fallback will be disabled",
                    vision.provider
                ),
            ));
        }

        if let Some(prompt) = &vision.prompt {
            if !prompt.contains("{element}") {
                result.add_warning(ValidationWarning::new(
                    "vision.prompt",
                    "Prompt has no {element} placeholder",
                ));
            }
        }
    }

    fn validate_tutorial(config: &Config, result: &mut ValidationResult) {
        for (path, value) in [
            ("tutorial.ranking_temperature", config.tutorial.ranking_temperature),
            ("tutorial.extraction_temperature", config.tutorial.extraction_temperature),
        ] {
            if !(0.0..=2.0).contains(&value) {
                result.add_error(ValidationError::new(path, "temperature must be within 0.0..=2.0"));
            }
        }
    }

    fn validate_search(config: &Config, result: &mut ValidationResult) {
        check_http_url("search.base_url", &config.search.base_url, result);

        if config.search.num_results == 0 {
            result.add_error(ValidationError::new(
                "search.num_results",
                "num_results must be greater than 0",
            ));
        }

        if config.search.api_key.is_none() {
            result.add_warning(ValidationWarning::new(
                "search.api_key",
                "Search API key is not set, /find_website will fail",
            ));
        }
    }

    fn validate_providers(config: &Config, result: &mut ValidationResult) {
        for (name, provider) in &config.providers {
            if provider.api_key.is_none() {
                result.add_warning(ValidationWarning::new(
                    format!("providers.{}.api_key", name),
                    "API key is not set, may need to be set via environment variable",
                ));
            }

            if let Some(url) = &provider.base_url {
                check_http_url(&format!("providers.{}.base_url", name), url, result);
            }
        }
    }
}

fn check_http_url(path: &str, value: &str, result: &mut ValidationResult) {
    match Url::parse(value) {
        Ok(url) if matches!(url.scheme(), "http" | "https") => {}
        Ok(_) => result.add_error(ValidationError::new(
            path,
            "URL must start with http:// or https://",
        )),
        Err(e) => result.add_error(ValidationError::new(path, format!("Invalid URL: {}", e))),
    }
}

#[cfg(test)]
#[path = "validator_tests.rs"]
mod tests;
