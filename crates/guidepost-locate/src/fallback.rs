//! Vision-model fallback for labels the OCR lookup could not find.

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use guidepost_protocols::provider::Message;
use guidepost_protocols::{CompletionRequest, LLMProvider, ProviderError};

/// Literal answer meaning the model saw no suitable element.
pub const NO_MATCH_SENTINEL: &str = "No match found";

/// Placeholder replaced with the element name in the prompt template.
pub const ELEMENT_PLACEHOLDER: &str = "{element}";

pub const DEFAULT_PROMPT: &str = "Which element in the screenshot is likely to be '{element}'? \
Please only return the string of the web element name. \
If no element is likely to be '{element}', please return an empty string.";

pub const DEFAULT_MAX_TOKENS: u32 = 200;

const FALLBACK_MEDIA_TYPE: &str = "image/png";

/// Interpreted vision answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VisionAnswer {
    /// A replacement label to look up.
    Candidate(String),
    NoMatch,
}

/// Asks a vision-capable model which on-screen label corresponds to an
/// element name.
#[derive(Clone)]
pub struct VisionFallback {
    provider: Arc<dyn LLMProvider>,
    model: String,
    max_tokens: u32,
    prompt_template: String,
}

impl VisionFallback {
    pub fn new(provider: Arc<dyn LLMProvider>, model: impl Into<String>) -> Self {
        Self {
            provider,
            model: model.into(),
            max_tokens: DEFAULT_MAX_TOKENS,
            prompt_template: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn with_prompt_template(mut self, template: impl Into<String>) -> Self {
        self.prompt_template = template.into();
        self
    }

    pub fn provider_id(&self) -> &str {
        self.provider.id()
    }

    pub fn prompt_for(&self, element: &str) -> String {
        self.prompt_template.replace(ELEMENT_PLACEHOLDER, element)
    }

    /// Send the screenshot and prompt to the model and interpret the reply.
    ///
    /// Provider failures are returned as-is; an empty reply is a
    /// [`VisionAnswer::NoMatch`].
    pub async fn resolve(&self, image: &[u8], element: &str) -> Result<VisionAnswer, ProviderError> {
        let message = Message::user(self.prompt_for(element))
            .with_image(image_media_type(image), STANDARD.encode(image));
        let request = CompletionRequest::new(self.model.clone(), vec![message])
            .with_max_tokens(self.max_tokens);

        let response = self.provider.complete(request).await?;
        debug!(element, answer = %response.content, "Vision fallback answered");

        Ok(interpret_answer(&response.content))
    }
}

impl std::fmt::Debug for VisionFallback {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisionFallback")
            .field("provider", &self.provider.id())
            .field("model", &self.model)
            .field("max_tokens", &self.max_tokens)
            .finish()
    }
}

/// MIME type sniffed from the image header, `image/png` when unknown.
pub fn image_media_type(bytes: &[u8]) -> &'static str {
    image::guess_format(bytes)
        .map(|format| format.to_mime_type())
        .unwrap_or(FALLBACK_MEDIA_TYPE)
}

/// Normalise a raw model reply.
///
/// Surrounding whitespace and one pair of matching quotes are removed. An
/// empty result or the no-match sentinel (any case) means no match.
pub fn interpret_answer(raw: &str) -> VisionAnswer {
    let trimmed = strip_quotes(raw.trim()).trim();

    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case(NO_MATCH_SENTINEL) {
        VisionAnswer::NoMatch
    } else {
        VisionAnswer::Candidate(trimmed.to_string())
    }
}

fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}
