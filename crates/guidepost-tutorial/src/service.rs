//! Tutorial discovery and extraction.

use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, info, warn};

use guidepost_protocols::provider::Message;
use guidepost_protocols::{
    CompletionRequest, LLMProvider, PageFetcher, SearchProvider, Step, Tutorial,
};

use crate::error::TutorialError;
use crate::parse::parse_model_json;
use crate::prompts;

/// Model settings for the two chat calls.
#[derive(Debug, Clone)]
pub struct TutorialSettings {
    pub model: String,
    pub ranking_temperature: f32,
    pub extraction_temperature: f32,
    pub num_results: u32,
}

impl Default for TutorialSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4".to_string(),
            ranking_temperature: 0.4,
            extraction_temperature: 0.0,
            num_results: 15,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RankingAnswer {
    most_relevant_link: Option<String>,
    #[serde(default)]
    reason: String,
}

#[derive(Debug, Deserialize)]
struct ExtractionAnswer {
    #[serde(default)]
    tutorial_title: String,
    #[serde(default)]
    steps: Vec<Step>,
}

/// Finds tutorial pages and extracts their steps.
#[derive(Clone)]
pub struct TutorialService {
    search: Arc<dyn SearchProvider>,
    fetcher: Arc<dyn PageFetcher>,
    llm: Arc<dyn LLMProvider>,
    settings: TutorialSettings,
}

impl TutorialService {
    pub fn new(
        search: Arc<dyn SearchProvider>,
        fetcher: Arc<dyn PageFetcher>,
        llm: Arc<dyn LLMProvider>,
        settings: TutorialSettings,
    ) -> Self {
        Self {
            search,
            fetcher,
            llm,
            settings,
        }
    }

    pub fn settings(&self) -> &TutorialSettings {
        &self.settings
    }

    /// Find the most relevant tutorial link for doing `action` in `software`.
    ///
    /// Returns `None` when the search has no results or the model names no
    /// link.
    pub async fn find_website(&self, action: &str, software: &str) -> Result<Option<String>, TutorialError> {
        let query = prompts::search_query(action, software);
        let hits = self.search.search(&query, self.settings.num_results).await?;
        if hits.is_empty() {
            info!(%query, "Search returned no results");
            return Ok(None);
        }

        let results_json = serde_json::to_string(&hits)
            .map_err(|e| TutorialError::InvalidAnswer(e.to_string()))?;
        let request = CompletionRequest::new(
            self.settings.model.clone(),
            vec![
                Message::system(prompts::RANKING_SYSTEM),
                Message::user(prompts::ranking_user(&query, &results_json)),
            ],
        )
        .with_temperature(self.settings.ranking_temperature);

        let response = self.llm.complete(request).await?;
        let answer: Option<RankingAnswer> = parse_model_json(&response.content)
            .map_err(|e| TutorialError::InvalidAnswer(e.to_string()))?;

        let link = answer
            .and_then(|a| {
                debug!(reason = %a.reason, "Ranking answer");
                a.most_relevant_link
            })
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty());

        match &link {
            Some(url) => info!(%query, %url, hits = hits.len(), "Selected tutorial link"),
            None => warn!(%query, "Model selected no link"),
        }
        Ok(link)
    }

    /// Fetch `url` and extract its tutorial title and steps.
    ///
    /// Every returned step has an empty location.
    pub async fn extract_content(&self, url: &str) -> Result<Tutorial, TutorialError> {
        let page = self.fetcher.fetch_text(url).await?;
        if page.trim().is_empty() {
            return Err(TutorialError::EmptyPage(url.to_string()));
        }

        let request = CompletionRequest::new(
            self.settings.model.clone(),
            vec![
                Message::system(prompts::EXTRACTION_SYSTEM),
                Message::user(prompts::extraction_user(url, &page)),
            ],
        )
        .with_temperature(self.settings.extraction_temperature);

        let response = self.llm.complete(request).await?;
        let answer: ExtractionAnswer = parse_model_json(&response.content)
            .map_err(|e| TutorialError::InvalidAnswer(e.to_string()))?
            .ok_or(TutorialError::NotATutorial)?;

        let tutorial = Tutorial {
            tutorial_title: answer.tutorial_title,
            steps: answer
                .steps
                .into_iter()
                .map(|mut step| {
                    step.location = Default::default();
                    step
                })
                .collect(),
        };

        info!(
            url,
            title = %tutorial.tutorial_title,
            steps = tutorial.steps.len(),
            "Extracted tutorial"
        );
        Ok(tutorial)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
