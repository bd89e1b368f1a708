//! Batch step resolution.
//!
//! Each step runs through a small state machine:
//!
//! ```text
//! Direct ──hit──────────────────────────────► Done(Matched)
//!   │ miss
//!   ▼
//! Vision ──NoMatch / disabled──────────────► Done(Unresolved)
//!   │ candidate
//!   ▼
//! Rematch(candidate) ──hit─────────────────► Done(Matched)
//!   │ miss
//!   └──────────────────────────────────────► Done(Unresolved)
//! ```
//!
//! Steps without an element never leave the initial state.

use serde::Serialize;
use tracing::{debug, info};

use guidepost_protocols::{Location, OcrDocument, Step, Viewport};

use crate::error::LocateError;
use crate::fallback::{VisionAnswer, VisionFallback};
use crate::geometry::{find_location, MatchLevel, SpanMatch};
use crate::rescale::{rescale, ScaleFactors};

/// Why a step with an element ended without a location.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "candidate", rename_all = "snake_case")]
pub enum UnresolvedReason {
    FallbackDisabled,
    VisionNoMatch,
    /// The vision model proposed a label that the OCR text does not contain.
    CandidateNotFound(String),
}

/// Final state of one step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    NoElement,
    Matched {
        level: MatchLevel,
        page: usize,
        #[serde(skip_serializing_if = "Option::is_none")]
        via_vision: Option<String>,
    },
    Unresolved { reason: UnresolvedReason },
}

impl StepOutcome {
    pub fn is_matched(&self) -> bool {
        matches!(self, StepOutcome::Matched { .. })
    }
}

/// Summary of a resolution run, one outcome per input step.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolutionReport {
    pub outcomes: Vec<StepOutcome>,
    pub vision_calls: usize,
    pub scale: Option<ScaleFactors>,
}

impl ResolutionReport {
    pub fn matched(&self) -> usize {
        self.outcomes.iter().filter(|o| o.is_matched()).count()
    }
}

enum Stage {
    Direct,
    Vision,
    Rematch(String),
    Done(StepOutcome),
}

/// Fills in `location` for each step of a tutorial.
#[derive(Debug, Clone, Default)]
pub struct StepResolver {
    fallback: Option<VisionFallback>,
}

impl StepResolver {
    /// A resolver without a vision fallback; direct misses stay empty.
    pub fn new() -> Self {
        Self { fallback: None }
    }

    pub fn with_fallback(fallback: VisionFallback) -> Self {
        Self {
            fallback: Some(fallback),
        }
    }

    pub fn has_fallback(&self) -> bool {
        self.fallback.is_some()
    }

    /// Resolve every step in place.
    ///
    /// Steps keep their order and every field other than `location`. A step
    /// is written exactly once: either a rescaled polygon or the empty marker.
    /// A vision provider error aborts the batch.
    pub async fn resolve_steps(
        &self,
        steps: &mut [Step],
        image: &[u8],
        document: &OcrDocument,
        viewport: Viewport,
    ) -> Result<ResolutionReport, LocateError> {
        let mut report = ResolutionReport {
            outcomes: Vec::with_capacity(steps.len()),
            vision_calls: 0,
            scale: None,
        };

        if steps.iter().all(|s| !s.has_element()) {
            for step in steps.iter_mut() {
                step.location = Location::Empty;
                report.outcomes.push(StepOutcome::NoElement);
            }
            return Ok(report);
        }

        let scale = ScaleFactors::for_document(document, viewport)?;
        report.scale = Some(scale);

        for step in steps.iter_mut() {
            let (location, outcome) = self
                .resolve_one(&step.web_element, image, document, scale, &mut report)
                .await?;
            step.location = location;
            report.outcomes.push(outcome);
        }

        info!(
            steps = report.outcomes.len(),
            matched = report.matched(),
            vision_calls = report.vision_calls,
            "Resolved step locations"
        );

        Ok(report)
    }

    async fn resolve_one(
        &self,
        element: &str,
        image: &[u8],
        document: &OcrDocument,
        scale: ScaleFactors,
        report: &mut ResolutionReport,
    ) -> Result<(Location, StepOutcome), LocateError> {
        if element.is_empty() {
            return Ok((Location::Empty, StepOutcome::NoElement));
        }

        let mut location = Location::Empty;
        let mut stage = Stage::Direct;

        loop {
            stage = match stage {
                Stage::Direct => match find_location(element, document) {
                    Some(hit) if !hit.polygon.is_empty() => {
                        location = placed(&hit, scale);
                        Stage::Done(matched(&hit, None))
                    }
                    _ => Stage::Vision,
                },
                Stage::Vision => match &self.fallback {
                    None => Stage::Done(unresolved(UnresolvedReason::FallbackDisabled)),
                    Some(fallback) => {
                        report.vision_calls += 1;
                        match fallback.resolve(image, element).await? {
                            VisionAnswer::Candidate(candidate) => Stage::Rematch(candidate),
                            VisionAnswer::NoMatch => Stage::Done(unresolved(UnresolvedReason::VisionNoMatch)),
                        }
                    }
                },
                Stage::Rematch(candidate) => match find_location(&candidate, document) {
                    Some(hit) if !hit.polygon.is_empty() => {
                        location = placed(&hit, scale);
                        Stage::Done(matched(&hit, Some(candidate)))
                    }
                    _ => Stage::Done(unresolved(UnresolvedReason::CandidateNotFound(candidate))),
                },
                Stage::Done(outcome) => {
                    debug!(element, ?outcome, "Step resolved");
                    return Ok((location, outcome));
                }
            };
        }
    }
}

fn placed(hit: &SpanMatch<'_>, scale: ScaleFactors) -> Location {
    Location::from_polygon(rescale(hit.polygon, scale))
}

fn matched(hit: &SpanMatch<'_>, via_vision: Option<String>) -> StepOutcome {
    StepOutcome::Matched {
        level: hit.level,
        page: hit.page_index,
        via_vision,
    }
}

fn unresolved(reason: UnresolvedReason) -> StepOutcome {
    StepOutcome::Unresolved { reason }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
