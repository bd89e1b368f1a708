//! Application state.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use guidepost_locate::StepResolver;
use guidepost_protocols::OcrProvider;
use guidepost_tutorial::TutorialService;

/// State shared across handlers. Immutable after startup apart from the
/// request counter.
pub struct AppState {
    pub ocr: Option<Arc<dyn OcrProvider>>,
    pub resolver: StepResolver,
    pub tutorial: Option<TutorialService>,
    start_time: Instant,
    request_count: AtomicU64,
}

impl AppState {
    pub fn new(resolver: StepResolver) -> Self {
        Self {
            ocr: None,
            resolver,
            tutorial: None,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
        }
    }

    pub fn with_ocr(mut self, ocr: Arc<dyn OcrProvider>) -> Self {
        self.ocr = Some(ocr);
        self
    }

    pub fn with_tutorial(mut self, tutorial: TutorialService) -> Self {
        self.tutorial = Some(tutorial);
        self
    }

    /// Get uptime.
    pub fn uptime(&self) -> std::time::Duration {
        self.start_time.elapsed()
    }

    /// Get request count.
    pub fn request_count(&self) -> u64 {
        self.request_count.load(Ordering::Relaxed)
    }

    /// Increment request count.
    pub fn increment_requests(&self) {
        self.request_count.fetch_add(1, Ordering::Relaxed);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(StepResolver::new())
    }
}
