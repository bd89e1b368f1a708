//! Analyze-operation wire types.

use serde::Deserialize;

use guidepost_protocols::{OcrDocument, OcrPage, Polygon, TextSpan};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOperation {
    pub status: OperationStatus,
    pub analyze_result: Option<AnalyzeResult>,
    pub error: Option<ApiErrorBody>,
}

#[derive(Debug, Deserialize)]
pub struct ApiErrorBody {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Top-level error envelope on non-2xx responses.
#[derive(Debug, Deserialize)]
pub struct ErrorEnvelope {
    pub error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeResult {
    #[serde(default)]
    pub pages: Vec<ApiPage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiPage {
    #[serde(default = "first_page")]
    pub page_number: u32,
    #[serde(default)]
    pub width: f64,
    #[serde(default)]
    pub height: f64,
    #[serde(default)]
    pub lines: Vec<ApiSpan>,
    #[serde(default)]
    pub words: Vec<ApiSpan>,
}

fn first_page() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
pub struct ApiSpan {
    #[serde(default)]
    pub content: String,
    /// Flat `[x1, y1, x2, y2, ...]` coordinates.
    #[serde(default)]
    pub polygon: Vec<f64>,
}

impl From<ApiSpan> for TextSpan {
    fn from(span: ApiSpan) -> Self {
        TextSpan::new(span.content, Polygon::from_flat(&span.polygon))
    }
}

impl From<ApiPage> for OcrPage {
    fn from(page: ApiPage) -> Self {
        OcrPage {
            page_number: page.page_number,
            width: page.width,
            height: page.height,
            lines: page.lines.into_iter().map(TextSpan::from).collect(),
            words: page.words.into_iter().map(TextSpan::from).collect(),
        }
    }
}

impl From<AnalyzeResult> for OcrDocument {
    fn from(result: AnalyzeResult) -> Self {
        OcrDocument::new(result.pages.into_iter().map(OcrPage::from).collect())
    }
}
