//! Provider-neutral OCR result schema.
//!
//! OCR adapters translate their own response formats into these records so the
//! matching and rescaling code never depends on a provider client.

use serde::{Deserialize, Serialize};

use super::geometry::Polygon;

/// A recognised text token (a line or a word) with its bounding polygon.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    pub content: String,
    #[serde(default)]
    pub polygon: Polygon,
}

impl TextSpan {
    pub fn new(content: impl Into<String>, polygon: Polygon) -> Self {
        Self {
            content: content.into(),
            polygon,
        }
    }
}

/// One analysed page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrPage {
    /// 1-based page number as reported by the provider.
    #[serde(default = "default_page_number")]
    pub page_number: u32,

    /// Page width in image pixels.
    pub width: f64,

    /// Page height in image pixels.
    pub height: f64,

    #[serde(default)]
    pub lines: Vec<TextSpan>,

    #[serde(default)]
    pub words: Vec<TextSpan>,
}

fn default_page_number() -> u32 {
    1
}

impl OcrPage {
    pub fn new(page_number: u32, width: f64, height: f64) -> Self {
        Self {
            page_number,
            width,
            height,
            lines: Vec::new(),
            words: Vec::new(),
        }
    }

    pub fn with_line(mut self, content: impl Into<String>, polygon: Polygon) -> Self {
        self.lines.push(TextSpan::new(content, polygon));
        self
    }

    pub fn with_word(mut self, content: impl Into<String>, polygon: Polygon) -> Self {
        self.words.push(TextSpan::new(content, polygon));
        self
    }
}

/// The full OCR result for one image.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OcrDocument {
    #[serde(default)]
    pub pages: Vec<OcrPage>,
}

impl OcrDocument {
    pub fn new(pages: Vec<OcrPage>) -> Self {
        Self { pages }
    }

    pub fn first_page(&self) -> Option<&OcrPage> {
        self.pages.first()
    }

    /// Total number of recognised lines across all pages.
    pub fn line_count(&self) -> usize {
        self.pages.iter().map(|p| p.lines.len()).sum()
    }

    /// Total number of recognised words across all pages.
    pub fn word_count(&self) -> usize {
        self.pages.iter().map(|p| p.words.len()).sum()
    }
}
