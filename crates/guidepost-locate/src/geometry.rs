//! Search over an OCR document for the span that names a web element.

use serde::Serialize;

use guidepost_protocols::{OcrDocument, Polygon, TextSpan};

use crate::matcher::is_close_match;

/// Which span granularity produced a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchLevel {
    Line,
    Word,
}

/// A successful lookup.
#[derive(Debug, Clone, PartialEq)]
pub struct SpanMatch<'a> {
    pub level: MatchLevel,
    /// Zero-based index of the page in the document.
    pub page_index: usize,
    pub content: &'a str,
    pub polygon: &'a Polygon,
}

/// Find the first span in `document` that close-matches `element_name`.
///
/// Returns `None` immediately for an empty name. Pages are visited in order;
/// on each page every line is tried before any word, and a page is exhausted
/// before the next one is considered, so a word on page 1 wins over a line on
/// page 2. Comparison is case-insensitive.
pub fn find_location<'a>(element_name: &str, document: &'a OcrDocument) -> Option<SpanMatch<'a>> {
    find_location_with(element_name, document, is_close_match)
}

pub(crate) fn find_location_with<'a, F>(
    element_name: &str,
    document: &'a OcrDocument,
    mut matches: F,
) -> Option<SpanMatch<'a>>
where
    F: FnMut(&str, &str) -> bool,
{
    if element_name.is_empty() {
        return None;
    }

    let target = element_name.to_lowercase();

    for (page_index, page) in document.pages.iter().enumerate() {
        let passes = [(MatchLevel::Line, &page.lines), (MatchLevel::Word, &page.words)];
        for (level, spans) in passes {
            if let Some(span) = first_match(spans, &target, &mut matches) {
                return Some(SpanMatch {
                    level,
                    page_index,
                    content: &span.content,
                    polygon: &span.polygon,
                });
            }
        }
    }

    None
}

fn first_match<'a, F>(spans: &'a [TextSpan], target: &str, matches: &mut F) -> Option<&'a TextSpan>
where
    F: FnMut(&str, &str) -> bool,
{
    spans
        .iter()
        .find(|span| matches(&span.content.to_lowercase(), target))
}

#[cfg(test)]
#[path = "geometry_tests.rs"]
mod tests;
