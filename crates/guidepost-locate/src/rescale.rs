//! Mapping from OCR image pixels to the browser viewport.

use serde::Serialize;

use guidepost_protocols::{OcrDocument, OcrPage, Point, Polygon, Viewport};

use crate::error::LocateError;

/// Per-axis multipliers from image space to viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ScaleFactors {
    pub x: f64,
    pub y: f64,
}

impl ScaleFactors {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Factors for a single page.
    pub fn from_page(page: &OcrPage, viewport: Viewport) -> Result<Self, LocateError> {
        if viewport.width == 0 || viewport.height == 0 {
            return Err(LocateError::InvalidViewport {
                width: viewport.width,
                height: viewport.height,
            });
        }

        let usable = |v: f64| v.is_finite() && v > 0.0;
        if !usable(page.width) || !usable(page.height) {
            return Err(LocateError::DegenerateGeometry {
                width: page.width,
                height: page.height,
            });
        }

        Ok(Self {
            x: f64::from(viewport.width) / page.width,
            y: f64::from(viewport.height) / page.height,
        })
    }

    /// Factors for a whole document.
    ///
    /// The first page's dimensions are used for every page, so matches on
    /// later pages are scaled with page 1's factors.
    pub fn for_document(document: &OcrDocument, viewport: Viewport) -> Result<Self, LocateError> {
        let page = document.first_page().ok_or(LocateError::EmptyDocument)?;
        Self::from_page(page, viewport)
    }

    pub fn apply(&self, point: Point) -> Point {
        Point::new(point.x * self.x, point.y * self.y)
    }
}

/// Scale every vertex of `polygon`, preserving order and count.
pub fn rescale(polygon: &Polygon, factors: ScaleFactors) -> Polygon {
    polygon.iter().map(|p| factors.apply(*p)).collect()
}
