//! Tutorial steps and their resolved on-screen locations.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

use super::geometry::{Point, Polygon};

/// Where a step's web element sits on screen.
///
/// A region is never empty: building one from an empty point list yields
/// [`Location::Empty`]. On the wire the empty marker is `""` and a region is an
/// array of `{x, y}` objects.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Location {
    #[default]
    Empty,
    Region(Polygon),
}

impl Location {
    pub fn from_polygon(polygon: Polygon) -> Self {
        if polygon.is_empty() {
            Location::Empty
        } else {
            Location::Region(polygon)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Location::Empty)
    }

    pub fn polygon(&self) -> Option<&Polygon> {
        match self {
            Location::Region(polygon) => Some(polygon),
            Location::Empty => None,
        }
    }
}

impl Serialize for Location {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Location::Empty => serializer.serialize_str(""),
            Location::Region(polygon) => polygon.serialize(serializer),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum LocationRepr {
    Points(Vec<Point>),
    Text(String),
}

impl<'de> Deserialize<'de> for Location {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        match Option::<LocationRepr>::deserialize(deserializer)? {
            None => Ok(Location::Empty),
            Some(LocationRepr::Points(points)) => Ok(Location::from_polygon(points.into())),
            Some(LocationRepr::Text(text)) if text.trim().is_empty() => Ok(Location::Empty),
            Some(LocationRepr::Text(text)) => Err(de::Error::custom(format!(
                "expected an empty string or a list of points, got {text:?}"
            ))),
        }
    }
}

/// One tutorial step.
///
/// Only `web_element` and `location` are interpreted; every other field the
/// step producer emitted (`step_count`, `step`, `action`, ...) is carried
/// through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Step {
    /// Visible label of the element to highlight; empty when the step has none.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub web_element: String,

    #[serde(default)]
    pub location: Location,

    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Step {
    pub fn new(web_element: impl Into<String>) -> Self {
        Self {
            web_element: web_element.into(),
            location: Location::Empty,
            extra: serde_json::Map::new(),
        }
    }

    /// Attach an extra pass-through field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<serde_json::Value>) -> Self {
        self.extra.insert(key.into(), value.into());
        self
    }

    /// Whether the step names an element to locate.
    pub fn has_element(&self) -> bool {
        !self.web_element.is_empty()
    }
}

/// Structured tutorial produced by the extraction step.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Tutorial {
    #[serde(default)]
    pub tutorial_title: String,

    #[serde(default)]
    pub steps: Vec<Step>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[path = "step_tests.rs"]
mod tests;
