//! Parsing of JSON answers from chat models.

use serde::de::DeserializeOwned;

/// Parse a model answer that should hold a JSON document.
///
/// Surrounding whitespace, backtick fences and a leading `json` language tag
/// are removed first. Returns `Ok(None)` when nothing is left.
pub fn parse_model_json<T: DeserializeOwned>(raw: &str) -> Result<Option<T>, serde_json::Error> {
    let body = strip_fences(raw);
    if body.is_empty() || body == "\"\"" {
        return Ok(None);
    }
    serde_json::from_str(body).map(Some)
}

fn strip_fences(raw: &str) -> &str {
    let body = raw.trim().trim_matches('`').trim();
    let body = match body.strip_prefix("json") {
        Some(rest) if rest.starts_with(char::is_whitespace) => rest,
        _ => body,
    };
    body.trim()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_plain_json() {
        let v: Value = parse_model_json(r#"{"a": 1}"#).unwrap().unwrap();
        assert_eq!(v["a"], 1);
    }

    #[test]
    fn test_fenced_json() {
        let raw = "```\n{\"most_relevant_link\": \"https://x\", \"reason\": \"r\"}\n```";
        let v: Value = parse_model_json(raw).unwrap().unwrap();
        assert_eq!(v["most_relevant_link"], "https://x");
    }

    #[test]
    fn test_fenced_json_with_language_tag() {
        let raw = "```json\n{\"steps\": []}\n```";
        let v: Value = parse_model_json(raw).unwrap().unwrap();
        assert!(v["steps"].as_array().unwrap().is_empty());
    }

    #[test]
    fn test_empty_answers() {
        assert!(parse_model_json::<Value>("").unwrap().is_none());
        assert!(parse_model_json::<Value>("  ``````  ").unwrap().is_none());
        assert!(parse_model_json::<Value>("\"\"").unwrap().is_none());
    }

    #[test]
    fn test_invalid_json() {
        assert!(parse_model_json::<Value>("I could not find a tutorial").is_err());
    }
}
