//! Offline `locate` command: resolve steps against a saved OCR document.

use std::path::PathBuf;

use serde_json::Value;
use tracing::info;

use guidepost_config::Config;
use guidepost_protocols::{OcrDocument, Step, Viewport};

use crate::register::build_resolver;

/// Inputs of one `locate` run.
#[derive(Debug, Clone)]
pub(crate) struct LocateRequest {
    pub image: PathBuf,
    pub ocr: PathBuf,
    pub steps: PathBuf,
    pub width: u32,
    pub height: u32,
}

/// Resolve the steps file and return it as pretty JSON with locations filled.
///
/// A single step object yields a single object, a list yields a list.
pub(crate) async fn run(
    config: &Config,
    request: &LocateRequest,
) -> Result<String, Box<dyn std::error::Error>> {
    let image = std::fs::read(&request.image)?;
    let document: OcrDocument = serde_json::from_str(&std::fs::read_to_string(&request.ocr)?)?;
    let raw_steps: Value = serde_json::from_str(&std::fs::read_to_string(&request.steps)?)?;

    let single = raw_steps.is_object();
    let mut steps: Vec<Step> = if single {
        vec![serde_json::from_value(raw_steps)?]
    } else {
        serde_json::from_value(raw_steps)?
    };

    let resolver = build_resolver(config);
    let report = resolver
        .resolve_steps(
            &mut steps,
            &image,
            &document,
            Viewport::new(request.width, request.height),
        )
        .await?;
    info!(
        steps = steps.len(),
        matched = report.matched(),
        vision_calls = report.vision_calls,
        "Resolved steps"
    );

    let output = if single {
        serde_json::to_string_pretty(&steps[0])?
    } else {
        serde_json::to_string_pretty(&steps)?
    };
    Ok(output)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write(dir: &TempDir, name: &str, content: &[u8]) -> PathBuf {
        let path = dir.path().join(name);
        std::fs::write(&path, content).unwrap();
        path
    }

    fn ocr_json() -> &'static str {
        r#"{"pages": [{
            "page_number": 1, "width": 1000.0, "height": 800.0,
            "lines": [{"content": "Submit", "polygon": [
                {"x": 100.0, "y": 200.0}, {"x": 200.0, "y": 200.0},
                {"x": 200.0, "y": 220.0}, {"x": 100.0, "y": 220.0}
            ]}],
            "words": []
        }]}"#
    }

    fn request(dir: &TempDir, steps: &str) -> LocateRequest {
        LocateRequest {
            image: write(dir, "shot.png", b"not really a png"),
            ocr: write(dir, "ocr.json", ocr_json().as_bytes()),
            steps: write(dir, "steps.json", steps.as_bytes()),
            width: 500,
            height: 400,
        }
    }

    fn offline_config() -> Config {
        let mut config = Config::default();
        config.vision.enabled = false;
        config
    }

    #[tokio::test]
    async fn test_locate_single_step() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, r#"{"step": 1, "web_element": "submit"}"#);

        let output = run(&offline_config(), &req).await.unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json["step"], 1);
        assert_eq!(json["location"][0]["x"], 50.0);
        assert_eq!(json["location"][2]["y"], 110.0);
    }

    #[tokio::test]
    async fn test_locate_step_list_without_fallback() {
        let dir = TempDir::new().unwrap();
        let req = request(&dir, r#"[{"web_element": "Cancel"}, {"web_element": ""}]"#);

        let output = run(&offline_config(), &req).await.unwrap();
        let json: Value = serde_json::from_str(&output).unwrap();
        assert_eq!(json[0]["location"], "");
        assert_eq!(json[1]["location"], "");
    }

    #[tokio::test]
    async fn test_locate_missing_ocr_file() {
        let dir = TempDir::new().unwrap();
        let mut req = request(&dir, "[]");
        req.ocr = dir.path().join("missing.json");

        assert!(run(&offline_config(), &req).await.is_err());
    }
}
