use super::*;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const ANALYZE_PATH: &str = "/formrecognizer/documentModels/prebuilt-layout:analyze";
const RESULT_PATH: &str = "/formrecognizer/documentModels/prebuilt-layout/analyzeResults/op-1";

fn provider_for(server: &MockServer, max_polls: u32) -> AzureOcrProvider {
    let mut config = AzureOcrConfig::new(server.uri(), "ocr-key");
    config.poll_interval = Duration::from_millis(5);
    config.max_polls = max_polls;
    AzureOcrProvider::new(config)
}

async fn mount_submit(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path(ANALYZE_PATH))
        .and(query_param("api-version", "2023-07-31"))
        .and(header("Ocp-Apim-Subscription-Key", "ocr-key"))
        .respond_with(
            ResponseTemplate::new(202)
                .insert_header("Operation-Location", format!("{}{}", server.uri(), RESULT_PATH).as_str()),
        )
        .expect(1)
        .mount(server)
        .await;
}

fn succeeded_body() -> serde_json::Value {
    serde_json::json!({
        "status": "succeeded",
        "analyzeResult": {
            "pages": [{
                "pageNumber": 1,
                "width": 1000,
                "height": 800,
                "lines": [{"content": "Submit", "polygon": [100, 200, 200, 200, 200, 220, 100, 220]}],
                "words": [{"content": "Submit", "polygon": [100, 200, 200, 200, 200, 220, 100, 220]}]
            }]
        }
    })
}

#[test]
fn test_analyze_url() {
    let config = AzureOcrConfig::new("https://ocr.example.com/", "k");
    assert_eq!(
        config.analyze_url(),
        "https://ocr.example.com/formrecognizer/documentModels/prebuilt-layout:analyze?api-version=2023-07-31"
    );
}

#[test]
fn test_provider_id() {
    let provider = AzureOcrProvider::new(AzureOcrConfig::new("https://x", "k"));
    assert_eq!(provider.id(), "azure");
}

#[tokio::test]
async fn test_analyze_polls_until_succeeded() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    Mock::given(method("GET"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "running"})))
        .up_to_n_times(2)
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(succeeded_body()))
        .expect(1)
        .mount(&server)
        .await;

    let doc = provider_for(&server, 10).analyze(b"png-bytes").await.unwrap();
    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.pages[0].height, 800.0);
    assert_eq!(doc.pages[0].lines[0].content, "Submit");
    assert_eq!(doc.pages[0].lines[0].polygon.len(), 4);
}

#[tokio::test]
async fn test_analyze_failed_operation() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    Mock::given(method("GET"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "status": "failed",
            "error": {"code": "InvalidContent", "message": "The file is corrupted"}
        })))
        .mount(&server)
        .await;

    match provider_for(&server, 5).analyze(b"png").await.unwrap_err() {
        ProviderError::AnalysisFailed(message) => {
            assert!(message.contains("InvalidContent"));
            assert!(message.contains("corrupted"));
        }
        other => panic!("Expected AnalysisFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_analyze_times_out() {
    let server = MockServer::start().await;
    mount_submit(&server).await;

    Mock::given(method("GET"))
        .and(path(RESULT_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({"status": "notStarted"})))
        .expect(3)
        .mount(&server)
        .await;

    let err = provider_for(&server, 3).analyze(b"png").await.unwrap_err();
    assert!(matches!(err, ProviderError::Timeout(_)));
}

#[tokio::test]
async fn test_submit_unauthorized() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "error": {"code": "401", "message": "Access denied due to invalid subscription key."}
        })))
        .mount(&server)
        .await;

    match provider_for(&server, 3).analyze(b"png").await.unwrap_err() {
        ProviderError::AuthenticationFailed(message) => assert!(message.contains("invalid subscription key")),
        other => panic!("Expected AuthenticationFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn test_submit_missing_operation_location() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .mount(&server)
        .await;

    let err = provider_for(&server, 3).analyze(b"png").await.unwrap_err();
    assert!(matches!(err, ProviderError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_empty_image_rejected_without_request() {
    let server = MockServer::start().await;
    Mock::given(method("POST")).respond_with(ResponseTemplate::new(202)).expect(0).mount(&server).await;

    let err = provider_for(&server, 3).analyze(&[]).await.unwrap_err();
    assert!(matches!(err, ProviderError::InvalidRequest(_)));
}
