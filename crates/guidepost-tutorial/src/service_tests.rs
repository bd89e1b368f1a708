use super::*;
use async_trait::async_trait;
use guidepost_protocols::{CompletionResponse, ProviderCapabilities, ProviderError, SearchHit};
use std::sync::Mutex;

struct MockSearch {
    hits: Vec<SearchHit>,
    queries: Mutex<Vec<(String, u32)>>,
}

impl MockSearch {
    fn with_hits(hits: Vec<SearchHit>) -> Arc<Self> {
        Arc::new(Self {
            hits,
            queries: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SearchProvider for MockSearch {
    fn id(&self) -> &str {
        "mock-search"
    }

    async fn search(&self, query: &str, limit: u32) -> Result<Vec<SearchHit>, ProviderError> {
        self.queries.lock().unwrap().push((query.to_string(), limit));
        Ok(self.hits.clone())
    }
}

struct MockFetcher {
    text: Result<String, u16>,
}

#[async_trait]
impl PageFetcher for MockFetcher {
    async fn fetch_text(&self, _url: &str) -> Result<String, ProviderError> {
        match &self.text {
            Ok(text) => Ok(text.clone()),
            Err(status) => Err(ProviderError::ApiError {
                status: *status,
                message: "fetch failed".to_string(),
            }),
        }
    }
}

struct MockLlm {
    caps: ProviderCapabilities,
    reply: String,
    requests: Mutex<Vec<CompletionRequest>>,
}

impl MockLlm {
    fn replying(reply: &str) -> Arc<Self> {
        Arc::new(Self {
            caps: ProviderCapabilities::default(),
            reply: reply.to_string(),
            requests: Mutex::new(Vec::new()),
        })
    }

    fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl LLMProvider for MockLlm {
    fn id(&self) -> &str {
        "mock-llm"
    }

    fn capabilities(&self) -> &ProviderCapabilities {
        &self.caps
    }

    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, ProviderError> {
        let model = request.model.clone();
        self.requests.lock().unwrap().push(request);
        Ok(CompletionResponse::new(model, self.reply.clone()))
    }
}

fn hit(link: &str) -> SearchHit {
    SearchHit {
        link: link.to_string(),
        title: "Title".to_string(),
        snippet: String::new(),
    }
}

fn service(search: Arc<MockSearch>, page: Result<String, u16>, llm: Arc<MockLlm>) -> TutorialService {
    TutorialService::new(
        search,
        Arc::new(MockFetcher { text: page }),
        llm,
        TutorialSettings::default(),
    )
}

#[tokio::test]
async fn test_find_website_returns_ranked_link() {
    let search = MockSearch::with_hits(vec![hit("https://a.example"), hit("https://docs.aws.amazon.com/s3")]);
    let llm = MockLlm::replying(
        "```\n{\"most_relevant_link\": \"https://docs.aws.amazon.com/s3\", \"reason\": \"official docs\"}\n```",
    );
    let svc = service(search.clone(), Ok(String::new()), llm.clone());

    let link = svc.find_website("create bucket", "aws").await.unwrap();
    assert_eq!(link.as_deref(), Some("https://docs.aws.amazon.com/s3"));

    let queries = search.queries.lock().unwrap();
    assert_eq!(queries[0], ("create bucket on aws?".to_string(), 15));

    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests[0].temperature, Some(0.4));
    assert_eq!(requests[0].model, "gpt-4");
    let user_text = requests[0].messages[1].text();
    assert!(user_text.contains("'create bucket on aws?'"));
    assert!(user_text.contains("https://a.example"));
}

#[tokio::test]
async fn test_find_website_no_search_results_skips_model() {
    let llm = MockLlm::replying("{}");
    let svc = service(MockSearch::with_hits(vec![]), Ok(String::new()), llm.clone());

    assert!(svc.find_website("x", "y").await.unwrap().is_none());
    assert_eq!(llm.request_count(), 0);
}

#[tokio::test]
async fn test_find_website_model_gives_no_link() {
    let llm = MockLlm::replying(r#"{"most_relevant_link": "", "reason": "nothing fits"}"#);
    let svc = service(MockSearch::with_hits(vec![hit("https://a.example")]), Ok(String::new()), llm);

    assert!(svc.find_website("x", "y").await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_website_invalid_answer() {
    let llm = MockLlm::replying("The best link is https://a.example");
    let svc = service(MockSearch::with_hits(vec![hit("https://a.example")]), Ok(String::new()), llm);

    let err = svc.find_website("x", "y").await.unwrap_err();
    assert!(matches!(err, TutorialError::InvalidAnswer(_)));
}

#[tokio::test]
async fn test_extract_content_parses_steps() {
    let llm = MockLlm::replying(
        r#"```{"tutorial_title": "Create a bucket",
            "steps": [
                {"step_count": "1", "step": "Open the S3 console", "action": "", "web_element": ""},
                {"step_count": "2", "step": "Choose Create bucket", "action": "click", "web_element": "Create bucket"}
            ]}```"#,
    );
    let svc = service(MockSearch::with_hits(vec![]), Ok("Step 1 ...".to_string()), llm.clone());

    let tutorial = svc.extract_content("https://docs.aws.amazon.com/s3").await.unwrap();
    assert_eq!(tutorial.tutorial_title, "Create a bucket");
    assert_eq!(tutorial.steps.len(), 2);
    assert!(!tutorial.steps[0].has_element());
    assert_eq!(tutorial.steps[1].web_element, "Create bucket");
    assert_eq!(tutorial.steps[1].extra["action"], "click");
    assert!(tutorial.steps.iter().all(|s| s.location.is_empty()));

    let requests = llm.requests.lock().unwrap();
    assert_eq!(requests[0].temperature, Some(0.0));
    assert!(requests[0].messages[1].text().contains("Step 1 ..."));
}

#[tokio::test]
async fn test_extract_content_not_a_tutorial() {
    let llm = MockLlm::replying("");
    let svc = service(MockSearch::with_hits(vec![]), Ok("About us".to_string()), llm);

    let err = svc.extract_content("https://a.example/about").await.unwrap_err();
    assert!(matches!(err, TutorialError::NotATutorial));
}

#[tokio::test]
async fn test_extract_content_empty_page() {
    let llm = MockLlm::replying("{}");
    let svc = service(MockSearch::with_hits(vec![]), Ok("   ".to_string()), llm.clone());

    let err = svc.extract_content("https://a.example").await.unwrap_err();
    assert!(matches!(err, TutorialError::EmptyPage(_)));
    assert_eq!(llm.request_count(), 0);
}

#[tokio::test]
async fn test_extract_content_fetch_error() {
    let llm = MockLlm::replying("{}");
    let svc = service(MockSearch::with_hits(vec![]), Err(404), llm);

    let err = svc.extract_content("https://a.example").await.unwrap_err();
    assert!(matches!(err, TutorialError::Provider(ProviderError::ApiError { status: 404, .. })));
}
