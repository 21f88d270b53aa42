use anyhow::{anyhow, Result};
use async_trait::async_trait;
use codeforge::config::InferenceConfig;
use codeforge::http_client::{HttpClient, HttpResponse};
use codeforge::inference::InferenceClient;
use codeforge::orchestrator::GenerationOrchestrator;
use codeforge::parser::{split_strict, ResponseParser};
use codeforge::process::ProcessRunner;
use codeforge::project::{GenerationRequest, GenerationResult, LanguageTag, ProjectType};
use codeforge::prompt;
use codeforge::providers::SystemClock;
use std::process::Output;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// Mock endpoint returning a fixed status and model text for every generate call.
struct MockEndpoint {
    status: u16,
    text: String,
    generate_calls: Mutex<usize>,
}

impl MockEndpoint {
    fn new(status: u16, text: &str) -> Arc<Self> {
        Arc::new(Self {
            status,
            text: text.to_string(),
            generate_calls: Mutex::new(0),
        })
    }

    fn generate_calls(&self) -> usize {
        *self.generate_calls.lock().unwrap()
    }
}

#[async_trait]
impl HttpClient for MockEndpoint {
    async fn post_json(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        _body: &serde_json::Value,
        _timeout: Duration,
    ) -> Result<HttpResponse> {
        if url.ends_with("/api/generate") {
            *self.generate_calls.lock().unwrap() += 1;
        }
        Ok(HttpResponse {
            status: self.status,
            body: serde_json::json!({ "response": self.text }).to_string(),
        })
    }
}

/// Local runner that is installed but always fails.
struct FailingRunner;

#[async_trait]
impl ProcessRunner for FailingRunner {
    async fn run(&self, _program: &str, _args: &[&str], _timeout: Duration) -> Result<Output> {
        Err(anyhow!("model runner crashed"))
    }

    fn program_exists(&self, _program: &str) -> bool {
        true
    }
}

fn orchestrator_for(endpoint: Arc<MockEndpoint>) -> GenerationOrchestrator {
    let config = InferenceConfig {
        model_url: "http://model.test".to_string(),
        retry_delay: Duration::ZERO,
        ..InferenceConfig::default()
    };
    GenerationOrchestrator::with_deps(
        InferenceClient::with_deps(config, endpoint, Arc::new(FailingRunner)),
        ResponseParser::new(),
        Box::new(SystemClock),
    )
}

const THREE_FILE_SITE: &str = "---FILE: index.html---
<!DOCTYPE html>
<html>
<head><title>Todo</title></head>
<body>
<ul id=\"tasks\"></ul>
</body>
</html>
---FILE: styles.css---
#tasks { list-style: none; }
---FILE: script.js---
const tasks = JSON.parse(localStorage.getItem('tasks') || '[]');
function render() {
console.log(tasks.length);
}
";

#[tokio::test]
async fn scenario_a_todo_website_succeeds_with_three_files() {
    let expanded = prompt::expand("make todo app", ProjectType::Website);
    assert!(expanded.contains("A feature-rich To-Do list application"));

    let endpoint = MockEndpoint::new(200, THREE_FILE_SITE);
    let request = GenerationRequest::new("make todo app", "website").unwrap();

    let result = orchestrator_for(endpoint.clone())
        .generate_code(&request.prompt, request.project_type, Some("user-1"))
        .await;

    match result {
        GenerationResult::Success { data, .. } => {
            let names: Vec<&str> = data.files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["index.html", "styles.css", "script.js"]);
            let languages: Vec<LanguageTag> = data.files.iter().map(|f| f.language).collect();
            assert_eq!(languages, [LanguageTag::Html, LanguageTag::Css, LanguageTag::Javascript]);
            assert_eq!(data.start_command, "Open index.html in your browser");
        }
        other => panic!("expected success, got {:?}", other),
    }
    assert_eq!(endpoint.generate_calls(), 1);
}

#[tokio::test]
async fn scenario_b_not_found_stops_after_one_attempt_and_falls_back() {
    let endpoint = MockEndpoint::new(404, "");

    let result = orchestrator_for(endpoint.clone())
        .generate_code("make todo app", ProjectType::Website, None)
        .await;

    assert_eq!(endpoint.generate_calls(), 1);
    match result {
        GenerationResult::Failure { error, fallback } => {
            assert!(error.contains("model runner crashed"), "unexpected error: {}", error);
            let names: Vec<&str> = fallback.files.iter().map(|f| f.name.as_str()).collect();
            assert_eq!(names, ["index.html", "styles.css", "script.js"]);
        }
        other => panic!("expected failure, got {:?}", other),
    }
}

#[tokio::test]
async fn scenario_c_odd_token_count_recovers_files() {
    // prose + two (name, content) pairs = 5 tokens
    let raw = "Here is your project:\n---FILE: index.html---\n<p>Hello</p>\n---FILE: script.js---\nfunction go() {\nconsole.log('go');";
    assert!(split_strict(raw).is_none());

    let endpoint = MockEndpoint::new(200, raw);
    let result = orchestrator_for(endpoint)
        .generate_code("landing page", ProjectType::Website, None)
        .await;

    let project = match result {
        GenerationResult::Success { data, .. } => data,
        other => panic!("expected success, got {:?}", other),
    };
    assert!(!project.files.is_empty());
    assert_eq!(project.files[0].name, "index.html");
    let script = &project.files[1];
    assert!(script.content.contains("console.log('go');"));
    assert!(script.content.matches('{').count() <= script.content.matches('}').count());
}

#[tokio::test]
async fn transient_errors_are_retried_up_to_the_limit() {
    let endpoint = MockEndpoint::new(503, "");

    let result = orchestrator_for(endpoint.clone())
        .generate_code("x", ProjectType::MernApp, None)
        .await;

    assert_eq!(endpoint.generate_calls(), 3);
    assert!(!result.is_success());
    assert!(result.project().files.is_empty());
}

#[test]
fn unknown_type_is_rejected_before_any_call() {
    let err = GenerationRequest::new("make todo app", "flutter").unwrap_err();
    assert!(err.to_string().contains("Invalid type"));
}
