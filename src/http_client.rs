//! HTTP client abstraction for the inference endpoint.
//!
//! This module provides a trait-based abstraction over HTTP clients, enabling
//! dependency injection and easy mocking in tests.

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;

/// Status and body of a completed HTTP exchange.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Trait for HTTP communication with the inference endpoint.
///
/// Non-2xx statuses are returned as `Ok` so callers can decide whether they
/// are retryable; `Err` is reserved for transport failures.
///
/// # Example
///
/// ```ignore
/// use codeforge::http_client::{HttpClient, ReqwestHttpClient};
///
/// let client = ReqwestHttpClient::new();
/// let response = client.post_json(
///     "http://localhost:11434/api/show",
///     &[("Content-Type", "application/json")],
///     &serde_json::json!({"name": "deepseek-coder:6.7b"}),
///     std::time::Duration::from_secs(5),
/// ).await?;
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Sends a POST request with JSON body.
    ///
    /// # Arguments
    ///
    /// * `url` - The URL to send the request to
    /// * `headers` - Key-value pairs of headers to include
    /// * `body` - The JSON body to send
    /// * `timeout` - Upper bound for this single request
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent, times out, or the
    /// response body cannot be read.
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse>;
}

/// HTTP client implementation using reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for ReqwestHttpClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn post_json(
        &self,
        url: &str,
        headers: &[(&str, &str)],
        body: &serde_json::Value,
        timeout: Duration,
    ) -> Result<HttpResponse> {
        let mut request = self.client.post(url).timeout(timeout);

        for (key, value) in headers {
            request = request.header(*key, *value);
        }

        let response = request.json(body).send().await?;
        let status = response.status().as_u16();
        Ok(HttpResponse {
            status,
            body: response.text().await?,
        })
    }
}

/// Offline stand-in for the inference endpoint.
///
/// Answers `/api/generate` with a well-formed delimiter-protocol response so
/// the whole pipeline can run without a model server.
pub struct CannedHttpClient;

impl CannedHttpClient {
    const WEBSITE: &'static str = "---FILE: index.html---
<!DOCTYPE html>
<html lang=\"en\">
<head>
<meta charset=\"UTF-8\">
<title>Generated Site</title>
<link rel=\"stylesheet\" href=\"styles.css\">
</head>
<body>
<main>
<h1>Hello from codeforge</h1>
</main>
<script src=\"script.js\"></script>
</body>
</html>
---FILE: styles.css---
body {
font-family: sans-serif;
margin: 0;
}
---FILE: script.js---
document.addEventListener('DOMContentLoaded', () => {
console.log('Generated site ready');
});
";

    const REACT: &'static str = "---FILE: package.json---
{
\"name\": \"generated-app\",
\"private\": true,
\"dependencies\": {
\"react\": \"^18.2.0\",
\"react-dom\": \"^18.2.0\"
}
}
---FILE: App.jsx---
import { useState } from 'react';
export default function App() {
const [count, setCount] = useState(0);
return <button onClick={() => setCount(count + 1)}>{count}</button>;
}
---FILE: styles/App.css---
button {
padding: 8px;
}
";

    fn response_for(prompt: &str) -> &'static str {
        if prompt.contains("React") {
            Self::REACT
        } else {
            Self::WEBSITE
        }
    }
}

#[async_trait]
impl HttpClient for CannedHttpClient {
    async fn post_json(
        &self,
        url: &str,
        _headers: &[(&str, &str)],
        body: &serde_json::Value,
        _timeout: Duration,
    ) -> Result<HttpResponse> {
        let body = if url.ends_with("/api/generate") {
            let prompt = body.get("prompt").and_then(|p| p.as_str()).unwrap_or_default();
            serde_json::json!({ "response": Self::response_for(prompt) }).to_string()
        } else {
            "{}".to_string()
        };

        Ok(HttpResponse { status: 200, body })
    }
}
