//! Inference client with bounded retries across two transports.
//!
//! The network endpoint (`POST {model_url}/api/generate`) is tried up to
//! `max_retries` times. A 400 or 404 stops the loop early. Once the network
//! attempts are exhausted the model is invoked once as a local subprocess.

use crate::config::InferenceConfig;
use crate::error::InferenceError;
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::process::{ProcessRunner, SystemProcessRunner};
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, error, info, warn};

const JSON_HEADERS: &[(&str, &str)] = &[("Content-Type", "application/json")];

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    response: String,
}

pub struct InferenceClient {
    config: InferenceConfig,
    http: Arc<dyn HttpClient>,
    runner: Arc<dyn ProcessRunner>,
}

impl InferenceClient {
    /// Creates a client using reqwest and real subprocesses.
    pub fn new(config: InferenceConfig) -> Self {
        Self::with_deps(config, Arc::new(ReqwestHttpClient::new()), Arc::new(SystemProcessRunner))
    }

    /// Creates a client with injected transports (for testing).
    pub fn with_deps(
        config: InferenceConfig,
        http: Arc<dyn HttpClient>,
        runner: Arc<dyn ProcessRunner>,
    ) -> Self {
        Self { config, http, runner }
    }

    pub fn config(&self) -> &InferenceConfig {
        &self.config
    }

    /// Sends the prompt pair to the model and returns its raw text.
    ///
    /// # Errors
    ///
    /// Returns the subprocess error when every network attempt and the
    /// subprocess fallback failed, or [`InferenceError::EmptyResponse`] when
    /// a transport succeeded with no text.
    pub async fn call(
        &self,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, InferenceError> {
        let full_prompt = format!("{}\n\nUser Request: {}", system_prompt, user_prompt);

        let text = match self.call_http(&full_prompt).await {
            Ok(text) => text,
            Err(err) => {
                warn!("HTTP transport exhausted: {}", err);
                info!("Falling back to local model runner");
                self.call_runner(&full_prompt).await?
            }
        };

        if text.trim().is_empty() {
            return Err(InferenceError::EmptyResponse);
        }
        Ok(text)
    }

    fn request_body(&self, prompt: &str) -> Value {
        let sampling = &self.config.sampling;
        json!({
            "model": self.config.model,
            "prompt": prompt,
            "stream": false,
            "temperature": sampling.temperature,
            "top_p": sampling.top_p,
            "top_k": sampling.top_k,
            "repeat_penalty": sampling.repeat_penalty,
        })
    }

    async fn call_http(&self, prompt: &str) -> Result<String, InferenceError> {
        let url = format!("{}/api/generate", self.config.model_url);
        let body = self.request_body(prompt);
        let max_retries = self.config.max_retries;
        let mut last_error = None;

        for attempt in 1..=max_retries {
            info!("Attempting HTTP API call (attempt {}/{})", attempt, max_retries);

            if attempt == 1 {
                self.spawn_model_probe();
            }

            match self.generate_once(&url, &body).await {
                Ok(text) => {
                    info!("HTTP API response received on attempt {}", attempt);
                    return Ok(text);
                }
                Err(err) if err.is_permanent() => {
                    error!("{}. Stopping retries.", err);
                    last_error = Some(err);
                    break;
                }
                Err(err) => {
                    warn!("HTTP API failed on attempt {}: {}", attempt, err);
                    last_error = Some(err);
                    if attempt < max_retries {
                        tokio::time::sleep(self.config.retry_delay).await;
                    }
                }
            }
        }

        Err(last_error.unwrap_or_else(|| {
            InferenceError::Transport("no network attempts configured".to_string())
        }))
    }

    async fn generate_once(&self, url: &str, body: &Value) -> Result<String, InferenceError> {
        let response = self
            .http
            .post_json(url, JSON_HEADERS, body, self.config.timeout)
            .await
            .map_err(|err| match err.downcast_ref::<reqwest::Error>() {
                Some(e) if e.is_timeout() => InferenceError::Timeout(self.config.timeout),
                _ => InferenceError::Transport(format!("{:#}", err)),
            })?;

        if !response.is_success() {
            return Err(InferenceError::Status {
                status: response.status,
                url: url.to_string(),
                body: response.body,
            });
        }

        let parsed: GenerateResponse = serde_json::from_str(&response.body)
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;
        Ok(parsed.response)
    }

    /// Fires the availability probe without waiting on it.
    fn spawn_model_probe(&self) {
        let http = Arc::clone(&self.http);
        let url = format!("{}/api/show", self.config.model_url);
        let model = self.config.model.clone();
        let timeout = self.config.probe_timeout;

        tokio::spawn(async move {
            debug!("Checking model status at: {}", url);
            let body = json!({ "name": model });
            match http.post_json(&url, JSON_HEADERS, &body, timeout).await {
                Ok(response) if response.is_success() => {
                    info!("Model '{}' is available via HTTP API", model);
                }
                Ok(response) => {
                    warn!("Model status check failed for '{}' (status {})", model, response.status);
                }
                Err(err) => {
                    warn!("Model status check failed for '{}' (network/timeout: {})", model, err);
                }
            }
        });
    }

    async fn call_runner(&self, prompt: &str) -> Result<String, InferenceError> {
        let program = self.config.runner_program.as_str();
        if !self.runner.program_exists(program) {
            error!("All endpoints failed: '{}' is not installed", program);
            return Err(InferenceError::RunnerMissing(program.to_string()));
        }

        let args = ["run", self.config.model.as_str(), prompt];
        info!("Executing {} run {} ({} prompt chars)", program, self.config.model, prompt.len());

        let output = self
            .runner
            .run(program, &args, self.config.timeout)
            .await
            .map_err(|e| InferenceError::Runner(format!("{:#}", e)))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!("All endpoints failed: {} exited with {}", program, output.status);
            return Err(InferenceError::Runner(format!(
                "{} exited with {}: {}",
                program,
                output.status,
                stderr.trim()
            )));
        }

        if output.stdout.len() > self.config.max_output_bytes {
            return Err(InferenceError::OutputTooLarge(self.config.max_output_bytes));
        }

        info!("Local runner response received");
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}
