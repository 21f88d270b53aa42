//! The single entry point tying the pipeline stages together.
//!
//! One call makes exactly one pass through compose, infer and parse. Retries
//! live inside [`InferenceClient`]; every stage failure becomes a
//! [`GenerationResult::Failure`] carrying the fallback project.

use crate::config::{Config, InferenceConfig};
use crate::error::GenerationError;
use crate::fallback;
use crate::http_client::CannedHttpClient;
use crate::inference::InferenceClient;
use crate::parser::ResponseParser;
use crate::process::SystemProcessRunner;
use crate::project::{GeneratedProject, GenerationResult, ProjectType};
use crate::prompt;
use crate::providers::{Clock, SystemClock};
use std::sync::Arc;
use tracing::{debug, error, info};

/// Characters of raw output logged when nothing could be parsed.
const RAW_PREVIEW_CHARS: usize = 500;

pub struct GenerationOrchestrator {
    client: InferenceClient,
    parser: ResponseParser,
    clock: Box<dyn Clock>,
}

impl GenerationOrchestrator {
    pub fn new(config: InferenceConfig) -> Self {
        Self::with_deps(InferenceClient::new(config), ResponseParser::new(), Box::new(SystemClock))
    }

    /// Builds the orchestrator from loaded configuration, honouring mock mode.
    pub fn from_config(config: &Config) -> Self {
        if config.is_mock_mode() {
            info!("Using canned model responses (CODEFORGE_USE_MOCK)");
            let client = InferenceClient::with_deps(
                config.inference(),
                Arc::new(CannedHttpClient),
                Arc::new(SystemProcessRunner),
            );
            return Self::with_deps(client, ResponseParser::new(), Box::new(SystemClock));
        }
        Self::new(config.inference())
    }

    /// Creates an orchestrator with injected stages (for testing).
    pub fn with_deps(
        client: InferenceClient,
        parser: ResponseParser,
        clock: Box<dyn Clock>,
    ) -> Self {
        Self { client, parser, clock }
    }

    /// Generates a project for an already validated prompt and type.
    ///
    /// Never fails: errors are reported as [`GenerationResult::Failure`].
    pub async fn generate_code(
        &self,
        prompt: &str,
        project_type: ProjectType,
        user_id: Option<&str>,
    ) -> GenerationResult {
        info!("Generating {} for user: {}", project_type, user_id.unwrap_or("anonymous"));

        match self.run_pipeline(prompt, project_type).await {
            Ok(project) => {
                info!("Generated {} file(s)", project.files.len());
                GenerationResult::success(project, &self.client.config().model, self.clock.now())
            }
            Err(err) => {
                error!("Generation error: {}", err);
                GenerationResult::failure(err.to_string(), fallback::fallback(project_type))
            }
        }
    }

    async fn run_pipeline(
        &self,
        user_prompt: &str,
        project_type: ProjectType,
    ) -> Result<GeneratedProject, GenerationError> {
        debug!("Composing prompts");
        let expanded = prompt::expand(user_prompt, project_type);
        info!("Expanded prompt: {}", expanded.chars().take(150).collect::<String>());
        let system_prompt = prompt::system_prompt(project_type);
        let user_prompt = prompt::user_prompt(&expanded, project_type);

        debug!("Inferring");
        let raw = self.client.call(&system_prompt, &user_prompt).await?;

        debug!("Parsing {} chars of model output", raw.len());
        let project = self.parser.parse(&raw, project_type);

        if project.files.is_empty() {
            let preview: String = raw.chars().take(RAW_PREVIEW_CHARS).collect();
            error!("Raw AI response (first {} chars):\n{}", RAW_PREVIEW_CHARS, preview);
            return Err(GenerationError::Parse(
                "Failed to parse generated code. Check the response format.".to_string(),
            ));
        }

        Ok(project)
    }
}
