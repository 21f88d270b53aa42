//! Codeforge - prompt-to-project code generation library.
//!
//! This library turns a natural-language prompt and a project type into a
//! multi-file project by asking a locally hosted model (an Ollama-compatible
//! endpoint) for source code and recovering structure from its free-text
//! output.
//!
//! # Architecture
//!
//! Data flows strictly forward through these modules:
//!
//! - [`prompt`] - Prompt expansion and the system/user prompt pair
//! - [`inference`] - Retrying client over HTTP with a local-process fallback
//! - [`parser`] - Strict delimiter split with a line-scanning recovery parser
//! - [`repair`] - Per-file language detection and structural repair
//! - [`assembler`] - Project paths, directory tree and start command
//! - [`fallback`] - Always-valid projects used when generation fails
//! - [`orchestrator`] - The single `generate_code` entry point
//!
//! Supporting modules:
//!
//! - [`project`] - Request and result value types
//! - [`config`] - Configuration management (endpoint, model, retry policy)
//! - [`error`] - Error taxonomy
//! - [`http_client`] - HTTP client abstraction
//! - [`process`] - Subprocess abstraction
//! - [`providers`] - Shared dependency injection traits
//! - [`writer`] - Writes a generated project to disk
//!
//! # Example
//!
//! ```ignore
//! use codeforge::config::Config;
//! use codeforge::orchestrator::GenerationOrchestrator;
//! use codeforge::project::GenerationRequest;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     let orchestrator = GenerationOrchestrator::from_config(&config);
//!
//!     let request = GenerationRequest::new("make todo app", "website")?;
//!     let result = orchestrator
//!         .generate_code(&request.prompt, request.project_type, None)
//!         .await;
//!
//!     // Success or not, there is always something to render.
//!     for file in &result.project().files {
//!         println!("{} ({:?})", file.path, file.language);
//!     }
//!     Ok(())
//! }
//! ```

pub mod assembler;
pub mod config;
pub mod error;
pub mod fallback;
pub mod http_client;
pub mod inference;
pub mod orchestrator;
pub mod parser;
pub mod process;
pub mod project;
pub mod prompt;
pub mod providers;
pub mod repair;
pub mod writer;
