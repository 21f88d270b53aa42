use anyhow::{anyhow, Result};
use dirs::home_dir;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{info, warn};

/// Generation parameters forwarded unchanged to the model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingParams {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
    pub repeat_penalty: f64,
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self {
            temperature: 0.7,
            top_p: 0.9,
            top_k: 40,
            repeat_penalty: 1.1,
        }
    }
}

/// Immutable client configuration handed to the pipeline at construction.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceConfig {
    pub model_url: String,
    pub model: String,
    /// Applies to each individual attempt, network or subprocess.
    pub timeout: Duration,
    /// Number of network attempts before the subprocess fallback.
    pub max_retries: u32,
    pub retry_delay: Duration,
    pub probe_timeout: Duration,
    pub runner_program: String,
    pub max_output_bytes: usize,
    pub sampling: SamplingParams,
}

impl Default for InferenceConfig {
    fn default() -> Self {
        Config::default().inference()
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub model_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub max_retries: u32,
    pub retry_delay_ms: u64,
    pub probe_timeout_secs: u64,
    pub runner_program: String,
    pub max_output_bytes: usize,
    pub sampling: SamplingParams,
    pub use_mock: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_url: "http://localhost:11434".to_string(),
            model: "deepseek-coder:6.7b".to_string(),
            timeout_secs: 300,
            max_retries: 3,
            retry_delay_ms: 2000,
            probe_timeout_secs: 5,
            runner_program: "ollama".to_string(),
            max_output_bytes: 10 * 1024 * 1024,
            sampling: SamplingParams::default(),
            use_mock: false,
        }
    }
}

impl Config {
    /// Load configuration from file, environment variables, or create default
    pub fn load() -> Result<Self> {
        let mut config = Self::get_config_path()
            .and_then(|path| Self::load_from_path(&path))
            .unwrap_or_else(|_| {
                info!("No config file found, using defaults");
                Self::default()
            });

        // Environment variables override config file
        config.apply_env_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(anyhow!("Config file not found"));
        }
        let content = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        info!("Loaded config from: {}", path.display());
        Ok(config)
    }

    /// Applies `AI_MODEL_*` and `CODEFORGE_*` overrides resolved by `lookup`.
    pub fn apply_env_overrides<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup("AI_MODEL_API_URL") {
            self.model_url = url;
        }

        if let Some(model) = lookup("AI_MODEL_TYPE") {
            self.model = model;
        }

        if let Some(raw) = lookup("CODEFORGE_TIMEOUT_SECS") {
            match raw.parse() {
                Ok(secs) => self.timeout_secs = secs,
                Err(_) => warn!("Ignoring invalid CODEFORGE_TIMEOUT_SECS: {}", raw),
            }
        }

        if let Some(raw) = lookup("CODEFORGE_MAX_RETRIES") {
            match raw.parse() {
                Ok(retries) => self.max_retries = retries,
                Err(_) => warn!("Ignoring invalid CODEFORGE_MAX_RETRIES: {}", raw),
            }
        }

        if lookup("CODEFORGE_USE_MOCK").is_some() {
            self.use_mock = true;
        }
    }

    pub fn get_config_path() -> Result<PathBuf> {
        Ok(Self::get_config_dir()?.join("config.toml"))
    }

    pub fn get_config_dir() -> Result<PathBuf> {
        let home = home_dir().ok_or_else(|| anyhow!("Could not find home directory"))?;
        Ok(home.join(".codeforge"))
    }

    pub fn is_mock_mode(&self) -> bool {
        self.use_mock
    }

    /// Snapshot of the client settings; the pipeline never reads `Config` itself.
    pub fn inference(&self) -> InferenceConfig {
        InferenceConfig {
            model_url: self.model_url.trim_end_matches('/').to_string(),
            model: self.model.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
            max_retries: self.max_retries,
            retry_delay: Duration::from_millis(self.retry_delay_ms),
            probe_timeout: Duration::from_secs(self.probe_timeout_secs),
            runner_program: self.runner_program.clone(),
            max_output_bytes: self.max_output_bytes,
            sampling: self.sampling.clone(),
        }
    }

    pub fn show_config_info(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;
        println!("Configuration file: {}", config_path.display());
        println!(
            "Status: {}",
            if config_path.exists() { "Found" } else { "Not found (using defaults)" }
        );
        println!("Model endpoint: {}", self.model_url);
        println!("Model: {}", self.model);
        println!("Timeout: {}s per attempt", self.timeout_secs);
        println!("Network attempts: {} ({}ms apart)", self.max_retries, self.retry_delay_ms);
        println!("Local runner: {}", self.runner_program);
        println!("Mock mode: {}", self.use_mock);

        println!("\nTo point at another endpoint:");
        println!("  export AI_MODEL_API_URL=http://host:11434");
        println!("  export AI_MODEL_TYPE=<model-name>");

        Ok(())
    }
}
