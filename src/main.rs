use clap::{Arg, Command};
use codeforge::config::Config;
use codeforge::error::GenerationError;
use codeforge::orchestrator::GenerationOrchestrator;
use codeforge::project::{GenerationRequest, GenerationResult};
use codeforge::writer;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let matches = Command::new("codeforge")
        .about("Generate a multi-file project from a prompt using a local model")
        .arg(Arg::new("prompt")
            .help("What to build, e.g. \"make todo app\"")
            .num_args(1..))
        .arg(Arg::new("type")
            .long("type")
            .short('t')
            .help("Project type: website, mern-app or tsx-react")
            .value_name("TYPE")
            .default_value("website"))
        .arg(Arg::new("output")
            .long("output")
            .short('o')
            .help("Write the project's files into this directory instead of printing JSON")
            .value_name("DIR")
            .value_parser(clap::value_parser!(PathBuf)))
        .arg(Arg::new("model-url")
            .long("model-url")
            .help("Inference endpoint base URL")
            .value_name("URL"))
        .arg(Arg::new("model")
            .long("model")
            .help("Model identifier")
            .value_name("NAME"))
        .arg(Arg::new("config")
            .long("config")
            .help("Show configuration information")
            .action(clap::ArgAction::SetTrue))
        .get_matches();

    let mut config = Config::load()?;
    if let Some(url) = matches.get_one::<String>("model-url") {
        config.model_url = url.clone();
    }
    if let Some(model) = matches.get_one::<String>("model") {
        config.model = model.clone();
    }

    if matches.get_flag("config") {
        config.show_config_info()?;
        return Ok(ExitCode::SUCCESS);
    }

    let prompt = matches
        .get_many::<String>("prompt")
        .unwrap_or_default()
        .map(|s| s.as_str())
        .collect::<Vec<_>>()
        .join(" ");
    let project_type = matches
        .get_one::<String>("type")
        .map(|s| s.as_str())
        .unwrap_or("website");

    let request = match GenerationRequest::new(&prompt, project_type) {
        Ok(request) => request,
        Err(err @ GenerationError::Validation(_)) => {
            eprintln!("{}", err);
            eprintln!("Use 'codeforge --help' for usage information.");
            return Ok(ExitCode::from(2));
        }
        Err(err) => return Err(err.into()),
    };

    info!("Processing request: {:?}", request);

    let orchestrator = GenerationOrchestrator::from_config(&config);
    let result = orchestrator
        .generate_code(&request.prompt, request.project_type, None)
        .await;

    if let GenerationResult::Failure { error, .. } = &result {
        eprintln!("Generation failed: {}", error);
    }

    match matches.get_one::<PathBuf>("output") {
        Some(dir) => {
            let project = result.project();
            let written = writer::write_project(project, dir)?;
            eprintln!("Wrote {} file(s) to {}", written.len(), dir.display());
            if !project.files.is_empty() {
                eprintln!("Next: {}", project.start_command);
            }
        }
        None => println!("{}", serde_json::to_string_pretty(&result)?),
    }

    Ok(if result.is_success() { ExitCode::SUCCESS } else { ExitCode::from(1) })
}
