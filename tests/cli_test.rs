use anyhow::Result;
use std::path::Path;
use std::process::{Command, Output};

/// Helper to run codeforge commands and capture output
fn run_codeforge(args: &[&str], home: &Path) -> Result<Output> {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_codeforge"));
    cmd.args(args);

    // Canned model responses for deterministic testing
    cmd.env("CODEFORGE_USE_MOCK", "1");
    cmd.env("HOME", home);
    cmd.env_remove("AI_MODEL_API_URL");

    Ok(cmd.output()?)
}

#[test]
fn test_website_generation_prints_success_json() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = run_codeforge(&["make", "todo", "app"], home.path())?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));

    let json: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(json["success"], true);
    assert_eq!(json["data"]["type"], "website");
    let names: Vec<&str> = json["data"]["files"]
        .as_array()
        .unwrap()
        .iter()
        .map(|f| f["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["index.html", "styles.css", "script.js"]);
    assert!(json["generatedAt"].is_string());

    Ok(())
}

#[test]
fn test_react_generation_writes_src_layout() -> Result<()> {
    let home = tempfile::tempdir()?;
    let out = tempfile::tempdir()?;
    let out_arg = out.path().to_string_lossy().to_string();

    let output = run_codeforge(
        &["counter", "--type", "tsx-react", "--output", &out_arg],
        home.path(),
    )?;

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    assert!(out.path().join("package.json").exists());
    assert!(out.path().join("src/App.jsx").exists());
    assert!(out.path().join("src/styles/App.css").exists());

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("npm install && npm start"));

    Ok(())
}

#[test]
fn test_invalid_type_exits_with_validation_error() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = run_codeforge(&["make todo app", "--type", "flutter"], home.path())?;

    assert_eq!(output.status.code(), Some(2));
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("Invalid type 'flutter'"));
    assert!(output.stdout.is_empty());

    Ok(())
}

#[test]
fn test_missing_prompt_exits_with_validation_error() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = run_codeforge(&[], home.path())?;

    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Prompt is required"));

    Ok(())
}

#[test]
fn test_show_config() -> Result<()> {
    let home = tempfile::tempdir()?;
    let output = run_codeforge(&["--config", "--model", "llama3"], home.path())?;

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Model: llama3"));
    assert!(stdout.contains("Mock mode: true"));

    Ok(())
}
