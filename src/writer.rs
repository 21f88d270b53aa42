//! Materialises a generated project on disk.

use crate::project::GeneratedProject;
use anyhow::{anyhow, Result};
use std::fs;
use std::path::{Component, Path, PathBuf};
use tracing::info;

/// Resolves a project-relative path under `root`, refusing escapes.
fn resolve(root: &Path, relative: &str) -> Result<PathBuf> {
    let relative_path = Path::new(relative);

    if relative.is_empty() {
        return Err(anyhow!("Refusing to write file with empty path"));
    }

    let escapes = relative_path
        .components()
        .any(|c| !matches!(c, Component::Normal(_) | Component::CurDir));
    if escapes {
        return Err(anyhow!("Refusing to write outside the output directory: {}", relative));
    }

    Ok(root.join(relative_path))
}

/// Writes every file of `project` under `root` and returns the written paths.
///
/// # Errors
///
/// Returns an error if a file path is absolute or contains `..`, or if a
/// directory or file cannot be created. Paths are all checked before
/// anything is written.
pub fn write_project(project: &GeneratedProject, root: &Path) -> Result<Vec<PathBuf>> {
    let targets = project
        .files
        .iter()
        .map(|file| resolve(root, &file.path).map(|path| (path, file)))
        .collect::<Result<Vec<_>>>()?;

    let mut written = Vec::with_capacity(targets.len());
    for (path, file) in targets {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &file.content)?;
        info!("Wrote {}", path.display());
        written.push(path);
    }

    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::project::{GeneratedFile, LanguageTag, ProjectType};

    fn project_with(paths: &[&str]) -> GeneratedProject {
        GeneratedProject {
            files: paths
                .iter()
                .map(|path| GeneratedFile {
                    name: path.rsplit('/').next().unwrap_or(path).to_string(),
                    path: path.to_string(),
                    content: format!("// {}", path),
                    language: LanguageTag::from_file_name(path),
                })
                .collect(),
            project_structure: String::new(),
            start_command: String::new(),
            project_type: ProjectType::TsxReact,
        }
    }

    #[test]
    fn test_write_project_creates_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(&["package.json", "src/components/Header.jsx"]);

        let written = write_project(&project, dir.path()).unwrap();

        assert_eq!(written.len(), 2);
        let header = fs::read_to_string(dir.path().join("src/components/Header.jsx")).unwrap();
        assert_eq!(header, "// src/components/Header.jsx");
    }

    #[test]
    fn test_write_project_rejects_parent_traversal() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(&["ok.js", "../escape.js"]);

        let err = write_project(&project, dir.path()).unwrap_err();

        assert!(err.to_string().contains("outside the output directory"));
        assert!(!dir.path().join("ok.js").exists());
    }

    #[test]
    fn test_write_project_rejects_absolute_paths() {
        let dir = tempfile::tempdir().unwrap();
        let project = project_with(&["/etc/passwd"]);

        assert!(write_project(&project, dir.path()).is_err());
    }
}
