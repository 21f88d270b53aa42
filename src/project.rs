//! Value types produced by the generation pipeline.
//!
//! A [`GenerationRequest`] is created per call and validated up front. The
//! pipeline hands back a [`GenerationResult`], which always carries a
//! renderable [`GeneratedProject`] whether generation succeeded or not.

use crate::error::GenerationError;
use chrono::{DateTime, Utc};
use serde::ser::SerializeStruct;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of project kinds a caller may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProjectType {
    /// Static HTML/CSS/JS site.
    #[serde(rename = "website")]
    Website,
    /// MERN stack application.
    #[serde(rename = "mern-app")]
    MernApp,
    /// React application (JavaScript/JSX).
    #[serde(rename = "tsx-react", alias = "jsx-react")]
    TsxReact,
}

impl ProjectType {
    pub const ALL: [ProjectType; 3] =
        [ProjectType::Website, ProjectType::MernApp, ProjectType::TsxReact];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectType::Website => "website",
            ProjectType::MernApp => "mern-app",
            ProjectType::TsxReact => "tsx-react",
        }
    }

    /// True for the React variants the prompt composer specialises for.
    pub fn is_react(&self) -> bool {
        matches!(self, ProjectType::TsxReact)
    }
}

impl fmt::Display for ProjectType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectType {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "website" => Ok(ProjectType::Website),
            "mern-app" => Ok(ProjectType::MernApp),
            "tsx-react" | "jsx-react" => Ok(ProjectType::TsxReact),
            other => Err(GenerationError::Validation(format!(
                "Invalid type '{}'. Expected one of: website, mern-app, tsx-react",
                other
            ))),
        }
    }
}

/// Language tag derived from a file's extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageTag {
    Html,
    Css,
    Javascript,
    Jsx,
    Json,
    Plaintext,
}

impl LanguageTag {
    /// Maps the last dot-delimited extension of `file_name` to a tag.
    pub fn from_file_name(file_name: &str) -> Self {
        let extension = file_name
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
            .unwrap_or_default();

        match extension.as_str() {
            "js" => LanguageTag::Javascript,
            "jsx" => LanguageTag::Jsx,
            "html" => LanguageTag::Html,
            "css" => LanguageTag::Css,
            "json" => LanguageTag::Json,
            _ => LanguageTag::Plaintext,
        }
    }

    pub fn is_script(&self) -> bool {
        matches!(self, LanguageTag::Javascript | LanguageTag::Jsx)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratedFile {
    pub name: String,
    pub path: String,
    pub content: String,
    pub language: LanguageTag,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedProject {
    /// Files in the order the model emitted them.
    pub files: Vec<GeneratedFile>,
    pub project_structure: String,
    pub start_command: String,
    #[serde(rename = "type")]
    pub project_type: ProjectType,
}

/// A validated generation request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    pub prompt: String,
    pub project_type: ProjectType,
}

impl GenerationRequest {
    /// Validates raw caller input before any external call is made.
    pub fn new(prompt: &str, project_type: &str) -> Result<Self, GenerationError> {
        if prompt.trim().is_empty() {
            return Err(GenerationError::Validation("Prompt is required".to_string()));
        }

        Ok(Self {
            prompt: prompt.to_string(),
            project_type: project_type.parse()?,
        })
    }
}

/// Outcome of one pass through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub enum GenerationResult {
    Success {
        data: GeneratedProject,
        model: String,
        generated_at: DateTime<Utc>,
    },
    Failure {
        error: String,
        fallback: GeneratedProject,
    },
}

// Callers consume the result as `{"success": bool, ...}`.
impl Serialize for GenerationResult {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match self {
            GenerationResult::Success {
                data,
                model,
                generated_at,
            } => {
                let mut state = serializer.serialize_struct("GenerationResult", 4)?;
                state.serialize_field("success", &true)?;
                state.serialize_field("data", data)?;
                state.serialize_field("model", model)?;
                state.serialize_field("generatedAt", generated_at)?;
                state.end()
            }
            GenerationResult::Failure { error, fallback } => {
                let mut state = serializer.serialize_struct("GenerationResult", 3)?;
                state.serialize_field("success", &false)?;
                state.serialize_field("error", error)?;
                state.serialize_field("fallback", fallback)?;
                state.end()
            }
        }
    }
}

impl GenerationResult {
    pub fn success(data: GeneratedProject, model: &str, generated_at: DateTime<Utc>) -> Self {
        GenerationResult::Success {
            data,
            model: model.to_string(),
            generated_at,
        }
    }

    pub fn failure(error: impl Into<String>, fallback: GeneratedProject) -> Self {
        GenerationResult::Failure {
            error: error.into(),
            fallback,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success { .. })
    }

    /// The project a caller should render: the generated one, or the fallback.
    pub fn project(&self) -> &GeneratedProject {
        match self {
            GenerationResult::Success { data, .. } => data,
            GenerationResult::Failure { fallback, .. } => fallback,
        }
    }
}
