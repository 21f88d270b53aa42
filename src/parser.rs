//! Recovers named files from the model's free-text output.
//!
//! The strict strategy splits on `---FILE: <name>---` delimiters and expects
//! an even number of (name, content) tokens. Leading prose makes the count
//! odd, so such responses are handed to the line-scanning recovery strategy
//! instead. A final delimiter with nothing after it still pairs up, with
//! empty content.

use crate::assembler;
use crate::project::{GeneratedFile, GeneratedProject, ProjectType};
use crate::repair::ContentRepairer;
use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, warn};

const DELIMITER_PREFIX: &str = "---FILE:";
const DELIMITER_SUFFIX: &str = "---";

static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"---FILE:\s*(.+?)\s*---").unwrap());

/// A file segment before repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFile {
    pub name: String,
    pub content: String,
}

impl RawFile {
    fn new(name: &str, content: &str) -> Self {
        Self {
            name: name.trim().to_string(),
            content: content.trim().to_string(),
        }
    }
}

/// Splits on delimiters; `None` when the token sequence does not pair up.
pub fn split_strict(raw: &str) -> Option<Vec<RawFile>> {
    let mut tokens: Vec<&str> = Vec::new();
    let mut last_end = 0;
    let mut seen_delimiter = false;

    for caps in DELIMITER.captures_iter(raw) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        let before = &raw[last_end..whole.start()];
        // only blank text ahead of the first delimiter is dropped; later
        // content tokens stay even when empty so names keep their positions
        if seen_delimiter || !before.trim().is_empty() {
            tokens.push(before);
        }
        tokens.push(name.as_str());
        last_end = whole.end();
        seen_delimiter = true;
    }
    let rest = &raw[last_end..];
    if seen_delimiter || !rest.trim().is_empty() {
        tokens.push(rest);
    }

    if tokens.len() % 2 != 0 {
        return None;
    }

    Some(
        tokens
            .chunks(2)
            .map(|pair| RawFile::new(pair[0], pair[1]))
            .collect(),
    )
}

/// Returns the file name if `line` is a whole delimiter line.
fn delimiter_name(line: &str) -> Option<&str> {
    line.trim()
        .strip_prefix(DELIMITER_PREFIX)?
        .strip_suffix(DELIMITER_SUFFIX)
        .map(str::trim)
}

/// Scans line by line; a trailing open file is kept rather than dropped.
pub fn recover_lines(raw: &str) -> Vec<RawFile> {
    let mut files = Vec::new();
    let mut current: Option<(&str, Vec<&str>)> = None;

    for line in raw.lines() {
        match delimiter_name(line) {
            Some(name) => {
                if let Some((open_name, lines)) = current.take() {
                    files.push(RawFile::new(open_name, &lines.join("\n")));
                }
                if !name.is_empty() {
                    current = Some((name, Vec::new()));
                }
            }
            None => {
                if let Some((_, lines)) = current.as_mut() {
                    lines.push(line);
                }
            }
        }
    }

    if let Some((open_name, lines)) = current {
        files.push(RawFile::new(open_name, &lines.join("\n")));
    }

    files
}

pub struct ResponseParser {
    repairer: ContentRepairer,
}

impl ResponseParser {
    pub fn new() -> Self {
        Self::with_repairer(ContentRepairer::new())
    }

    pub fn with_repairer(repairer: ContentRepairer) -> Self {
        Self { repairer }
    }

    /// Parses raw model text into a project.
    ///
    /// Zero files is a valid outcome here; the caller decides whether that
    /// counts as a failure.
    pub fn parse(&self, raw: &str, project_type: ProjectType) -> GeneratedProject {
        let raw_files = match split_strict(raw) {
            Some(files) => files,
            None => {
                warn!("Incomplete response detected. Using recovery parser.");
                recover_lines(raw)
            }
        };

        let files: Vec<GeneratedFile> = raw_files
            .into_iter()
            .filter(|file| !file.name.is_empty())
            .map(|file| self.build_file(file, project_type))
            .collect();

        debug!("Parsed {} file(s) for {}", files.len(), project_type);

        GeneratedProject {
            files,
            project_structure: assembler::structure_text(project_type),
            start_command: assembler::start_command(project_type),
            project_type,
        }
    }

    fn build_file(&self, raw: RawFile, project_type: ProjectType) -> GeneratedFile {
        let (content, language) = self.repairer.repair(&raw.name, &raw.content);
        GeneratedFile {
            path: assembler::assign_path(&raw.name, project_type),
            name: raw.name,
            content,
            language,
        }
    }
}

impl Default for ResponseParser {
    fn default() -> Self {
        Self::new()
    }
}
