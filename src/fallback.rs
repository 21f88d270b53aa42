//! Constant projects substituted when generation fails.

use crate::assembler;
use crate::project::{GeneratedFile, GeneratedProject, LanguageTag, ProjectType};

const FALLBACK_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>Your Website</title>
  <link rel="stylesheet" href="styles.css">
</head>
<body>
  <header>
    <h1>Welcome</h1>
  </header>
  <main>
    <h2>Your content here</h2>
  </main>
  <script src="script.js"></script>
</body>
</html>"#;

const FALLBACK_CSS: &str = r#"* {
  margin: 0;
  padding: 0;
  box-sizing: border-box;
}

body {
  font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto;
  background: #f5f5f5;
}

header {
  background: #333;
  color: white;
  padding: 20px;
}

main {
  max-width: 1000px;
  margin: 20px auto;
  padding: 20px;
}"#;

const FALLBACK_JS: &str = "console.log('Website loaded successfully');";

fn file(name: &str, content: &str, language: LanguageTag) -> GeneratedFile {
    GeneratedFile {
        name: name.to_string(),
        path: name.to_string(),
        content: content.to_string(),
        language,
    }
}

/// Returns the in-process fallback for `project_type`.
///
/// Websites get a three-file static site; other types get no files.
pub fn fallback(project_type: ProjectType) -> GeneratedProject {
    let files = match project_type {
        ProjectType::Website => vec![
            file("index.html", FALLBACK_HTML, LanguageTag::Html),
            file("styles.css", FALLBACK_CSS, LanguageTag::Css),
            file("script.js", FALLBACK_JS, LanguageTag::Javascript),
        ],
        _ => Vec::new(),
    };

    GeneratedProject {
        files,
        project_structure: assembler::structure_text(project_type),
        start_command: assembler::start_command(project_type),
        project_type,
    }
}
