//! Prompt construction for the code-generation model.
//!
//! A short user prompt is first expanded into a fuller task description, then
//! wrapped into the system/user prompt pair that establishes the file
//! delimiter protocol the parser relies on.

use crate::project::ProjectType;

/// Delimiter line preceding every file in the model's output.
pub const FILE_DELIMITER_FORMAT: &str = "---FILE: filename---";

const WEBSITE_DIRECTIVE_MARKER: &str = "vanilla HTML";
const WEBSITE_DIRECTIVE: &str = " Implement using clean, semantic vanilla HTML, CSS, and JavaScript.";
const REACT_DIRECTIVE_MARKER: &str = "JavaScript/JSX";
const REACT_DIRECTIVE: &str = " Ensure all components use JavaScript/JSX and modern React best practices.";

/// Canned elaborations keyed by normalised prompt.
const ELABORATIONS: &[(&str, &str)] = &[
    (
        "make todo app",
        "A feature-rich To-Do list application with the ability to add, delete, and mark tasks as complete. Use local storage to save tasks.",
    ),
    (
        "create login page",
        "A professional, fully responsive login and registration form component with client-side validation.",
    ),
    (
        "build portfolio",
        "A single-page developer portfolio with Hero, Projects, Skills, and Contact sections.",
    ),
    (
        "generate ecommerce homepage",
        "A clean, modern e-commerce homepage with featured products, navigation, and footer.",
    ),
];

fn base_prompt() -> String {
    format!(
        "You are an expert web developer. Generate production-ready code with ONLY code output - no explanations or markdown.\n\
         Use file delimiter format: {}",
        FILE_DELIMITER_FORMAT
    )
}

/// Expands `user_prompt` and appends the type directive at most once.
pub fn expand(user_prompt: &str, project_type: ProjectType) -> String {
    let key = user_prompt.trim().to_lowercase();
    let mut expanded = ELABORATIONS
        .iter()
        .find(|(prompt, _)| *prompt == key)
        .map(|(_, elaboration)| elaboration.to_string())
        .unwrap_or_else(|| user_prompt.to_string());

    match project_type {
        ProjectType::Website if !expanded.contains(WEBSITE_DIRECTIVE_MARKER) => {
            expanded.push_str(WEBSITE_DIRECTIVE);
        }
        ProjectType::TsxReact if !expanded.contains(REACT_DIRECTIVE_MARKER) => {
            expanded.push_str(REACT_DIRECTIVE);
        }
        _ => {}
    }

    expanded.trim().to_string()
}

/// Builds the instruction block establishing the output protocol.
///
/// `mern-app` has no dedicated file-set hint and receives the base block.
pub fn system_prompt(project_type: ProjectType) -> String {
    let base = base_prompt();

    match project_type {
        ProjectType::Website => format!(
            "{base}
Generate complete HTML/CSS/JavaScript website.
Format:
---FILE: index.html---
[complete HTML code]
---FILE: styles.css---
[complete CSS code]
---FILE: script.js---
[complete JavaScript code]

Requirements:
- Fully responsive design
- Modern animations and transitions
- Professional UI/UX
- No external CDN dependencies
- Inline all styles
- Self-contained JavaScript"
        ),
        ProjectType::TsxReact => format!(
            "{base}
Generate JavaScript/JSX React application files.
Format:
---FILE: package.json---
[package.json with dependencies]
---FILE: App.jsx---
[main App component]
---FILE: components/Header.jsx---
[component code]
---FILE: styles/App.css---
[CSS styles]

Requirements:
- Use React hooks (useState, useEffect)
- JavaScript/JSX (NOT TypeScript)
- Responsive design
- Modern component structure"
        ),
        ProjectType::MernApp => base,
    }
}

/// Wraps the expanded prompt in a short imperative framing.
pub fn user_prompt(expanded_prompt: &str, project_type: ProjectType) -> String {
    match project_type {
        ProjectType::Website => format!("Create a website: {}", expanded_prompt),
        ProjectType::TsxReact => {
            format!("Create a React app using JavaScript/JSX: {}", expanded_prompt)
        }
        ProjectType::MernApp => format!("Create an app: {}", expanded_prompt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_uses_canned_elaboration() {
        let expanded = expand("  Make Todo App ", ProjectType::Website);
        assert!(expanded.starts_with("A feature-rich To-Do list application"));
        assert!(expanded.ends_with("vanilla HTML, CSS, and JavaScript."));
    }

    #[test]
    fn test_expand_passes_unknown_prompt_through() {
        let expanded = expand("a weather dashboard", ProjectType::MernApp);
        assert_eq!(expanded, "a weather dashboard");
    }

    #[test]
    fn test_expand_is_idempotent_for_directive() {
        for project_type in ProjectType::ALL {
            let once = expand("a pomodoro timer", project_type);
            let twice = expand(&once, project_type);
            assert_eq!(once, twice, "directive duplicated for {}", project_type);
        }
    }

    #[test]
    fn test_expand_skips_directive_already_present() {
        let prompt = "A landing page in vanilla HTML only";
        assert_eq!(expand(prompt, ProjectType::Website), prompt);

        let prompt = "A chat UI written in JavaScript/JSX";
        assert_eq!(expand(prompt, ProjectType::TsxReact), prompt);
    }

    #[test]
    fn test_system_prompt_contains_delimiter_protocol() {
        for project_type in ProjectType::ALL {
            assert!(system_prompt(project_type).contains("---FILE: filename---"));
        }
    }

    #[test]
    fn test_system_prompt_file_hints_per_type() {
        let website = system_prompt(ProjectType::Website);
        assert!(website.contains("---FILE: index.html---"));
        assert!(website.contains("---FILE: styles.css---"));
        assert!(website.contains("---FILE: script.js---"));

        let react = system_prompt(ProjectType::TsxReact);
        assert!(react.contains("---FILE: package.json---"));
        assert!(react.contains("---FILE: App.jsx---"));

        let mern = system_prompt(ProjectType::MernApp);
        assert_eq!(mern, base_prompt());
        assert!(!mern.contains("index.html"));
    }

    #[test]
    fn test_user_prompt_framing() {
        assert_eq!(user_prompt("x", ProjectType::Website), "Create a website: x");
        assert_eq!(
            user_prompt("x", ProjectType::TsxReact),
            "Create a React app using JavaScript/JSX: x"
        );
        assert_eq!(user_prompt("x", ProjectType::MernApp), "Create an app: x");
    }
}
