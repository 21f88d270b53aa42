//! Project layout: file paths, the display tree and the start command.

use crate::project::ProjectType;

/// Maps a file name to its project-relative path.
///
/// React projects get a conventional `src/` layout; `package.json` and names
/// that already carry a `src/` segment stay where they are.
pub fn assign_path(file_name: &str, project_type: ProjectType) -> String {
    if !project_type.is_react() {
        return file_name.to_string();
    }

    let is_manifest = file_name.rsplit('/').next() == Some("package.json");
    let has_src_segment = file_name.starts_with("src/") || file_name.contains("/src/");

    if is_manifest || has_src_segment {
        file_name.to_string()
    } else {
        format!("src/{}", file_name)
    }
}

/// Illustrative directory tree for the project type.
///
/// This is a display hint and does not list the generated files.
pub fn structure_text(project_type: ProjectType) -> String {
    match project_type {
        ProjectType::Website => {
            "project/\n├── index.html\n├── styles.css\n└── script.js".to_string()
        }
        _ => {
            "project/\n├── package.json\n├── App.jsx\n├── components/\n└── styles/".to_string()
        }
    }
}

pub fn start_command(project_type: ProjectType) -> String {
    match project_type {
        ProjectType::Website => "Open index.html in your browser".to_string(),
        _ => "npm install && npm start".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_website_paths_are_unchanged() {
        assert_eq!(assign_path("index.html", ProjectType::Website), "index.html");
        assert_eq!(assign_path("css/site.css", ProjectType::Website), "css/site.css");
    }

    #[test]
    fn test_react_paths_are_prefixed_with_src() {
        assert_eq!(assign_path("App.jsx", ProjectType::TsxReact), "src/App.jsx");
        assert_eq!(
            assign_path("components/Header.jsx", ProjectType::TsxReact),
            "src/components/Header.jsx"
        );
    }

    #[test]
    fn test_react_manifest_and_src_paths_are_kept() {
        assert_eq!(assign_path("package.json", ProjectType::TsxReact), "package.json");
        assert_eq!(assign_path("src/index.jsx", ProjectType::TsxReact), "src/index.jsx");
        assert_eq!(
            assign_path("client/src/main.jsx", ProjectType::TsxReact),
            "client/src/main.jsx"
        );
    }

    #[test]
    fn test_mern_paths_are_unchanged() {
        assert_eq!(assign_path("server.js", ProjectType::MernApp), "server.js");
    }

    #[test]
    fn test_structure_and_start_command_per_type() {
        assert!(structure_text(ProjectType::Website).contains("└── script.js"));
        assert!(structure_text(ProjectType::TsxReact).contains("package.json"));
        assert_eq!(structure_text(ProjectType::MernApp), structure_text(ProjectType::TsxReact));

        assert_eq!(start_command(ProjectType::Website), "Open index.html in your browser");
        assert_eq!(start_command(ProjectType::MernApp), "npm install && npm start");
    }
}
