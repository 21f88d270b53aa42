//! Per-file structural repair of model output.
//!
//! Repairs are additive: missing HTML skeleton pieces and closing braces are
//! inserted, model artefacts are stripped from scripts, and every file is
//! re-indented. None of this understands the language being repaired; the
//! brace and indentation passes sit behind [`SourceFormatter`] so a real
//! lexer can replace them per language.

use crate::project::LanguageTag;
use regex::Regex;
use std::sync::LazyLock;

/// Placeholder used when a script is empty after sanitisation.
pub const EMPTY_SCRIPT_PLACEHOLDER: &str = "console.log('Ready');";

const INDENT: &str = "  ";
const DEFAULT_HEAD: &str = "<head>\n<meta charset=\"UTF-8\">\n<title>App</title>\n</head>";

static DOCTYPE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)<!doctype\s+html\b[^>]*>\n?").unwrap());
static HTML_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<html(\s[^>]*)?>").unwrap());
static HTML_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</html>").unwrap());
static HEAD_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<head[\s>]").unwrap());
static HEAD_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</head>").unwrap());
static BODY_OPEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)<body[\s>]").unwrap());
static BODY_CLOSE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?i)</body>").unwrap());

static SENTINEL_TOKEN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<｜.*?｜>").unwrap());
static FENCE_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*```[\w+-]*[ \t]*\r?$").unwrap());
static DOUBLE_QUOTED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(?m)^[ \t]*"[^"\r\n]*"[ \t]*\r?$"#).unwrap());
static SINGLE_QUOTED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*'[^'\r\n]*'[ \t]*\r?$").unwrap());
static INLINE_SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());

static OPENING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<(\w+)[^>]*>").unwrap());
static CLOSING_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"</\w+>").unwrap());

/// Elements that never take a closing tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

// =============================================================================
// Formatter seam
// =============================================================================

/// Brace balancing and re-indentation, swappable per language.
pub trait SourceFormatter: Send + Sync {
    /// Appends closing braces until no opener is left unmatched.
    fn balance_braces(&self, content: &str) -> String;

    /// Re-indents every non-blank line.
    fn reindent(&self, content: &str, language: LanguageTag) -> String;
}

/// Single-pass heuristics with no tokenizer.
///
/// Braces and tags inside strings or comments are counted like any other,
/// so results are approximate for such content.
pub struct HeuristicFormatter;

impl SourceFormatter for HeuristicFormatter {
    fn balance_braces(&self, content: &str) -> String {
        let opens = content.matches('{').count();
        let closes = content.matches('}').count();

        let mut balanced = content.to_string();
        for _ in closes..opens {
            balanced.push_str("\n}");
        }
        balanced
    }

    fn reindent(&self, content: &str, _language: LanguageTag) -> String {
        let mut depth: usize = 0;
        let mut lines = Vec::new();

        for line in content.split('\n') {
            let trimmed = line.trim();
            if trimmed.is_empty() {
                lines.push(String::new());
                continue;
            }

            if trimmed.starts_with('}') || trimmed.starts_with("</") {
                depth = depth.saturating_sub(1);
            }

            lines.push(format!("{}{}", INDENT.repeat(depth), trimmed));

            if opens_block(trimmed) {
                depth += 1;
            }
        }

        lines.join("\n")
    }
}

/// A line opens a block if it has an unclosed `{` or a non-void opening tag
/// with no closing tag on the same line.
fn opens_block(line: &str) -> bool {
    if line.contains('{') && !line.contains('}') {
        return true;
    }

    if CLOSING_TAG.is_match(line) {
        return false;
    }

    OPENING_TAG.captures_iter(line).any(|caps| {
        let whole = &caps[0];
        let name = caps[1].to_ascii_lowercase();
        !whole.ends_with("/>") && !VOID_ELEMENTS.contains(&name.as_str())
    })
}

// =============================================================================
// HTML and script passes
// =============================================================================

/// Completes a minimal HTML document skeleton around `content`.
///
/// Only missing pieces are inserted; existing markup keeps its order.
pub fn fix_html(content: &str) -> String {
    let mut html = content.trim().to_string();
    if html.is_empty() {
        return html;
    }

    if !DOCTYPE.is_match(&html) {
        html = format!("<!DOCTYPE html>\n{}", html);
    }

    if !HTML_OPEN.is_match(&html) {
        // the doctype is guaranteed present at this point
        let at = DOCTYPE.find(&html).map(|m| m.end()).unwrap_or(0);
        html.insert_str(at, "<html>\n");
    }

    if !HTML_CLOSE.is_match(&html) {
        html.push_str("\n</html>");
    }

    if !HEAD_OPEN.is_match(&html) {
        if let Some(open) = HTML_OPEN.find(&html) {
            let at = open.end();
            html.insert_str(at, &format!("\n{}", DEFAULT_HEAD));
        }
    }

    if !BODY_OPEN.is_match(&html) {
        let at = HEAD_CLOSE
            .find(&html)
            .or_else(|| HTML_OPEN.find(&html))
            .map(|m| m.end());
        if let Some(at) = at {
            html.insert_str(at, "\n<body>");
        }
    }

    if !BODY_CLOSE.is_match(&html) {
        if let Some(close) = HTML_CLOSE.find_iter(&html).last() {
            let at = close.start();
            html.insert_str(at, "</body>\n");
        }
    }

    html
}

/// Strips chat-formatting residue and embedded script blocks from JS/JSX.
pub fn sanitize_script(content: &str) -> String {
    let cleaned = SENTINEL_TOKEN.replace_all(content, "");
    let cleaned = FENCE_LINE.replace_all(&cleaned, "");
    let cleaned = DOUBLE_QUOTED_LINE.replace_all(&cleaned, "");
    let cleaned = SINGLE_QUOTED_LINE.replace_all(&cleaned, "");
    let cleaned = INLINE_SCRIPT.replace_all(&cleaned, "");
    cleaned.trim().to_string()
}

// =============================================================================
// Repairer
// =============================================================================

/// Applies language-specific repairs to one file's content.
pub struct ContentRepairer {
    formatter: Box<dyn SourceFormatter>,
}

impl ContentRepairer {
    pub fn new() -> Self {
        Self::with_formatter(Box::new(HeuristicFormatter))
    }

    pub fn with_formatter(formatter: Box<dyn SourceFormatter>) -> Self {
        Self { formatter }
    }

    /// Returns the repaired content and the language detected from `file_name`.
    pub fn repair(&self, file_name: &str, content: &str) -> (String, LanguageTag) {
        let language = LanguageTag::from_file_name(file_name);
        let mut content = content.replace("\r\n", "\n").trim().to_string();

        if language == LanguageTag::Html {
            content = fix_html(&content);
        }

        if language.is_script() {
            content = sanitize_script(&content);
            if content.is_empty() {
                content = EMPTY_SCRIPT_PLACEHOLDER.to_string();
            }
            content = self.formatter.balance_braces(&content);
        }

        (self.formatter.reindent(&content, language), language)
    }
}

impl Default for ContentRepairer {
    fn default() -> Self {
        Self::new()
    }
}
