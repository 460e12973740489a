//! HTML tag-balance checker.
//!
//! Not a parser: comments and `<script>`/`<style>` bodies are blanked out,
//! then opening and closing tags are matched on a stack. Good enough to catch
//! the unclosed `<div>` a hand edit leaves behind.

use super::ToolError;
use regex::Regex;
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Elements that never take a closing tag.
pub const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "param", "source",
    "track", "wbr", "path",
];

/// Number of issues printed with surrounding context.
pub const CONTEXT_ISSUES: usize = 6;

static COMMENT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static SCRIPT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script\b.*?</script\s*>").unwrap());
static STYLE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style\b.*?</style\s*>").unwrap());
static TAG: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"<\s*(/?)\s*([a-zA-Z0-9:-]+)([^>]*)>").unwrap());

/// What went wrong at a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IssueKind {
    /// A closing tag matched deeper in the stack; these were left open.
    ClosedOverOpen {
        /// The closing tag's name.
        tag: String,
        /// Open tags skipped over, outermost first.
        unclosed: Vec<String>,
    },
    /// A closing tag with no matching open tag.
    UnexpectedClose {
        /// Tag name.
        tag: String,
    },
    /// Still open at end of file.
    Unclosed {
        /// Tag name.
        tag: String,
    },
}

/// One problem with its 1-based line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HtmlIssue {
    /// Line of the offending tag.
    pub line: usize,
    /// The problem.
    pub kind: IssueKind,
}

impl fmt::Display for HtmlIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::ClosedOverOpen { tag, unclosed } => write!(
                f,
                "Found closing </{tag}> but {} tag(s) were not closed: {}",
                unclosed.len(),
                unclosed.join(", ")
            ),
            IssueKind::UnexpectedClose { tag } => write!(f, "Unexpected closing tag </{tag}>"),
            IssueKind::Unclosed { tag } => {
                write!(f, "Unclosed tag <{tag}> started at line {}", self.line)
            }
        }
    }
}

/// Replace each match with as many newlines as it spanned, so line numbers
/// in the stripped text still match the source.
fn blank_out(re: &Regex, text: &str) -> String {
    re.replace_all(text, |caps: &regex::Captures<'_>| {
        "\n".repeat(caps[0].matches('\n').count())
    })
    .into_owned()
}

/// Check the tag balance of an HTML document.
pub fn check_html(source: &str) -> Vec<HtmlIssue> {
    let stripped = blank_out(&COMMENT, source);
    let stripped = blank_out(&SCRIPT, &stripped);
    let stripped = blank_out(&STYLE, &stripped);

    let mut stack: Vec<(String, usize)> = Vec::new();
    let mut issues = Vec::new();
    let mut line = 1;
    let mut scanned = 0;

    for caps in TAG.captures_iter(&stripped) {
        let Some(whole) = caps.get(0) else { continue };
        line += stripped[scanned..whole.start()].matches('\n').count();
        scanned = whole.start();

        let closing = &caps[1] == "/";
        let tag = caps[2].to_ascii_lowercase();
        let self_closing = caps[3].trim().ends_with('/');

        if !closing {
            if !(VOID_ELEMENTS.contains(&tag.as_str()) || self_closing) {
                stack.push((tag, line));
            }
            continue;
        }

        match stack.iter().rposition(|(open, _)| *open == tag) {
            Some(i) if i + 1 == stack.len() => {
                stack.pop();
            }
            Some(i) => {
                let unclosed = stack.drain(i..).skip(1).map(|(t, _)| t).collect();
                issues.push(HtmlIssue {
                    line,
                    kind: IssueKind::ClosedOverOpen { tag, unclosed },
                });
            }
            None => issues.push(HtmlIssue {
                line,
                kind: IssueKind::UnexpectedClose { tag },
            }),
        }
    }

    issues.extend(stack.into_iter().map(|(tag, line)| HtmlIssue {
        line,
        kind: IssueKind::Unclosed { tag },
    }));
    issues
}

/// Read and check a file.
///
/// # Errors
///
/// Returns `ToolError::NotFound` or `ToolError::Io` when the file cannot be read.
pub fn check_file(path: &Path) -> Result<(String, Vec<HtmlIssue>), ToolError> {
    if !path.exists() {
        return Err(ToolError::NotFound(path.to_path_buf()));
    }
    let source = std::fs::read_to_string(path).map_err(|source| ToolError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let issues = check_html(&source);
    Ok((source, issues))
}

/// Human-readable report: every issue, then context for the first few.
pub fn render_report(source: &str, issues: &[HtmlIssue]) -> String {
    if issues.is_empty() {
        return "No mismatched tags found.\n".to_string();
    }
    let mut out = String::from("HTML tag issues found:\n");
    for issue in issues {
        out.push_str(&format!("Line {}: {issue}\n", issue.line));
    }

    let lines: Vec<&str> = source.lines().collect();
    out.push_str(&format!(
        "\nContext snippets for first {CONTEXT_ISSUES} issues:\n"
    ));
    for (n, issue) in issues.iter().take(CONTEXT_ISSUES).enumerate() {
        let start = issue.line.saturating_sub(4);
        let end = (issue.line + 3).min(lines.len());
        out.push_str(&format!(
            "--- Issue {}: {issue} (context lines {}-{end}) ---\n",
            n + 1,
            start + 1
        ));
        for (i, text) in lines.iter().enumerate().take(end).skip(start) {
            let marker = if i + 1 == issue.line { '>' } else { ' ' };
            out.push_str(&format!("{marker} {:4}: {text}\n", i + 1));
        }
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balanced_document_has_no_issues() {
        let html = "<html>\n<body>\n<div class=\"a\"><img src=\"x.jpg\"><br/></div>\n</body>\n</html>\n";
        assert!(check_html(html).is_empty());
    }

    #[test]
    fn unclosed_tag_is_reported_at_its_opening_line() {
        let html = "<div>\n<section>\n</div>\n";
        assert_eq!(
            check_html(html),
            vec![HtmlIssue {
                line: 3,
                kind: IssueKind::ClosedOverOpen {
                    tag: "div".to_string(),
                    unclosed: vec!["section".to_string()],
                },
            }]
        );
    }

    #[test]
    fn stray_close_is_unexpected() {
        let issues = check_html("<p>text</p>\n</span>\n");
        assert_eq!(
            issues,
            vec![HtmlIssue {
                line: 2,
                kind: IssueKind::UnexpectedClose {
                    tag: "span".to_string()
                },
            }]
        );
    }

    #[test]
    fn leftover_open_tags_are_unclosed() {
        let issues = check_html("<main>\n  <div>\n");
        assert_eq!(issues.len(), 2);
        assert_eq!(issues[1].to_string(), "Unclosed tag <div> started at line 2");
    }

    #[test]
    fn comments_and_scripts_are_ignored_without_shifting_lines() {
        let html = "<!--\n<div>\n-->\n<script>\nif (a < b) { document.write('<p>') }\n</script>\n</em>\n";
        let issues = check_html(html);
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].line, 7);
    }

    #[test]
    fn tag_names_are_case_insensitive() {
        assert!(check_html("<DIV></div>").is_empty());
    }

    #[test]
    fn report_marks_the_offending_line() {
        let source = "<div>\n<p>\n</div>\n";
        let issues = check_html(source);
        let report = render_report(source, &issues);
        assert!(report.contains("Line 3: Found closing </div> but 1 tag(s) were not closed: p"));
        assert!(report.contains(">    3: </div>"));
    }
}
