//! Markdown to HTML export.
//!
//! The second exporter skips field extraction entirely: it concatenates the markdown bodies of
//! all content files under section headings and converts the result to a standalone HTML page
//! with `pulldown-cmark`. Turning that page into PDF is left to an external HTML renderer.

use std::fs;
use std::path::{Path, PathBuf};

use log::info;
use pulldown_cmark::{html, Options, Parser};

use crate::config::ExportConfig;
use crate::content::list_markdown_files;
use crate::error::{ExportError, Result};
use crate::model::{AWARDS_TITLE, EXPERIENCE_TITLE, PUBLICATIONS_TITLE};

const STYLESHEET: &str = r#"
body {
  font-family: "Noto Sans", "Microsoft YaHei", system-ui, sans-serif;
  font-size: 11pt;
  line-height: 1.4;
}
h1, h2, h3 {
  margin-top: 0.8em;
  margin-bottom: 0.3em;
}
h1 { font-size: 20pt; }
h2 { font-size: 16pt; border-bottom: 1px solid #ccc; padding-bottom: 0.1em; }
ul { margin-bottom: 0.4em; }
"#;

/// Drops a leading `---` fenced block from `text` and trims the rest.
///
/// Unlike the line-based reader, this splits on the first two `---` occurrences anywhere in the
/// text; a text with fewer than two is kept whole.
pub fn strip_front_matter(text: &str) -> &str {
    if text.starts_with("---") {
        let mut parts = text.splitn(3, "---");
        if let (Some(_), Some(_), Some(rest)) = (parts.next(), parts.next(), parts.next()) {
            return rest.trim();
        }
    }
    text.trim()
}

fn read_markdown(path: &Path) -> Result<String> {
    if !path.is_file() {
        return Err(ExportError::missing(path));
    }
    let text = fs::read_to_string(path).map_err(|err| ExportError::io(path, err))?;
    Ok(strip_front_matter(&text).to_owned())
}

fn directory_section(title: &str, dir: &Path) -> Result<Option<String>> {
    let files = list_markdown_files(dir)?;
    if files.is_empty() {
        return Ok(None);
    }

    let mut parts = vec![format!("## {}\n", title)];
    for path in &files {
        parts.push(read_markdown(path)?);
    }
    Ok(Some(parts.join("\n\n")))
}

/// Builds the combined markdown document: the about page followed by the experience,
/// publications and awards files under their own headings. Empty directories are left out.
pub fn resume_markdown(config: &ExportConfig) -> Result<String> {
    let mut sections = vec![read_markdown(&config.about_page())?];
    let directories = [
        (EXPERIENCE_TITLE, config.experience_dir()),
        (PUBLICATIONS_TITLE, config.publications_dir()),
        (AWARDS_TITLE, config.awards_dir()),
    ];
    for (title, dir) in &directories {
        if let Some(section) = directory_section(title, dir)? {
            sections.push(section);
        }
    }
    Ok(sections.join("\n\n"))
}

/// Converts markdown to an HTML fragment with tables, footnotes and strikethrough enabled.
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES | Options::ENABLE_FOOTNOTES | Options::ENABLE_STRIKETHROUGH;
    let mut body = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut body, Parser::new_ext(markdown, options));
    body
}

/// Wraps an HTML fragment in a standalone page with the résumé stylesheet.
pub fn html_page(body: &str) -> String {
    format!(
        "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<style>{}</style>\n</head>\n<body>\n{}</body>\n</html>\n",
        STYLESHEET, body
    )
}

/// Renders the complete HTML page for the content named by `config`.
pub fn render_html(config: &ExportConfig) -> Result<String> {
    let markdown = resume_markdown(config)?;
    Ok(html_page(&markdown_to_html(&markdown)))
}

/// Renders the HTML page and writes it next to the configured PDF output with an `.html`
/// extension, or to `output` when given.
pub fn export_html(config: &ExportConfig, output: Option<&Path>) -> Result<PathBuf> {
    let path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.output().with_extension("html"));
    let page = render_html(config)?;

    if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|err| ExportError::io(parent, err))?;
    }
    fs::write(&path, page.as_bytes()).map_err(|err| ExportError::io(&path, err))?;
    info!("Wrote {} ({} bytes)", path.display(), page.len());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn front_matter_is_dropped() {
        assert_eq!(strip_front_matter("---\ntitle: X\n---\n\n# Body\n"), "# Body");
    }

    #[test]
    fn text_without_front_matter_is_trimmed() {
        assert_eq!(strip_front_matter("\n# Body\n"), "# Body");
    }

    #[test]
    fn single_marker_keeps_text() {
        assert_eq!(strip_front_matter("--- not closed"), "--- not closed");
    }

    #[test]
    fn markdown_features_are_rendered() {
        let html = markdown_to_html("## Awards\n\n- ~~old~~ new\n\n| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<h2>Awards</h2>"));
        assert!(html.contains("<del>old</del>"));
        assert!(html.contains("<table>"));
    }

    #[test]
    fn page_wraps_body() {
        let page = html_page("<p>x</p>\n");
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<meta charset=\"utf-8\">"));
        assert!(page.contains("<body>\n<p>x</p>\n</body>"));
    }
}
