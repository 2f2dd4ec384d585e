//! Content files and the résumé content they produce.
//!
//! Everything in this module is a read-only snapshot of the site sources taken at the start of
//! an export run. Missing required inputs abort the run; problems inside a single file degrade
//! to defaults so one malformed file never aborts the export.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;

use crate::about::{classify_about, AboutSection};
use crate::bullets::extract_bullets;
use crate::config::ExportConfig;
use crate::error::{ExportError, Result};
use crate::frontmatter::{self, Metadata};
use crate::publications::{build_publications, PublicationRecord};

const MARKDOWN_EXTENSION: &str = "md";

/// A markdown source file split into lines.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentFile {
    path: PathBuf,
    lines: Vec<String>,
}

impl ContentFile {
    /// Creates a content file from text that was already read.
    pub fn from_text(path: impl Into<PathBuf>, text: &str) -> Self {
        Self {
            path: path.into(),
            lines: text.lines().map(str::to_owned).collect(),
        }
    }

    /// Reads the file at `path`; a missing file is a [`ExportError::MissingInput`].
    pub fn read(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ExportError::missing(path));
        }
        let text = fs::read_to_string(path).map_err(|err| ExportError::io(path, err))?;
        Ok(Self::from_text(path, &text))
    }

    /// Returns the source path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns the file name without its extension.
    pub fn stem(&self) -> String {
        self.path
            .file_stem()
            .map(|stem| stem.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Returns whether the file opens with a complete front matter block.
    pub fn has_front_matter(&self) -> bool {
        frontmatter::has_front_matter(&self.lines)
    }

    /// Returns the lines after the front matter block.
    pub fn body(&self) -> &[String] {
        frontmatter::body_lines(&self.lines)
    }

    /// Returns the parsed front matter.
    pub fn metadata(&self) -> Metadata {
        frontmatter::metadata(&self.lines)
    }
}

/// Lists the markdown files of `dir` in lexicographic file name order.
pub fn list_markdown_files(dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.is_dir() {
        return Err(ExportError::missing(dir));
    }

    let mut paths = Vec::new();
    for entry in fs::read_dir(dir).map_err(|err| ExportError::io(dir, err))? {
        let path = entry.map_err(|err| ExportError::io(dir, err))?.path();
        let is_markdown = path
            .extension()
            .map_or(false, |extension| extension == MARKDOWN_EXTENSION);
        if is_markdown && path.is_file() {
            paths.push(path);
        }
    }
    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Reads every markdown file of `dir`, in listing order.
pub fn read_directory(dir: impl AsRef<Path>) -> Result<Vec<ContentFile>> {
    list_markdown_files(dir)?
        .into_iter()
        .map(ContentFile::read)
        .collect()
}

/// Upper-cases the first letter of every alphabetic run and lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut previous_alphabetic = false;
    for ch in text.chars() {
        if ch.is_alphabetic() {
            if previous_alphabetic {
                result.extend(ch.to_lowercase());
            } else {
                result.extend(ch.to_uppercase());
            }
            previous_alphabetic = true;
        } else {
            result.push(ch);
            previous_alphabetic = false;
        }
    }
    result
}

/// A titled bullet list, as used for experience and award entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Entry {
    /// Entry heading.
    pub title: String,
    /// Normalized bullet items.
    pub bullets: Vec<String>,
}

/// Entries keyed by title in first-insertion order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct EntryList {
    entries: Vec<Entry>,
}

impl EntryList {
    /// Inserts an entry; a repeated title replaces the bullets but keeps its first position.
    pub fn insert(&mut self, title: String, bullets: Vec<String>) {
        match self.entries.iter_mut().find(|entry| entry.title == title) {
            Some(existing) => existing.bullets = bullets,
            None => self.entries.push(Entry { title, bullets }),
        }
    }

    /// Returns the entries in order.
    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    /// Returns whether the list is empty.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

fn metadata_title(meta: &Metadata) -> Option<String> {
    meta.get_str("title").filter(|title| !title.is_empty())
}

/// Builds experience entries; the default title is the file stem with dashes as spaces,
/// title-cased.
pub fn build_experience(files: &[ContentFile]) -> EntryList {
    let mut list = EntryList::default();
    for file in files {
        let body = file.body();
        if body.is_empty() {
            debug!("Skipping {}: empty body", file.path().display());
            continue;
        }
        let title = metadata_title(&file.metadata())
            .unwrap_or_else(|| title_case(&file.stem().replace('-', " ")));
        let bullets = extract_bullets(body);
        if bullets.is_empty() {
            debug!("Skipping {}: no bullet items", file.path().display());
            continue;
        }
        list.insert(title, bullets);
    }
    list
}

/// Builds award entries; the default title is the title-cased file stem.
pub fn build_awards(files: &[ContentFile]) -> EntryList {
    let mut list = EntryList::default();
    for file in files {
        let bullets = extract_bullets(file.body());
        if bullets.is_empty() {
            debug!("Skipping {}: no bullet items", file.path().display());
            continue;
        }
        let title =
            metadata_title(&file.metadata()).unwrap_or_else(|| title_case(&file.stem()));
        list.insert(title, bullets);
    }
    list
}

/// All extracted résumé content of one export run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ResumeContent {
    /// Name shown in the header, from the about page title.
    pub name: String,
    /// About paragraphs and research interests.
    pub about: AboutSection,
    /// Experience entries.
    pub experience: EntryList,
    /// Publications, newest first.
    pub publications: Vec<PublicationRecord>,
    /// Award entries.
    pub awards: EntryList,
}

impl ResumeContent {
    /// Reads and extracts every content source named by `config`.
    pub fn load(config: &ExportConfig) -> Result<Self> {
        let about_page = ContentFile::read(config.about_page())?;
        let name = about_page
            .metadata()
            .get_str("title")
            .map(|title| title.trim().to_owned())
            .unwrap_or_default();
        let about = classify_about(about_page.body());

        let experience = build_experience(&read_directory(config.experience_dir())?);
        let awards = build_awards(&read_directory(config.awards_dir())?);
        let publications = build_publications(
            &read_directory(config.publications_dir())?,
            config.max_publications(),
        );

        debug!(
            "Loaded {} paragraphs, {} research interests, {} experience, {} publications, {} awards",
            about.paragraphs.len(),
            about.research_interests.len(),
            experience.len(),
            publications.len(),
            awards.len()
        );

        Ok(Self {
            name,
            about,
            experience,
            publications,
            awards,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn file(path: &str, text: &str) -> ContentFile {
        ContentFile::from_text(path, text)
    }

    #[test]
    fn title_case_matches_word_boundaries() {
        assert_eq!(title_case("software engineer intern"), "Software Engineer Intern");
        assert_eq!(title_case("best-paper AWARD"), "Best-Paper Award");
        assert_eq!(title_case("2021 google"), "2021 Google");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn experience_titles_default_to_file_stem() {
        let files = [
            file("_experience/acme-labs.md", "---\ndate: 2020\n---\n- Built things"),
            file("_experience/other.md", "---\ntitle: Staff Engineer\n---\n- Led things"),
        ];
        let list = build_experience(&files);
        let titles: Vec<_> = list.entries().iter().map(|entry| entry.title.as_str()).collect();
        assert_eq!(titles, vec!["Acme Labs", "Staff Engineer"]);
    }

    #[test]
    fn experience_skips_empty_and_bulletless_files() {
        let files = [
            file("_experience/empty.md", "---\ntitle: Empty\n---"),
            file("_experience/prose.md", "Only prose, no bullets"),
            file("_experience/link.md", "- [link](https://x.test)"),
        ];
        assert!(build_experience(&files).is_empty());
    }

    #[test]
    fn award_titles_keep_dashes() {
        let files = [file("_awards/best-paper.md", "- Best paper at X")];
        let list = build_awards(&files);
        assert_eq!(list.entries()[0].title, "Best-Paper");
        assert_eq!(list.entries()[0].bullets, vec!["Best paper at X".to_string()]);
    }

    #[test]
    fn repeated_titles_replace_in_place() {
        let mut list = EntryList::default();
        list.insert("A".into(), vec!["one".into()]);
        list.insert("B".into(), vec!["two".into()]);
        list.insert("A".into(), vec!["three".into()]);
        assert_eq!(list.len(), 2);
        assert_eq!(list.entries()[0].title, "A");
        assert_eq!(list.entries()[0].bullets, vec!["three".to_string()]);
    }

    #[test]
    fn empty_metadata_title_falls_back() {
        let files = [file("_awards/fellowship.md", "---\ntitle: \"\"\n---\n- Funded")];
        assert_eq!(build_awards(&files).entries()[0].title, "Fellowship");
    }

    #[test]
    fn stem_drops_extension() {
        assert_eq!(file("_publications/2020-paper.md", "").stem(), "2020-paper");
    }
}
