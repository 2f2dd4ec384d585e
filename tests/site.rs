use std::fs;
use std::path::Path;

use resume_pdf::model::{EXPERIENCE_TITLE, PUBLICATIONS_TITLE};
use resume_pdf::{ExportConfig, ExportError, ResumeContent, ResumeDocument};
use tempfile::TempDir;

const ABOUT: &str = "---
title: \"Ada Lovelace\"
---

## About Me

I study **analytical engines** at [the lab](https://example.org).

- Research Interests
  * Computing
  * Poetry of science
";

fn write(root: &Path, relative: &str, text: &str) {
    let path = root.join(relative);
    fs::create_dir_all(path.parent().expect("file has a parent")).expect("create dirs");
    fs::write(path, text).expect("write content file");
}

fn site() -> TempDir {
    let dir = tempfile::tempdir().expect("temp dir");
    let root = dir.path();
    write(root, "_pages/about.md", ABOUT);
    write(
        root,
        "_experience/acme-corp.md",
        "---\n---\n- Built the engine\n  in brass\n- link\n",
    );
    write(root, "_experience/notes.txt", "- ignored\n");
    write(root, "_awards/medal.md", "- Gold medal\n");
    write(
        root,
        "_publications/old.md",
        "---\ntitle: Old\ndate: 2001-01-01\n---\n",
    );
    write(
        root,
        "_publications/new.md",
        "---\ntitle: New\nvenue: Journal\ndate: 2020-05-01\n---\n",
    );
    write(root, "_publications/plain.md", "No front matter here.\n");
    dir
}

#[test]
fn loads_the_whole_site() {
    let dir = site();
    let content = ResumeContent::load(&ExportConfig::new(dir.path())).expect("load site");

    assert_eq!(content.name, "Ada Lovelace");
    assert_eq!(
        content.about.paragraphs,
        vec!["I study analytical engines at the lab."]
    );
    assert_eq!(
        content.about.research_interests,
        vec!["Computing", "Poetry of science"]
    );

    let experience = content.experience.entries();
    assert_eq!(experience.len(), 1);
    assert_eq!(experience[0].title, "Acme Corp");
    assert_eq!(experience[0].bullets, vec!["Built the engine in brass"]);

    assert_eq!(content.awards.entries()[0].title, "Medal");

    let titles: Vec<_> = content
        .publications
        .iter()
        .map(|record| record.title.as_str())
        .collect();
    assert_eq!(titles, vec!["New", "Old"]);
}

#[test]
fn publication_limit_comes_from_config() {
    let dir = site();
    let config = ExportConfig::new(dir.path()).with_max_publications(1usize);
    let content = ResumeContent::load(&config).expect("load site");
    assert_eq!(content.publications.len(), 1);
    assert_eq!(content.publications[0].title, "New");
}

#[test]
fn empty_experience_directory_omits_section() {
    let dir = site();
    fs::remove_file(dir.path().join("_experience/acme-corp.md")).expect("remove entry");

    let content = ResumeContent::load(&ExportConfig::new(dir.path())).expect("load site");
    let document = ResumeDocument::assemble(&content, None);
    let titles = document.section_titles();
    assert!(!titles.contains(&EXPERIENCE_TITLE));
    assert!(titles.contains(&PUBLICATIONS_TITLE));
}

#[test]
fn missing_about_page_is_fatal() {
    let dir = site();
    fs::remove_file(dir.path().join("_pages/about.md")).expect("remove about page");

    match ResumeContent::load(&ExportConfig::new(dir.path())) {
        Err(ExportError::MissingInput { path }) => assert!(path.ends_with("_pages/about.md")),
        other => panic!("expected a missing input error, got {other:?}"),
    }
}

#[test]
fn missing_awards_directory_is_fatal() {
    let dir = site();
    fs::remove_dir_all(dir.path().join("_awards")).expect("remove awards");

    let err = ResumeContent::load(&ExportConfig::new(dir.path())).unwrap_err();
    assert!(matches!(err, ExportError::MissingInput { .. }));
}

#[test]
fn html_export_concatenates_sections() {
    let dir = site();
    let output = dir.path().join("out/resume.html");
    let config = ExportConfig::new(dir.path());

    let written = resume_pdf::export_html(&config, Some(&output)).expect("export html");
    assert_eq!(written, output);

    let page = fs::read_to_string(&output).expect("read html");
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(!page.contains("title: \"Ada Lovelace\""));
    assert!(page.contains("<h2>About Me</h2>"));

    let experience = page.find("<h2>Experience</h2>").expect("experience heading");
    let publications = page.find("<h2>Publications</h2>").expect("publications heading");
    let awards = page.find("<h2>Awards</h2>").expect("awards heading");
    assert!(experience < publications && publications < awards);
}

#[test]
fn html_export_defaults_next_to_pdf_output() {
    let dir = site();
    let config = ExportConfig::new(dir.path());
    let written = resume_pdf::export_html(&config, None).expect("export html");
    assert_eq!(written, dir.path().join("files/resume.html"));
    assert!(written.is_file());
}

#[test]
fn html_export_omits_sections_without_files() {
    let dir = site();
    fs::remove_file(dir.path().join("_awards/medal.md")).expect("remove award");

    let page = resume_pdf::render_html(&ExportConfig::new(dir.path())).expect("render html");
    assert!(!page.contains("<h2>Awards</h2>"));
    assert!(page.contains("<h2>About Me</h2>"));
    assert!(page.contains("<h2>Experience</h2>"));
    assert!(page.contains("<h2>Publications</h2>"));
}

#[test]
fn html_export_keeps_explicit_output_name() {
    let dir = site();
    let output = dir.path().join("out/resume.htm");
    let written = resume_pdf::export_html(&ExportConfig::new(dir.path()), Some(&output))
        .expect("export html");
    assert_eq!(written, output);
    assert!(output.is_file());
}
