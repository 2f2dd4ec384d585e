//! About page classification into paragraphs and research interests.
//!
//! The about page body is walked line by line with a three-state machine. Each line is first
//! matched against an ordered list of rules ([`LineKind::classify`]); the first matching rule
//! wins, so the specific `## About` heading check always runs before the generic `##` catch-all.
//! The resulting [`LineKind`] is then applied to the current [`Mode`] in [`Classifier::step`].

use once_cell::sync::Lazy;
use regex::Regex;

use crate::normalize::normalize;

static RE_LEVEL_TWO_HEADING: Lazy<Regex> = Lazy::new(|| Regex::new(r"^## +(.+)$").unwrap());

const RESEARCH_MARKER: &str = "- Research Interests";
const RESEARCH_BULLETS: &[char] = &['-', '*', '•'];
const RESEARCH_STRIP: &[char] = &['-', '*', '•', ' '];

/// Paragraphs and research interests extracted from the about page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AboutSection {
    /// Normalized paragraphs of the "About" heading section.
    pub paragraphs: Vec<String>,
    /// Normalized entries of the "Research Interests" list.
    pub research_interests: Vec<String>,
}

impl AboutSection {
    /// Returns whether both outputs are empty.
    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty() && self.research_interests.is_empty()
    }
}

/// Region of the page the classifier is currently in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Mode {
    None,
    About,
    Research,
}

/// Classification of a single line, in rule precedence order.
#[derive(Clone, Debug, PartialEq, Eq)]
enum LineKind<'a> {
    /// `## <title>`; `true` when the title starts with "about".
    Heading { about: bool },
    /// The `- Research Interests` marker line.
    ResearchMarker,
    /// Any other line starting with `##`.
    OtherHeading,
    Blank,
    Text(&'a str),
}

impl<'a> LineKind<'a> {
    fn classify(line: &'a str) -> Self {
        if let Some(caps) = RE_LEVEL_TWO_HEADING.captures(line) {
            let title = caps[1].trim().to_lowercase();
            return Self::Heading {
                about: title.starts_with("about"),
            };
        }

        let trimmed = line.trim();
        if trimmed.starts_with(RESEARCH_MARKER) {
            Self::ResearchMarker
        } else if trimmed.starts_with("##") {
            Self::OtherHeading
        } else if trimmed.is_empty() {
            Self::Blank
        } else {
            Self::Text(trimmed)
        }
    }
}

#[derive(Debug)]
struct Classifier {
    mode: Mode,
    pending: Vec<String>,
    output: AboutSection,
}

impl Classifier {
    fn new() -> Self {
        Self {
            mode: Mode::None,
            pending: Vec::new(),
            output: AboutSection::default(),
        }
    }

    fn flush_paragraph(&mut self) {
        if self.pending.is_empty() {
            return;
        }
        let paragraph = normalize(&std::mem::take(&mut self.pending).join(" "));
        self.output.paragraphs.push(paragraph);
    }

    fn step(&mut self, kind: LineKind<'_>) {
        match (kind, self.mode) {
            (LineKind::Heading { about }, _) => {
                self.flush_paragraph();
                self.mode = if about { Mode::About } else { Mode::None };
            }
            (LineKind::ResearchMarker, _) => {
                self.flush_paragraph();
                self.mode = Mode::Research;
            }
            (LineKind::OtherHeading, _) => {
                self.flush_paragraph();
                self.mode = Mode::None;
            }
            (LineKind::Blank, Mode::About) => self.flush_paragraph(),
            (LineKind::Text(text), Mode::About) => self.pending.push(text.to_owned()),
            (LineKind::Blank, Mode::Research) => {}
            (LineKind::Text(text), Mode::Research) => {
                if text.starts_with(RESEARCH_BULLETS) {
                    let item = normalize(text.trim_start_matches(RESEARCH_STRIP));
                    if !item.is_empty() {
                        self.output.research_interests.push(item);
                    }
                } else {
                    self.mode = Mode::None;
                }
            }
            (LineKind::Blank | LineKind::Text(_), Mode::None) => {}
        }
    }

    fn finish(mut self) -> AboutSection {
        self.flush_paragraph();
        self.output
    }
}

/// Splits the about page body into paragraphs and research interests.
///
/// Paragraphs are collected under a `## About...` heading and separated by blank lines. The
/// research list starts at a `- Research Interests` line and runs over `-`, `*` or `•` bullets,
/// skipping blank lines, until the first non-bullet line.
pub fn classify_about<S: AsRef<str>>(lines: &[S]) -> AboutSection {
    let mut classifier = Classifier::new();
    for line in lines {
        classifier.step(LineKind::classify(line.as_ref()));
    }
    classifier.finish()
}
