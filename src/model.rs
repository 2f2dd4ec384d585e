//! Data structures describing the logical content of the résumé document.
//!
//! The types in this module mirror the building blocks the PDF builder lays out, without
//! referencing the rendering crate directly. [`ResumeDocument::assemble`] is where extracted
//! content becomes an ordered list of sections: header, About, Research Interests, Experience,
//! Publications, Awards. A section whose source data is empty is left out entirely.

use std::path::{Path, PathBuf};

use crate::content::{EntryList, ResumeContent};
use crate::publications::PublicationRecord;
use crate::richtext::Span;

/// Header text used when the about page has no title.
pub const FALLBACK_NAME: &str = "Curriculum Vitae";

/// Section heading for the about paragraphs.
pub const ABOUT_TITLE: &str = "About";
/// Section heading for the research interests list.
pub const RESEARCH_TITLE: &str = "Research Interests";
/// Section heading for experience entries.
pub const EXPERIENCE_TITLE: &str = "Experience";
/// Section heading for publications.
pub const PUBLICATIONS_TITLE: &str = "Publications";
/// Section heading for awards.
pub const AWARDS_TITLE: &str = "Awards";

const BODY_SIZE: u8 = 11;
const ENTRY_TITLE_SIZE: u8 = 12;
const DATE_SIZE: u8 = 10;
const PUBLICATION_GAP_LINES: f64 = 0.4;

/// Paragraph made of styled spans.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RichParagraph {
    spans: Vec<Span>,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
        }
    }

    /// Creates a single-span paragraph in body text size.
    pub fn body(text: impl Into<String>) -> Self {
        Self::new(vec![Span::new(text).sized(BODY_SIZE)])
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the concatenated text of all spans.
    pub fn text(&self) -> String {
        self.spans.iter().map(Span::text).collect()
    }
}

/// Individual content blocks that make up a section.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// A dash-bulleted list, one paragraph per item.
    BulletList(Vec<RichParagraph>),
    /// Vertical gap measured in lines.
    Spacing(f64),
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Convenience helper for a bullet list of plain body text items.
    pub fn bullets<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::BulletList(items.into_iter().map(RichParagraph::body).collect())
    }
}

/// Name and optional photo shown above the first section.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Header {
    name: String,
    photo: Option<PathBuf>,
}

impl Header {
    /// Creates a header; an empty name is replaced by [`FALLBACK_NAME`].
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            name: if name.is_empty() {
                FALLBACK_NAME.to_owned()
            } else {
                name
            },
            photo: None,
        }
    }

    /// Sets the photo and returns the updated header.
    pub fn with_photo(mut self, photo: impl Into<Option<PathBuf>>) -> Self {
        self.photo = photo.into();
        self
    }

    /// Returns the displayed name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the photo path, if any.
    pub fn photo(&self) -> Option<&Path> {
        self.photo.as_deref()
    }
}

/// Logical representation of a document section.
#[derive(Clone, Debug, PartialEq)]
pub struct Section {
    title: String,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates a new section with the provided title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            blocks: Vec::new(),
        }
    }

    /// Returns the title of the section.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

/// The complete résumé, ready for layout.
#[derive(Clone, Debug, PartialEq)]
pub struct ResumeDocument {
    header: Header,
    sections: Vec<Section>,
}

impl ResumeDocument {
    /// Creates a document with the given header and no sections.
    pub fn new(header: Header) -> Self {
        Self {
            header,
            sections: Vec::new(),
        }
    }

    /// Appends a section and returns the updated document.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }

    /// Lays extracted content out into sections in their fixed order.
    ///
    /// The photo is only kept when the file exists.
    pub fn assemble(content: &ResumeContent, photo: Option<&Path>) -> Self {
        let photo = photo.filter(|path| path.exists()).map(Path::to_path_buf);
        let mut document = Self::new(Header::new(content.name.clone()).with_photo(photo));

        let about = &content.about;
        if !about.paragraphs.is_empty() {
            document.sections.push(
                Section::new(ABOUT_TITLE).with_blocks(
                    about
                        .paragraphs
                        .iter()
                        .map(|paragraph| Block::Paragraph(RichParagraph::body(paragraph.as_str()))),
                ),
            );
        }
        if !about.research_interests.is_empty() {
            document.sections.push(
                Section::new(RESEARCH_TITLE)
                    .with_block(Block::bullets(about.research_interests.iter().cloned())),
            );
        }
        if !content.experience.is_empty() {
            document
                .sections
                .push(entry_section(EXPERIENCE_TITLE, &content.experience));
        }
        if !content.publications.is_empty() {
            document.sections.push(
                Section::new(PUBLICATIONS_TITLE)
                    .with_blocks(content.publications.iter().flat_map(publication_blocks)),
            );
        }
        if !content.awards.is_empty() {
            document
                .sections
                .push(entry_section(AWARDS_TITLE, &content.awards));
        }

        document
    }

    /// Returns the header.
    pub fn header(&self) -> &Header {
        &self.header
    }

    /// Returns the sections in rendering order.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Returns the section titles in rendering order.
    pub fn section_titles(&self) -> Vec<&str> {
        self.sections.iter().map(Section::title).collect()
    }
}

fn entry_title(title: &str) -> Block {
    Block::paragraph(vec![Span::new(title).sized(ENTRY_TITLE_SIZE).bold()])
}

fn entry_section(title: &str, entries: &EntryList) -> Section {
    Section::new(title).with_blocks(entries.entries().iter().flat_map(|entry| {
        [
            entry_title(&entry.title),
            Block::bullets(entry.bullets.iter().cloned()),
        ]
    }))
}

fn publication_blocks(record: &PublicationRecord) -> Vec<Block> {
    let mut blocks = vec![entry_title(&record.title)];
    if !record.venue.is_empty() {
        blocks.push(Block::paragraph(vec![Span::new(record.venue.as_str())
            .sized(BODY_SIZE)
            .italic()]));
    }
    if !record.date.is_empty() {
        blocks.push(Block::paragraph(vec![
            Span::new(record.date.as_str()).sized(DATE_SIZE)
        ]));
    }
    if !record.excerpt.is_empty() {
        blocks.push(Block::Paragraph(RichParagraph::body(record.excerpt.as_str())));
    }
    blocks.push(Block::Spacing(PUBLICATION_GAP_LINES));
    blocks
}
