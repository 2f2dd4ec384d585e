//! Document construction for the resume_pdf crate.
//!
//! [`PdfBuilder`] turns a [`ResumeDocument`] into `genpdf` elements on a configured page layout
//! and renders them in one blocking pass. Any failure aborts the render; there is no partial
//! output.

use std::fs;
use std::path::{Path, PathBuf};

use genpdf::elements::{Break, Paragraph, UnorderedList};
use genpdf::error::{Error, ErrorKind};
use genpdf::style::{Style, StyledString};
use genpdf::{self, Element, Margins, Mm, PageDecorator, Position};
use log::info;

use crate::config::ExportConfig;
use crate::content::ResumeContent;
use crate::elements::{ProfileHeader, ScaledImage};
use crate::error::{ExportError, Result};
use crate::fonts;
use crate::model::{Block, ResumeDocument, RichParagraph, Section};
use crate::richtext::spans_are_blank;

const NAME_FONT_SIZE: u8 = 20;
const SECTION_TITLE_FONT_SIZE: u8 = 15;
const BODY_FONT_SIZE: u8 = 11;
const PAGE_NUMBER_FONT_SIZE: u8 = 9;
const LINE_SPACING: f64 = 1.2;
const PHOTO_WIDTH_MM: f64 = 30.0;
const PAGE_MARGIN_MM: f64 = 10.0;
const FOOTER_HEIGHT_MM: f64 = 8.0;
const BULLET: &str = "-";

type ElementFactory = dyn Fn(usize) -> Box<dyn Element>;

/// Bytes of a rendered PDF document.
#[derive(Clone, Debug)]
pub struct RenderedPdf {
    /// The serialized PDF.
    pub bytes: Vec<u8>,
}

/// Builder for résumé PDFs pre-configured with the crate defaults.
pub struct PdfBuilder {
    margins: Margins,
    footer: Option<FooterSpec>,
}

impl Default for PdfBuilder {
    fn default() -> Self {
        Self {
            margins: Margins::trbl(
                PAGE_MARGIN_MM,
                PAGE_MARGIN_MM,
                PAGE_MARGIN_MM,
                PAGE_MARGIN_MM,
            ),
            footer: None,
        }
    }
}

impl PdfBuilder {
    /// Creates a new builder instance with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a builder with the page options of `config`.
    pub fn from_config(config: &ExportConfig) -> Self {
        let builder = Self::new();
        if config.page_numbers() {
            builder.with_page_numbers()
        } else {
            builder
        }
    }

    /// Configures a footer callback with a fixed height that is invoked for every page.
    pub fn with_footer<F, E>(mut self, height: impl Into<Mm>, footer: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        self.footer = Some(FooterSpec::new(height, footer));
        self
    }

    /// Adds a right-aligned "Page N" footer.
    pub fn with_page_numbers(self) -> Self {
        self.with_footer(FOOTER_HEIGHT_MM, |page| {
            Paragraph::new(format!("Page {}", page))
                .aligned(genpdf::Alignment::Right)
                .styled(Style::new().with_font_size(PAGE_NUMBER_FONT_SIZE))
        })
    }

    /// Lays `resume` out into a configured `genpdf::Document`.
    pub fn build(self, resume: &ResumeDocument) -> Result<genpdf::Document> {
        let font_family = fonts::default_font_family().map_err(ExportError::FontLoad)?;
        let mut document = genpdf::Document::new(font_family);
        document.set_title(resume.header().name());
        document.set_minimal_conformance();
        document.set_line_spacing(LINE_SPACING);
        document.set_font_size(BODY_FONT_SIZE);

        document.set_page_decorator(ConfiguredPageDecorator::new(self.margins, self.footer));

        document.push(header_element(resume)?);
        document.push(Break::new(1.0));
        for section in resume.sections() {
            push_section(&mut document, section);
        }

        Ok(document)
    }

    /// Renders `resume` to PDF bytes.
    pub fn render(self, resume: &ResumeDocument) -> Result<RenderedPdf> {
        let document = self.build(resume)?;
        let mut bytes = Vec::new();
        document.render(&mut bytes).map_err(ExportError::Render)?;
        Ok(RenderedPdf { bytes })
    }

    /// Renders `resume` and writes it to `path`, creating parent directories.
    pub fn render_to_file(self, resume: &ResumeDocument, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let pdf = self.render(resume)?;
        if let Some(parent) = path.parent().filter(|parent| !parent.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|err| ExportError::io(parent, err))?;
        }
        fs::write(path, &pdf.bytes).map_err(|err| ExportError::io(path, err))?;
        info!("Wrote {} ({} bytes)", path.display(), pdf.bytes.len());
        Ok(())
    }
}

/// Loads the content named by `config`, renders it and writes the PDF to the configured output.
pub fn export_pdf(config: &ExportConfig) -> Result<PathBuf> {
    let content = ResumeContent::load(config)?;
    let resume = ResumeDocument::assemble(&content, config.photo());
    PdfBuilder::from_config(config).render_to_file(&resume, config.output())?;
    Ok(config.output().to_path_buf())
}

fn header_element(resume: &ResumeDocument) -> Result<ProfileHeader> {
    let header = resume.header();
    let name = StyledString::new(
        header.name().to_owned(),
        Style::new().bold().with_font_size(NAME_FONT_SIZE),
    );
    let element = ProfileHeader::new(name);
    match header.photo() {
        Some(photo) => {
            let image = ScaledImage::from_path(photo, Mm::from(printpdf::Mm(PHOTO_WIDTH_MM)))
                .map_err(ExportError::Image)?;
            Ok(element.with_photo(image))
        }
        None => Ok(element),
    }
}

fn paragraph_element(paragraph: &RichParagraph) -> Paragraph {
    let mut element = Paragraph::default();
    for span in paragraph.spans() {
        element.push(StyledString::from(span));
    }
    element
}

fn push_section(document: &mut genpdf::Document, section: &Section) {
    document.push(
        Paragraph::new(section.title())
            .styled(Style::new().bold().with_font_size(SECTION_TITLE_FONT_SIZE)),
    );
    document.push(Break::new(0.3));

    for block in section.blocks() {
        match block {
            Block::Paragraph(paragraph) if spans_are_blank(paragraph.spans()) => {}
            Block::Paragraph(paragraph) => {
                document.push(paragraph_element(paragraph));
                document.push(Break::new(0.2));
            }
            Block::BulletList(items) => {
                let mut list = UnorderedList::with_bullet(BULLET);
                for item in items {
                    list.push(paragraph_element(item));
                }
                document.push(list);
                document.push(Break::new(0.3));
            }
            Block::Spacing(lines) => document.push(Break::new(*lines)),
        }
    }

    document.push(Break::new(0.5));
}

/// Definition of a footer rendered through the page decorator.
pub struct FooterSpec {
    height: Mm,
    factory: Box<ElementFactory>,
}

impl FooterSpec {
    /// Creates a new footer specification.
    pub fn new<F, E>(height: impl Into<Mm>, factory: F) -> Self
    where
        F: Fn(usize) -> E + 'static,
        E: Element + 'static,
    {
        Self {
            height: height.into(),
            factory: Box::new(move |page| Box::new(factory(page)) as Box<dyn Element>),
        }
    }
}

struct ConfiguredPageDecorator {
    page: usize,
    margins: Margins,
    footer: Option<FooterSpec>,
}

impl ConfiguredPageDecorator {
    fn new(margins: Margins, footer: Option<FooterSpec>) -> Self {
        Self {
            page: 0,
            margins,
            footer,
        }
    }
}

impl PageDecorator for ConfiguredPageDecorator {
    fn decorate_page<'a>(
        &mut self,
        context: &genpdf::Context,
        mut area: genpdf::render::Area<'a>,
        style: Style,
    ) -> std::result::Result<genpdf::render::Area<'a>, Error> {
        self.page += 1;
        area.add_margins(self.margins);

        if let Some(footer) = &self.footer {
            let available = area.size().height;
            if footer.height > available {
                return Err(Error::new(
                    "Footer height exceeds available space",
                    ErrorKind::InvalidData,
                ));
            }

            let mut footer_area = area.clone();
            footer_area.add_offset(Position::new(0, available - footer.height));
            let mut element = (footer.factory)(self.page);
            let result = element.render(context, footer_area, style)?;
            if result.has_more {
                return Err(Error::new(
                    "Footer element does not fit into the reserved space",
                    ErrorKind::PageSizeExceeded,
                ));
            }

            area.set_height(available - footer.height);
        }

        Ok(area)
    }
}
