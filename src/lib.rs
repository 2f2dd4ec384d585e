//! Core entry point for the resume_pdf crate.
//!
//! The crate turns the markdown content tree of an academic personal site into a one-file
//! résumé. Two exporters are provided:
//!
//! * [`export_pdf`] extracts structured fields (about text, research interests, experience and
//!   award bullets, publication metadata) and lays them out with `genpdf`.
//! * [`export_html`] concatenates the markdown bodies and converts them to a standalone HTML page.

pub mod about;
pub mod builder;
pub mod bullets;
pub mod config;
pub mod content;
pub mod elements;
pub mod error;
pub mod fonts;
pub mod frontmatter;
pub mod html;
pub mod model;
pub mod normalize;
pub mod publications;
pub mod richtext;

pub use builder::{export_pdf, PdfBuilder};
pub use config::ExportConfig;
pub use content::ResumeContent;
pub use error::{ExportError, Result};
pub use html::{export_html, render_html};
pub use model::ResumeDocument;
pub use normalize::normalize;
