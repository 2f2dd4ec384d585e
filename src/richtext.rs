//! Utilities for working with styled text fragments.
//!
//! A [`Span`] is a run of already-normalized text together with the few inline attributes the
//! résumé layout needs (weight, slant and size). Spans sit between the document model and the
//! [`genpdf::style::StyledString`] values consumed by the PDF elements, so the model itself stays
//! free of rendering types.

use genpdf::style::{Style, StyledString};

/// A slice of text together with inline style attributes.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Span {
    text: String,
    bold: bool,
    italic: bool,
    font_size: Option<u8>,
}

impl Span {
    /// Creates a new span with the provided text and no styles applied.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    /// Returns the raw text contained in this span.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Convenience shorthand that marks the span as bold.
    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    /// Convenience shorthand that marks the span as italic.
    pub fn italic(mut self) -> Self {
        self.italic = true;
        self
    }

    /// Sets the font size in points and returns the updated span.
    pub fn sized(mut self, font_size: u8) -> Self {
        self.font_size = Some(font_size);
        self
    }

    fn to_style(&self) -> Style {
        let mut style = Style::new();
        if let Some(font_size) = self.font_size {
            style.set_font_size(font_size);
        }
        if self.bold {
            style.set_bold();
        }
        if self.italic {
            style.set_italic();
        }
        style
    }
}

impl From<&Span> for StyledString {
    fn from(span: &Span) -> Self {
        StyledString::new(span.text.clone(), span.to_style())
    }
}

/// Returns whether every span is empty.
pub fn spans_are_blank(spans: &[Span]) -> bool {
    spans.iter().all(|span| span.text.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn span_to_style_reflects_flags() {
        let span = Span::new("Hello").bold().italic().sized(14);
        let styled = StyledString::from(&span);
        assert_eq!(styled.s, "Hello");
        assert!(styled.style.is_bold());
        assert!(styled.style.is_italic());
        assert_eq!(styled.style.font_size(), 14);
    }

    #[test]
    fn plain_span_has_no_overrides() {
        let styled = StyledString::from(&Span::new("plain"));
        assert!(!styled.style.is_bold());
        assert!(!styled.style.is_italic());
    }

    #[test]
    fn blank_detection() {
        assert!(spans_are_blank(&[Span::new("  "), Span::new("")]));
        assert!(!spans_are_blank(&[Span::new("x")]));
    }
}
