//! Extended element implementations built on top of `genpdf` primitives.
//!
//! This module holds the image decoding helpers used for the header photo and the
//! [`ProfileHeader`] element that places the photo beside the name.

use std::path::Path;

use image::GenericImageView;

use genpdf::elements::{Image, Paragraph};
use genpdf::error::{Context as _, Error};
use genpdf::style::{Style, StyledString};
use genpdf::{render, Element, Mm, Position, RenderResult, Scale, Size};

const DEFAULT_IMAGE_DPI: f64 = 300.0;
const MM_PER_INCH: f64 = 25.4;
const DEFAULT_PHOTO_GAP_MM: f64 = 5.0;

fn mm_from_f64(value: f64) -> Mm {
    Mm::from(printpdf::Mm(value))
}

fn mm_to_f64(value: Mm) -> f64 {
    let mm: printpdf::Mm = value.into();
    mm.0
}

fn estimated_image_size(image: &image::DynamicImage, dpi: f64) -> Size {
    let (px_width, px_height) = image.dimensions();
    let width_mm = MM_PER_INCH * (px_width as f64) / dpi;
    let height_mm = MM_PER_INCH * (px_height as f64) / dpi;
    Size::new(mm_from_f64(width_mm), mm_from_f64(height_mm))
}

/// Loads an image from the given path using the [`image`] crate with descriptive errors.
pub fn decode_image_from_path(path: impl AsRef<Path>) -> Result<image::DynamicImage, Error> {
    let path = path.as_ref();
    let reader = image::io::Reader::open(path)
        .with_context(|| format!("Failed to open image file {}", path.display()))?;
    reader
        .with_guessed_format()
        .context("Unable to determine image format")?
        .decode()
        .with_context(|| format!("Failed to decode image file {}", path.display()))
}

/// A photo scaled to a fixed width, with its rendered size.
pub struct ScaledImage {
    image: Image,
    size: Size,
}

impl ScaledImage {
    /// Decodes `image` and scales it to `width` while keeping the aspect ratio.
    pub fn from_dynamic_image(image: image::DynamicImage, width: Mm) -> Result<Self, Error> {
        let natural = estimated_image_size(&image, DEFAULT_IMAGE_DPI);
        let natural_width = mm_to_f64(natural.width);
        let scale = if natural_width > f64::EPSILON {
            mm_to_f64(width) / natural_width
        } else {
            1.0
        };
        let image = Image::from_dynamic_image(image)?.with_scale(Scale::new(scale, scale));
        let size = Size::new(
            mm_from_f64(natural_width * scale),
            mm_from_f64(mm_to_f64(natural.height) * scale),
        );
        Ok(Self { image, size })
    }

    /// Loads the image at `path` and scales it to `width`.
    pub fn from_path(path: impl AsRef<Path>, width: Mm) -> Result<Self, Error> {
        Self::from_dynamic_image(decode_image_from_path(path)?, width)
    }

    /// Returns the rendered size of the image.
    pub fn size(&self) -> Size {
        self.size
    }
}

/// The résumé header: an optional photo on the left and the name beside it.
pub struct ProfileHeader {
    name: Paragraph,
    photo: Option<ScaledImage>,
    gap: Mm,
}

impl ProfileHeader {
    /// Creates a header showing only the name.
    pub fn new(name: impl Into<StyledString>) -> Self {
        Self {
            name: Paragraph::new(name),
            photo: None,
            gap: mm_from_f64(DEFAULT_PHOTO_GAP_MM),
        }
    }

    /// Places `photo` to the left of the name.
    pub fn with_photo(mut self, photo: ScaledImage) -> Self {
        self.photo = Some(photo);
        self
    }
}

impl Element for ProfileHeader {
    fn render(
        &mut self,
        context: &genpdf::Context,
        area: render::Area<'_>,
        style: Style,
    ) -> Result<RenderResult, Error> {
        let mut result = RenderResult::default();
        let mut name_area = area.clone();

        if let Some(photo) = &mut self.photo {
            let photo_result = photo.image.render(context, area.clone(), style)?;
            result.has_more |= photo_result.has_more;
            result.size = Size::new(photo.size.width, photo_result.size.height);

            let indent = photo.size.width + self.gap;
            name_area.add_offset(Position::new(indent, 0));
            name_area.set_width(area.size().width - indent);
        }

        let name_result = self.name.render(context, name_area, style)?;
        result.has_more |= name_result.has_more;
        result.size = Size::new(
            area.size().width,
            result.size.height.max(name_result.size.height),
        );

        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use image::{DynamicImage, ImageBuffer, Rgb};

    #[test]
    fn scaled_image_keeps_aspect_ratio() {
        let buffer = ImageBuffer::from_pixel(300, 150, Rgb([120u8, 80, 40]));
        let scaled =
            ScaledImage::from_dynamic_image(DynamicImage::ImageRgb8(buffer), mm_from_f64(30.0))
                .expect("image converts");
        let width = mm_to_f64(scaled.size().width);
        let height = mm_to_f64(scaled.size().height);
        assert!((width - 30.0).abs() < 1e-6);
        assert!((height - 15.0).abs() < 1e-6);
    }

    #[test]
    fn missing_image_reports_path() {
        let err = match decode_image_from_path("/no/such/photo.jpg") {
            Ok(_) => panic!("decoding a missing file should fail"),
            Err(err) => err,
        };
        assert!(err.to_string().contains("/no/such/photo.jpg"));
    }
}
