//! PDF document renderer.
//!
//! [`PdfSurface`] is a [`Surface`] backed by a single-page `printpdf` document. Layout
//! coordinates are PDF points with the origin at the bottom left, which is also printpdf's
//! origin, so only the unit changes (points to millimetres).

use printpdf::{
    BuiltinFont, ColorBits, ColorSpace, Image, ImageTransform, ImageXObject, IndirectFontRef, Mm,
    PdfDocument, PdfDocumentReference, PdfLayerReference, Px,
};

use crate::{
    assets::ImageAsset,
    error::{AddContext, Error},
    layout::{LayoutConfig, Rect, Surface},
};

const PT_TO_MM: f32 = 25.4 / 72.0;

fn mm(points: f32) -> Mm {
    Mm(points * PT_TO_MM)
}

pub struct PdfSurface {
    doc: PdfDocumentReference,
    layer: PdfLayerReference,
    font: IndirectFontRef,
}

impl PdfSurface {
    /// Create a document with one page sized by `config`.
    pub fn new(title: &str, config: &LayoutConfig) -> Result<PdfSurface, Error> {
        let (doc, page, layer) = PdfDocument::new(
            title,
            mm(config.page_width),
            mm(config.page_height),
            "Invoice",
        );
        let font = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(Error::from)
            .add_context("adding builtin font")?;
        let layer = doc.get_page(page).get_layer(layer);
        Ok(PdfSurface { doc, layer, font })
    }

    /// Serialize the finished document.
    pub fn finish(self) -> Result<Vec<u8>, Error> {
        self.doc
            .save_to_bytes()
            .map_err(Error::from)
            .add_context("serializing pdf")
    }
}

impl Surface for PdfSurface {
    fn draw_text(&mut self, text: &str, x: f32, y: f32, size: f32) {
        self.layer.use_text(text, size, mm(x), mm(y), &self.font);
    }

    fn draw_image(&mut self, image: &ImageAsset, rect: Rect) {
        let xobject = ImageXObject {
            width: Px(image.width() as usize),
            height: Px(image.height() as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: image.rgb().to_vec(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        };
        // At 72 dpi one pixel is one point, so scale pixels straight to the target box.
        Image::from(xobject).add_to_layer(
            self.layer.clone(),
            ImageTransform {
                translate_x: Some(mm(rect.x)),
                translate_y: Some(mm(rect.y)),
                scale_x: Some(rect.width / image.width() as f32),
                scale_y: Some(rect.height / image.height() as f32),
                dpi: Some(72.0),
                ..Default::default()
            },
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn produces_a_pdf() {
        let mut surface = PdfSurface::new("test", &LayoutConfig::compact()).unwrap();
        surface.draw_text("hello", 40.0, 800.0, 10.0);
        let bytes = surface.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[test]
    fn embeds_images() {
        let img = image::RgbaImage::from_pixel(4, 2, image::Rgba([200, 10, 10, 255]));
        let mut png = std::io::Cursor::new(Vec::new());
        img.write_to(&mut png, image::ImageFormat::Png).unwrap();
        let asset = ImageAsset::from_png("logo.png", png.get_ref()).unwrap();

        let mut surface = PdfSurface::new("test", &LayoutConfig::wide()).unwrap();
        surface.draw_image(
            &asset,
            Rect {
                x: 30.0,
                y: 500.0,
                width: 100.0,
                height: 50.0,
            },
        );
        let bytes = surface.finish().unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
