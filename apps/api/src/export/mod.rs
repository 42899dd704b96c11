//! Export Pipeline — turns the rendered preview into a downloadable PDF.
//!
//! Three fixed stages: lay the view out into typed lines, rasterize those
//! lines onto oversampled page bitmaps (print resolution, not 1:1 screen
//! pixels), then embed each bitmap into a US-letter PDF page, scaled to the
//! printable width and centered horizontally. Any failure is reported as a
//! generic export error and never touches form state.

pub mod handlers;
mod layout;
mod raster;

use image::DynamicImage;
use printpdf::{Image, ImageTransform, Mm, PdfDocument};
use thiserror::Error;

use crate::render::ResumeView;

/// Side of one 8×8 font glyph before scaling.
pub(crate) const GLYPH_CELL_PX: u32 = 8;

/// Oversampling factor relative to 96-dpi screen pixels. The contract is
/// "suitable for print", i.e. strictly more than 1:1.
pub(crate) const OVERSAMPLE: u32 = 2;

/// US letter at 96 dpi, oversampled.
pub(crate) const CANVAS_WIDTH_PX: u32 = 816 * OVERSAMPLE;
pub(crate) const PAGE_SLICE_HEIGHT_PX: u32 = 1056 * OVERSAMPLE;

/// Inner whitespace baked into the canvas.
pub(crate) const CANVAS_MARGIN_PX: u32 = 48 * OVERSAMPLE;

/// US letter in millimeters.
const PAGE_WIDTH_MM: f64 = 215.9;
const PAGE_HEIGHT_MM: f64 = 279.4;

/// Outer print margin the bitmap is fitted inside.
const PRINT_MARGIN_MM: f64 = 12.7;

/// Density at which the oversampled canvas maps onto the printable width.
const RASTER_DPI: f64 = CANVAS_WIDTH_PX as f64 / 7.5;

/// Fallback artifact name when no person name is available.
const FALLBACK_FILE_NAME: &str = "Resume.pdf";

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("pdf encoding failed: {0}")]
    Encode(String),
}

/// The finished artifact: bytes, a download filename, and the page count.
pub struct ExportedPdf {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub pages: usize,
}

/// Download filename derived from the person's name, whitespace replaced
/// with underscores; a fixed fallback when blank.
pub fn file_name_for(name: &str) -> String {
    let parts: Vec<&str> = name.split_whitespace().collect();
    if parts.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        format!("{}_Resume.pdf", parts.join("_"))
    }
}

fn px_to_mm(px: u32) -> f64 {
    px as f64 / RASTER_DPI * 25.4
}

/// Runs the full pipeline on a rendered view.
pub fn export_pdf(view: &ResumeView) -> Result<ExportedPdf, ExportError> {
    let lines = layout::layout(view);
    let bitmaps = raster::rasterize(&lines);
    let page_count = bitmaps.len();

    let (doc, first_page, first_layer) = PdfDocument::new(
        format!("{} - Resume", view.name),
        Mm(PAGE_WIDTH_MM as f32),
        Mm(PAGE_HEIGHT_MM as f32),
        "page 1",
    );

    let mut page_refs = vec![(first_page, first_layer)];
    for index in 1..page_count {
        page_refs.push(doc.add_page(
            Mm(PAGE_WIDTH_MM as f32),
            Mm(PAGE_HEIGHT_MM as f32),
            format!("page {}", index + 1),
        ));
    }

    for (bitmap, (page, layer)) in bitmaps.into_iter().zip(page_refs) {
        let (width_px, height_px) = bitmap.dimensions();
        let width_mm = px_to_mm(width_px);
        let height_mm = px_to_mm(height_px);

        let image = Image::from_dynamic_image(&DynamicImage::ImageRgb8(bitmap));
        image.add_to_layer(
            doc.get_page(page).get_layer(layer),
            ImageTransform {
                // Scaled to the printable width, centered horizontally,
                // top-aligned under the print margin.
                translate_x: Some(Mm(((PAGE_WIDTH_MM - width_mm) / 2.0) as f32)),
                translate_y: Some(Mm((PAGE_HEIGHT_MM - PRINT_MARGIN_MM - height_mm) as f32)),
                dpi: Some(RASTER_DPI as f32),
                ..Default::default()
            },
        );
    }

    let bytes = doc
        .save_to_bytes()
        .map_err(|e| ExportError::Encode(e.to_string()))?;

    Ok(ExportedPdf {
        file_name: file_name_for(&view.name),
        bytes,
        pages: page_count,
    })
}
