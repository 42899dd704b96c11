//! Rasterization: typed lines → page-sized RGB bitmaps.
//!
//! Glyphs come from the fixed 8×8 bitmap font table and are blitted as
//! scaled blocks, so the whole stage is deterministic and needs no font
//! files. The canvas is already oversampled relative to screen resolution;
//! the PDF stage scales it back down to physical page size.

use font8x8::{UnicodeFonts, BASIC_FONTS};
use image::{Rgb, RgbImage};

use crate::export::layout::{Line, LineKind};
use crate::export::{CANVAS_MARGIN_PX, CANVAS_WIDTH_PX, GLYPH_CELL_PX, PAGE_SLICE_HEIGHT_PX};

const PAPER: Rgb<u8> = Rgb([255, 255, 255]);
const INK: Rgb<u8> = Rgb([32, 32, 32]);

/// Characters outside the basic table render as this stand-in.
const FALLBACK_GLYPH: char = '?';

fn blank_page() -> RgbImage {
    RgbImage::from_pixel(CANVAS_WIDTH_PX, PAGE_SLICE_HEIGHT_PX, PAPER)
}

fn glyph_for(ch: char) -> [u8; 8] {
    BASIC_FONTS
        .get(ch)
        .or_else(|| BASIC_FONTS.get(FALLBACK_GLYPH))
        .unwrap_or([0; 8])
}

/// Blits one glyph at (x, y) with each font pixel expanded to a
/// `scale`×`scale` block.
fn blit_glyph(page: &mut RgbImage, x: u32, y: u32, ch: char, scale: u32) {
    let glyph = glyph_for(ch);
    for (row, bits) in glyph.iter().enumerate() {
        for col in 0..8u32 {
            if bits & (1 << col) == 0 {
                continue;
            }
            for dy in 0..scale {
                for dx in 0..scale {
                    let px = x + col * scale + dx;
                    let py = y + row as u32 * scale + dy;
                    if px < CANVAS_WIDTH_PX && py < PAGE_SLICE_HEIGHT_PX {
                        page.put_pixel(px, py, INK);
                    }
                }
            }
        }
    }
}

fn blit_line(page: &mut RgbImage, y: u32, text: &str, scale: u32) {
    let advance = GLYPH_CELL_PX * scale;
    let mut x = CANVAS_MARGIN_PX;
    for ch in text.chars() {
        blit_glyph(page, x, y, ch, scale);
        x += advance;
        if x + advance > CANVAS_WIDTH_PX - CANVAS_MARGIN_PX {
            break; // layout already wrapped; this is a belt guard only
        }
    }
}

/// Rasterizes the line sequence into one bitmap per page. Content that does
/// not fit a page continues on the next; the result always holds at least
/// one page.
pub(crate) fn rasterize(lines: &[Line]) -> Vec<RgbImage> {
    let mut pages = Vec::new();
    let mut page = blank_page();
    let mut cursor = CANVAS_MARGIN_PX;
    let bottom = PAGE_SLICE_HEIGHT_PX - CANVAS_MARGIN_PX;

    for line in lines {
        let scale = line.kind.glyph_scale();
        let height = GLYPH_CELL_PX * scale + line.kind.leading();

        if cursor + height > bottom {
            pages.push(std::mem::replace(&mut page, blank_page()));
            cursor = CANVAS_MARGIN_PX;
            // A page break swallows the spacer that caused it.
            if line.kind == LineKind::Spacer {
                continue;
            }
        }

        if line.kind != LineKind::Spacer {
            blit_line(&mut page, cursor, &line.text, scale);
        }
        cursor += height;
    }

    pages.push(page);
    pages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_line(kind: LineKind, text: &str) -> Line {
        Line {
            kind,
            text: text.to_string(),
        }
    }

    fn ink_pixels(page: &RgbImage) -> usize {
        page.pixels().filter(|p| **p == INK).count()
    }

    #[test]
    fn test_empty_input_yields_one_blank_page() {
        let pages = rasterize(&[]);
        assert_eq!(pages.len(), 1);
        assert_eq!(ink_pixels(&pages[0]), 0);
    }

    #[test]
    fn test_pages_have_fixed_canvas_dimensions() {
        let pages = rasterize(&[make_line(LineKind::Title, "Jane Doe")]);
        assert_eq!(
            pages[0].dimensions(),
            (CANVAS_WIDTH_PX, PAGE_SLICE_HEIGHT_PX)
        );
    }

    #[test]
    fn test_text_leaves_ink_on_the_page() {
        let pages = rasterize(&[make_line(LineKind::Text, "Hello")]);
        assert!(ink_pixels(&pages[0]) > 0);
    }

    #[test]
    fn test_blank_text_leaves_no_ink() {
        let pages = rasterize(&[make_line(LineKind::Spacer, "")]);
        assert_eq!(ink_pixels(&pages[0]), 0);
    }

    #[test]
    fn test_larger_scale_uses_more_ink() {
        let small = rasterize(&[make_line(LineKind::Text, "A")]);
        let large = rasterize(&[make_line(LineKind::Title, "A")]);
        assert!(ink_pixels(&large[0]) > ink_pixels(&small[0]));
    }

    #[test]
    fn test_overflowing_content_spills_to_second_page() {
        let lines: Vec<Line> = (0..200)
            .map(|i| make_line(LineKind::Text, &format!("line {i}")))
            .collect();
        let pages = rasterize(&lines);
        assert!(pages.len() > 1, "200 lines must not fit one page");
        assert!(ink_pixels(&pages[1]) > 0);
    }

    #[test]
    fn test_identical_input_rasterizes_identically() {
        let lines = vec![
            make_line(LineKind::Title, "Jane Doe"),
            make_line(LineKind::Text, "jane@example.com"),
        ];
        let a = rasterize(&lines);
        let b = rasterize(&lines);
        assert_eq!(a[0].as_raw(), b[0].as_raw());
    }
}
