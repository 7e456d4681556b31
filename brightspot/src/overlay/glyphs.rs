// THEORY:
// The overlays only ever print rank numbers, four-digit decoys and the `ID:` /
// `ERR:` prefixes, so a full font stack is unnecessary. This module carries a
// 3x5 bitmap for exactly those characters and paints each lit cell as a filled
// square of `scale` pixels. Text is anchored at its bottom-left corner, the
// same convention a baseline-anchored font renderer uses.

use image::{Rgb, RgbImage};
use imageproc::drawing::draw_filled_rect_mut;
use imageproc::rect::Rect;

const GLYPH_WIDTH: u32 = 3;
const GLYPH_HEIGHT: u32 = 5;
const GLYPH_SPACING: u32 = 1;

/// Rows top to bottom; bit 2 is the leftmost column.
fn glyph(c: char) -> Option<[u8; 5]> {
    let rows = match c {
        '0' => [0b111, 0b101, 0b101, 0b101, 0b111],
        '1' => [0b010, 0b110, 0b010, 0b010, 0b111],
        '2' => [0b111, 0b001, 0b111, 0b100, 0b111],
        '3' => [0b111, 0b001, 0b111, 0b001, 0b111],
        '4' => [0b101, 0b101, 0b111, 0b001, 0b001],
        '5' => [0b111, 0b100, 0b111, 0b001, 0b111],
        '6' => [0b111, 0b100, 0b111, 0b101, 0b111],
        '7' => [0b111, 0b001, 0b001, 0b001, 0b001],
        '8' => [0b111, 0b101, 0b111, 0b101, 0b111],
        '9' => [0b111, 0b101, 0b111, 0b001, 0b111],
        'I' => [0b111, 0b010, 0b010, 0b010, 0b111],
        'D' => [0b110, 0b101, 0b101, 0b101, 0b110],
        'E' => [0b111, 0b100, 0b110, 0b100, 0b111],
        'R' => [0b110, 0b101, 0b110, 0b101, 0b101],
        ':' => [0b000, 0b010, 0b000, 0b010, 0b000],
        _ => return None,
    };
    Some(rows)
}

/// Paints `text` with its bottom-left corner at `origin`. Clipped to the canvas;
/// characters without a glyph leave a blank cell.
pub fn draw_text_mut(canvas: &mut RgbImage, text: &str, origin: (i32, i32), scale: u32, color: Rgb<u8>) {
    let scale = scale.max(1);
    let top = origin.1 - (GLYPH_HEIGHT * scale) as i32 + 1;
    let mut left = origin.0;

    for c in text.chars() {
        if let Some(rows) = glyph(c) {
            for (row, bits) in rows.iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0b100 >> col) == 0 {
                        continue;
                    }
                    let x = left + (col * scale) as i32;
                    let y = top + (row as u32 * scale) as i32;
                    draw_filled_rect_mut(canvas, Rect::at(x, y).of_size(scale, scale), color);
                }
            }
        }
        left += ((GLYPH_WIDTH + GLYPH_SPACING) * scale) as i32;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn lit(canvas: &RgbImage) -> usize {
        canvas.pixels().filter(|p| p.0 != [0, 0, 0]).count()
    }

    #[test]
    fn one_is_drawn_above_origin() {
        let mut canvas = RgbImage::new(10, 10);
        draw_text_mut(&mut canvas, "1", (2, 8), 1, WHITE);
        // "1" lights 8 cells
        assert_eq!(lit(&canvas), 8);
        assert_eq!(canvas.get_pixel(2, 8).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(3, 4).0, [255, 255, 255]);
        assert_eq!(canvas.get_pixel(2, 3).0, [0, 0, 0]);
    }

    #[test]
    fn scale_multiplies_cell_area() {
        let mut small = RgbImage::new(64, 32);
        let mut large = RgbImage::new(64, 32);
        draw_text_mut(&mut small, "ERR:42", (1, 20), 1, WHITE);
        draw_text_mut(&mut large, "ERR:42", (1, 20), 2, WHITE);
        assert_eq!(lit(&large), lit(&small) * 4);
    }

    #[test]
    fn text_off_canvas_is_clipped() {
        let mut canvas = RgbImage::new(8, 8);
        draw_text_mut(&mut canvas, "8888", (-20, -20), 2, WHITE);
        draw_text_mut(&mut canvas, "8888", (100, 100), 2, WHITE);
        assert_eq!(lit(&canvas), 0);
    }
}
