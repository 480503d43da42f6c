//! Drawing primitives on top of `image` buffers.
//!
//! All functions clip against the buffer, so callers may pass coordinates
//! that lie partly or completely outside of it.

use image::{GrayImage, Rgb, RgbImage};

fn clip_span(from: i64, to: i64, len: u32) -> Option<(u32, u32)> {
    let (lo, hi) = if from <= to { (from, to) } else { (to, from) };
    let lo = lo.max(0);
    let hi = hi.min(i64::from(len) - 1);
    (lo <= hi).then_some((lo as u32, hi as u32))
}

fn row_in(image: &RgbImage, y: i64) -> Option<u32> {
    (0..i64::from(image.height()))
        .contains(&y)
        .then_some(y as u32)
}

fn col_in(image: &RgbImage, x: i64) -> Option<u32> {
    (0..i64::from(image.width()))
        .contains(&x)
        .then_some(x as u32)
}

/// Draws the pixels `x0..=x1` of row `y`.
pub fn draw_hline(image: &mut RgbImage, x0: i64, x1: i64, y: i64, color: Rgb<u8>) {
    let Some(y) = row_in(image, y) else {
        return;
    };
    if let Some((lo, hi)) = clip_span(x0, x1, image.width()) {
        for x in lo..=hi {
            image.put_pixel(x, y, color);
        }
    }
}

/// Draws the pixels `y0..=y1` of column `x`.
pub fn draw_vline(image: &mut RgbImage, x: i64, y0: i64, y1: i64, color: Rgb<u8>) {
    let Some(x) = col_in(image, x) else {
        return;
    };
    if let Some((lo, hi)) = clip_span(y0, y1, image.height()) {
        for y in lo..=hi {
            image.put_pixel(x, y, color);
        }
    }
}

/// One pixel wide outline whose outer edge is the `width` x `height`
/// rectangle at `(x, y)`.
pub fn draw_rect(image: &mut RgbImage, x: i64, y: i64, width: u32, height: u32, color: Rgb<u8>) {
    if width == 0 || height == 0 {
        return;
    }
    let right = x + i64::from(width) - 1;
    let bottom = y + i64::from(height) - 1;
    draw_hline(image, x, right, y, color);
    draw_hline(image, x, right, bottom, color);
    draw_vline(image, x, y, bottom, color);
    draw_vline(image, right, y, bottom, color);
}

/// Paints `color` through a coverage mask placed with its top-left corner
/// at `(x, y)`. Coverage 255 replaces the pixel, lower values blend.
pub fn blend_mask(image: &mut RgbImage, mask: &GrayImage, x: i64, y: i64, color: Rgb<u8>) {
    for (mx, my, coverage) in mask.enumerate_pixels() {
        let alpha = u32::from(coverage[0]);
        if alpha == 0 {
            continue;
        }
        let px = col_in(image, x + i64::from(mx));
        let py = row_in(image, y + i64::from(my));
        let (Some(px), Some(py)) = (px, py) else {
            continue;
        };
        let pixel = image.get_pixel_mut(px, py);
        for (dst, &src) in pixel.0.iter_mut().zip(&color.0) {
            *dst = ((u32::from(src) * alpha + u32::from(*dst) * (255 - alpha)) / 255) as u8;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    const BLACK: Rgb<u8> = Rgb([0, 0, 0]);
    const WHITE: Rgb<u8> = Rgb([255, 255, 255]);

    fn count(image: &RgbImage, color: Rgb<u8>) -> usize {
        image.pixels().filter(|p| **p == color).count()
    }

    #[test]
    fn lines_are_clipped() {
        let mut image = RgbImage::from_pixel(4, 4, WHITE);
        draw_hline(&mut image, -10, 10, 1, BLACK);
        draw_vline(&mut image, 2, 3, -5, BLACK);
        draw_hline(&mut image, 0, 3, 7, BLACK);
        draw_vline(&mut image, -1, 0, 3, BLACK);

        // row 1 (4 pixels) plus column 2 rows 0, 2, 3
        assert_eq!(count(&image, BLACK), 7);
        assert_eq!(image.get_pixel(2, 3), &BLACK);
    }

    #[test]
    fn rect_outline() {
        let mut image = RgbImage::from_pixel(5, 5, WHITE);
        draw_rect(&mut image, 1, 1, 3, 3, BLACK);
        assert_eq!(count(&image, BLACK), 8);
        assert_eq!(image.get_pixel(2, 2), &WHITE);
    }

    #[test]
    fn mask_blends_coverage() {
        let mut image = RgbImage::from_pixel(3, 1, WHITE);
        let mut mask = GrayImage::new(3, 1);
        mask.put_pixel(0, 0, Luma([255]));
        mask.put_pixel(1, 0, Luma([0]));
        mask.put_pixel(2, 0, Luma([51]));
        blend_mask(&mut image, &mask, 0, 0, BLACK);

        assert_eq!(image.get_pixel(0, 0), &BLACK);
        assert_eq!(image.get_pixel(1, 0), &WHITE);
        assert_eq!(image.get_pixel(2, 0), &Rgb([204, 204, 204]));
    }

    #[test]
    fn mask_outside_is_ignored() {
        let mut image = RgbImage::from_pixel(2, 2, WHITE);
        let mask = GrayImage::from_pixel(2, 2, Luma([255]));
        blend_mask(&mut image, &mask, 1, -1, BLACK);
        assert_eq!(count(&image, BLACK), 1);
        assert_eq!(image.get_pixel(1, 0), &BLACK);
    }
}
