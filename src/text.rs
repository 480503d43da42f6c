//! Text rasterization for tick labels and titles.
//!
//! Glyphs are rendered with `fontdue` from a system TrueType font when one
//! can be found. Without one, a built-in 5x7 bitmap font scaled to the
//! requested size is used instead.

use std::sync::OnceLock;

use fontdue::{Font, FontSettings};
use image::{GrayImage, Luma};

use crate::style::RenderStyle;

#[cfg(target_os = "linux")]
const FONT_PATHS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/TTF/DejaVuSans.ttf",
    "/usr/share/fonts/dejavu/DejaVuSans.ttf",
    "/usr/share/fonts/truetype/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/liberation/LiberationSans-Regular.ttf",
    "/usr/share/fonts/truetype/freefont/FreeSans.ttf",
];

#[cfg(target_os = "macos")]
const FONT_PATHS: &[&str] = &[
    "/System/Library/Fonts/Supplemental/Arial.ttf",
    "/Library/Fonts/Arial.ttf",
    "/System/Library/Fonts/Geneva.ttf",
];

#[cfg(target_os = "windows")]
const FONT_PATHS: &[&str] = &[
    "C:\\Windows\\Fonts\\arial.ttf",
    "C:\\Windows\\Fonts\\segoeui.ttf",
];

#[cfg(not(any(target_os = "linux", target_os = "macos", target_os = "windows")))]
const FONT_PATHS: &[&str] = &[];

static SYSTEM_FONT: OnceLock<Option<Font>> = OnceLock::new();

fn system_font() -> Option<&'static Font> {
    SYSTEM_FONT.get_or_init(load_system_font).as_ref()
}

fn load_system_font() -> Option<Font> {
    let font = FONT_PATHS.iter().find_map(|path| {
        let data = std::fs::read(path).ok()?;
        let font = Font::from_bytes(data, FontSettings::default()).ok()?;
        log::debug!("using system font {path}");
        Some(font)
    });
    if font.is_none() {
        log::warn!("no system font found, falling back to the built-in bitmap font");
    }
    font
}

#[derive(Clone, Copy)]
enum Face {
    TrueType(&'static Font),
    Bitmap { scale: u32 },
}

/// Measures and rasterizes single-line text at a fixed size.
#[derive(Clone, Copy)]
pub struct TextRenderer {
    face: Face,
    size: f32,
}

impl std::fmt::Debug for TextRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let face = match self.face {
            Face::TrueType(_) => "truetype",
            Face::Bitmap { .. } => "bitmap",
        };
        f.debug_struct("TextRenderer")
            .field("face", &face)
            .field("size", &self.size)
            .finish()
    }
}

impl TextRenderer {
    pub fn new(style: &RenderStyle) -> Self {
        let size = style.font_size.max(1.0);
        let font = if style.system_font {
            system_font()
        } else {
            None
        };
        let face = match font {
            Some(font) => Face::TrueType(font),
            None => Face::Bitmap {
                scale: ((size / 8.0).round() as u32).max(1),
            },
        };
        Self { face, size }
    }

    /// The deterministic bitmap renderer, regardless of installed fonts.
    pub fn bitmap(font_size: f32) -> Self {
        Self::new(&RenderStyle {
            font_size,
            system_font: false,
            ..RenderStyle::default()
        })
    }

    pub fn is_bitmap(&self) -> bool {
        matches!(self.face, Face::Bitmap { .. })
    }

    /// Width and height in pixels of the mask [`TextRenderer::rasterize`]
    /// produces for `text`.
    pub fn measure(&self, text: &str) -> (u32, u32) {
        match self.face {
            Face::TrueType(font) => {
                let width: f32 = text
                    .chars()
                    .map(|ch| font.metrics(ch, self.size).advance_width)
                    .sum();
                let (ascent, descent) = self.line_extent(font);
                (width.ceil() as u32, (ascent - descent).ceil() as u32)
            }
            Face::Bitmap { scale } => {
                let count = text.chars().count() as u32;
                let width = (count * (GLYPH_WIDTH + 1)).saturating_sub(1) * scale;
                (width, GLYPH_HEIGHT * scale)
            }
        }
    }

    /// Renders `text` into a coverage mask (255 = fully inked).
    pub fn rasterize(&self, text: &str) -> GrayImage {
        let (width, height) = self.measure(text);
        let mut mask = GrayImage::new(width, height);
        match self.face {
            Face::TrueType(font) => self.rasterize_truetype(font, text, &mut mask),
            Face::Bitmap { scale } => rasterize_bitmap(text, scale, &mut mask),
        }
        mask
    }

    fn line_extent(&self, font: &Font) -> (f32, f32) {
        font.horizontal_line_metrics(self.size)
            .map(|m| (m.ascent, m.descent))
            .unwrap_or((self.size, 0.0))
    }

    fn rasterize_truetype(&self, font: &Font, text: &str, mask: &mut GrayImage) {
        let (ascent, _) = self.line_extent(font);
        let baseline = ascent.round() as i64;
        let mut pen = 0.0f32;
        for ch in text.chars() {
            let (metrics, bitmap) = font.rasterize(ch, self.size);
            // ymin is the bottom of the glyph box relative to the baseline, y up.
            let top = baseline - (metrics.height as i64 + i64::from(metrics.ymin));
            let left = (pen + metrics.xmin as f32).round() as i64;
            if metrics.width > 0 {
                for (row, line) in bitmap.chunks(metrics.width).enumerate() {
                    for (col, &coverage) in line.iter().enumerate() {
                        let x = left + col as i64;
                        let y = top + row as i64;
                        let inside = (0..i64::from(mask.width())).contains(&x)
                            && (0..i64::from(mask.height())).contains(&y);
                        if !inside {
                            continue;
                        }
                        let pixel = mask.get_pixel_mut(x as u32, y as u32);
                        pixel[0] = pixel[0].max(coverage);
                    }
                }
            }
            pen += metrics.advance_width;
        }
    }
}

const GLYPH_WIDTH: u32 = 5;
const GLYPH_HEIGHT: u32 = 7;

fn rasterize_bitmap(text: &str, scale: u32, mask: &mut GrayImage) {
    for (index, ch) in text.chars().enumerate() {
        let origin = index as u32 * (GLYPH_WIDTH + 1) * scale;
        for (col, bits) in glyph(ch).iter().enumerate() {
            for row in 0..GLYPH_HEIGHT {
                if bits & (1 << row) == 0 {
                    continue;
                }
                let x0 = origin + col as u32 * scale;
                let y0 = row * scale;
                for dy in 0..scale {
                    for dx in 0..scale {
                        mask.put_pixel(x0 + dx, y0 + dy, Luma([u8::MAX]));
                    }
                }
            }
        }
    }
}

/// Column-major glyph bits, least significant bit at the top.
fn glyph(ch: char) -> &'static [u8; 5] {
    let code = ch as u32;
    let index = if (0x20..0x7f).contains(&code) {
        (code - 0x20) as usize
    } else {
        usize::from(b'?' - 0x20)
    };
    &FONT_5X7[index]
}

#[rustfmt::skip]
const FONT_5X7: [[u8; 5]; 95] = [
    [0x00, 0x00, 0x00, 0x00, 0x00], // ' '
    [0x00, 0x00, 0x5F, 0x00, 0x00], // !
    [0x00, 0x07, 0x00, 0x07, 0x00], // "
    [0x14, 0x7F, 0x14, 0x7F, 0x14], // #
    [0x24, 0x2A, 0x7F, 0x2A, 0x12], // $
    [0x23, 0x13, 0x08, 0x64, 0x62], // %
    [0x36, 0x49, 0x56, 0x20, 0x50], // &
    [0x00, 0x00, 0x07, 0x00, 0x00], // '
    [0x00, 0x1C, 0x22, 0x41, 0x00], // (
    [0x00, 0x41, 0x22, 0x1C, 0x00], // )
    [0x2A, 0x1C, 0x7F, 0x1C, 0x2A], // *
    [0x08, 0x08, 0x3E, 0x08, 0x08], // +
    [0x00, 0x50, 0x30, 0x00, 0x00], // ,
    [0x08, 0x08, 0x08, 0x08, 0x08], // -
    [0x00, 0x60, 0x60, 0x00, 0x00], // .
    [0x20, 0x10, 0x08, 0x04, 0x02], // /
    [0x3E, 0x51, 0x49, 0x45, 0x3E], // 0
    [0x00, 0x42, 0x7F, 0x40, 0x00], // 1
    [0x42, 0x61, 0x51, 0x49, 0x46], // 2
    [0x21, 0x41, 0x45, 0x4B, 0x31], // 3
    [0x18, 0x14, 0x12, 0x7F, 0x10], // 4
    [0x27, 0x45, 0x45, 0x45, 0x39], // 5
    [0x3C, 0x4A, 0x49, 0x49, 0x30], // 6
    [0x01, 0x71, 0x09, 0x05, 0x03], // 7
    [0x36, 0x49, 0x49, 0x49, 0x36], // 8
    [0x06, 0x49, 0x49, 0x29, 0x1E], // 9
    [0x00, 0x36, 0x36, 0x00, 0x00], // :
    [0x00, 0x56, 0x36, 0x00, 0x00], // ;
    [0x08, 0x14, 0x22, 0x41, 0x00], // <
    [0x14, 0x14, 0x14, 0x14, 0x14], // =
    [0x00, 0x41, 0x22, 0x14, 0x08], // >
    [0x02, 0x01, 0x51, 0x09, 0x06], // ?
    [0x32, 0x49, 0x79, 0x41, 0x3E], // @
    [0x7E, 0x11, 0x11, 0x11, 0x7E], // A
    [0x7F, 0x49, 0x49, 0x49, 0x36], // B
    [0x3E, 0x41, 0x41, 0x41, 0x22], // C
    [0x7F, 0x41, 0x41, 0x22, 0x1C], // D
    [0x7F, 0x49, 0x49, 0x49, 0x41], // E
    [0x7F, 0x09, 0x09, 0x09, 0x01], // F
    [0x3E, 0x41, 0x49, 0x49, 0x7A], // G
    [0x7F, 0x08, 0x08, 0x08, 0x7F], // H
    [0x00, 0x41, 0x7F, 0x41, 0x00], // I
    [0x20, 0x40, 0x41, 0x3F, 0x01], // J
    [0x7F, 0x08, 0x14, 0x22, 0x41], // K
    [0x7F, 0x40, 0x40, 0x40, 0x40], // L
    [0x7F, 0x02, 0x0C, 0x02, 0x7F], // M
    [0x7F, 0x04, 0x08, 0x10, 0x7F], // N
    [0x3E, 0x41, 0x41, 0x41, 0x3E], // O
    [0x7F, 0x09, 0x09, 0x09, 0x06], // P
    [0x3E, 0x41, 0x51, 0x21, 0x5E], // Q
    [0x7F, 0x09, 0x19, 0x29, 0x46], // R
    [0x46, 0x49, 0x49, 0x49, 0x31], // S
    [0x01, 0x01, 0x7F, 0x01, 0x01], // T
    [0x3F, 0x40, 0x40, 0x40, 0x3F], // U
    [0x1F, 0x20, 0x40, 0x20, 0x1F], // V
    [0x3F, 0x40, 0x38, 0x40, 0x3F], // W
    [0x63, 0x14, 0x08, 0x14, 0x63], // X
    [0x07, 0x08, 0x70, 0x08, 0x07], // Y
    [0x61, 0x51, 0x49, 0x45, 0x43], // Z
    [0x00, 0x7F, 0x41, 0x41, 0x00], // [
    [0x02, 0x04, 0x08, 0x10, 0x20], // backslash
    [0x00, 0x41, 0x41, 0x7F, 0x00], // ]
    [0x04, 0x02, 0x01, 0x02, 0x04], // ^
    [0x40, 0x40, 0x40, 0x40, 0x40], // _
    [0x00, 0x01, 0x02, 0x04, 0x00], // `
    [0x20, 0x54, 0x54, 0x54, 0x78], // a
    [0x7F, 0x48, 0x44, 0x44, 0x38], // b
    [0x38, 0x44, 0x44, 0x44, 0x20], // c
    [0x38, 0x44, 0x44, 0x48, 0x7F], // d
    [0x38, 0x54, 0x54, 0x54, 0x18], // e
    [0x08, 0x7E, 0x09, 0x01, 0x02], // f
    [0x0C, 0x52, 0x52, 0x52, 0x3E], // g
    [0x7F, 0x08, 0x04, 0x04, 0x78], // h
    [0x00, 0x44, 0x7D, 0x40, 0x00], // i
    [0x20, 0x40, 0x44, 0x3D, 0x00], // j
    [0x7F, 0x10, 0x28, 0x44, 0x00], // k
    [0x00, 0x41, 0x7F, 0x40, 0x00], // l
    [0x7C, 0x04, 0x18, 0x04, 0x78], // m
    [0x7C, 0x08, 0x04, 0x04, 0x78], // n
    [0x38, 0x44, 0x44, 0x44, 0x38], // o
    [0x7C, 0x14, 0x14, 0x14, 0x08], // p
    [0x08, 0x14, 0x14, 0x18, 0x7C], // q
    [0x7C, 0x08, 0x04, 0x04, 0x08], // r
    [0x48, 0x54, 0x54, 0x54, 0x20], // s
    [0x04, 0x3F, 0x44, 0x40, 0x20], // t
    [0x3C, 0x40, 0x40, 0x20, 0x7C], // u
    [0x1C, 0x20, 0x40, 0x20, 0x1C], // v
    [0x3C, 0x40, 0x30, 0x40, 0x3C], // w
    [0x44, 0x28, 0x10, 0x28, 0x44], // x
    [0x0C, 0x50, 0x50, 0x50, 0x3C], // y
    [0x44, 0x64, 0x54, 0x4C, 0x44], // z
    [0x00, 0x08, 0x36, 0x41, 0x00], // {
    [0x00, 0x00, 0x7F, 0x00, 0x00], // |
    [0x00, 0x41, 0x36, 0x08, 0x00], // }
    [0x08, 0x04, 0x08, 0x10, 0x08], // ~
];
