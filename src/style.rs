//! Render configuration shared by a render target and its drawables.

use image::Rgb;
use serde::{Deserialize, Serialize};

/// Sizes and colors used while rendering.
///
/// Every field has a default, so a configuration document only needs to
/// name what it changes:
///
/// ```rust
/// use aksel_raster::RenderStyle;
///
/// let style = RenderStyle {
///     font_size: 16.0,
///     ..RenderStyle::default()
/// };
/// assert_eq!(style.tick_length, RenderStyle::default().tick_length);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    /// Label text height in pixels.
    pub font_size: f32,
    /// Length of a tick mark in pixels.
    pub tick_length: u32,
    /// Desired pixel distance between neighbouring ticks.
    pub tick_spacing: u32,
    /// Width of the colorbar gradient strip in pixels.
    pub strip_width: u32,
    /// Gap between the plot area and the colorbar.
    pub margin: u32,
    /// Gap between tick marks, labels and the title.
    pub label_gap: u32,
    pub text_color: [u8; 3],
    pub axis_color: [u8; 3],
    pub background: [u8; 3],
    /// Use a TrueType font from the system when one is found. When false,
    /// or when no font is installed, the built-in bitmap font is used.
    pub system_font: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            font_size: 12.0,
            tick_length: 5,
            tick_spacing: 50,
            strip_width: 20,
            margin: 10,
            label_gap: 4,
            text_color: [0, 0, 0],
            axis_color: [0, 0, 0],
            background: [255, 255, 255],
            system_font: true,
        }
    }
}

impl RenderStyle {
    pub fn text_rgb(&self) -> Rgb<u8> {
        Rgb(self.text_color)
    }

    pub fn axis_rgb(&self) -> Rgb<u8> {
        Rgb(self.axis_color)
    }

    pub fn background_rgb(&self) -> Rgb<u8> {
        Rgb(self.background)
    }
}
