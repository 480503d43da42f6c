//! Colorbar drawable.

use image::imageops;

use crate::color::{to_display_color, ColorMapping};
use crate::colormap::Colormap;
use crate::error::Result;
use crate::format::format_labels;
use crate::matrix::Matrix;
use crate::raster::{blend_mask, draw_hline, draw_rect};
use crate::render_target::RenderTarget;
use crate::scale::util::sorted_pair;
use crate::text::TextRenderer;
use crate::ticks::{compute_ticks, estimate_tick_count};
use crate::transform::PlotRect;

use super::Drawable;

/// A vertical color gradient with ticks, labels and an optional title,
/// drawn to the right of the target's inner rectangle.
///
/// Two ranges are kept: the *colormap* range is what the palette spans,
/// the *colorbox* range is the part of it the bar shows. The colorbox
/// range is clamped into the colormap range on every update.
///
/// ```rust
/// use aksel_raster::{CBox, Colormap};
///
/// let mut cbox = CBox::with_ranges(Some(Colormap::Viridis), 0.0, 100.0, -20.0, 50.0);
/// assert_eq!(cbox.ranges(), (0.0, 100.0, 0.0, 50.0));
///
/// cbox.set_min_max(1.0, 2.0).set_label("depth");
/// assert_eq!(cbox.ranges(), (1.0, 2.0, 1.0, 2.0));
/// assert_eq!(cbox.label(), "depth");
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct CBox {
    colormap: Option<Colormap>,
    colormap_min: f64,
    colormap_max: f64,
    colorbox_min: f64,
    colorbox_max: f64,
    label: String,
    ticks: Vec<f64>,
    width: u32,
}

impl CBox {
    /// A colorbar showing the whole colormap range `min..max`.
    pub fn new(colormap: Option<Colormap>, min: f64, max: f64) -> Self {
        Self::with_ranges(colormap, min, max, min, max)
    }

    /// A colorbar showing `colorbox_min..colorbox_max` out of a palette
    /// spanning `colormap_min..colormap_max`.
    pub fn with_ranges(
        colormap: Option<Colormap>,
        colormap_min: f64,
        colormap_max: f64,
        colorbox_min: f64,
        colorbox_max: f64,
    ) -> Self {
        let mut cbox = Self {
            colormap,
            colormap_min,
            colormap_max,
            colorbox_min,
            colorbox_max,
            label: String::new(),
            ticks: Vec::new(),
            width: 0,
        };
        cbox.set_ranges(colormap_min, colormap_max, colorbox_min, colorbox_max);
        cbox
    }

    pub fn set_min_max(&mut self, min: f64, max: f64) -> &mut Self {
        self.set_ranges(min, max, min, max)
    }

    /// Bounds given in either order are swapped into ascending order.
    pub fn set_ranges(
        &mut self,
        colormap_min: f64,
        colormap_max: f64,
        colorbox_min: f64,
        colorbox_max: f64,
    ) -> &mut Self {
        let (map_min, map_max) = sorted_pair(colormap_min, colormap_max);
        let (box_min, box_max) = sorted_pair(colorbox_min, colorbox_max);
        self.colormap_min = map_min;
        self.colormap_max = map_max;
        self.colorbox_min = box_min.max(map_min).min(map_max);
        self.colorbox_max = box_max.max(map_min).min(map_max);
        self
    }

    pub fn set_colormap(&mut self, colormap: Option<Colormap>) -> &mut Self {
        self.colormap = colormap;
        self
    }

    /// Sets the title drawn rotated next to the labels. Empty means none.
    pub fn set_label(&mut self, label: impl Into<String>) -> &mut Self {
        self.label = label.into();
        self
    }

    pub fn colormap(&self) -> Option<Colormap> {
        self.colormap
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// `(colormap_min, colormap_max, colorbox_min, colorbox_max)`.
    pub fn ranges(&self) -> (f64, f64, f64, f64) {
        (
            self.colormap_min,
            self.colormap_max,
            self.colorbox_min,
            self.colorbox_max,
        )
    }

    /// Tick values of the last render.
    pub fn ticks(&self) -> &[f64] {
        &self.ticks
    }

    /// Pixel width, measured from the right edge of the inner rectangle,
    /// occupied by the last render.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Row of the strip showing `value`; the maximum sits on the first row,
    /// the minimum on the last.
    fn value_to_row(&self, value: f64, rows: u32) -> f64 {
        let span = self.colorbox_max - self.colorbox_min;
        let last = f64::from(rows.saturating_sub(1));
        if span == 0.0 {
            return last / 2.0;
        }
        (self.colorbox_max - value) / span * last
    }

    fn row_to_value(&self, row: u32, rows: u32) -> f64 {
        if rows <= 1 {
            return self.colorbox_max;
        }
        let t = f64::from(row) / f64::from(rows - 1);
        self.colorbox_max - t * (self.colorbox_max - self.colorbox_min)
    }

    fn gradient(&self, rows: u32) -> Result<image::RgbImage> {
        let values: Vec<f64> = (0..rows).map(|row| self.row_to_value(row, rows)).collect();
        let column = Matrix::new(rows as usize, 1, 1, values)?;
        let mapping = ColorMapping {
            colormap: self.colormap,
            override_min: self.colormap_min,
            override_max: self.colormap_max,
            ..ColorMapping::default()
        };
        Ok(to_display_color(&column, &mapping)?.into_owned())
    }
}

impl Drawable for CBox {
    fn render(&mut self, target: &mut RenderTarget) -> Result<()> {
        let inner = target.inner_rect();
        if inner.is_empty() {
            return Ok(());
        }
        let style = target.style().clone();
        let text = TextRenderer::new(&style);
        let rows = inner.height;

        let (lo, hi) = (self.colorbox_min, self.colorbox_max);
        let ticks = compute_ticks(
            lo,
            (lo + hi) / 2.0,
            hi,
            estimate_tick_count(rows, style.tick_spacing),
        );

        let strip_x = inner.right() as i64 + i64::from(style.margin);
        let strip_y = i64::from(inner.y);
        let strip_right = strip_x + i64::from(style.strip_width);

        let column = self.gradient(rows)?;
        let outer = target.outer_mat_mut();
        for offset in 0..i64::from(style.strip_width) {
            imageops::replace(outer, &column, strip_x + offset, strip_y);
        }
        draw_rect(
            outer,
            strip_x,
            strip_y,
            style.strip_width,
            rows,
            style.axis_rgb(),
        );

        let labels = format_labels(&ticks.values, ticks.logarithmic);
        let label_width = labels
            .iter()
            .map(|label| text.measure(label).0)
            .max()
            .unwrap_or(0);
        let label_x = strip_right + i64::from(style.tick_length) + i64::from(style.label_gap);

        for (&value, label) in ticks.values.iter().zip(&labels) {
            let y = strip_y + self.value_to_row(value, rows).round() as i64;
            draw_hline(
                outer,
                strip_right,
                strip_right + i64::from(style.tick_length) - 1,
                y,
                style.axis_rgb(),
            );
            let mask = text.rasterize(label);
            let x = label_x + i64::from(label_width - mask.width());
            blend_mask(outer, &mask, x, y - i64::from(mask.height() / 2), style.text_rgb());
        }

        let mut right = label_x + i64::from(label_width);
        if !self.label.is_empty() {
            let title = imageops::rotate270(&text.rasterize(&self.label));
            let x = right + i64::from(style.label_gap);
            let y = strip_y + (i64::from(rows) - i64::from(title.height())) / 2;
            blend_mask(outer, &title, x, y, style.text_rgb());
            right = x + i64::from(title.width());
        }

        self.width = u32::try_from(right - inner.right() as i64).unwrap_or(0);
        self.ticks = ticks.values;
        Ok(())
    }

    /// A colorbar lives outside the data area and never drives auto-fit.
    fn bounding_rect(&self) -> Option<PlotRect<f64>> {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgb;
    use crate::style::RenderStyle;
    use crate::transform::PixelRect;

    fn target(inner_height: u32) -> RenderTarget {
        let style = RenderStyle {
            system_font: false,
            font_size: 8.0,
            ..RenderStyle::default()
        };
        RenderTarget::with_canvas(
            200,
            inner_height + 20,
            PixelRect::new(10, 10, 50, inner_height),
            PlotRect::new(0.0, 0.0, 1.0, 1.0),
            style,
        )
        .unwrap()
    }

    #[test]
    fn colorbox_range_is_clamped_into_colormap_range() {
        let cbox = CBox::with_ranges(None, 0.0, 10.0, -5.0, 20.0);
        assert_eq!(cbox.ranges(), (0.0, 10.0, 0.0, 10.0));

        let mut cbox = CBox::new(None, 0.0, 10.0);
        cbox.set_ranges(0.0, 10.0, 2.0, 8.0);
        assert_eq!(cbox.ranges(), (0.0, 10.0, 2.0, 8.0));
    }

    #[test]
    fn descending_bounds_keep_the_full_range() {
        let cbox = CBox::new(None, 10.0, 0.0);
        assert_eq!(cbox.ranges(), (0.0, 10.0, 0.0, 10.0));

        let cbox = CBox::with_ranges(None, 10.0, 0.0, 8.0, 2.0);
        assert_eq!(cbox.ranges(), (0.0, 10.0, 2.0, 8.0));

        let mut target = target(100);
        let mut cbox = CBox::new(None, 100.0, 0.0);
        cbox.render(&mut target).unwrap();
        assert_eq!(cbox.ticks(), &[0.0, 50.0, 100.0]);
    }

    #[test]
    fn render_lays_out_ticks_and_width() {
        let mut target = target(100);
        let mut cbox = CBox::new(Some(Colormap::Jet), 0.0, 100.0);
        cbox.render(&mut target).unwrap();

        assert_eq!(cbox.ticks(), &[0.0, 50.0, 100.0]);
        // margin 10 + strip 20 + tick 5 + gap 4 + widest label "100" (17 px)
        assert_eq!(cbox.width(), 56);
    }

    #[test]
    fn gradient_runs_from_max_at_top_to_min_at_bottom() {
        let mut target = target(100);
        let mut cbox = CBox::new(Some(Colormap::Hot), 0.0, 1.0);
        cbox.render(&mut target).unwrap();

        let image = target.outer_mat();
        // strip starts at inner right edge (60) plus margin (10)
        let x = 75;
        assert_eq!(image.get_pixel(x, 10 + 1), &Colormap::Hot.color(252));
        assert_eq!(image.get_pixel(x, 10 + 98), &Colormap::Hot.color(3));
        // border on the first and last strip rows
        assert_eq!(image.get_pixel(x, 10), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(x, 109), &Rgb([0, 0, 0]));
        // the canvas left of the strip is untouched
        assert_eq!(image.get_pixel(65, 50), &Rgb([255, 255, 255]));
    }

    #[test]
    fn grayscale_without_colormap() {
        let mut target = target(3);
        let mut cbox = CBox::new(None, 0.0, 2.0);
        cbox.render(&mut target).unwrap();
        let image = target.outer_mat();
        // middle row inside the border
        assert_eq!(image.get_pixel(75, 11), &Rgb([128, 128, 128]));
    }

    #[test]
    fn title_extends_width() {
        let mut target = target(100);
        let mut cbox = CBox::new(None, 0.0, 100.0);
        cbox.render(&mut target).unwrap();
        let without = cbox.width();

        cbox.set_label("abc");
        cbox.render(&mut target).unwrap();
        // gap 4 + rotated 7 px glyph height
        assert_eq!(cbox.width(), without + 4 + 7);
    }

    #[test]
    fn degenerate_range_yields_single_tick() {
        let mut target = target(100);
        let mut cbox = CBox::new(None, 5.0, 5.0);
        cbox.render(&mut target).unwrap();
        assert_eq!(cbox.ticks(), &[5.0]);
    }

    #[test]
    fn empty_inner_rect_is_a_no_op() {
        let mut target = RenderTarget::with_canvas(
            20,
            20,
            PixelRect::new(0, 0, 10, 0),
            PlotRect::new(0.0, 0.0, 1.0, 1.0),
            RenderStyle::default(),
        )
        .unwrap();
        let before = target.outer_mat().clone();
        let mut cbox = CBox::new(Some(Colormap::Jet), 0.0, 1.0);
        cbox.render(&mut target).unwrap();
        assert_eq!(target.outer_mat(), &before);
        assert!(cbox.ticks().is_empty());
        assert_eq!(cbox.width(), 0);
        assert!(cbox.bounding_rect().is_none());
    }
}
