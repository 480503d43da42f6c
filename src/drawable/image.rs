//! Image drawable: a matrix painted onto a data-space rectangle.

use image::imageops::{self, FilterType};
use image::{ImageBuffer, Rgb, RgbImage};

use crate::color::{to_display_color, ColorMapping, DisplayColor};
use crate::colormap::Colormap;
use crate::error::Result;
use crate::matrix::{Matrix, RgbView};
use crate::render_target::RenderTarget;
use crate::transform::{PixelRect, PlotRect, ScreenPoint};

use super::Drawable;

/// How destination pixels sample the source.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Interpolation {
    /// The source pixel under the destination pixel center.
    #[default]
    Nearest,
    /// Bilinear blend of the four source pixels around the center.
    Linear,
}

/// Display colors of the source matrix.
#[derive(Debug, Clone)]
enum DisplayBuffer {
    /// The matrix already is 3-channel `u8` and is displayed as is.
    Source,
    Owned(RgbImage),
}

/// Mirrored copies for a projection that inverts one or both axes.
#[derive(Debug, Clone)]
struct Flipped {
    horizontal: bool,
    vertical: bool,
    mat: Matrix,
    display: RgbImage,
}

fn view_of(image: &RgbImage) -> Option<RgbView<'_>> {
    ImageBuffer::from_raw(image.width(), image.height(), image.as_raw().as_slice())
}

fn same_value(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

/// A matrix rendered into the data-space rectangle `position`.
///
/// Column `c` of the matrix covers data x from `x + c * width / cols`,
/// row `r` covers data y from `y + r * height / rows`. Whether row 0 ends up
/// at the top or the bottom of the canvas therefore depends on the
/// projection: with data y increasing upward, row 0 is drawn at the bottom.
///
/// By default the position follows the matrix (`(0, 0, cols, rows)`) until
/// [`Image::set_position`] places it explicitly.
///
/// ```rust
/// use aksel_raster::{Drawable, Image, Matrix, PlotRect};
///
/// let mut image = Image::new(Matrix::new(2, 3, 1, vec![0u8; 6]).unwrap());
/// assert_eq!(image.bounding_rect(), Some(PlotRect::new(0.0, 0.0, 3.0, 2.0)));
///
/// image.set_position(PlotRect::new(-1.0, -1.0, 2.0, 2.0));
/// image.set_mat(Matrix::new(4, 4, 1, vec![0u8; 16]).unwrap());
/// assert_eq!(image.bounding_rect(), Some(PlotRect::new(-1.0, -1.0, 2.0, 2.0)));
/// ```
#[derive(Debug, Clone)]
pub struct Image {
    mat: Matrix,
    position: PlotRect<f64>,
    auto_position: bool,
    colormap: Option<Colormap>,
    nan_color: Rgb<u8>,
    override_min: f64,
    override_max: f64,
    interpolation: Interpolation,
    display: Option<DisplayBuffer>,
    flipped: Option<Flipped>,
}

impl Default for Image {
    fn default() -> Self {
        Self::new(Matrix::empty())
    }
}

impl Image {
    /// An auto-positioned image.
    pub fn new(mat: Matrix) -> Self {
        let mut image = Self {
            mat: Matrix::empty(),
            position: PlotRect::default(),
            auto_position: true,
            colormap: None,
            nan_color: Rgb([0, 0, 0]),
            override_min: f64::NAN,
            override_max: f64::NAN,
            interpolation: Interpolation::default(),
            display: None,
            flipped: None,
        };
        image.set_mat(mat);
        image
    }

    /// An image placed at `position`; auto-positioning is off.
    pub fn with_position(mat: Matrix, position: PlotRect<f64>) -> Self {
        let mut image = Self::new(mat);
        image.set_position(position);
        image
    }

    pub fn set_mat(&mut self, mat: Matrix) -> &mut Self {
        self.mat = mat;
        self.invalidate();
        if self.auto_position {
            self.position = self.auto_rect();
        }
        self
    }

    /// Places the image explicitly and turns auto-positioning off.
    pub fn set_position(&mut self, position: PlotRect<f64>) -> &mut Self {
        self.position = position;
        self.auto_position = false;
        self
    }

    /// Turning auto-positioning on moves the image back to `(0, 0, cols, rows)`.
    pub fn set_auto_position(&mut self, auto_position: bool) -> &mut Self {
        self.auto_position = auto_position;
        if auto_position {
            self.position = self.auto_rect();
        }
        self
    }

    pub fn set_colormap(&mut self, colormap: Option<Colormap>) -> &mut Self {
        if self.colormap != colormap {
            self.colormap = colormap;
            self.invalidate();
        }
        self
    }

    pub fn set_nan_color(&mut self, nan_color: Rgb<u8>) -> &mut Self {
        if self.nan_color != nan_color {
            self.nan_color = nan_color;
            self.invalidate();
        }
        self
    }

    /// Explicit normalization bounds; `NaN` derives a bound from the data.
    /// Values beyond a set bound are painted with the NaN color.
    pub fn set_min_max_override(&mut self, min: f64, max: f64) -> &mut Self {
        if !same_value(self.override_min, min) || !same_value(self.override_max, max) {
            self.override_min = min;
            self.override_max = max;
            self.invalidate();
        }
        self
    }

    pub fn set_interpolation(&mut self, interpolation: Interpolation) -> &mut Self {
        self.interpolation = interpolation;
        self
    }

    pub fn mat(&self) -> &Matrix {
        &self.mat
    }

    pub fn position(&self) -> PlotRect<f64> {
        self.position
    }

    pub fn auto_position(&self) -> bool {
        self.auto_position
    }

    pub fn colormap(&self) -> Option<Colormap> {
        self.colormap
    }

    pub fn nan_color(&self) -> Rgb<u8> {
        self.nan_color
    }

    pub fn min_max_override(&self) -> (f64, f64) {
        (self.override_min, self.override_max)
    }

    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// The matrix in the orientation used by the last render: a mirrored
    /// copy when the projection inverted an axis, the source otherwise.
    pub fn rendered_mat(&self) -> &Matrix {
        self.flipped.as_ref().map_or(&self.mat, |flipped| &flipped.mat)
    }

    fn auto_rect(&self) -> PlotRect<f64> {
        PlotRect::new(0.0, 0.0, self.mat.cols() as f64, self.mat.rows() as f64)
    }

    fn invalidate(&mut self) {
        self.display = None;
        self.flipped = None;
    }

    fn mapping(&self) -> ColorMapping {
        ColorMapping {
            colormap: self.colormap,
            nan_color: self.nan_color,
            override_min: self.override_min,
            override_max: self.override_max,
        }
    }

    fn ensure_display(&mut self) -> Result<()> {
        if self.display.is_none() {
            log::trace!(
                "regenerating display buffer for {}x{} matrix",
                self.mat.cols(),
                self.mat.rows()
            );
            let display = match to_display_color(&self.mat, &self.mapping())? {
                DisplayColor::Borrowed(_) => DisplayBuffer::Source,
                DisplayColor::Owned(image) => DisplayBuffer::Owned(image),
            };
            self.display = Some(display);
        }
        Ok(())
    }

    fn source_view(&self) -> Option<RgbView<'_>> {
        match self.display.as_ref()? {
            DisplayBuffer::Source => self.mat.rgb_view(),
            DisplayBuffer::Owned(image) => view_of(image),
        }
    }

    /// Keeps the mirrored copies in line with the requested orientation.
    fn ensure_flipped(&mut self, horizontal: bool, vertical: bool) {
        if !horizontal && !vertical {
            self.flipped = None;
            return;
        }
        let current = self
            .flipped
            .as_ref()
            .is_some_and(|f| f.horizontal == horizontal && f.vertical == vertical);
        if current {
            return;
        }
        let Some(view) = self.source_view() else {
            return;
        };
        log::trace!("regenerating flipped copies (horizontal={horizontal}, vertical={vertical})");
        let display = match (horizontal, vertical) {
            (true, true) => imageops::rotate180(&view),
            (true, false) => imageops::flip_horizontal(&view),
            _ => imageops::flip_vertical(&view),
        };
        self.flipped = Some(Flipped {
            horizontal,
            vertical,
            mat: self.mat.flipped(horizontal, vertical),
            display,
        });
    }

    fn display_view(&self) -> Option<RgbView<'_>> {
        match &self.flipped {
            Some(flipped) => view_of(&flipped.display),
            None => self.source_view(),
        }
    }
}

impl Drawable for Image {
    fn render(&mut self, target: &mut RenderTarget) -> Result<()> {
        let inner = target.inner_rect();
        if self.mat.is_empty() || inner.is_empty() {
            return Ok(());
        }
        self.ensure_display()?;

        let p0 = target.project(self.position.origin());
        let p1 = target.project(self.position.far_corner());
        if ![p0.x, p0.y, p1.x, p1.y].iter().all(|v| v.is_finite()) {
            return Ok(());
        }
        self.ensure_flipped(p0.x > p1.x, p0.y > p1.y);

        let Some(view) = self.display_view() else {
            return Ok(());
        };
        paint(&view, p0, p1, inner, self.interpolation, target);
        Ok(())
    }

    fn bounding_rect(&self) -> Option<PlotRect<f64>> {
        (!self.mat.is_empty()).then_some(self.position)
    }
}

/// Upper bound on the area of the scaled buffer built for one render.
const MAX_SCALED_AREA: u64 = 1 << 24;

impl Interpolation {
    fn filter(self) -> FilterType {
        match self {
            Interpolation::Nearest => FilterType::Nearest,
            Interpolation::Linear => FilterType::Triangle,
        }
    }

    /// Source pixels kept beyond the visible part so the filter sees its
    /// neighbours.
    fn padding(self) -> u32 {
        match self {
            Interpolation::Nearest => 0,
            Interpolation::Linear => 1,
        }
    }
}

/// One axis of the visible part of a projected image.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Span {
    /// First source pixel taken.
    first: u32,
    /// Source pixels taken.
    count: u32,
    /// Length of the taken pixels once scaled.
    scaled: u32,
    /// Scaled pixels left of the inner rectangle.
    skip: u32,
    /// Scaled pixels inside the inner rectangle.
    visible: u32,
    /// Position of the first visible pixel in the inner rectangle.
    offset: u32,
}

/// Maps `pixels` source pixels onto the projected interval between `a` and
/// `b`, keeping what overlaps `0..len`.
fn visible_span(a: f64, b: f64, pixels: u32, len: u32, padding: u32) -> Option<Span> {
    let (start, end) = (a.min(b).round(), a.max(b).round());
    let clip_start = start.max(0.0);
    let clip_end = end.min(f64::from(len));
    if clip_end <= clip_start {
        return None;
    }

    let scale = (end - start) / f64::from(pixels);
    let first = (((clip_start - start) / scale).floor() as u32).saturating_sub(padding);
    let last = (((clip_end - start) / scale).ceil() as u32)
        .saturating_add(padding)
        .min(pixels);
    let from = start + (f64::from(first) * scale).round();
    let to = start + (f64::from(last) * scale).round();

    Some(Span {
        first,
        count: last - first,
        scaled: (to - from) as u32,
        skip: (clip_start - from) as u32,
        visible: (clip_end - clip_start) as u32,
        offset: clip_start as u32,
    })
}

/// Scales `source` onto the projected rectangle spanned by `p0` and `p1` and
/// copies the part inside the inner rectangle onto the canvas.
fn paint(
    source: &RgbView<'_>,
    p0: ScreenPoint<f64>,
    p1: ScreenPoint<f64>,
    inner: PixelRect,
    interpolation: Interpolation,
    target: &mut RenderTarget,
) {
    let (cols, rows) = source.dimensions();
    let padding = interpolation.padding();
    let Some(x) = visible_span(p0.x, p1.x, cols, inner.width, padding) else {
        return;
    };
    let Some(y) = visible_span(p0.y, p1.y, rows, inner.height, padding) else {
        return;
    };
    if u64::from(x.scaled) * u64::from(y.scaled) > MAX_SCALED_AREA {
        log::debug!(
            "skipping image: {}x{} source pixels would scale to {}x{}",
            x.count,
            y.count,
            x.scaled,
            y.scaled
        );
        return;
    }

    let taken = imageops::crop_imm(source, x.first, y.first, x.count, y.count);
    let scaled = imageops::resize(&*taken, x.scaled, y.scaled, interpolation.filter());
    let visible = imageops::crop_imm(&scaled, x.skip, y.skip, x.visible, y.visible).to_image();
    imageops::replace(
        target.outer_mat_mut(),
        &visible,
        i64::from(inner.x) + i64::from(x.offset),
        i64::from(inner.y) + i64::from(y.offset),
    );
}
