//! The canvas drawables paint into, and the projection they paint with.

use std::fmt;

use image::{imageops, RgbImage, SubImage};

use crate::error::{RenderError, Result};
use crate::scale::{Linear, Logarithmic, Scale};
use crate::style::RenderStyle;
use crate::transform::{PixelRect, PlotPoint, PlotRect, ScreenPoint, ScreenRect, Transform};

type AxisScale = Box<dyn Scale<Domain = f64, Normalized = f64>>;

/// An outer pixel buffer, the inner plotting rectangle inside it, and the
/// data rectangle mapped onto that inner rectangle.
///
/// Projected coordinates are continuous pixel coordinates relative to the
/// inner rectangle: the data origin corner `(x, y)` lands on the inner
/// rectangle's bottom-left corner `(0, height)` and `(x + width, y + height)`
/// on its top-right corner `(width, 0)`. A data rectangle with a negative
/// width or height therefore projects with swapped endpoints.
///
/// The inner rectangle always lies inside the outer buffer.
///
/// ```rust
/// use aksel_raster::{PixelRect, PlotPoint, PlotRect, RenderStyle, RenderTarget};
///
/// let target = RenderTarget::with_canvas(
///     120,
///     100,
///     PixelRect::new(10, 10, 100, 80),
///     PlotRect::new(0.0, 0.0, 10.0, 8.0),
///     RenderStyle::default(),
/// )
/// .unwrap();
///
/// let p = target.project(PlotPoint::new(5.0, 2.0));
/// assert_eq!((p.x, p.y), (50.0, 60.0));
/// assert_eq!(target.unproject(p), PlotPoint::new(5.0, 2.0));
/// ```
pub struct RenderTarget {
    outer: RgbImage,
    inner: PixelRect,
    data: PlotRect<f64>,
    log_axes: (bool, bool),
    screen: ScreenRect<f64>,
    x_scale: AxisScale,
    y_scale: AxisScale,
    style: RenderStyle,
}

impl fmt::Debug for RenderTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RenderTarget")
            .field("outer", &self.outer.dimensions())
            .field("inner", &self.inner)
            .field("data", &self.data)
            .field("log_axes", &self.log_axes)
            .finish_non_exhaustive()
    }
}

fn check_inner(outer: &RgbImage, inner: PixelRect) -> Result<()> {
    let (width, height) = outer.dimensions();
    if inner.fits_within(width, height) {
        Ok(())
    } else {
        Err(RenderError::InnerRectOutOfBounds {
            rect: inner,
            width,
            height,
        })
    }
}

fn axis_scale(log: bool, min: f64, max: f64) -> AxisScale {
    if log && min > 0.0 && max > 0.0 {
        Box::new(Logarithmic::<f64, f64>::new(min, max))
    } else {
        if log {
            log::debug!("log axis over [{min}, {max}] is not positive, projecting linearly");
        }
        Box::new(Linear::<f64, f64>::new(min, max))
    }
}

impl RenderTarget {
    /// Wraps an existing canvas.
    ///
    /// Fails with [`RenderError::InnerRectOutOfBounds`] when `inner` does
    /// not fit in `outer`.
    pub fn new(outer: RgbImage, inner: PixelRect, data: PlotRect<f64>) -> Result<Self> {
        check_inner(&outer, inner)?;
        Ok(Self {
            outer,
            inner,
            data,
            log_axes: (false, false),
            screen: ScreenRect::default(),
            x_scale: axis_scale(false, data.x, data.max_x()),
            y_scale: axis_scale(false, data.y, data.max_y()),
            style: RenderStyle::default(),
        }
        .with_updated_projection())
    }

    /// Allocates a `width` x `height` canvas filled with the style background.
    pub fn with_canvas(
        width: u32,
        height: u32,
        inner: PixelRect,
        data: PlotRect<f64>,
        style: RenderStyle,
    ) -> Result<Self> {
        let outer = RgbImage::from_pixel(width, height, style.background_rgb());
        Ok(Self::new(outer, inner, data)?.with_style(style))
    }

    pub fn with_style(mut self, style: RenderStyle) -> Self {
        self.style = style;
        self
    }

    /// Projects the X and/or Y axis logarithmically (base 10). An axis whose
    /// data range is not strictly positive stays linear.
    pub fn with_log_axes(mut self, x_log: bool, y_log: bool) -> Self {
        self.log_axes = (x_log, y_log);
        self.with_updated_projection()
    }

    fn with_updated_projection(mut self) -> Self {
        self.update_projection();
        self
    }

    fn update_projection(&mut self) {
        let (x_log, y_log) = self.log_axes;
        self.x_scale = axis_scale(x_log, self.data.x, self.data.max_x());
        self.y_scale = axis_scale(y_log, self.data.y, self.data.max_y());
        self.screen = ScreenRect {
            x: 0.0,
            y: 0.0,
            width: f64::from(self.inner.width),
            height: f64::from(self.inner.height),
        };
    }

    /// Moves the inner rectangle, keeping the previous one on error.
    pub fn set_inner_rect(&mut self, inner: PixelRect) -> Result<&mut Self> {
        check_inner(&self.outer, inner)?;
        self.inner = inner;
        self.update_projection();
        Ok(self)
    }

    pub fn set_data_rect(&mut self, data: PlotRect<f64>) -> &mut Self {
        self.data = data;
        self.update_projection();
        self
    }

    pub fn set_style(&mut self, style: RenderStyle) -> &mut Self {
        self.style = style;
        self
    }

    fn transform(&self) -> Transform<'_> {
        Transform::new(&self.screen, self.x_scale.as_ref(), self.y_scale.as_ref())
    }

    /// Data point to pixel point, relative to the inner rectangle.
    pub fn project(&self, point: PlotPoint<f64>) -> ScreenPoint<f64> {
        self.transform()
            .to_screen(&point)
            .unwrap_or(ScreenPoint::new(f64::NAN, f64::NAN))
    }

    /// Inverse of [`RenderTarget::project`].
    pub fn unproject(&self, point: ScreenPoint<f64>) -> PlotPoint<f64> {
        self.transform()
            .to_chart(&point)
            .unwrap_or(PlotPoint::new(f64::NAN, f64::NAN))
    }

    /// Projects a data rectangle; the result has non-negative spans.
    pub fn project_rect(&self, rect: PlotRect<f64>) -> ScreenRect<f64> {
        self.transform()
            .rect_to_screen(rect)
            .unwrap_or(ScreenRect {
                x: f64::NAN,
                y: f64::NAN,
                width: f64::NAN,
                height: f64::NAN,
            })
    }

    pub fn inner_rect(&self) -> PixelRect {
        self.inner
    }

    pub fn data_rect(&self) -> PlotRect<f64> {
        self.data
    }

    pub fn log_axes(&self) -> (bool, bool) {
        self.log_axes
    }

    pub fn style(&self) -> &RenderStyle {
        &self.style
    }

    pub fn outer_mat(&self) -> &RgbImage {
        &self.outer
    }

    pub fn outer_mat_mut(&mut self) -> &mut RgbImage {
        &mut self.outer
    }

    /// The inner rectangle as a mutable view into the outer buffer.
    pub fn inner_mat(&mut self) -> SubImage<&mut RgbImage> {
        let PixelRect {
            x,
            y,
            width,
            height,
        } = self.inner;
        imageops::crop(&mut self.outer, x, y, width, height)
    }

    /// Hands the canvas back.
    pub fn into_image(self) -> RgbImage {
        self.outer
    }
}
