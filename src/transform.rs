//! Geometry types and the data-to-pixel transformation.
//!
//! Three coordinate systems meet here:
//!
//! - **Data space** ([`PlotPoint`], [`PlotRect`]): the plotted values. Y
//!   increases upward.
//! - **Pixel space** ([`ScreenPoint`], [`ScreenRect`]): continuous pixel
//!   coordinates with the origin at the top-left corner and Y increasing
//!   downward. The pixel `(i, j)` covers `[i, i + 1) x [j, j + 1)`.
//! - **Pixel grid** ([`PixelRect`]): whole-pixel rectangles inside a buffer,
//!   such as the inner plotting area of a canvas.
//!
//! [`Transform`] combines one [`Scale`] per axis with a screen rectangle and
//! converts between data and pixel space, inverting Y on the way.
//!
//! # Examples
//!
//! ```rust
//! use aksel_raster::{Transform, scale::Linear, ScreenRect, PlotPoint};
//!
//! let screen = ScreenRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 };
//! let x_scale = Linear::<f64, f64>::new(0.0, 100.0);
//! let y_scale = Linear::<f64, f64>::new(0.0, 50.0);
//! let transform = Transform::new(&screen, &x_scale, &y_scale);
//!
//! // Bottom of the data range maps to the bottom of the screen.
//! let bottom = transform.to_screen(&PlotPoint::new(0.0, 0.0)).unwrap();
//! assert_eq!(bottom.y, 600.0);
//!
//! // And the top to the top.
//! let top = transform.to_screen(&PlotPoint::new(100.0, 50.0)).unwrap();
//! assert_eq!((top.x, top.y), (800.0, 0.0));
//! ```

use num_traits::Float;

use crate::scale::{util::sorted_pair, Scale};

/// A rectangle in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenRect<S = f64> {
    /// X coordinate of the top-left corner in pixels.
    pub x: S,
    /// Y coordinate of the top-left corner in pixels.
    pub y: S,
    /// Width of the rectangle in pixels.
    pub width: S,
    /// Height of the rectangle in pixels.
    pub height: S,
}

/// A point in continuous pixel coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScreenPoint<S = f64> {
    pub x: S,
    pub y: S,
}

impl<S> ScreenPoint<S> {
    pub const fn new(x: S, y: S) -> Self {
        Self { x, y }
    }
}

/// A point in data coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PlotPoint<D = f64> {
    /// X coordinate in domain units.
    pub x: D,
    /// Y coordinate in domain units.
    pub y: D,
}

impl<D> PlotPoint<D> {
    /// Creates a new plot point at the given data coordinates.
    pub const fn new(x: D, y: D) -> Self {
        Self { x, y }
    }
}

/// A rectangle in data coordinates.
///
/// `(x, y)` is the origin corner and `width` / `height` may be negative.
/// A negative span describes an inverted axis: projecting such a rectangle
/// through a [`Transform`] swaps its pixel endpoints, which is how drawables
/// learn that they must mirror their output.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct PlotRect<D = f64> {
    /// X coordinate of the rectangle's origin in domain units.
    pub x: D,
    /// Y coordinate of the rectangle's origin in domain units.
    pub y: D,
    /// Width of the rectangle in domain units (can be negative).
    pub width: D,
    /// Height of the rectangle in domain units (can be negative).
    pub height: D,
}

impl<D: Copy> PlotRect<D> {
    pub const fn new(x: D, y: D, width: D, height: D) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// The origin corner `(x, y)`.
    pub const fn origin(&self) -> PlotPoint<D> {
        PlotPoint::new(self.x, self.y)
    }
}

impl<D: Float> PlotRect<D> {
    /// Creates a `PlotRect` from two opposite corner points.
    ///
    /// The resulting rectangle will have positive width and height,
    /// regardless of the order of the points.
    ///
    /// ```
    /// use aksel_raster::{PlotPoint, PlotRect};
    ///
    /// let rect = PlotRect::from_points(PlotPoint::new(50.0, 80.0), PlotPoint::new(10.0, 20.0));
    /// assert_eq!(rect, PlotRect::new(10.0, 20.0, 40.0, 60.0));
    /// ```
    pub fn from_points(p1: PlotPoint<D>, p2: PlotPoint<D>) -> Self {
        let (x_min, x_max) = sorted_pair(p1.x, p2.x);
        let (y_min, y_max) = sorted_pair(p1.y, p2.y);

        Self {
            x: x_min,
            y: y_min,
            width: x_max - x_min,
            height: y_max - y_min,
        }
    }

    /// The corner opposite to the origin, `(x + width, y + height)`.
    pub fn far_corner(&self) -> PlotPoint<D> {
        PlotPoint::new(self.max_x(), self.max_y())
    }

    /// Computed as `x + width`; smaller than `x` for a negative width.
    pub fn max_x(&self) -> D {
        self.x + self.width
    }

    /// Computed as `y + height`; smaller than `y` for a negative height.
    pub fn max_y(&self) -> D {
        self.y + self.height
    }

    /// The same area with non-negative spans.
    pub fn normalized(&self) -> Self {
        Self::from_points(self.origin(), self.far_corner())
    }

    /// The smallest normalized rectangle covering both `self` and `other`.
    pub fn union(&self, other: &Self) -> Self {
        let a = self.normalized();
        let b = other.normalized();
        Self::from_points(
            PlotPoint::new(a.x.min(b.x), a.y.min(b.y)),
            PlotPoint::new(a.max_x().max(b.max_x()), a.max_y().max(b.max_y())),
        )
    }
}

/// A whole-pixel rectangle inside an image buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct PixelRect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl PixelRect {
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Exclusive right edge, `x + width`.
    pub const fn right(&self) -> u64 {
        self.x as u64 + self.width as u64
    }

    /// Exclusive bottom edge, `y + height`.
    pub const fn bottom(&self) -> u64 {
        self.y as u64 + self.height as u64
    }

    /// Returns true when the rectangle lies inside a `width` x `height` buffer.
    pub const fn fits_within(&self, width: u32, height: u32) -> bool {
        self.right() <= width as u64 && self.bottom() <= height as u64
    }
}


/// Converts between data space and a screen rectangle.
///
/// `Transform` borrows the screen rectangle and one scale per axis; it is
/// rebuilt whenever one of them changes. Normalized `0` on the Y axis lands
/// on the bottom edge of the screen rectangle, since screen Y grows
/// downward. Every conversion returns `None` when a value does not convert
/// between the domain, normalized and screen types.
///
/// # Type Parameters
///
/// - `D`: Domain type (data values, typically `f64`)
/// - `N`: Normalized type (the scales' `[0, 1]` range)
/// - `S`: Screen type (pixel coordinates)
///
/// ```rust
/// use aksel_raster::{Transform, scale::Linear, ScreenRect, PlotPoint, ScreenPoint};
///
/// let screen = ScreenRect { x: 0.0, y: 0.0, width: 800.0, height: 600.0 };
/// let x_scale = Linear::<f64, f64>::new(0.0, 100.0);
/// let y_scale = Linear::<f64, f64>::new(0.0, 50.0);
/// let transform = Transform::new(&screen, &x_scale, &y_scale);
///
/// let pixel = transform.to_screen(&PlotPoint::new(50.0, 25.0)).unwrap();
/// assert_eq!((pixel.x, pixel.y), (400.0, 300.0));
///
/// let data = transform.to_chart(&ScreenPoint::new(200.0, 150.0)).unwrap();
/// assert_eq!((data.x, data.y), (25.0, 37.5));
/// ```
#[derive(Clone, Copy)]
pub struct Transform<'a, D = f64, N = f64, S = f64> {
    screen: &'a ScreenRect<S>,
    x_scale: &'a dyn Scale<Domain = D, Normalized = N>,
    y_scale: &'a dyn Scale<Domain = D, Normalized = N>,
}

impl<'a, D, N, S> Transform<'a, D, N, S> {
    pub const fn new(
        screen: &'a ScreenRect<S>,
        x_scale: &'a dyn Scale<Domain = D, Normalized = N>,
        y_scale: &'a dyn Scale<Domain = D, Normalized = N>,
    ) -> Self {
        Self {
            screen,
            x_scale,
            y_scale,
        }
    }
}

impl<D, N, S> Transform<'_, D, N, S>
where
    D: Float,
    N: Float,
    S: Float,
{
    pub fn x_to_screen(&self, x: &D) -> Option<S> {
        let t = S::from(self.x_scale.normalize(x)?)?;
        Some(self.screen.x + t * self.screen.width)
    }

    pub fn y_to_screen(&self, y: &D) -> Option<S> {
        let t = S::from(self.y_scale.normalize(y)?)?;
        Some(self.screen.y + (S::one() - t) * self.screen.height)
    }

    pub fn x_to_chart(&self, x: &S) -> Option<D> {
        let t = (*x - self.screen.x) / self.screen.width;
        self.x_scale.denormalize(N::from(t)?)
    }

    pub fn y_to_chart(&self, y: &S) -> Option<D> {
        let t = S::one() - (*y - self.screen.y) / self.screen.height;
        self.y_scale.denormalize(N::from(t)?)
    }

    pub fn to_screen(&self, point: &PlotPoint<D>) -> Option<ScreenPoint<S>> {
        Some(ScreenPoint::new(
            self.x_to_screen(&point.x)?,
            self.y_to_screen(&point.y)?,
        ))
    }

    pub fn to_chart(&self, point: &ScreenPoint<S>) -> Option<PlotPoint<D>> {
        Some(PlotPoint::new(
            self.x_to_chart(&point.x)?,
            self.y_to_chart(&point.y)?,
        ))
    }

    /// Projects both corners of `rect`; the result has non-negative spans
    /// whatever the orientation of the rectangle and of the scales.
    pub fn rect_to_screen(&self, rect: PlotRect<D>) -> Option<ScreenRect<S>> {
        let a = self.to_screen(&rect.origin())?;
        let b = self.to_screen(&rect.far_corner())?;
        let (left, right) = sorted_pair(a.x, b.x);
        let (top, bottom) = sorted_pair(a.y, b.y);

        Some(ScreenRect {
            x: left,
            y: top,
            width: right - left,
            height: bottom - top,
        })
    }
}
