//! Raster plot rendering
//!
//! `aksel_raster` renders the building blocks of a 2D plot into an RGB pixel
//! buffer: it projects data coordinates onto a pixel rectangle, derives
//! readable axis ticks from arbitrary ranges, maps numeric matrices to
//! colors, and composites drawables such as images and colorbars.
//!
//! # Core Concepts
//!
//! ## Scales and Transforms
//!
//! Scales map data values (domain) to a normalized `[0, 1]` range:
//! - [`scale::Linear`] - Affine mapping for linear data
//! - [`scale::Logarithmic`] - Logarithmic mapping for exponential data
//!
//! A [`Transform`] combines one scale per axis with a screen rectangle and
//! converts between [`PlotPoint`] (data) and [`ScreenPoint`] (pixels),
//! inverting Y on the way.
//!
//! ## Render Targets and Drawables
//!
//! A [`RenderTarget`] owns the outer canvas, the inner plotting rectangle
//! within it and the projection of a data rectangle onto that inner
//! rectangle. Anything implementing [`Drawable`] paints itself into a
//! target:
//! - [`Image`] - a matrix placed on a data rectangle, mirrored as the
//!   projection requires
//! - [`CBox`] - a colorbar with ticks, labels and a title
//!
//! ## Ticks, Labels and Colors
//!
//! - [`ticks::compute_ticks`] picks "nice" linear or decade ticks
//! - [`format::format_label`] turns a tick into a locale-independent label
//! - [`color::to_display_color`] maps a [`Matrix`] through a [`Colormap`]
//!
//! # Example
//!
//! ```rust
//! use aksel_raster::{
//!     CBox, Colormap, Drawable, Image, Matrix, PixelRect, PlotRect, RenderStyle, RenderTarget,
//! };
//!
//! let mat = Matrix::new(2, 2, 1, vec![0.0f64, 1.0, 2.0, 3.0]).unwrap();
//! let mut image = Image::new(mat);
//! image.set_colormap(Some(Colormap::Viridis));
//! let mut colorbar = CBox::new(Some(Colormap::Viridis), 0.0, 3.0);
//!
//! let mut target = RenderTarget::with_canvas(
//!     160,
//!     100,
//!     PixelRect::new(10, 10, 80, 80),
//!     image.bounding_rect().unwrap(),
//!     RenderStyle::default(),
//! )
//! .unwrap();
//!
//! image.render(&mut target).unwrap();
//! colorbar.render(&mut target).unwrap();
//! assert!(colorbar.width() > 0);
//!
//! let canvas = target.into_image();
//! assert_eq!(canvas.dimensions(), (160, 100));
//! ```

pub mod color;
pub mod colormap;
pub mod drawable;
pub mod error;
pub mod format;
pub mod matrix;
pub mod raster;
pub mod render_target;
pub mod scale;
pub mod style;
pub mod text;
pub mod ticks;
pub mod transform;

pub use num_traits::Float;

pub use colormap::Colormap;
pub use drawable::{render_all, union_bounding_rect, CBox, Drawable, Image, Interpolation};
pub use error::{RenderError, Result};
pub use matrix::Matrix;
pub use render_target::RenderTarget;
pub use scale::Scale;
pub use style::RenderStyle;
pub use transform::{PixelRect, PlotPoint, PlotRect, ScreenPoint, ScreenRect, Transform};
