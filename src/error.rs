//! Error types for rendering operations.

use crate::matrix::Depth;
use crate::transform::PixelRect;
use thiserror::Error;

/// Errors surfaced by rendering calls. Nothing is retried: every
/// operation is a deterministic function of the current state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RenderError {
    /// The color mapper has no conversion for this element type and
    /// channel count.
    #[error("unsupported matrix format: {depth:?} with {channels} channel(s)")]
    UnsupportedFormat { depth: Depth, channels: usize },

    /// A matrix buffer does not hold `rows * cols * channels` elements.
    #[error("matrix buffer of {len} elements does not match {rows}x{cols}x{channels}")]
    ShapeMismatch {
        rows: usize,
        cols: usize,
        channels: usize,
        len: usize,
    },

    /// A matrix side does not fit the `u32` dimensions of an image.
    #[error("{rows}x{cols} matrix exceeds the image size limit")]
    TooLarge { rows: usize, cols: usize },

    /// The inner rectangle of a render target leaves the outer canvas.
    #[error("inner rectangle {rect:?} exceeds the {width}x{height} canvas")]
    InnerRectOutOfBounds {
        rect: PixelRect,
        width: u32,
        height: u32,
    },
}

pub type Result<T, E = RenderError> = std::result::Result<T, E>;
