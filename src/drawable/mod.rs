//! Visual elements composited onto a [`RenderTarget`].
//!
//! A plot owns its drawables and renders them in z-order onto one target;
//! the target never owns them. Each drawable also reports the data-space
//! area it covers so the plot can fit its axes around the content.

pub mod cbox;
pub mod image;

pub use self::cbox::CBox;
pub use self::image::{Image, Interpolation};

use crate::error::Result;
use crate::render_target::RenderTarget;
use crate::transform::PlotRect;

/// Something that paints itself into a [`RenderTarget`].
pub trait Drawable {
    /// Paints into the target's buffers, using its projection for layout.
    ///
    /// An empty inner rectangle or an empty source is nothing to draw and
    /// returns `Ok(())`.
    fn render(&mut self, target: &mut RenderTarget) -> Result<()>;

    /// The data-space rectangle covered by this drawable, or `None` when it
    /// does not take part in auto-fitting.
    fn bounding_rect(&self) -> Option<PlotRect<f64>>;
}

/// Renders `drawables` in order, stopping at the first error.
pub fn render_all(drawables: &mut [Box<dyn Drawable>], target: &mut RenderTarget) -> Result<()> {
    for drawable in drawables.iter_mut() {
        drawable.render(target)?;
    }
    Ok(())
}

/// The smallest rectangle covering every reported bounding rectangle.
pub fn union_bounding_rect(drawables: &[Box<dyn Drawable>]) -> Option<PlotRect<f64>> {
    drawables
        .iter()
        .filter_map(|drawable| drawable.bounding_rect())
        .reduce(|acc, rect| acc.union(&rect))
        .map(|rect| rect.normalized())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::colormap::Colormap;
    use crate::matrix::Matrix;
    use crate::transform::PixelRect;
    use ::image::RgbImage;

    #[test]
    fn union_skips_drawables_without_bounds() {
        let mut shifted = Image::new(Matrix::new(2, 3, 1, vec![0u8; 6]).unwrap());
        shifted.set_position(PlotRect::new(10.0, 5.0, -4.0, 1.0));

        let drawables: Vec<Box<dyn Drawable>> = vec![
            Box::new(CBox::new(Some(Colormap::Jet), 0.0, 1.0)),
            Box::new(Image::new(Matrix::new(2, 3, 1, vec![0u8; 6]).unwrap())),
            Box::new(shifted),
            Box::new(Image::new(Matrix::empty())),
        ];

        assert_eq!(
            union_bounding_rect(&drawables),
            Some(PlotRect::new(0.0, 0.0, 10.0, 6.0))
        );
        assert_eq!(union_bounding_rect(&drawables[..1]), None);
    }

    struct Failing;

    impl Drawable for Failing {
        fn render(&mut self, _target: &mut RenderTarget) -> Result<()> {
            Err(crate::error::RenderError::UnsupportedFormat {
                depth: crate::matrix::Depth::F32,
                channels: 2,
            })
        }

        fn bounding_rect(&self) -> Option<PlotRect<f64>> {
            None
        }
    }

    #[test]
    fn render_all_stops_at_first_error() {
        let mut target = RenderTarget::new(
            RgbImage::new(4, 4),
            PixelRect::new(0, 0, 4, 4),
            PlotRect::new(0.0, 0.0, 4.0, 4.0),
        )
        .unwrap();
        let mut drawables: Vec<Box<dyn Drawable>> = vec![
            Box::new(Failing),
            Box::new(Image::new(Matrix::new(1, 1, 3, vec![9u8, 9, 9]).unwrap())),
        ];

        assert!(render_all(&mut drawables, &mut target).is_err());
        assert!(target.outer_mat().pixels().all(|p| p.0 == [0, 0, 0]));
    }
}
