use std::marker::PhantomData;

use num_traits::Float;

use super::Scale;

/// Affine mapping of `[start, end]` onto `[0, 1]`.
///
/// The default scale of both axes of a [`RenderTarget`](crate::RenderTarget).
/// A data rectangle with a negative width or height reaches the projection
/// as a reversed scale, whose endpoints swap in pixel space. Values outside
/// the domain are not clamped; drawables clip against the inner rectangle.
///
/// ```rust
/// use aksel_raster::{Scale, scale::Linear};
///
/// let scale = Linear::<f64, f64>::new(0.0, 100.0);
/// assert_eq!(scale.normalize(&50.0), Some(0.5));
/// assert_eq!(scale.denormalize(0.25), Some(25.0));
///
/// let reversed = Linear::<f64, f64>::new(100.0, 0.0);
/// assert_eq!(reversed.normalize(&0.0), Some(1.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Linear<D: Float, N: Float = f64> {
    start: D,
    end: D,
    normalized: PhantomData<N>,
}

impl<D: Float, N: Float> Linear<D, N> {
    pub fn new(start: D, end: D) -> Self {
        Self {
            start,
            end,
            normalized: PhantomData,
        }
    }

    fn span(&self) -> D {
        self.end - self.start
    }
}

impl<D: Float, N: Float> Scale for Linear<D, N> {
    type Domain = D;
    type Normalized = N;

    /// An empty domain maps everything to `0`.
    fn normalize(&self, value: &D) -> Option<N> {
        let span = self.span();
        if span == D::zero() {
            return Some(N::zero());
        }
        Some(N::from(*value - self.start)? / N::from(span)?)
    }

    fn denormalize(&self, t: N) -> Option<D> {
        let offset = D::from(t * N::from(self.span())?)?;
        Some(self.start + offset)
    }
}
