use std::marker::PhantomData;

use num_traits::Float;

use super::Scale;

/// Logarithmic mapping of `[start, end]` onto `[0, 1]`: equal ratios in the
/// domain become equal distances.
///
/// Selected per axis through
/// [`RenderTarget::with_log_axes`](crate::RenderTarget::with_log_axes). The
/// mapping does not depend on the logarithm base, so none is stored. Both
/// endpoints must be positive; values without a logarithm (zero, negative,
/// not finite) normalize to `0`.
///
/// ```rust
/// use aksel_raster::{Scale, scale::Logarithmic};
///
/// let scale = Logarithmic::<f64, f64>::new(1.0, 100.0);
/// assert_eq!(scale.normalize(&1.0), Some(0.0));
/// assert!((scale.normalize(&10.0).unwrap() - 0.5).abs() < 1e-12);
/// assert_eq!(scale.normalize(&-5.0), Some(0.0));
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Logarithmic<D: Float, N: Float = f64> {
    ln_start: D,
    ln_end: D,
    normalized: PhantomData<N>,
}

impl<D: Float, N: Float> Logarithmic<D, N> {
    pub fn new(start: D, end: D) -> Self {
        Self {
            ln_start: start.ln(),
            ln_end: end.ln(),
            normalized: PhantomData,
        }
    }

    fn span(&self) -> D {
        self.ln_end - self.ln_start
    }
}

impl<D: Float, N: Float> Scale for Logarithmic<D, N> {
    type Domain = D;
    type Normalized = N;

    fn normalize(&self, value: &D) -> Option<N> {
        let span = self.span();
        if *value <= D::zero() || !value.is_finite() || span == D::zero() {
            return Some(N::zero());
        }
        Some(N::from(value.ln() - self.ln_start)? / N::from(span)?)
    }

    fn denormalize(&self, t: N) -> Option<D> {
        let offset = D::from(t * N::from(self.span())?)?;
        Some((self.ln_start + offset).exp())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Option<f64>, b: f64) -> bool {
        a.is_some_and(|a| (a - b).abs() < 1e-10)
    }

    #[test]
    fn decades_are_evenly_spaced() {
        let scale = Logarithmic::<f64, f64>::new(1.0, 1000.0);

        assert!(close(scale.normalize(&1.0), 0.0));
        assert!(close(scale.normalize(&10.0), 1.0 / 3.0));
        assert!(close(scale.normalize(&100.0), 2.0 / 3.0));
        assert!(close(scale.denormalize(1.0), 1000.0));
    }

    #[test]
    fn values_without_logarithm_normalize_to_zero() {
        let scale = Logarithmic::<f64, f64>::new(1.0, 100.0);

        assert_eq!(scale.normalize(&0.0), Some(0.0));
        assert_eq!(scale.normalize(&-10.0), Some(0.0));
        assert_eq!(scale.normalize(&f64::INFINITY), Some(0.0));
    }

    #[test]
    fn reversed_domain_mirrors() {
        let scale = Logarithmic::<f64, f64>::new(1000.0, 1.0);

        assert!(close(scale.normalize(&1000.0), 0.0));
        assert!(close(scale.normalize(&1.0), 1.0));
    }

    #[test]
    fn normalized_type_may_differ_from_domain() {
        let scale = Logarithmic::<f64, f32>::new(1.0, 100.0);

        let t = scale.normalize(&10.0).unwrap();
        assert!((t - 0.5).abs() < 1e-6);
        let value: f64 = scale.denormalize(0.5f32).unwrap();
        assert!((value - 10.0).abs() < 1e-6);
    }
}
