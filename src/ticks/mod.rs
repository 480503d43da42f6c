//! Tick generation for axes and colorbars.
//!
//! [`compute_ticks`] is the entry point used by the drawables: it receives
//! the range endpoints together with the data value found at the pixel
//! midpoint of the axis. For a linear projection that midpoint equals the
//! arithmetic mean of the endpoints; when it does not, the axis is
//! logarithmic and decade ticks are produced instead.
//!
//! # Examples
//!
//! ```rust
//! use aksel_raster::ticks::compute_ticks;
//!
//! let linear = compute_ticks(0.0, 50.0, 100.0, 5);
//! assert!(!linear.logarithmic);
//! assert_eq!(linear.values, vec![0.0, 20.0, 40.0, 60.0, 80.0, 100.0]);
//!
//! let log = compute_ticks(1.0, 100.0, 10_000.0, 5);
//! assert!(log.logarithmic);
//! assert_eq!(log.values.len(), 5);
//! ```

pub mod linear;
pub mod log;

pub use linear::{linear_ticks, nice_step};
pub use self::log::log_ticks;

/// Relative tolerance for the midpoint test: 5 significant digits.
const MIDPOINT_TOLERANCE: f64 = 1e-5;

/// A freshly generated tick set. Not persisted between renders.
#[derive(Debug, Clone, PartialEq)]
pub struct Ticks {
    /// Tick positions in ascending order.
    pub values: Vec<f64>,
    /// Whether the ticks were laid out for a logarithmic axis. Drives the
    /// label notation in [`format_label`](crate::format::format_label).
    pub logarithmic: bool,
}

impl Ticks {
    fn single(value: f64) -> Self {
        Self {
            values: vec![value],
            logarithmic: false,
        }
    }
}

/// Returns true when `mid` deviates from the arithmetic mean of `min` and
/// `max` by more than five significant digits of the range.
pub fn is_logarithmic(min: f64, mid: f64, max: f64) -> bool {
    let mean = (min + max) / 2.0;
    let tolerance = (max - min).abs() * MIDPOINT_TOLERANCE;
    (mid - mean).abs() > tolerance
}

/// Computes the ticks of an axis spanning `min..max` whose pixel midpoint
/// shows the data value `mid`.
///
/// Degenerate input (`min == max`, or any of `min`, `mid`, `max` not
/// finite) yields the single tick `min`. A logarithmic axis that reaches
/// zero or below has no decades and gets linear ticks instead.
pub fn compute_ticks(min: f64, mid: f64, max: f64, estimated_count: usize) -> Ticks {
    if min == max || !min.is_finite() || !mid.is_finite() || !max.is_finite() {
        ::log::debug!("degenerate tick range min={min} mid={mid} max={max}");
        return Ticks::single(min);
    }

    if is_logarithmic(min, mid, max) {
        if let Some(values) = log_ticks(min, max, estimated_count) {
            ::log::debug!("{} logarithmic ticks for {min}..{max}", values.len());
            return Ticks {
                values,
                logarithmic: true,
            };
        }
        ::log::debug!("logarithmic range {min}..{max} is not positive, using linear ticks");
    }

    let values = linear_ticks(min, max, estimated_count);
    ::log::debug!("{} linear ticks for {min}..{max}", values.len());
    Ticks {
        values,
        logarithmic: false,
    }
}

/// Number of ticks that fit `pixels` when ticks should be about `spacing`
/// pixels apart. Never less than one.
pub fn estimate_tick_count(pixels: u32, spacing: u32) -> usize {
    let spacing = spacing.max(1);
    usize::try_from(pixels.div_ceil(spacing)).unwrap_or(1).max(1)
}
