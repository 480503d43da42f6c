use super::linear::linear_ticks;
use crate::scale::util;
use num_traits::Float;

/// Exponents of the first and last decade boundary inside `[lo, hi]`.
///
/// Returns `None` for non-positive bounds, which have no logarithm.
fn decade_exponent_range<D: Float>(lo: D, hi: D) -> Option<(i32, i32)> {
    if lo <= D::zero() || hi <= D::zero() {
        return None;
    }

    let tolerance = util::constant::<D>(1e-9);
    let e_min = (lo.log10() - tolerance).ceil().to_i32()?;
    let e_max = (hi.log10() + tolerance).floor().to_i32()?;
    Some((e_min, e_max))
}

/// Ticks at decade boundaries of `[min, max]`, sub-divided at 2x and 5x
/// when the range holds fewer decades than `estimated_count`, thinned to
/// every n-th decade when it holds many more.
///
/// Returns `None` when the range is not strictly positive. A range that
/// contains fewer than two candidate ticks falls back to linear ticks.
pub fn log_ticks<D: Float>(min: D, max: D, estimated_count: usize) -> Option<Vec<D>> {
    let (lo, hi) = util::sorted_pair(min, max);
    let (e_min, e_max) = decade_exponent_range(lo, hi)?;

    let ten = util::constant::<D>(10.0);
    let slack = util::constant::<D>(1e-9);
    let inside = |value: D| value >= lo * (D::one() - slack) && value <= hi * (D::one() + slack);

    let count = estimated_count.max(1);
    let decades = usize::try_from(e_max - e_min + 1).unwrap_or(0);

    let mut ticks = Vec::new();
    if decades > count {
        let stride = decades.div_ceil(count);
        let mut exponent = e_min;
        while exponent <= e_max {
            ticks.push(ten.powi(exponent));
            exponent += i32::try_from(stride).unwrap_or(i32::MAX);
        }
    } else {
        let multipliers: &[f64] = if decades * 2 < count { &[1.0, 2.0, 5.0] } else { &[1.0] };
        // One decade below the first boundary so 2x/5x ticks under it are found.
        for exponent in (e_min - 1)..=e_max {
            let decade = ten.powi(exponent);
            for multiplier in multipliers {
                let value = decade * util::constant::<D>(*multiplier);
                if inside(value) {
                    ticks.push(value);
                }
            }
        }
    }

    if ticks.len() < 2 {
        return Some(linear_ticks(min, max, count));
    }
    Some(ticks)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: &[f64], expected: &[f64]) {
        assert_eq!(actual.len(), expected.len(), "{actual:?} vs {expected:?}");
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() <= e.abs() * 1e-9, "{actual:?} vs {expected:?}");
        }
    }

    #[test]
    fn decade_ticks() {
        let ticks = log_ticks(1.0, 10_000.0, 5).unwrap();
        assert_close(&ticks, &[1.0, 10.0, 100.0, 1000.0, 10_000.0]);
    }

    #[test]
    fn sub_decades_when_few_decades() {
        let ticks = log_ticks(1.0, 100.0, 8).unwrap();
        assert_close(&ticks, &[1.0, 2.0, 5.0, 10.0, 20.0, 50.0, 100.0]);
    }

    #[test]
    fn sub_decade_ticks_below_first_boundary() {
        let ticks = log_ticks(0.3, 30.0, 10).unwrap();
        assert_close(&ticks, &[0.5, 1.0, 2.0, 5.0, 10.0, 20.0]);
    }

    #[test]
    fn thinned_when_many_decades() {
        let ticks = log_ticks(1e-10, 1e10, 5).unwrap();
        assert!(ticks.len() <= 6, "{ticks:?}");
        assert!((ticks[0] - 1e-10).abs() < 1e-19);
        for pair in ticks.windows(2) {
            assert!(pair[1] > pair[0]);
        }
    }

    #[test]
    fn reversed_bounds() {
        let ticks = log_ticks(1000.0, 1.0, 4).unwrap();
        assert_close(&ticks, &[1.0, 10.0, 100.0, 1000.0]);
    }

    #[test]
    fn non_positive_has_no_log_ticks() {
        assert!(log_ticks(0.0, 100.0, 5).is_none());
        assert!(log_ticks(-5.0, 100.0, 5).is_none());
    }

    #[test]
    fn narrow_range_falls_back_to_linear() {
        let ticks = log_ticks(2.0, 4.0, 5).unwrap();
        assert!(ticks.len() >= 2);
        assert!(ticks.iter().all(|t| (2.0..=4.0).contains(t)));
    }
}
