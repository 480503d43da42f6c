use crate::scale::util;
use num_traits::Float;

/// Upper bound on emitted ticks, guards against a pathological step.
const MAX_TICKS: usize = 10_000;

/// Finds a "nice" step size (1, 2 or 5 times a power of ten) that is at
/// least `raw_step`.
///
/// Works directly with the generic type `D` without needing logarithms.
pub fn nice_step<D: Float>(raw_step: D) -> D {
    let one = D::one();
    let two = one + one;
    let five = two + two + one;
    let ten = five + five;

    let abs_step = raw_step.abs();
    if abs_step == D::zero() || !abs_step.is_finite() {
        return abs_step;
    }

    let mut candidate = one;

    while candidate * ten <= abs_step {
        candidate = candidate * ten;
    }

    while candidate > abs_step {
        candidate = candidate / ten;
    }

    // candidate <= abs_step < candidate * 10
    for c in [candidate, candidate * two, candidate * five] {
        if c >= abs_step {
            return c;
        }
    }

    candidate * ten
}

/// Evenly spaced ticks at multiples of a nice step inside `[min, max]`.
///
/// The step is chosen so that about `estimated_count` ticks fit the range.
/// Reversed bounds are sorted first, and `min == max` yields the single
/// tick `min`.
pub fn linear_ticks<D: Float>(min: D, max: D, estimated_count: usize) -> Vec<D> {
    if min == max {
        return vec![min];
    }

    let (lo, hi) = util::sorted_pair(min, max);
    let count = D::from(estimated_count.max(1)).unwrap_or_else(D::one);
    let step = nice_step((hi - lo) / count);
    if step == D::zero() || !step.is_finite() {
        return vec![min];
    }

    let epsilon = util::epsilon_from_step(&step);
    let start = ((lo - epsilon) / step).ceil() * step;

    let mut ticks = Vec::new();
    for index in 0..MAX_TICKS {
        // Calculate value based on index to avoid accumulation errors
        let Some(offset) = D::from(index) else {
            break;
        };
        let mut value = start + step * offset;
        if value > hi + epsilon {
            break;
        }
        if value.abs() < epsilon {
            value = D::zero();
        }
        ticks.push(value);
    }

    if ticks.is_empty() {
        ticks.push(min);
    }
    ticks
}
