use num_traits::Float;

/// Return `(min, max)` for two owned values.
pub fn sorted_pair<T: PartialOrd>(a: T, b: T) -> (T, T) {
    if a <= b { (a, b) } else { (b, a) }
}

/// Compute a small epsilon relative to the provided step.
/// Returns step / 10, which is used as a tolerance for floating-point comparisons.
pub fn epsilon_from_step<T: Float>(step: &T) -> T {
    *step / constant::<T>(10.0)
}

/// Converts an `f64` constant into `T`, falling back to zero when it does
/// not fit.
pub fn constant<T: Float>(value: f64) -> T {
    T::from(value).unwrap_or_else(T::zero)
}
