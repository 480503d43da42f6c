//! Scales map a numeric domain onto a normalized `[0, 1]` range.
//!
//! A [`RenderTarget`](crate::RenderTarget) keeps one scale per axis and
//! combines them with the inner pixel rectangle through a
//! [`Transform`](crate::Transform).

pub mod linear;
pub mod log;
pub(crate) mod util;

pub use linear::Linear;
pub use self::log::Logarithmic;

/// Mapping between a data domain and the normalized `[0, 1]` range.
///
/// Domain endpoints keep the order they were given in, so a scale built
/// from `(start, end)` with `end < start` is a reversed axis:
/// `start` still normalizes to `0` and `end` to `1`.
///
/// Both directions return `None` when a value cannot be converted between
/// the domain and normalized types.
pub trait Scale {
    type Domain;
    type Normalized;

    fn normalize(&self, value: &Self::Domain) -> Option<Self::Normalized>;

    fn denormalize(&self, t: Self::Normalized) -> Option<Self::Domain>;
}
