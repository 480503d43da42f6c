//! Conversion of source matrices into displayable RGB buffers.

use crate::colormap::Colormap;
use crate::error::{RenderError, Result};
use crate::matrix::{Matrix, MatrixData, RgbView};
use image::{ImageBuffer, Rgb, RgbImage};

/// Intensity given to finite pixels when both normalization bounds are infinite.
const MID_GRAY: u8 = 127;

/// Parameters of the matrix to color conversion.
///
/// `override_min` / `override_max` are explicit normalization bounds; `NaN`
/// means "compute from data". A bound that is set also clips: pixels
/// beyond it are painted with `nan_color`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorMapping {
    pub colormap: Option<Colormap>,
    pub nan_color: Rgb<u8>,
    pub override_min: f64,
    pub override_max: f64,
}

impl Default for ColorMapping {
    fn default() -> Self {
        Self {
            colormap: None,
            nan_color: Rgb([0, 0, 0]),
            override_min: f64::NAN,
            override_max: f64::NAN,
        }
    }
}

/// Result of [`to_display_color`]: the source itself when it already is a
/// 3-channel byte image, a converted buffer otherwise.
#[derive(Debug, Clone)]
pub enum DisplayColor<'a> {
    Borrowed(RgbView<'a>),
    Owned(RgbImage),
}

impl DisplayColor<'_> {
    pub fn is_borrowed(&self) -> bool {
        matches!(self, DisplayColor::Borrowed(_))
    }

    pub fn dimensions(&self) -> (u32, u32) {
        match self {
            DisplayColor::Borrowed(view) => view.dimensions(),
            DisplayColor::Owned(image) => image.dimensions(),
        }
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Rgb<u8> {
        match self {
            DisplayColor::Borrowed(view) => *view.get_pixel(x, y),
            DisplayColor::Owned(image) => *image.get_pixel(x, y),
        }
    }

    pub fn into_owned(self) -> RgbImage {
        match self {
            DisplayColor::Borrowed(view) => {
                ImageBuffer::from_fn(view.width(), view.height(), |x, y| *view.get_pixel(x, y))
            }
            DisplayColor::Owned(image) => image,
        }
    }
}

/// Converts `matrix` into a 3-channel byte image.
///
/// Single-channel matrices of any depth are normalized into `[0, 255]`
/// (between the override bounds, or the data minimum and maximum ignoring
/// NaN) and then run through the palette, or kept gray without one.
/// NaN pixels and pixels outside explicitly set override bounds become
/// `nan_color`.
///
/// 3-channel `u8` matrices are returned as a borrowed view; 4-channel `u8`
/// matrices lose their alpha channel. Other channel/depth combinations
/// fail with [`RenderError::UnsupportedFormat`].
///
/// ```rust
/// use aksel_raster::{Matrix, color::{to_display_color, ColorMapping}};
///
/// let m = Matrix::new(1, 3, 1, vec![0.0f64, 50.0, 100.0]).unwrap();
/// let rgb = to_display_color(&m, &ColorMapping::default()).unwrap().into_owned();
/// assert_eq!(rgb.get_pixel(0, 0).0, [0, 0, 0]);
/// assert_eq!(rgb.get_pixel(2, 0).0, [255, 255, 255]);
/// ```
pub fn to_display_color<'a>(
    matrix: &'a Matrix,
    mapping: &ColorMapping,
) -> Result<DisplayColor<'a>> {
    let unsupported = || RenderError::UnsupportedFormat {
        depth: matrix.depth(),
        channels: matrix.channels(),
    };

    match (matrix.channels(), matrix.data()) {
        (3, MatrixData::U8(_)) => matrix
            .rgb_view()
            .map(DisplayColor::Borrowed)
            .ok_or_else(unsupported),
        (4, MatrixData::U8(bytes)) => {
            let rgb: Vec<u8> = bytes
                .chunks_exact(4)
                .flat_map(|px| [px[0], px[1], px[2]])
                .collect();
            let (width, height) = matrix.image_size()?;
            RgbImage::from_raw(width, height, rgb)
                .map(DisplayColor::Owned)
                .ok_or_else(unsupported)
        }
        (1, _) => map_single_channel(matrix, mapping).map(DisplayColor::Owned),
        _ => Err(unsupported()),
    }
}

fn map_single_channel(matrix: &Matrix, mapping: &ColorMapping) -> Result<RgbImage> {
    let values = matrix.first_channel();
    let (min, max) = normalization_bounds(&values, mapping);
    let intensities = to_intensities(&values, min, max);

    let lut = mapping.colormap.map(Colormap::lut);
    let (width, height) = matrix.image_size()?;
    let mut image = RgbImage::new(width, height);
    let clip_min = !mapping.override_min.is_nan();
    let clip_max = !mapping.override_max.is_nan();

    for ((pixel, &value), &intensity) in image.pixels_mut().zip(&values).zip(&intensities) {
        let clipped = value.is_nan()
            || (clip_min && value < mapping.override_min)
            || (clip_max && value > mapping.override_max);
        *pixel = if clipped {
            mapping.nan_color
        } else {
            match &lut {
                Some(lut) => lut[usize::from(intensity)],
                None => Rgb([intensity; 3]),
            }
        };
    }
    Ok(image)
}

/// Resolves the normalization range: explicit overrides where set, the
/// data extremes (NaN excluded) for the rest.
fn normalization_bounds(values: &[f64], mapping: &ColorMapping) -> (f64, f64) {
    let (mut min, mut max) = (mapping.override_min, mapping.override_max);
    if min.is_nan() || max.is_nan() {
        let (data_min, data_max) = values
            .iter()
            .filter(|v| !v.is_nan())
            .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &v| (lo.min(v), hi.max(v)));
        let (data_min, data_max) = if data_min > data_max {
            // No valid value at all.
            (0.0, 0.0)
        } else {
            (data_min, data_max)
        };
        if min.is_nan() {
            min = data_min;
        }
        if max.is_nan() {
            max = data_max;
        }
    }
    (min, max)
}

fn to_intensities(values: &[f64], min: f64, max: f64) -> Vec<u8> {
    let min_infinite = min.is_infinite();
    let max_infinite = max.is_infinite();

    if min_infinite || max_infinite {
        // Two-level image: an infinite scale would collapse everything.
        let others = match (min_infinite, max_infinite) {
            (true, true) => MID_GRAY,
            (false, true) => u8::MAX,
            _ => 0,
        };
        return values
            .iter()
            .map(|&v| {
                if !min_infinite && v == min {
                    0
                } else if !max_infinite && v == max {
                    u8::MAX
                } else {
                    others
                }
            })
            .collect();
    }

    let span = max - min;
    if span == 0.0 {
        return vec![0; values.len()];
    }
    let alpha = 255.0 / span;
    let beta = -min * alpha;
    values
        .iter()
        .map(|&v| saturate_u8(v * alpha + beta))
        .collect()
}

fn saturate_u8(value: f64) -> u8 {
    if value.is_nan() {
        0
    } else {
        value.round().clamp(0.0, 255.0) as u8
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const RED: Rgb<u8> = Rgb([255, 0, 0]);

    fn gray_values(image: &RgbImage) -> Vec<u8> {
        image.pixels().map(|p| p[0]).collect()
    }

    fn map(matrix: &Matrix, mapping: ColorMapping) -> RgbImage {
        to_display_color(matrix, &mapping).unwrap().into_owned()
    }

    #[test]
    fn float_range_maps_to_full_intensity() {
        let m = Matrix::new(1, 3, 1, vec![0.0f32, 50.0, 100.0]).unwrap();
        let values = gray_values(&map(&m, ColorMapping::default()));

        assert_eq!(values[0], 0);
        assert!((i32::from(values[1]) - 127).abs() <= 1);
        assert_eq!(values[2], 255);
    }

    #[test]
    fn integer_depths_are_normalized() {
        let m = Matrix::new(2, 2, 1, vec![0u16, 100, 300, 500]).unwrap();
        let values = gray_values(&map(&m, ColorMapping::default()));
        assert_eq!(values, vec![0, 51, 153, 255]);
    }

    #[test]
    fn nan_gets_nan_color_regardless_of_colormap() {
        let m = Matrix::new(1, 3, 1, vec![1.0f64, f64::NAN, 3.0]).unwrap();
        for colormap in [None, Some(Colormap::Jet), Some(Colormap::Viridis)] {
            let image = map(
                &m,
                ColorMapping {
                    colormap,
                    nan_color: RED,
                    ..ColorMapping::default()
                },
            );
            assert_eq!(image.get_pixel(1, 0), &RED);
            assert_ne!(image.get_pixel(0, 0), &RED);
        }
    }

    #[test]
    fn nan_excluded_from_bounds() {
        let m = Matrix::new(1, 3, 1, vec![f64::NAN, 10.0, 20.0]).unwrap();
        let values = gray_values(&map(&m, ColorMapping::default()));
        assert_eq!(&values[1..], &[0, 255]);
    }

    #[test]
    fn overrides_clip_to_nan_color() {
        let m = Matrix::new(1, 5, 1, vec![-5i32, 0, 5, 10, 15]).unwrap();
        let image = map(
            &m,
            ColorMapping {
                nan_color: RED,
                override_min: 0.0,
                override_max: 10.0,
                ..ColorMapping::default()
            },
        );

        assert_eq!(image.get_pixel(0, 0), &RED);
        assert_eq!(image.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(2, 0), &Rgb([128, 128, 128]));
        assert_eq!(image.get_pixel(3, 0), &Rgb([255, 255, 255]));
        assert_eq!(image.get_pixel(4, 0), &RED);
    }

    #[test]
    fn single_override_uses_data_for_other_bound() {
        let m = Matrix::new(1, 3, 1, vec![0.0f64, 5.0, 10.0]).unwrap();
        let image = map(
            &m,
            ColorMapping {
                nan_color: RED,
                override_min: 5.0,
                ..ColorMapping::default()
            },
        );
        assert_eq!(image.get_pixel(0, 0), &RED);
        assert_eq!(image.get_pixel(1, 0), &Rgb([0, 0, 0]));
        assert_eq!(image.get_pixel(2, 0), &Rgb([255, 255, 255]));
    }

    #[test]
    fn infinite_bounds_give_two_levels() {
        let both = Matrix::new(1, 3, 1, vec![f64::NEG_INFINITY, 1.0, f64::INFINITY]).unwrap();
        assert_eq!(gray_values(&map(&both, ColorMapping::default())), vec![127, 127, 127]);

        // finite lower bound: its pixels go dark, everything else bright
        let upper = Matrix::new(1, 3, 1, vec![1.0f64, 2.0, f64::INFINITY]).unwrap();
        assert_eq!(gray_values(&map(&upper, ColorMapping::default())), vec![0, 255, 255]);

        // finite upper bound: its pixels go bright, everything else dark
        let lower = Matrix::new(1, 3, 1, vec![f64::NEG_INFINITY, 2.0, 3.0]).unwrap();
        assert_eq!(gray_values(&map(&lower, ColorMapping::default())), vec![0, 0, 255]);

        let both_with_finite_min = Matrix::new(1, 2, 1, vec![5.0f64, 6.0]).unwrap();
        let image = map(
            &both_with_finite_min,
            ColorMapping {
                override_min: 5.0,
                override_max: f64::INFINITY,
                ..ColorMapping::default()
            },
        );
        assert_eq!(gray_values(&image), vec![0, 255]);
    }

    #[test]
    fn constant_matrix_maps_to_zero() {
        let m = Matrix::new(1, 2, 1, vec![4.0f32, 4.0]).unwrap();
        assert_eq!(gray_values(&map(&m, ColorMapping::default())), vec![0, 0]);
    }

    #[test]
    fn palette_is_applied() {
        let m = Matrix::new(1, 2, 1, vec![0u8, 255]).unwrap();
        let image = map(
            &m,
            ColorMapping {
                colormap: Some(Colormap::Hot),
                ..ColorMapping::default()
            },
        );
        assert_eq!(image.get_pixel(0, 0), &Colormap::Hot.color(0));
        assert_eq!(image.get_pixel(1, 0), &Colormap::Hot.color(255));
    }

    #[test]
    fn rgb_bytes_are_borrowed() {
        let m = Matrix::new(1, 1, 3, vec![1u8, 2, 3]).unwrap();
        let display = to_display_color(&m, &ColorMapping::default()).unwrap();
        assert!(display.is_borrowed());
        assert_eq!(display.get_pixel(0, 0), Rgb([1, 2, 3]));
    }

    #[test]
    fn rgba_drops_alpha() {
        let m = Matrix::new(1, 2, 4, vec![1u8, 2, 3, 9, 4, 5, 6, 9]).unwrap();
        let display = to_display_color(&m, &ColorMapping::default()).unwrap();
        assert!(!display.is_borrowed());
        assert_eq!(display.into_owned().into_raw(), vec![1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn unsupported_formats() {
        let two = Matrix::new(1, 1, 2, vec![1u8, 2]).unwrap();
        assert_eq!(
            to_display_color(&two, &ColorMapping::default()).unwrap_err(),
            RenderError::UnsupportedFormat {
                depth: crate::matrix::Depth::U8,
                channels: 2
            }
        );

        let float_rgb = Matrix::new(1, 1, 3, vec![0.1f32, 0.2, 0.3]).unwrap();
        assert!(to_display_color(&float_rgb, &ColorMapping::default()).is_err());
    }
}
