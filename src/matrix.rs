//! Source matrices for image drawables.

use crate::error::{RenderError, Result};
use image::{ImageBuffer, Rgb};

/// Borrowed RGB view over a byte buffer.
pub type RgbView<'a> = ImageBuffer<Rgb<u8>, &'a [u8]>;

/// Element type of a [`Matrix`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    U8,
    U16,
    I16,
    I32,
    F32,
    F64,
}

/// Typed, interleaved, row-major storage.
#[derive(Debug, Clone, PartialEq)]
pub enum MatrixData {
    U8(Vec<u8>),
    U16(Vec<u16>),
    I16(Vec<i16>),
    I32(Vec<i32>),
    F32(Vec<f32>),
    F64(Vec<f64>),
}

macro_rules! impl_from_vec {
    ($($ty:ty => $variant:ident),* $(,)?) => {
        $(
            impl From<Vec<$ty>> for MatrixData {
                fn from(data: Vec<$ty>) -> Self {
                    MatrixData::$variant(data)
                }
            }
        )*
    };
}

impl_from_vec!(u8 => U8, u16 => U16, i16 => I16, i32 => I32, f32 => F32, f64 => F64);

/// Applies the same generic expression to whichever vector a `MatrixData` holds.
macro_rules! map_data {
    ($data:expr, $v:ident => $body:expr) => {
        match $data {
            MatrixData::U8($v) => MatrixData::U8($body),
            MatrixData::U16($v) => MatrixData::U16($body),
            MatrixData::I16($v) => MatrixData::I16($body),
            MatrixData::I32($v) => MatrixData::I32($body),
            MatrixData::F32($v) => MatrixData::F32($body),
            MatrixData::F64($v) => MatrixData::F64($body),
        }
    };
}

impl MatrixData {
    pub fn depth(&self) -> Depth {
        match self {
            MatrixData::U8(_) => Depth::U8,
            MatrixData::U16(_) => Depth::U16,
            MatrixData::I16(_) => Depth::I16,
            MatrixData::I32(_) => Depth::I32,
            MatrixData::F32(_) => Depth::F32,
            MatrixData::F64(_) => Depth::F64,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            MatrixData::U8(v) => v.len(),
            MatrixData::U16(v) => v.len(),
            MatrixData::I16(v) => v.len(),
            MatrixData::I32(v) => v.len(),
            MatrixData::F32(v) => v.len(),
            MatrixData::F64(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A 2D array with 1, 3 or 4 interleaved channels.
///
/// Construction checks that the buffer length matches the shape and that
/// both sides fit image dimensions, so every accessor can index without
/// further validation.
///
/// ```rust
/// use aksel_raster::Matrix;
///
/// let m = Matrix::new(2, 3, 1, vec![0.0f32, 1.0, 2.0, 3.0, 4.0, 5.0]).unwrap();
/// assert_eq!(m.value(1, 2, 0), 5.0);
/// assert!(Matrix::new(2, 2, 1, vec![0u8; 3]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    rows: usize,
    cols: usize,
    channels: usize,
    data: MatrixData,
}

impl Default for Matrix {
    fn default() -> Self {
        Self::empty()
    }
}

impl Matrix {
    pub fn new(
        rows: usize,
        cols: usize,
        channels: usize,
        data: impl Into<MatrixData>,
    ) -> Result<Self> {
        let data = data.into();
        if u32::try_from(rows).is_err() || u32::try_from(cols).is_err() {
            return Err(RenderError::TooLarge { rows, cols });
        }
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(RenderError::TooLarge { rows, cols })?;
        if data.len() != expected {
            return Err(RenderError::ShapeMismatch {
                rows,
                cols,
                channels,
                len: data.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            channels,
            data,
        })
    }

    /// A matrix without elements. Drawables treat it as nothing to draw.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            channels: 1,
            data: MatrixData::U8(Vec::new()),
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn channels(&self) -> usize {
        self.channels
    }

    pub fn depth(&self) -> Depth {
        self.data.depth()
    }

    pub fn data(&self) -> &MatrixData {
        &self.data
    }

    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// `(width, height)` as image dimensions.
    pub fn image_size(&self) -> Result<(u32, u32)> {
        let too_large = |_| RenderError::TooLarge {
            rows: self.rows,
            cols: self.cols,
        };
        Ok((
            u32::try_from(self.cols).map_err(too_large)?,
            u32::try_from(self.rows).map_err(too_large)?,
        ))
    }

    /// Element at `(row, col, channel)` widened to `f64`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the matrix.
    pub fn value(&self, row: usize, col: usize, channel: usize) -> f64 {
        assert!(row < self.rows && col < self.cols && channel < self.channels);
        self.element((row * self.cols + col) * self.channels + channel)
    }

    fn element(&self, index: usize) -> f64 {
        match &self.data {
            MatrixData::U8(v) => f64::from(v[index]),
            MatrixData::U16(v) => f64::from(v[index]),
            MatrixData::I16(v) => f64::from(v[index]),
            MatrixData::I32(v) => f64::from(v[index]),
            MatrixData::F32(v) => f64::from(v[index]),
            MatrixData::F64(v) => v[index],
        }
    }

    /// All elements of channel 0 in row-major order.
    pub(crate) fn first_channel(&self) -> Vec<f64> {
        (0..self.rows * self.cols)
            .map(|i| self.element(i * self.channels))
            .collect()
    }

    /// Zero-copy RGB view, available for 3-channel `u8` matrices.
    pub fn rgb_view(&self) -> Option<RgbView<'_>> {
        match &self.data {
            MatrixData::U8(bytes) if self.channels == 3 => {
                let (width, height) = self.image_size().ok()?;
                ImageBuffer::from_raw(width, height, bytes.as_slice())
            }
            _ => None,
        }
    }

    /// Returns a copy mirrored around the vertical axis (`horizontal`)
    /// and/or the horizontal axis (`vertical`).
    pub fn flipped(&self, horizontal: bool, vertical: bool) -> Matrix {
        let (rows, cols, channels) = (self.rows, self.cols, self.channels);
        let data = map_data!(&self.data, v => flip_interleaved(v, rows, cols, channels, horizontal, vertical));
        Matrix {
            rows,
            cols,
            channels,
            data,
        }
    }
}

fn flip_interleaved<T: Copy>(
    data: &[T],
    rows: usize,
    cols: usize,
    channels: usize,
    horizontal: bool,
    vertical: bool,
) -> Vec<T> {
    let mut out = Vec::with_capacity(data.len());
    for row in 0..rows {
        let src_row = if vertical { rows - 1 - row } else { row };
        for col in 0..cols {
            let src_col = if horizontal { cols - 1 - col } else { col };
            let start = (src_row * cols + src_col) * channels;
            out.extend_from_slice(&data[start..start + channels]);
        }
    }
    out
}
