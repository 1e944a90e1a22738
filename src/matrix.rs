//! Multi-channel matrix buffers.
//!
//! A [`Matrix`] is a rows × cols × channels array of `f64` tagged with a
//! [`MatrixType`] describing how the channels are meant to be read. The tag
//! fixes the channel count, so a three-channel RGB matrix can never hold
//! four channels.

use std::fmt;

use ndarray::{Array3, ArrayView1, Axis, Zip};
use thiserror::Error;

/// Colour-space tag of a matrix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatrixType {
    /// Plain numeric data, 1 to 4 channels
    Matrix,
    /// Image of unknown colour space, 1 to 4 channels
    UnknownImage,
    Bgr,
    Bgra,
    Rgb,
    Rgba,
    Hsv,
    Hsva,
    Gray,
    GrayA,
    /// Comparison result, one channel of 0 or 255
    Mask,
}

impl MatrixType {
    pub const ALL: [MatrixType; 11] = [
        MatrixType::Matrix,
        MatrixType::UnknownImage,
        MatrixType::Bgr,
        MatrixType::Bgra,
        MatrixType::Rgb,
        MatrixType::Rgba,
        MatrixType::Hsv,
        MatrixType::Hsva,
        MatrixType::Gray,
        MatrixType::GrayA,
        MatrixType::Mask,
    ];

    /// Whether a matrix with this tag may have `channels` channels.
    pub fn accepts(self, channels: usize) -> bool {
        match self.fixed_channels() {
            Some(fixed) => channels == fixed,
            None => (1..=4).contains(&channels),
        }
    }

    /// The fixed channel count of the tag. Plain matrices and unknown
    /// images take 1 to 4 channels.
    pub fn fixed_channels(self) -> Option<usize> {
        match self {
            MatrixType::Matrix | MatrixType::UnknownImage => None,
            MatrixType::Bgr | MatrixType::Rgb | MatrixType::Hsv => Some(3),
            MatrixType::Bgra | MatrixType::Rgba | MatrixType::Hsva => Some(4),
            MatrixType::GrayA => Some(2),
            MatrixType::Gray | MatrixType::Mask => Some(1),
        }
    }

    pub fn is_image(self) -> bool {
        self != MatrixType::Matrix
    }

    /// Default image tag for a channel count.
    pub fn image_for_channels(channels: usize) -> Option<MatrixType> {
        match channels {
            1 => Some(MatrixType::Gray),
            2 => Some(MatrixType::GrayA),
            3 => Some(MatrixType::Bgr),
            4 => Some(MatrixType::Bgra),
            _ => None,
        }
    }

    /// The same colour space with its alpha channel dropped.
    pub fn without_alpha(self) -> MatrixType {
        match self {
            MatrixType::Bgra => MatrixType::Bgr,
            MatrixType::Rgba => MatrixType::Rgb,
            MatrixType::Hsva => MatrixType::Hsv,
            MatrixType::GrayA => MatrixType::Gray,
            other => other,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            MatrixType::Matrix => "Matrix",
            MatrixType::UnknownImage => "UnknownImage",
            MatrixType::Bgr => "BGR",
            MatrixType::Bgra => "BGRA",
            MatrixType::Rgb => "RGB",
            MatrixType::Rgba => "RGBA",
            MatrixType::Hsv => "HSV",
            MatrixType::Hsva => "HSVA",
            MatrixType::Gray => "Gray",
            MatrixType::GrayA => "GrayA",
            MatrixType::Mask => "Mask",
        }
    }

    /// Case-insensitive lookup by [`name`](Self::name).
    pub fn from_name(name: &str) -> Option<MatrixType> {
        MatrixType::ALL
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(name))
    }
}

impl fmt::Display for MatrixType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum MatrixError {
    #[error("a {kind} matrix cannot have {channels} channel(s)")]
    ChannelCount { kind: MatrixType, channels: usize },

    #[error("a matrix needs at least one row and one column, got {rows}x{cols}")]
    Empty { rows: usize, cols: usize },

    #[error("a Mask matrix can only hold 0 or 255, found {found}")]
    MaskValue { found: f64 },

    #[error("a {rows}x{cols}x{channels} matrix is too large")]
    TooLarge { rows: usize, cols: usize, channels: usize },

    #[error("{rows}x{cols}x{channels} matrix needs {expected} values but {found} were given")]
    DataLength {
        rows: usize,
        cols: usize,
        channels: usize,
        expected: usize,
        found: usize,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    kind: MatrixType,
    data: Array3<f64>,
}

impl Matrix {
    /// Wraps a rows × cols × channels array, checking it against `kind`.
    /// Mask data must be all 0 or 255.
    pub fn new(kind: MatrixType, data: Array3<f64>) -> Result<Self, MatrixError> {
        let (rows, cols, channels) = data.dim();
        if rows == 0 || cols == 0 {
            return Err(MatrixError::Empty { rows, cols });
        }
        if !kind.accepts(channels) {
            return Err(MatrixError::ChannelCount { kind, channels });
        }
        if kind == MatrixType::Mask {
            if let Some(&found) = data.iter().find(|&&v| v != 0.0 && v != 255.0) {
                return Err(MatrixError::MaskValue { found });
            }
        }
        Ok(Matrix { kind, data })
    }

    /// Builds a matrix from row-major, channel-interleaved values.
    pub fn from_vec(
        kind: MatrixType,
        rows: usize,
        cols: usize,
        channels: usize,
        values: Vec<f64>,
    ) -> Result<Self, MatrixError> {
        let expected = rows
            .checked_mul(cols)
            .and_then(|n| n.checked_mul(channels))
            .ok_or(MatrixError::TooLarge { rows, cols, channels })?;
        if values.len() != expected {
            return Err(MatrixError::DataLength {
                rows,
                cols,
                channels,
                expected,
                found: values.len(),
            });
        }
        let data = Array3::from_shape_vec((rows, cols, channels), values).map_err(|_| {
            MatrixError::DataLength {
                rows,
                cols,
                channels,
                expected,
                found: expected,
            }
        })?;
        Matrix::new(kind, data)
    }

    pub fn filled(
        kind: MatrixType,
        rows: usize,
        cols: usize,
        channels: usize,
        value: f64,
    ) -> Result<Self, MatrixError> {
        Matrix::new(kind, Array3::from_elem((rows, cols, channels), value))
    }

    /// Wraps data already known to have 1 to 4 channels as a plain matrix.
    pub(crate) fn generic(data: Array3<f64>) -> Self {
        debug_assert!(MatrixType::Matrix.accepts(data.dim().2));
        Matrix {
            kind: MatrixType::Matrix,
            data,
        }
    }

    pub fn kind(&self) -> MatrixType {
        self.kind
    }

    pub fn rows(&self) -> usize {
        self.data.dim().0
    }

    pub fn cols(&self) -> usize {
        self.data.dim().1
    }

    pub fn channels(&self) -> usize {
        self.data.dim().2
    }

    pub fn data(&self) -> &Array3<f64> {
        &self.data
    }

    pub fn into_data(self) -> Array3<f64> {
        self.data
    }

    pub fn get(&self, row: usize, col: usize, channel: usize) -> Option<f64> {
        self.data.get((row, col, channel)).copied()
    }

    /// Retags the matrix, keeping its data.
    pub fn with_kind(self, kind: MatrixType) -> Result<Self, MatrixError> {
        Matrix::new(kind, self.data)
    }

    /// Same rows, columns and channels.
    pub fn same_shape(&self, other: &Matrix) -> bool {
        self.data.dim() == other.data.dim()
    }

    /// Applies `f` to every element in place. The result is a plain matrix.
    pub fn map(mut self, f: impl Fn(f64) -> f64) -> Matrix {
        self.data.mapv_inplace(f);
        Matrix::generic(self.data)
    }

    /// Combines two matrices of the same shape element by element, reusing
    /// this matrix's buffer. The result is a plain matrix.
    pub fn zip_map(mut self, other: &Matrix, f: impl Fn(f64, f64) -> f64) -> Matrix {
        debug_assert!(self.same_shape(other));
        Zip::from(&mut self.data)
            .and(&other.data)
            .for_each(|a, &b| *a = f(*a, b));
        Matrix::generic(self.data)
    }

    /// Builds a mask that is 255 where `predicate` holds on every channel of
    /// a pixel and 0 elsewhere.
    pub fn mask_where(&self, predicate: impl Fn(f64) -> bool) -> Matrix {
        let mask = Zip::from(self.data.lanes(Axis(2)))
            .map_collect(|pixel: ArrayView1<f64>| mask_value(pixel.iter().all(|&v| predicate(v))));
        Matrix {
            kind: MatrixType::Mask,
            data: mask.insert_axis(Axis(2)),
        }
    }

    /// Pixel-wise mask over two matrices of the same shape.
    pub fn mask_zip(&self, other: &Matrix, predicate: impl Fn(f64, f64) -> bool) -> Matrix {
        debug_assert!(self.same_shape(other));
        let mask = Zip::from(self.data.lanes(Axis(2)))
            .and(other.data.lanes(Axis(2)))
            .map_collect(|a: ArrayView1<f64>, b: ArrayView1<f64>| {
                mask_value(a.iter().zip(b.iter()).all(|(&x, &y)| predicate(x, y)))
            });
        Matrix {
            kind: MatrixType::Mask,
            data: mask.insert_axis(Axis(2)),
        }
    }

    pub fn min_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::INFINITY, f64::min)
    }

    pub fn max_value(&self) -> f64 {
        self.data.iter().copied().fold(f64::NEG_INFINITY, f64::max)
    }
}

fn mask_value(hit: bool) -> f64 {
    if hit { 255.0 } else { 0.0 }
}

impl fmt::Display for Matrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}-channel {} Mat {}x{}]",
            self.channels(),
            self.kind,
            self.rows(),
            self.cols()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tag_rejects_wrong_channel_count() {
        let err = Matrix::filled(MatrixType::Rgb, 2, 2, 4, 0.0).unwrap_err();
        assert_eq!(
            err,
            MatrixError::ChannelCount {
                kind: MatrixType::Rgb,
                channels: 4
            }
        );
        assert!(Matrix::filled(MatrixType::Matrix, 2, 2, 4, 0.0).is_ok());
        assert!(Matrix::filled(MatrixType::Matrix, 2, 2, 5, 0.0).is_err());
    }

    #[test]
    fn test_fixed_channels() {
        assert_eq!(MatrixType::Rgba.fixed_channels(), Some(4));
        assert_eq!(MatrixType::GrayA.fixed_channels(), Some(2));
        assert_eq!(MatrixType::Matrix.fixed_channels(), None);
    }

    #[test]
    fn test_mask_requires_every_channel() {
        let m = Matrix::from_vec(MatrixType::Matrix, 1, 2, 2, vec![5.0, 5.0, 5.0, 0.0]).unwrap();
        let mask = m.mask_where(|v| v > 1.0);
        assert_eq!(mask.kind(), MatrixType::Mask);
        assert_eq!(mask.channels(), 1);
        assert_eq!(mask.get(0, 0, 0), Some(255.0));
        assert_eq!(mask.get(0, 1, 0), Some(0.0));
    }

    #[test]
    fn test_mask_rejects_other_values() {
        assert!(Matrix::from_vec(MatrixType::Mask, 1, 2, 1, vec![255.0, 0.0]).is_ok());
        let err = Matrix::from_vec(MatrixType::Mask, 1, 2, 1, vec![255.0, 7.0]).unwrap_err();
        assert_eq!(err, MatrixError::MaskValue { found: 7.0 });

        let gray = Matrix::from_vec(MatrixType::Gray, 1, 1, 1, vec![3.0]).unwrap();
        assert!(gray.with_kind(MatrixType::Mask).is_err());
    }

    #[test]
    fn test_huge_dimensions_are_an_error() {
        let err = Matrix::from_vec(MatrixType::Matrix, usize::MAX, 2, 1, vec![1.0]).unwrap_err();
        assert_eq!(
            err,
            MatrixError::TooLarge {
                rows: usize::MAX,
                cols: 2,
                channels: 1
            }
        );
    }

    #[test]
    fn test_display() {
        let m = Matrix::filled(MatrixType::Bgr, 4, 5, 3, 0.0).unwrap();
        assert_eq!(m.to_string(), "[3-channel BGR Mat 4x5]");
    }
}
