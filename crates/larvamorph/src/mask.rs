//! Validated 2D scalar grids used as segmentation masks.

use image::GrayImage;

// ── Error type ─────────────────────────────────────────────────────────────

/// Reasons a grid cannot be used as a mask.
#[derive(Debug, Clone, PartialEq)]
pub enum MaskError {
    /// The grid has no rows or no columns.
    Empty,
    /// A row length differs from the first row (the input is not 2D).
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        got: usize,
    },
    /// The buffer length does not match `rows * cols`.
    ShapeMismatch {
        /// `rows * cols`.
        expected: usize,
        /// Buffer length.
        got: usize,
    },
    /// A cell holds NaN or an infinity.
    NonFinite {
        /// Row of the offending cell.
        row: usize,
        /// Column of the offending cell.
        col: usize,
    },
}

impl std::fmt::Display for MaskError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Empty => write!(f, "mask is empty"),
            Self::Ragged { row, expected, got } => write!(
                f,
                "mask is not 2D: row {} has {} columns, expected {}",
                row, got, expected
            ),
            Self::ShapeMismatch { expected, got } => {
                write!(f, "mask buffer holds {} values, expected {}", got, expected)
            }
            Self::NonFinite { row, col } => {
                write!(f, "mask value at ({}, {}) is not finite", row, col)
            }
        }
    }
}

impl std::error::Error for MaskError {}

// ── Mask ───────────────────────────────────────────────────────────────────

/// Immutable row-major grid of mask values.
///
/// Values are interpreted against an iso-level (0.5 by default), so both
/// strictly binary `{0, 1}` masks and soft masks in `[0, 1]` are accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct Mask {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl Mask {
    /// Wrap a row-major buffer of `rows * cols` values.
    pub fn new(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, MaskError> {
        if rows == 0 || cols == 0 {
            return Err(MaskError::Empty);
        }
        if data.len() != rows * cols {
            return Err(MaskError::ShapeMismatch {
                expected: rows * cols,
                got: data.len(),
            });
        }
        if let Some(i) = data.iter().position(|v| !v.is_finite()) {
            return Err(MaskError::NonFinite {
                row: i / cols,
                col: i % cols,
            });
        }
        Ok(Self { rows, cols, data })
    }

    /// Build from nested rows, rejecting empty and ragged input.
    pub fn from_rows<R: AsRef<[f64]>>(rows: &[R]) -> Result<Self, MaskError> {
        let cols = rows.first().map(|r| r.as_ref().len()).unwrap_or(0);
        if cols == 0 {
            return Err(MaskError::Empty);
        }
        let mut data = Vec::with_capacity(rows.len() * cols);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != cols {
                return Err(MaskError::Ragged {
                    row,
                    expected: cols,
                    got: values.len(),
                });
            }
            data.extend_from_slice(values);
        }
        Self::new(rows.len(), cols, data)
    }

    /// Build by evaluating `f(row, col)` for every cell.
    pub fn from_fn(
        rows: usize,
        cols: usize,
        mut f: impl FnMut(usize, usize) -> f64,
    ) -> Result<Self, MaskError> {
        let mut data = Vec::with_capacity(rows * cols);
        for r in 0..rows {
            for c in 0..cols {
                data.push(f(r, c));
            }
        }
        Self::new(rows, cols, data)
    }

    /// Convert an 8-bit grayscale image; intensities are scaled to `[0, 1]`.
    ///
    /// Image `y` maps to mask rows and image `x` to mask columns.
    pub fn from_gray_image(img: &GrayImage) -> Result<Self, MaskError> {
        let (w, h) = img.dimensions();
        let data = img.as_raw().iter().map(|&v| v as f64 / 255.0).collect();
        Self::new(h as usize, w as usize, data)
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Value at `(row, col)`; panics when out of bounds.
    #[inline]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.data[row * self.cols + col]
    }

    /// Row-major view of all values.
    pub fn as_slice(&self) -> &[f64] {
        &self.data
    }

    /// `(row, col)` of every cell strictly above `level`, row-major.
    pub fn foreground(&self, level: f64) -> impl Iterator<Item = [usize; 2]> + '_ {
        let cols = self.cols;
        self.data
            .iter()
            .enumerate()
            .filter(move |&(_, &v)| v > level)
            .map(move |(i, _)| [i / cols, i % cols])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Luma;

    #[test]
    fn from_rows_preserves_layout() {
        let m = Mask::from_rows(&[vec![0.0, 1.0, 0.0], vec![1.0, 1.0, 0.0]]).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 3));
        assert_eq!(m.get(0, 1), 1.0);
        assert_eq!(m.get(1, 2), 0.0);
        assert_eq!(m.foreground(0.5).collect::<Vec<_>>(), vec![[0, 1], [1, 0], [1, 1]]);
    }

    #[test]
    fn empty_inputs_are_rejected() {
        let no_rows: Vec<Vec<f64>> = Vec::new();
        assert_eq!(Mask::from_rows(&no_rows), Err(MaskError::Empty));
        assert_eq!(Mask::from_rows(&[Vec::<f64>::new()]), Err(MaskError::Empty));
        assert_eq!(Mask::new(0, 4, Vec::new()), Err(MaskError::Empty));
        assert_eq!(
            Mask::from_gray_image(&GrayImage::new(0, 0)),
            Err(MaskError::Empty)
        );
    }

    #[test]
    fn ragged_rows_are_rejected() {
        let err = Mask::from_rows(&[vec![0.0, 1.0], vec![1.0], vec![0.0, 0.0]]).unwrap_err();
        assert_eq!(
            err,
            MaskError::Ragged {
                row: 1,
                expected: 2,
                got: 1
            }
        );
        assert!(err.to_string().contains("not 2D"));
    }

    #[test]
    fn non_finite_values_are_rejected() {
        let err = Mask::from_rows(&[vec![0.0, 0.0], vec![f64::NAN, 0.0]]).unwrap_err();
        assert_eq!(err, MaskError::NonFinite { row: 1, col: 0 });
    }

    #[test]
    fn buffer_length_must_match_shape() {
        assert_eq!(
            Mask::new(2, 3, vec![0.0; 5]),
            Err(MaskError::ShapeMismatch {
                expected: 6,
                got: 5
            })
        );
    }

    #[test]
    fn gray_image_is_scaled_to_unit_range() {
        let mut img = GrayImage::new(4, 2);
        img.put_pixel(3, 1, Luma([255]));
        img.put_pixel(1, 0, Luma([51]));
        let m = Mask::from_gray_image(&img).unwrap();
        assert_eq!((m.rows(), m.cols()), (2, 4));
        assert_eq!(m.get(1, 3), 1.0);
        assert!((m.get(0, 1) - 0.2).abs() < 1e-12);
        assert_eq!(m.foreground(0.5).collect::<Vec<_>>(), vec![[1, 3]]);
    }
}
