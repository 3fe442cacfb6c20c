use std::fmt::{Debug, Display};
use std::iter::Sum;
use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub, SubAssign};

/// Data trait used throughout the package
/// to control for floating point numbers.
pub trait FloatData<T>:
    Mul<Output = T>
    + Display
    + Add<Output = T>
    + Div<Output = T>
    + Neg<Output = T>
    + Copy
    + Debug
    + PartialEq
    + PartialOrd
    + AddAssign
    + Sub<Output = T>
    + SubAssign
    + Sum
    + std::marker::Send
    + std::marker::Sync
{
    /// Zero value.
    const ZERO: T;
    /// Infinity.
    const INFINITY: T;
    /// Convert from usize.
    fn from_usize(v: usize) -> T;
    /// Check if value is NaN.
    fn is_nan(self) -> bool;
}

impl FloatData<f64> for f64 {
    const ZERO: f64 = 0.0;
    const INFINITY: f64 = f64::INFINITY;

    fn from_usize(v: usize) -> f64 {
        v as f64
    }
    fn is_nan(self) -> bool {
        self.is_nan()
    }
}

impl FloatData<f32> for f32 {
    const ZERO: f32 = 0.0;
    const INFINITY: f32 = f32::INFINITY;

    fn from_usize(v: usize) -> f32 {
        v as f32
    }
    fn is_nan(self) -> bool {
        self.is_nan()
    }
}

/// Contiguous column major matrix data container.
///
/// Holds a dense matrix of values in a single borrowed memory block in
/// column-major order (Fortran-style), which keeps column slicing free.
/// The detector and the probe models only ever walk whole columns.
///
/// # Type Parameters
/// * `T` - The numeric type of the data (e.g., `f32`, `f64`).
pub struct Matrix<'a, T> {
    /// The raw data stored in a single slice.
    pub data: &'a [T],
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride: usize,
}

impl<'a, T> Matrix<'a, T> {
    /// Create a new Matrix over a column-major slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice length is not `rows * cols`.
    pub fn new(data: &'a [T], rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "data length must equal rows * cols");
        Matrix {
            data,
            rows,
            cols,
            stride: rows,
        }
    }

    /// Get a single reference to an item in the matrix.
    ///
    /// * `i` - The ith row of the data to get.
    /// * `j` - the jth column of the data to get.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[j * self.stride + i]
    }

    /// Get a slice of a column in the matrix.
    ///
    /// * `col` - The index of the column to select.
    /// * `start_row` - The index of the start of the slice.
    /// * `end_row` - The index of the end of the slice of the column to select.
    pub fn get_col_slice(&self, col: usize, start_row: usize, end_row: usize) -> &[T] {
        &self.data[(col * self.stride + start_row)..(col * self.stride + end_row)]
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        self.get_col_slice(col, 0, self.rows)
    }
}

/// Mutable counterpart of [`Matrix`] with the same column-major layout.
///
/// The corrector works through this type: columns are rewritten in place,
/// so the caller keeps ownership of the backing buffer and no copy of the
/// dataset is ever made.
pub struct MatrixMut<'a, T> {
    /// The raw data stored in a single mutable slice.
    pub data: &'a mut [T],
    /// Number of rows in the matrix.
    pub rows: usize,
    /// Number of columns in the matrix.
    pub cols: usize,
    stride: usize,
}

impl<'a, T> MatrixMut<'a, T> {
    /// Create a new MatrixMut over a column-major slice.
    ///
    /// # Panics
    ///
    /// Panics if the slice length is not `rows * cols`.
    pub fn new(data: &'a mut [T], rows: usize, cols: usize) -> Self {
        assert_eq!(data.len(), rows * cols, "data length must equal rows * cols");
        MatrixMut {
            data,
            rows,
            cols,
            stride: rows,
        }
    }

    /// Get a single reference to an item in the matrix.
    pub fn get(&self, i: usize, j: usize) -> &T {
        &self.data[j * self.stride + i]
    }

    /// Get an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col(&self, col: usize) -> &[T] {
        &self.data[(col * self.stride)..(col * self.stride + self.rows)]
    }

    /// Get a mutable reference to an entire column in the matrix.
    ///
    /// * `col` - The index of the column to get.
    pub fn get_col_mut(&mut self, col: usize) -> &mut [T] {
        &mut self.data[(col * self.stride)..(col * self.stride + self.rows)]
    }

    /// Borrow a read-only [`Matrix`] view of the same data.
    pub fn view(&self) -> Matrix<'_, T> {
        Matrix {
            data: self.data,
            rows: self.rows,
            cols: self.cols,
            stride: self.stride,
        }
    }
}
