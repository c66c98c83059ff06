//! Dense matrices of expressions
//!
//! Row-major storage with element-wise arithmetic, determinant, inverse,
//! LU decomposition and Jacobians, all built from the canonical expression
//! operations. Elimination steps expand every intermediate entry so that
//! zero pivots are recognized.

use std::fmt;

use crate::core::error::{Result, SymError};
use crate::core::expr::Expr;

/// A rectangular matrix of expressions
#[derive(Debug, Clone, PartialEq)]
pub struct DenseMatrix {
    rows: usize,
    cols: usize,
    data: Vec<Expr>,
}

fn dimension_error(op: &str, a: &DenseMatrix, b: &DenseMatrix) -> SymError {
    SymError::runtime(format!(
        "{op}: dimension mismatch {}x{} vs {}x{}",
        a.rows, a.cols, b.rows, b.cols
    ))
}

/// `a * b` expanded, so cancellations are visible to the zero tests
fn mul_expanded(a: &Expr, b: &Expr) -> Expr {
    Expr::mul_expr(a.clone(), b.clone()).expand()
}

/// Expanded `a . b`
fn dot(a: &[Expr], b: &[Expr]) -> Expr {
    Expr::sum(a.iter().zip(b).map(|(x, y)| x * y).collect()).expand()
}

/// Determinant by the division-free Berkowitz recurrence.
///
/// Builds the characteristic polynomial of each leading principal minor
/// from the previous one through a Toeplitz product, so no entry is ever
/// divided by a polynomial.
fn berkowitz_det(m: &[Vec<Expr>]) -> Expr {
    let n = m.len();
    let mut poly = vec![Expr::one()];
    for k in 0..n {
        // First column of the Toeplitz matrix: 1, -a_kk, -R*C, -R*A*C, ...
        let mut toeplitz = Vec::with_capacity(k + 2);
        toeplitz.push(Expr::one());
        toeplitz.push(m[k][k].clone().negate());
        let mut col: Vec<Expr> = (0..k).map(|i| m[i][k].clone()).collect();
        for step in 0..k {
            toeplitz.push(dot(&m[k][..k], &col).negate());
            if step + 1 < k {
                col = (0..k).map(|i| dot(&m[i][..k], &col)).collect();
            }
        }
        poly = (0..k + 2)
            .map(|i| {
                let terms = (0..=i.min(k)).map(|j| &toeplitz[i - j] * &poly[j]).collect();
                Expr::sum(terms).expand()
            })
            .collect();
    }
    let constant = poly.pop().unwrap_or_else(Expr::one);
    if n % 2 == 0 { constant } else { constant.negate() }
}

/// Column `c` of row `r` with the first `upto` LU terms removed
fn lu_reduced(a: &[Vec<Expr>], l: &[Vec<Expr>], u: &[Vec<Expr>], r: usize, c: usize, upto: usize) -> Expr {
    let s = Expr::sum((0..upto).map(|j| &l[r][j] * &u[j][c]).collect());
    (&a[r][c] - s).expand()
}

impl DenseMatrix {
    // =========================================================================
    // CONSTRUCTION
    // =========================================================================

    /// Matrix from row-major `data`
    ///
    /// # Errors
    /// `SymError::Runtime` if `data.len() != rows * cols`.
    pub fn new(rows: usize, cols: usize, data: Vec<Expr>) -> Result<Self> {
        if rows.checked_mul(cols) != Some(data.len()) {
            return Err(SymError::runtime(format!(
                "matrix of {rows}x{cols} needs {} elements, got {}",
                rows.saturating_mul(cols),
                data.len()
            )));
        }
        Ok(Self { rows, cols, data })
    }

    /// Matrix from a list of equally long rows
    ///
    /// # Errors
    /// `SymError::Runtime` if the rows differ in length.
    pub fn from_rows(rows: Vec<Vec<Expr>>) -> Result<Self> {
        let n = rows.len();
        let m = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|r| r.len() != m) {
            return Err(SymError::runtime("all rows must have the same length"));
        }
        Self::new(n, m, rows.into_iter().flatten().collect())
    }

    fn filled(rows: usize, cols: usize, value: &Expr) -> Self {
        Self {
            rows,
            cols,
            data: vec![value.clone(); rows * cols],
        }
    }

    pub fn zeros(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, &Expr::zero())
    }

    pub fn ones(rows: usize, cols: usize) -> Self {
        Self::filled(rows, cols, &Expr::one())
    }

    /// Ones on the `k`-th diagonal (`k > 0` above, `k < 0` below the main one)
    pub fn eye(rows: usize, cols: usize, k: isize) -> Self {
        let mut m = Self::zeros(rows, cols);
        for r in 0..rows {
            if let Some(c) = r.checked_add_signed(k)
                && c < cols
            {
                m.data[r * cols + c] = Expr::one();
            }
        }
        m
    }

    /// Square matrix with `values` on the `k`-th diagonal
    pub fn diag(values: &[Expr], k: isize) -> Self {
        let n = values.len() + k.unsigned_abs();
        let mut m = Self::zeros(n, n);
        for (i, v) in values.iter().enumerate() {
            let (r, c) = if k >= 0 {
                (i, i + k.unsigned_abs())
            } else {
                (i + k.unsigned_abs(), i)
            };
            m.data[r * n + c] = v.clone();
        }
        m
    }

    // =========================================================================
    // ACCESS
    // =========================================================================

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Row-major elements
    pub fn as_slice(&self) -> &[Expr] {
        &self.data
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        if row >= self.rows || col >= self.cols {
            return Err(SymError::runtime(format!(
                "index ({row}, {col}) out of range for {}x{} matrix",
                self.rows, self.cols
            )));
        }
        Ok(row * self.cols + col)
    }

    /// # Errors
    /// `SymError::Runtime` if the position is out of range.
    pub fn get(&self, row: usize, col: usize) -> Result<&Expr> {
        let i = self.index(row, col)?;
        Ok(&self.data[i])
    }

    /// # Errors
    /// `SymError::Runtime` if the position is out of range.
    pub fn set(&mut self, row: usize, col: usize, value: Expr) -> Result<()> {
        let i = self.index(row, col)?;
        self.data[i] = value;
        Ok(())
    }

    /// # Errors
    /// `SymError::Runtime` if `row` is out of range.
    pub fn row(&self, row: usize) -> Result<Vec<Expr>> {
        self.index(row, 0)?;
        Ok(self.data[row * self.cols..(row + 1) * self.cols].to_vec())
    }

    /// # Errors
    /// `SymError::Runtime` if `col` is out of range.
    pub fn col(&self, col: usize) -> Result<Vec<Expr>> {
        self.index(0, col)?;
        Ok((0..self.rows).map(|r| self.data[r * self.cols + col].clone()).collect())
    }

    /// Reinterpret the elements with new dimensions
    ///
    /// # Errors
    /// `SymError::Runtime` if the element count changes.
    pub fn resize(&mut self, rows: usize, cols: usize) -> Result<()> {
        if rows.checked_mul(cols) != Some(self.data.len()) {
            return Err(SymError::runtime(format!(
                "cannot resize {}x{} matrix to {rows}x{cols}",
                self.rows, self.cols
            )));
        }
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    fn map(&self, f: impl Fn(&Expr) -> Expr) -> Self {
        Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect(),
        }
    }

    fn try_map(&self, f: impl Fn(&Expr) -> Result<Expr>) -> Result<Self> {
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self.data.iter().map(f).collect::<Result<_>>()?,
        })
    }

    // =========================================================================
    // ARITHMETIC
    // =========================================================================

    /// # Errors
    /// `SymError::Runtime` on a dimension mismatch.
    pub fn add(&self, other: &DenseMatrix) -> Result<Self> {
        if self.rows != other.rows || self.cols != other.cols {
            return Err(dimension_error("add", self, other));
        }
        Ok(Self {
            rows: self.rows,
            cols: self.cols,
            data: self
                .data
                .iter()
                .zip(&other.data)
                .map(|(a, b)| a + b)
                .collect(),
        })
    }

    /// Matrix product `self * other`
    ///
    /// # Errors
    /// `SymError::Runtime` if `self.cols() != other.rows()`.
    pub fn mul_matrix(&self, other: &DenseMatrix) -> Result<Self> {
        if self.cols != other.rows {
            return Err(dimension_error("mul", self, other));
        }
        let mut data = Vec::with_capacity(self.rows * other.cols);
        for r in 0..self.rows {
            for c in 0..other.cols {
                let terms = (0..self.cols)
                    .map(|k| &self.data[r * self.cols + k] * &other.data[k * other.cols + c])
                    .collect();
                data.push(Expr::sum(terms));
            }
        }
        Ok(Self {
            rows: self.rows,
            cols: other.cols,
            data,
        })
    }

    pub fn mul_scalar(&self, scalar: &Expr) -> Self {
        self.map(|e| e * scalar)
    }

    pub fn add_scalar(&self, scalar: &Expr) -> Self {
        self.map(|e| e + scalar)
    }

    pub fn transpose(&self) -> Self {
        let mut data = Vec::with_capacity(self.data.len());
        for c in 0..self.cols {
            for r in 0..self.rows {
                data.push(self.data[r * self.cols + c].clone());
            }
        }
        Self {
            rows: self.cols,
            cols: self.rows,
            data,
        }
    }

    pub fn expand(&self) -> Self {
        self.map(Expr::expand)
    }

    // =========================================================================
    // LINEAR ALGEBRA
    // =========================================================================

    fn require_square(&self, op: &str) -> Result<()> {
        if self.rows != self.cols {
            return Err(SymError::runtime(format!(
                "{op} requires a square matrix, got {}x{}",
                self.rows, self.cols
            )));
        }
        Ok(())
    }

    fn rows_vec(&self) -> Vec<Vec<Expr>> {
        self.data.chunks(self.cols.max(1)).map(<[Expr]>::to_vec).collect()
    }

    /// Determinant
    ///
    /// Numeric matrices use fraction-free (Bareiss) elimination, where each
    /// step divides exactly by the previous pivot. Symbolic matrices use the
    /// division-free Berkowitz recurrence, so the result is always an
    /// expanded polynomial in the entries.
    ///
    /// # Errors
    /// `SymError::Runtime` if the matrix is not square.
    pub fn det(&self) -> Result<Expr> {
        self.require_square("det")?;
        tracing::debug!(n = self.rows, "det");
        let n = self.rows;
        if n == 0 {
            return Ok(Expr::one());
        }
        if !self.data.iter().all(Expr::is_number) {
            let m: Vec<Vec<Expr>> = self
                .rows_vec()
                .into_iter()
                .map(|r| r.iter().map(Expr::expand).collect())
                .collect();
            return Ok(berkowitz_det(&m));
        }

        let mut m = self.rows_vec();
        let mut sign_negative = false;
        let mut prev = Expr::one();

        for k in 0..n.saturating_sub(1) {
            if m[k][k].is_zero() {
                let Some(swap) = (k + 1..n).find(|&i| !m[i][k].is_zero()) else {
                    return Ok(Expr::zero());
                };
                m.swap(k, swap);
                sign_negative = !sign_negative;
            }
            for i in k + 1..n {
                for j in k + 1..n {
                    let cross = &m[k][k] * &m[i][j] - &m[i][k] * &m[k][j];
                    m[i][j] = Expr::div_expr(cross, prev.clone())?;
                }
            }
            prev = m[k][k].clone();
        }

        let det = m[n - 1][n - 1].clone();
        Ok(if sign_negative { det.negate() } else { det })
    }

    /// Inverse by Gauss-Jordan elimination
    ///
    /// # Errors
    /// - `SymError::Runtime` if the matrix is not square
    /// - `SymError::DivideByZero` if it is singular
    pub fn inv(&self) -> Result<Self> {
        self.require_square("inv")?;
        tracing::debug!(n = self.rows, "inv");
        let n = self.rows;
        let mut a = self.rows_vec();
        let mut b = Self::eye(n, n, 0).rows_vec();

        for k in 0..n {
            let pivot_row = (k..n)
                .find(|&i| !a[i][k].expand().is_zero())
                .ok_or(SymError::DivideByZero)?;
            a.swap(k, pivot_row);
            b.swap(k, pivot_row);

            let pivot = a[k][k].clone();
            for j in 0..n {
                a[k][j] = a[k][j].div(&pivot)?.expand();
                b[k][j] = b[k][j].div(&pivot)?.expand();
            }
            for i in (0..n).filter(|&i| i != k) {
                let factor = a[i][k].clone();
                if factor.is_zero() {
                    continue;
                }
                for j in 0..n {
                    a[i][j] = (&a[i][j] - mul_expanded(&factor, &a[k][j])).expand();
                    b[i][j] = (&b[i][j] - mul_expanded(&factor, &b[k][j])).expand();
                }
            }
        }

        Self::from_rows(b)
    }

    /// Doolittle decomposition with partial pivoting
    ///
    /// Returns `(L, U, perm)` with `L` unit lower triangular, `U` upper
    /// triangular and row `i` of `L * U` equal to row `perm[i]` of `self`.
    /// The pivot of each column is the first entry at or below the diagonal
    /// that does not expand to zero.
    ///
    /// # Errors
    /// - `SymError::Runtime` if the matrix is not square
    /// - `SymError::DivideByZero` if a column before the last has no
    ///   nonzero pivot
    pub fn lu(&self) -> Result<(Self, Self, Vec<usize>)> {
        self.require_square("lu")?;
        let n = self.rows;
        let mut a = self.rows_vec();
        let mut perm: Vec<usize> = (0..n).collect();
        let mut l = Self::zeros(n, n).rows_vec();
        let mut u = Self::zeros(n, n).rows_vec();

        for i in 0..n {
            let mut column: Vec<Expr> = (i..n).map(|r| lu_reduced(&a, &l, &u, r, i, i)).collect();
            match column.iter().position(|v| !v.is_zero()) {
                Some(offset) if offset > 0 => {
                    a.swap(i, i + offset);
                    l.swap(i, i + offset);
                    perm.swap(i, i + offset);
                    column.swap(0, offset);
                }
                Some(_) => {}
                None if i + 1 < n => return Err(SymError::DivideByZero),
                None => {}
            }

            l[i][i] = Expr::one();
            for k in i + 1..n {
                u[i][k] = lu_reduced(&a, &l, &u, i, k, i);
            }
            for k in i + 1..n {
                l[k][i] = column[k - i].div(&column[0])?.expand();
            }
            u[i][i] = column.swap_remove(0);
        }

        Ok((Self::from_rows(l)?, Self::from_rows(u)?, perm))
    }

    /// Solve `self * x = b` through the pivoted LU decomposition
    ///
    /// # Errors
    /// - `SymError::Runtime` if the matrix is not square or `b` has the
    ///   wrong number of rows
    /// - `SymError::DivideByZero` if the matrix is singular
    pub fn solve(&self, b: &DenseMatrix) -> Result<Self> {
        self.require_square("solve")?;
        if b.rows != self.rows {
            return Err(dimension_error("solve", self, b));
        }
        tracing::debug!(n = self.rows, rhs = b.cols, "solve");
        let (l, u, perm) = self.lu()?;
        let n = self.rows;
        let mut x = Self::zeros(n, b.cols);

        for c in 0..b.cols {
            // Forward substitution, L has a unit diagonal
            let mut y: Vec<Expr> = Vec::with_capacity(n);
            for i in 0..n {
                let s = Expr::sum((0..i).map(|j| &l.data[i * n + j] * &y[j]).collect());
                y.push((&b.data[perm[i] * b.cols + c] - s).expand());
            }
            // Back substitution
            for i in (0..n).rev() {
                let s = Expr::sum(
                    (i + 1..n)
                        .map(|j| &u.data[i * n + j] * &x.data[j * b.cols + c])
                        .collect(),
                );
                let value = (&y[i] - s).div(&u.data[i * n + i])?.expand();
                x.data[i * b.cols + c] = value;
            }
        }
        Ok(x)
    }

    // =========================================================================
    // CALCULUS
    // =========================================================================

    /// Element-wise derivative
    ///
    /// # Errors
    /// See [`Expr::diff`].
    pub fn diff(&self, var: &Expr) -> Result<Self> {
        self.try_map(|e| e.diff(var))
    }

    /// Jacobian of the vector `self` with respect to the vector `vars`
    ///
    /// # Errors
    /// `SymError::Runtime` if either argument is not a row or column vector,
    /// plus the errors of [`Expr::diff`].
    pub fn jacobian(&self, vars: &DenseMatrix) -> Result<Self> {
        if self.rows.min(self.cols) > 1 || vars.rows.min(vars.cols) > 1 {
            return Err(dimension_error("jacobian", self, vars));
        }
        let mut data = Vec::with_capacity(self.data.len() * vars.data.len());
        for f in &self.data {
            for v in &vars.data {
                data.push(f.diff(v)?);
            }
        }
        Self::new(self.data.len(), vars.data.len(), data)
    }

    // =========================================================================
    // SHAPE
    // =========================================================================

    /// Rows `r0..=r1` with step `rs`, columns `c0..=c1` with step `cs`
    ///
    /// # Errors
    /// `SymError::Runtime` for out of range bounds, reversed ranges or a
    /// zero step.
    pub fn submatrix(&self, r0: usize, c0: usize, r1: usize, c1: usize, rs: usize, cs: usize) -> Result<Self> {
        if rs == 0 || cs == 0 || r0 > r1 || c0 > c1 {
            return Err(SymError::runtime("invalid submatrix range"));
        }
        self.index(r1, c1)?;
        let rows: Vec<usize> = (r0..=r1).step_by(rs).collect();
        let cols: Vec<usize> = (c0..=c1).step_by(cs).collect();
        let data = rows
            .iter()
            .flat_map(|&r| cols.iter().map(move |&c| (r, c)))
            .map(|(r, c)| self.data[r * self.cols + c].clone())
            .collect();
        Self::new(rows.len(), cols.len(), data)
    }

    /// Append the columns of `other`
    ///
    /// # Errors
    /// `SymError::Runtime` if the row counts differ.
    pub fn row_join(&mut self, other: &DenseMatrix) -> Result<()> {
        if self.rows != other.rows {
            return Err(dimension_error("row_join", self, other));
        }
        let cols = self.cols + other.cols;
        let mut data = Vec::with_capacity(self.rows * cols);
        for r in 0..self.rows {
            data.extend_from_slice(&self.data[r * self.cols..(r + 1) * self.cols]);
            data.extend_from_slice(&other.data[r * other.cols..(r + 1) * other.cols]);
        }
        self.cols = cols;
        self.data = data;
        Ok(())
    }

    /// Append the rows of `other`
    ///
    /// # Errors
    /// `SymError::Runtime` if the column counts differ.
    pub fn col_join(&mut self, other: &DenseMatrix) -> Result<()> {
        if self.cols != other.cols {
            return Err(dimension_error("col_join", self, other));
        }
        self.data.extend_from_slice(&other.data);
        self.rows += other.rows;
        Ok(())
    }

    /// # Errors
    /// `SymError::Runtime` if `row` is out of range.
    pub fn row_del(&mut self, row: usize) -> Result<()> {
        self.index(row, 0)?;
        self.data.drain(row * self.cols..(row + 1) * self.cols);
        self.rows -= 1;
        Ok(())
    }

    /// # Errors
    /// `SymError::Runtime` if `col` is out of range.
    pub fn col_del(&mut self, col: usize) -> Result<()> {
        self.index(0, col)?;
        let cols = self.cols;
        let mut i = 0;
        self.data.retain(|_| {
            let keep = i % cols != col;
            i += 1;
            keep
        });
        self.cols -= 1;
        Ok(())
    }
}

impl fmt::Display for DenseMatrix {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in 0..self.rows {
            f.write_str("[")?;
            for c in 0..self.cols {
                if c > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{}", self.data[r * self.cols + c])?;
            }
            f.write_str("]\n")?;
        }
        Ok(())
    }
}
