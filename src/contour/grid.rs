use anyhow::{Result, bail};

/// Rectangular grid of samples stored row-major; `dx` columns by `dy` rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Grid {
    dx: usize,
    dy: usize,
    values: Vec<f64>,
}

impl Grid {
    /// Build from row-major flat values.
    pub fn new(dx: usize, dy: usize, values: Vec<f64>) -> Result<Self> {
        if dx == 0 || dy == 0 {
            bail!("[contour] grid must have at least one row and one column, got {dx}x{dy}");
        }
        if values.len() != dx * dy {
            bail!("[contour] expected {} values for a {dx}x{dy} grid, got {}", dx * dy, values.len());
        }
        Ok(Self { dx, dy, values })
    }

    /// Build from rows, rejecting ragged input.
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Result<Self> {
        let Some(first) = rows.first() else { bail!("[contour] grid is empty") };
        let dx = first.len();
        if let Some((i, row)) = rows.iter().enumerate().find(|(_, row)| row.len() != dx) {
            bail!("[contour] row {i} has {} values, expected {dx}", row.len());
        }
        let dy = rows.len();
        Self::new(dx, dy, rows.into_iter().flatten().collect())
    }

    #[inline]
    pub fn cols(&self) -> usize { self.dx }

    #[inline]
    pub fn rows(&self) -> usize { self.dy }

    #[inline]
    pub fn values(&self) -> &[f64] { &self.values }

    #[inline]
    pub fn get(&self, x: usize, y: usize) -> f64 { self.values[y * self.dx + x] }

    /// Min and max over non-NaN samples, or None if every sample is NaN.
    pub fn extent(&self) -> Option<(f64, f64)> {
        self.values.iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| match acc {
                None => Some((v, v)),
                Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
            })
    }
}
