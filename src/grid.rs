/// Column/row count of a cell grid laid over a drawing area.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct GridDims {
    pub columns: usize,
    pub rows: usize,
}

impl GridDims {
    /// Cells needed to cover `width` x `height` with `cell_width` x
    /// `cell_height` cells, rounding partial cells up. Degenerate inputs
    /// (zero, negative, NaN) collapse to an empty grid.
    pub fn covering(width: f64, height: f64, cell_width: f64, cell_height: f64) -> Self {
        Self {
            columns: span(width, cell_width),
            rows: span(height, cell_height),
        }
    }

    pub fn len(&self) -> usize {
        self.columns * self.rows
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `(column, row)` of a row-major index.
    pub fn position(&self, index: usize) -> (usize, usize) {
        if self.columns == 0 {
            return (0, 0);
        }
        (index % self.columns, index / self.columns)
    }
}

/// `ceil(length / cell)`, or 0 when either side is not a positive number.
pub(crate) fn span(length: f64, cell: f64) -> usize {
    let positive = |v: f64| v.is_finite() && v > 0.0;
    if !positive(length) || !positive(cell) {
        return 0;
    }
    (length / cell).ceil() as usize
}
