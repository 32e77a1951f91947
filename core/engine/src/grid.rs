//! FILENAME: core/engine/src/grid.rs
//! PURPOSE: Manages the collection of cells of one sheet.
//! CONTEXT: Sparse storage keyed by 1-based (row, col). Empty cells are not
//! stored. Block writes validate their shape before touching any cell so a
//! rejected write leaves the grid exactly as it was.

use rustc_hash::FxHashMap;

use crate::cell::CellValue;
use crate::coord::RangeRef;
use crate::host::HostError;

/// The Grid struct holds the cell values of a sheet.
#[derive(Debug, Clone, Default)]
pub struct Grid {
    /// Sparse storage: keys are 1-based (row, col).
    pub cells: FxHashMap<(u32, u32), CellValue>,

    /// Tracks the highest row index currently in use (0 when empty).
    pub max_row: u32,

    /// Tracks the highest column index currently in use (0 when empty).
    pub max_col: u32,
}

impl Grid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a cell. Writing `CellValue::Empty` clears it.
    pub fn set_cell(&mut self, row: u32, col: u32, value: CellValue) {
        if value.is_empty() {
            self.clear_cell(row, col);
            return;
        }
        self.max_row = self.max_row.max(row);
        self.max_col = self.max_col.max(col);
        self.cells.insert((row, col), value);
    }

    pub fn get_cell(&self, row: u32, col: u32) -> Option<&CellValue> {
        self.cells.get(&(row, col))
    }

    /// Returns the cell value, `CellValue::Empty` when nothing is stored.
    pub fn value_at(&self, row: u32, col: u32) -> CellValue {
        self.get_cell(row, col).cloned().unwrap_or_default()
    }

    /// Removes a cell. Bounds are only rescanned when a boundary cell goes.
    pub fn clear_cell(&mut self, row: u32, col: u32) {
        let was_at_boundary = row == self.max_row || col == self.max_col;
        if self.cells.remove(&(row, col)).is_some() && was_at_boundary {
            self.recalculate_bounds();
        }
    }

    /// Recalculates max_row and max_col by scanning all cells.
    pub fn recalculate_bounds(&mut self) {
        self.max_row = self.cells.keys().map(|&(r, _)| r).max().unwrap_or(0);
        self.max_col = self.cells.keys().map(|&(_, c)| c).max().unwrap_or(0);
    }

    /// Writes a whole rectangle at once. The value matrix must match the
    /// range shape exactly; nothing is written otherwise.
    pub fn write_block(
        &mut self,
        range: &RangeRef,
        values: &[Vec<CellValue>],
    ) -> Result<(), HostError> {
        let rows = range.rows() as usize;
        let cols = range.cols() as usize;
        let ragged = values.iter().any(|row| row.len() != cols);
        if values.len() != rows || ragged {
            return Err(HostError::ShapeMismatch {
                address: range.to_string(),
                expected: (rows, cols),
                actual: (values.len(), values.first().map_or(0, Vec::len)),
            });
        }

        for (r, row) in values.iter().enumerate() {
            for (c, value) in row.iter().enumerate() {
                let (at_row, at_col) = (range.first_row + r as u32, range.first_col + c as u32);
                self.set_cell(at_row, at_col, value.clone());
            }
        }
        Ok(())
    }

    /// Reads a rectangle back as a dense matrix.
    pub fn read_block(&self, range: &RangeRef) -> Vec<Vec<CellValue>> {
        (range.first_row..=range.last_row)
            .map(|row| {
                (range.first_col..=range.last_col)
                    .map(|col| self.value_at(row, col))
                    .collect()
            })
            .collect()
    }

    /// Width in characters of the longest displayed value in a column.
    pub fn column_text_width(&self, col: u32) -> usize {
        self.cells
            .iter()
            .filter(|((_, c), _)| *c == col)
            .map(|(_, value)| value.display_value().chars().count())
            .max()
            .unwrap_or(0)
    }
}
