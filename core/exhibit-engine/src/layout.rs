//! FILENAME: core/exhibit-engine/src/layout.rs
//! PURPOSE: Places one list control per filter dimension in a single column.
//! CONTEXT: Controls are stacked top to bottom in registry order. Each one
//! is as tall as its domain (one row per label), and the next one starts on
//! the row right after it, so there are neither gaps nor overlaps.

use engine::{cell_address, CellValue, ControlGeometry, GridSurface, HostError, SheetId};
use serde::Serialize;

use crate::error::ExhibitError;
use crate::logging::log_debug;
use crate::registry::FilterDimension;

/// The reserved region of one filter control.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ControlPlacement {
    pub dimension: String,
    pub origin_row: u32,
    pub origin_col: u32,
    pub height: u32,
    pub width: f64,
}

impl ControlPlacement {
    /// First row after this control.
    pub fn end_row(&self) -> u32 {
        self.origin_row + self.height
    }

    pub fn geometry(&self) -> ControlGeometry {
        ControlGeometry {
            top_row: self.origin_row,
            left_col: self.origin_col,
            height_rows: self.height,
            width: self.width,
        }
    }
}

/// Stacks the controls of `dimensions` starting `row_offset` rows below the
/// top of `column`. Fails with `LayoutOverflow` if the last control would end
/// past `max_rows`.
pub fn plan_layout(
    dimensions: &[FilterDimension],
    row_offset: u32,
    column: u32,
    width: f64,
    max_rows: u32,
) -> Result<Vec<ControlPlacement>, ExhibitError> {
    let required_rows =
        u64::from(row_offset) + dimensions.iter().map(|d| u64::from(d.height())).sum::<u64>();
    if required_rows > u64::from(max_rows) {
        return Err(ExhibitError::LayoutOverflow { required_rows, max_rows });
    }

    let mut placements = Vec::with_capacity(dimensions.len());
    let mut next_row = row_offset + 1;
    for dim in dimensions {
        let placement = ControlPlacement {
            dimension: dim.name().to_string(),
            origin_row: next_row,
            origin_col: column,
            height: dim.height(),
            width,
        };
        log_debug!(
            "LAYOUT",
            "{} at row {} height {}",
            placement.dimension,
            placement.origin_row,
            placement.height
        );
        next_row = placement.end_row();
        placements.push(placement);
    }
    Ok(placements)
}

/// Measures the width a column needs so no label is clipped: a probe of
/// `max(min_chars, longest_label)` characters is written to the column's
/// first cell, the column is autofitted, and the cell is restored.
pub fn measure_control_width<S: GridSurface + ?Sized>(
    surface: &mut S,
    sheet: SheetId,
    column: u32,
    longest_label: usize,
    min_chars: usize,
) -> Result<f64, HostError> {
    let probe_cell = cell_address(1, column);
    let previous = surface.read_cell(sheet, 1, column)?;
    let probe = CellValue::text("x".repeat(min_chars.max(longest_label)));

    surface.write_range(sheet, &probe_cell, &[vec![probe]])?;
    surface.autofit_column(sheet, column)?;
    let width = surface.column_width(sheet, column);

    if previous.is_empty() {
        surface.clear_cell(sheet, 1, column)?;
    } else {
        surface.write_range(sheet, &probe_cell, &[vec![previous]])?;
    }
    width
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::DimensionKind;
    use engine::Workbook;

    fn dim(name: &str, size: usize) -> FilterDimension {
        let domain = (0..size).map(|i| format!("{}{}", name, i)).collect();
        FilterDimension::new(name, domain, DimensionKind::Measure).unwrap()
    }

    #[test]
    fn test_controls_stack_without_gaps() {
        let dims = vec![dim("Line", 2), dim("Type", 4), dim("Amount", 3)];
        let placements = plan_layout(&dims, 0, 1, 30.0, 100).unwrap();

        assert_eq!(placements.len(), 3);
        assert_eq!(placements[0].origin_row, 1);
        for (placement, dim) in placements.iter().zip(&dims) {
            assert_eq!(placement.height as usize, dim.domain().len());
            assert_eq!(placement.origin_col, 1);
        }
        for pair in placements.windows(2) {
            assert_eq!(pair[0].origin_row + pair[0].height, pair[1].origin_row);
            assert!(pair[0].origin_row < pair[1].origin_row);
        }
        assert_eq!(placements[2].end_row(), 10);
    }

    #[test]
    fn test_row_offset_shifts_every_control() {
        let dims = vec![dim("Line", 2), dim("Amount", 2)];
        let placements = plan_layout(&dims, 3, 2, 12.5, 100).unwrap();
        assert_eq!(placements[0].origin_row, 4);
        assert_eq!(placements[1].origin_row, 6);
        assert_eq!(placements[1].geometry().left_col, 2);
        assert_eq!(placements[1].geometry().width, 12.5);
    }

    #[test]
    fn test_overflow() {
        let dims = vec![dim("Line", 6), dim("Amount", 5)];
        assert!(plan_layout(&dims, 0, 1, 1.0, 11).is_ok());
        let err = plan_layout(&dims, 0, 1, 1.0, 10).unwrap_err();
        assert!(matches!(err, ExhibitError::LayoutOverflow { required_rows: 11, max_rows: 10 }));
    }

    #[test]
    fn test_measure_control_width_writes_sample_and_restores_cell() {
        let mut wb = Workbook::new();
        let sheet = wb.get_or_create_sheet("S").unwrap();

        let width = measure_control_width(&mut wb, sheet, 1, 8, 30).unwrap();
        assert!(width >= 30.0);
        assert!(wb.read_cell(sheet, 1, 1).unwrap().is_empty());

        wb.write_range(sheet, "A1", &[vec![CellValue::text("keep")]]).unwrap();
        let wide = measure_control_width(&mut wb, sheet, 1, 45, 30).unwrap();
        assert!(wide >= 45.0);
        assert_eq!(wb.read_cell(sheet, 1, 1).unwrap(), CellValue::text("keep"));
    }
}
