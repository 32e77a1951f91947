//! FILENAME: core/engine/src/lib.rs
//! PURPOSE: Main library entry point for the grid host engine.
//! CONTEXT: Re-exports public types and modules for use by other crates.

pub mod cell;
pub mod coord;
pub mod grid;
pub mod host;
pub mod workbook;

// Re-export commonly used types at the crate root
pub use cell::{CellError, CellValue};
pub use coord::{
    cell_address, column_label, column_number, parse_cell, parse_range, rect_address,
    rect_address_at, CellCoord, CoordError, RangeRef,
};
pub use grid::Grid;
pub use host::{
    ChangeHook, ControlGeometry, ControlHost, ControlId, ControlKind, GridSurface, HostError,
    PropertyValue, SessionHost, SheetId,
};
pub use workbook::{Sheet, Workbook};
