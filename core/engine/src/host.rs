//! FILENAME: core/engine/src/host.rs
//! PURPOSE: The contracts a grid host offers to code that renders into it.
//! CONTEXT: A host owns sheets of cells (`GridSurface`), embedded selection
//! controls (`ControlHost`) and its own process-level lifecycle
//! (`SessionHost`). Property names passed to a host are in the host's native
//! capitalized convention ("List", "Value", "FontBold").

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::cell::CellValue;
use crate::coord::CoordError;

/// Handle to a sheet inside a host.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SheetId(pub usize);

/// Handle to a control hosted on a sheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ControlId(pub usize);

/// Kinds of selection control a host can embed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ControlKind {
    /// Scrollable single-selection list, one visible row per entry.
    ListBox,
}

impl ControlKind {
    /// Host programmatic identifier of the control class.
    pub fn prog_id(&self) -> &'static str {
        match self {
            ControlKind::ListBox => "Forms.ListBox.1",
        }
    }
}

/// Position and size of a control in grid units: rows for height, the host's
/// column-width unit for width.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ControlGeometry {
    pub top_row: u32,
    pub left_col: u32,
    pub height_rows: u32,
    pub width: f64,
}

/// A value assigned to a control property.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum PropertyValue {
    Text(String),
    List(Vec<String>),
    Bool(bool),
    Number(f64),
}

impl PropertyValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            PropertyValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            PropertyValue::List(items) => Some(items),
            _ => None,
        }
    }
}

/// Callback fired by the host when a control's value changes through user
/// interaction. It carries no payload: listeners read the live value back.
pub type ChangeHook = Box<dyn FnMut()>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HostError {
    #[error("Sheet not found: {0:?}")]
    SheetNotFound(SheetId),

    #[error("Control not found: {0:?}")]
    ControlNotFound(ControlId),

    #[error("Invalid address: {0}")]
    Address(#[from] CoordError),

    #[error("Range {address} expects {expected:?} values, got {actual:?}")]
    ShapeMismatch {
        address: String,
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Value {value:?} is not in the list of control {control:?}")]
    ValueNotInList { control: ControlId, value: String },

    #[error("Unknown control property: {0}")]
    UnknownProperty(String),

    #[error("Property {property} expects a {expected} value")]
    PropertyType { property: String, expected: &'static str },

    #[error("Row {row} is beyond the last addressable row {max_rows}")]
    RowOutOfRange { row: u32, max_rows: u32 },

    #[error("Host rejected the write: {0}")]
    WriteRejected(String),

    #[error("Host has been closed")]
    Closed,
}

/// Addressable cells, organised in named sheets. Rows and columns are 1-based.
pub trait GridSurface {
    fn get_or_create_sheet(&mut self, name: &str) -> Result<SheetId, HostError>;

    /// Writes a whole rectangle in one call. A failing write must leave every
    /// cell of the sheet untouched.
    fn write_range(
        &mut self,
        sheet: SheetId,
        address: &str,
        values: &[Vec<CellValue>],
    ) -> Result<(), HostError>;

    fn read_cell(&self, sheet: SheetId, row: u32, col: u32) -> Result<CellValue, HostError>;

    fn autofit_column(&mut self, sheet: SheetId, col: u32) -> Result<(), HostError>;

    fn column_width(&self, sheet: SheetId, col: u32) -> Result<f64, HostError>;

    fn clear_cell(&mut self, sheet: SheetId, row: u32, col: u32) -> Result<(), HostError>;

    /// Number of addressable rows per sheet.
    fn max_rows(&self) -> u32;
}

/// Embedded selection controls.
pub trait ControlHost {
    /// Creates a control. Never fires change hooks.
    fn create_control(
        &mut self,
        sheet: SheetId,
        kind: ControlKind,
        geometry: &ControlGeometry,
    ) -> Result<ControlId, HostError>;

    fn delete_control(&mut self, control: ControlId) -> Result<(), HostError>;

    fn set_property(
        &mut self,
        control: ControlId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError>;

    fn get_property(&self, control: ControlId, name: &str) -> Result<PropertyValue, HostError>;

    /// Registers a hook fired whenever the user changes the control's value.
    fn subscribe(&mut self, control: ControlId, hook: ChangeHook) -> Result<(), HostError>;
}

/// Process-level state of an opened host.
pub trait SessionHost {
    fn set_display_alerts(&mut self, enabled: bool);

    /// Closes whatever the session opened and restores host flags.
    fn release(&mut self) -> Result<(), HostError>;
}

// Borrowed hosts are hosts too, so callers can keep ownership.

impl<T: GridSurface + ?Sized> GridSurface for &mut T {
    fn get_or_create_sheet(&mut self, name: &str) -> Result<SheetId, HostError> {
        (**self).get_or_create_sheet(name)
    }

    fn write_range(
        &mut self,
        sheet: SheetId,
        address: &str,
        values: &[Vec<CellValue>],
    ) -> Result<(), HostError> {
        (**self).write_range(sheet, address, values)
    }

    fn read_cell(&self, sheet: SheetId, row: u32, col: u32) -> Result<CellValue, HostError> {
        (**self).read_cell(sheet, row, col)
    }

    fn autofit_column(&mut self, sheet: SheetId, col: u32) -> Result<(), HostError> {
        (**self).autofit_column(sheet, col)
    }

    fn column_width(&self, sheet: SheetId, col: u32) -> Result<f64, HostError> {
        (**self).column_width(sheet, col)
    }

    fn clear_cell(&mut self, sheet: SheetId, row: u32, col: u32) -> Result<(), HostError> {
        (**self).clear_cell(sheet, row, col)
    }

    fn max_rows(&self) -> u32 {
        (**self).max_rows()
    }
}

impl<T: ControlHost + ?Sized> ControlHost for &mut T {
    fn create_control(
        &mut self,
        sheet: SheetId,
        kind: ControlKind,
        geometry: &ControlGeometry,
    ) -> Result<ControlId, HostError> {
        (**self).create_control(sheet, kind, geometry)
    }

    fn delete_control(&mut self, control: ControlId) -> Result<(), HostError> {
        (**self).delete_control(control)
    }

    fn set_property(
        &mut self,
        control: ControlId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        (**self).set_property(control, name, value)
    }

    fn get_property(&self, control: ControlId, name: &str) -> Result<PropertyValue, HostError> {
        (**self).get_property(control, name)
    }

    fn subscribe(&mut self, control: ControlId, hook: ChangeHook) -> Result<(), HostError> {
        (**self).subscribe(control, hook)
    }
}

impl<T: SessionHost + ?Sized> SessionHost for &mut T {
    fn set_display_alerts(&mut self, enabled: bool) {
        (**self).set_display_alerts(enabled)
    }

    fn release(&mut self) -> Result<(), HostError> {
        (**self).release()
    }
}
