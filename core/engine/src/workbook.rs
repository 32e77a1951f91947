//! FILENAME: core/engine/src/workbook.rs
//! PURPOSE: In-memory host implementing every host contract.
//! CONTEXT: A `Workbook` holds named sheets and the controls placed on them.
//! It behaves like a desktop spreadsheet host as far as the contracts go:
//! list controls reject values outside their list, change hooks only fire
//! on user interaction (`select`), and range writes are all-or-nothing.

use std::collections::BTreeMap;
use std::fmt;

use rustc_hash::FxHashMap;

use crate::cell::CellValue;
use crate::coord::parse_range;
use crate::grid::Grid;
use crate::host::{
    ChangeHook, ControlGeometry, ControlHost, ControlId, ControlKind, GridSurface, HostError,
    PropertyValue, SessionHost, SheetId,
};

/// Rows per sheet, as in current desktop spreadsheets.
pub const DEFAULT_MAX_ROWS: u32 = 1_048_576;

/// Column width in characters before anything is autofitted.
pub const DEFAULT_COLUMN_WIDTH: f64 = 8.43;

/// Properties a list control understands.
pub const PROP_LIST: &str = "List";
pub const PROP_VALUE: &str = "Value";
pub const PROP_NAME: &str = "Name";
pub const PROP_FONT_BOLD: &str = "FontBold";

const KNOWN_PROPERTIES: [&str; 4] = [PROP_LIST, PROP_VALUE, PROP_NAME, PROP_FONT_BOLD];

// ============================================================================
// SHEET
// ============================================================================

/// A single worksheet.
#[derive(Debug, Clone)]
pub struct Sheet {
    pub name: String,
    pub grid: Grid,
    pub column_widths: FxHashMap<u32, f64>,
}

impl Sheet {
    pub fn new(name: impl Into<String>) -> Self {
        Sheet {
            name: name.into(),
            grid: Grid::new(),
            column_widths: FxHashMap::default(),
        }
    }

    pub fn column_width(&self, col: u32) -> f64 {
        self.column_widths.get(&col).copied().unwrap_or(DEFAULT_COLUMN_WIDTH)
    }
}

// ============================================================================
// CONTROLS
// ============================================================================

/// A control placed on a sheet.
pub struct ControlRecord {
    pub sheet: SheetId,
    pub kind: ControlKind,
    pub geometry: ControlGeometry,
    pub properties: BTreeMap<String, PropertyValue>,
    hooks: Vec<ChangeHook>,
}

impl ControlRecord {
    pub fn list(&self) -> &[String] {
        self.properties
            .get(PROP_LIST)
            .and_then(PropertyValue::as_list)
            .unwrap_or(&[])
    }

    pub fn value(&self) -> Option<&str> {
        self.properties.get(PROP_VALUE).and_then(PropertyValue::as_text)
    }

    pub fn name(&self) -> Option<&str> {
        self.properties.get(PROP_NAME).and_then(PropertyValue::as_text)
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }
}

impl fmt::Debug for ControlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ControlRecord")
            .field("sheet", &self.sheet)
            .field("kind", &self.kind)
            .field("geometry", &self.geometry)
            .field("properties", &self.properties)
            .field("hooks", &self.hooks.len())
            .finish()
    }
}

// ============================================================================
// WORKBOOK
// ============================================================================

/// An open workbook: sheets plus embedded controls.
#[derive(Debug)]
pub struct Workbook {
    sheets: Vec<Sheet>,
    controls: Vec<Option<ControlRecord>>,
    max_rows: u32,
    display_alerts: bool,
    closed: bool,
}

impl Workbook {
    pub fn new() -> Self {
        Self::with_max_rows(DEFAULT_MAX_ROWS)
    }

    /// A workbook whose sheets only address `max_rows` rows.
    pub fn with_max_rows(max_rows: u32) -> Self {
        Workbook {
            sheets: vec![Sheet::new("Sheet1")],
            controls: Vec::new(),
            max_rows,
            display_alerts: true,
            closed: false,
        }
    }

    pub fn sheet_names(&self) -> Vec<&str> {
        self.sheets.iter().map(|s| s.name.as_str()).collect()
    }

    pub fn sheet_by_name(&self, name: &str) -> Option<&Sheet> {
        self.sheets.iter().find(|s| s.name == name)
    }

    pub fn sheet(&self, id: SheetId) -> Result<&Sheet, HostError> {
        self.ensure_open()?;
        self.sheets.get(id.0).ok_or(HostError::SheetNotFound(id))
    }

    fn sheet_mut(&mut self, id: SheetId) -> Result<&mut Sheet, HostError> {
        self.ensure_open()?;
        self.sheets.get_mut(id.0).ok_or(HostError::SheetNotFound(id))
    }

    pub fn control(&self, id: ControlId) -> Result<&ControlRecord, HostError> {
        self.controls
            .get(id.0)
            .and_then(Option::as_ref)
            .ok_or(HostError::ControlNotFound(id))
    }

    fn control_mut(&mut self, id: ControlId) -> Result<&mut ControlRecord, HostError> {
        self.controls
            .get_mut(id.0)
            .and_then(Option::as_mut)
            .ok_or(HostError::ControlNotFound(id))
    }

    /// Live controls on a sheet, in creation order.
    pub fn controls_on(&self, sheet: SheetId) -> Vec<(ControlId, &ControlRecord)> {
        self.controls
            .iter()
            .enumerate()
            .filter_map(|(i, c)| c.as_ref().map(|c| (ControlId(i), c)))
            .filter(|(_, c)| c.sheet == sheet)
            .collect()
    }

    /// Finds a control by its "Name" property.
    pub fn control_named(&self, name: &str) -> Option<ControlId> {
        self.controls
            .iter()
            .enumerate()
            .find(|(_, c)| c.as_ref().and_then(ControlRecord::name) == Some(name))
            .map(|(i, _)| ControlId(i))
    }

    pub fn display_alerts(&self) -> bool {
        self.display_alerts
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Simulates a user picking `value` in a list control: the value is set
    /// and every change hook of the control fires.
    pub fn select(&mut self, control: ControlId, value: &str) -> Result<(), HostError> {
        self.set_property(control, PROP_VALUE, PropertyValue::Text(value.to_string()))?;
        self.notify(control)
    }

    /// Fires the change hooks of a control without changing its value.
    pub fn notify(&mut self, control: ControlId) -> Result<(), HostError> {
        self.ensure_open()?;
        // Hooks run with the record's hook list detached, so a hook that
        // subscribes again does not alias the list being iterated.
        let mut hooks = std::mem::take(&mut self.control_mut(control)?.hooks);
        for hook in hooks.iter_mut() {
            hook();
        }
        let record = self.control_mut(control)?;
        hooks.append(&mut record.hooks);
        record.hooks = hooks;
        Ok(())
    }

    fn ensure_open(&self) -> Result<(), HostError> {
        if self.closed {
            Err(HostError::Closed)
        } else {
            Ok(())
        }
    }
}

impl Default for Workbook {
    fn default() -> Self {
        Self::new()
    }
}

impl GridSurface for Workbook {
    fn get_or_create_sheet(&mut self, name: &str) -> Result<SheetId, HostError> {
        self.ensure_open()?;
        if let Some(idx) = self.sheets.iter().position(|s| s.name == name) {
            return Ok(SheetId(idx));
        }
        self.sheets.push(Sheet::new(name));
        Ok(SheetId(self.sheets.len() - 1))
    }

    fn write_range(
        &mut self,
        sheet: SheetId,
        address: &str,
        values: &[Vec<CellValue>],
    ) -> Result<(), HostError> {
        let range = parse_range(address)?;
        if range.last_row > self.max_rows {
            return Err(HostError::RowOutOfRange { row: range.last_row, max_rows: self.max_rows });
        }
        self.sheet_mut(sheet)?.grid.write_block(&range, values)
    }

    fn read_cell(&self, sheet: SheetId, row: u32, col: u32) -> Result<CellValue, HostError> {
        Ok(self.sheet(sheet)?.grid.value_at(row, col))
    }

    fn autofit_column(&mut self, sheet: SheetId, col: u32) -> Result<(), HostError> {
        let sheet = self.sheet_mut(sheet)?;
        let chars = sheet.grid.column_text_width(col);
        if chars == 0 {
            sheet.column_widths.remove(&col);
        } else {
            // One character unit per glyph plus a little padding.
            sheet.column_widths.insert(col, chars as f64 + 0.71);
        }
        Ok(())
    }

    fn column_width(&self, sheet: SheetId, col: u32) -> Result<f64, HostError> {
        Ok(self.sheet(sheet)?.column_width(col))
    }

    fn clear_cell(&mut self, sheet: SheetId, row: u32, col: u32) -> Result<(), HostError> {
        self.sheet_mut(sheet)?.grid.clear_cell(row, col);
        Ok(())
    }

    fn max_rows(&self) -> u32 {
        self.max_rows
    }
}

impl ControlHost for Workbook {
    fn create_control(
        &mut self,
        sheet: SheetId,
        kind: ControlKind,
        geometry: &ControlGeometry,
    ) -> Result<ControlId, HostError> {
        self.sheet(sheet)?;
        let bottom = geometry.top_row.saturating_add(geometry.height_rows.saturating_sub(1));
        if geometry.top_row == 0 || bottom > self.max_rows {
            return Err(HostError::RowOutOfRange { row: bottom, max_rows: self.max_rows });
        }
        self.controls.push(Some(ControlRecord {
            sheet,
            kind,
            geometry: *geometry,
            properties: BTreeMap::new(),
            hooks: Vec::new(),
        }));
        Ok(ControlId(self.controls.len() - 1))
    }

    fn delete_control(&mut self, control: ControlId) -> Result<(), HostError> {
        self.ensure_open()?;
        self.control(control)?;
        self.controls[control.0] = None;
        Ok(())
    }

    fn set_property(
        &mut self,
        control: ControlId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        self.ensure_open()?;
        if !KNOWN_PROPERTIES.contains(&name) {
            return Err(HostError::UnknownProperty(name.to_string()));
        }
        let record = self.control_mut(control)?;
        match (name, &value) {
            (PROP_LIST, PropertyValue::List(_)) => {}
            (PROP_LIST, _) => {
                return Err(HostError::PropertyType { property: name.to_string(), expected: "list" })
            }
            (PROP_VALUE, PropertyValue::Text(v)) => {
                if !record.list().iter().any(|item| item == v) {
                    return Err(HostError::ValueNotInList { control, value: v.clone() });
                }
            }
            (PROP_NAME, PropertyValue::Text(_)) => {}
            (PROP_VALUE | PROP_NAME, _) => {
                return Err(HostError::PropertyType { property: name.to_string(), expected: "text" })
            }
            (PROP_FONT_BOLD, PropertyValue::Bool(_)) => {}
            (_, _) => {
                return Err(HostError::PropertyType { property: name.to_string(), expected: "bool" })
            }
        }
        record.properties.insert(name.to_string(), value);
        Ok(())
    }

    fn get_property(&self, control: ControlId, name: &str) -> Result<PropertyValue, HostError> {
        self.ensure_open()?;
        if !KNOWN_PROPERTIES.contains(&name) {
            return Err(HostError::UnknownProperty(name.to_string()));
        }
        self.control(control)?
            .properties
            .get(name)
            .cloned()
            .ok_or_else(|| HostError::UnknownProperty(name.to_string()))
    }

    fn subscribe(&mut self, control: ControlId, hook: ChangeHook) -> Result<(), HostError> {
        self.ensure_open()?;
        self.control_mut(control)?.hooks.push(hook);
        Ok(())
    }
}

impl SessionHost for Workbook {
    fn set_display_alerts(&mut self, enabled: bool) {
        self.display_alerts = enabled;
    }

    fn release(&mut self) -> Result<(), HostError> {
        if self.closed {
            return Ok(());
        }
        self.controls.clear();
        self.closed = true;
        self.display_alerts = true;
        Ok(())
    }
}
