//! FILENAME: tests/common/mod.rs
//! Test harness and fixtures for exhibit integration tests.

#![allow(dead_code)]

use engine::{
    parse_range, CellValue, ChangeHook, ControlGeometry, ControlHost, ControlId, ControlKind,
    GridSurface, HostError, PropertyValue, SheetId, Workbook,
};
use exhibit_engine::{ExhibitConfig, LossDevelopmentExhibit};
use triangle::{Triangle, TriangleBuilder};

// ============================================================================
// RECORDING HOST
// ============================================================================

/// A workbook that counts host calls and can be told to reject block writes.
pub struct RecordingHost {
    pub workbook: Workbook,
    pub create_calls: usize,
    pub write_calls: usize,
    /// Reject writes to multi-cell ranges. Single-cell writes still succeed.
    pub reject_block_writes: bool,
    /// Fire this control's change hooks after every successful write, as a
    /// host that raises events from inside a write would.
    pub notify_on_write: Option<ControlId>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::wrap(Workbook::new())
    }

    pub fn wrap(workbook: Workbook) -> Self {
        RecordingHost {
            workbook,
            create_calls: 0,
            write_calls: 0,
            reject_block_writes: false,
            notify_on_write: None,
        }
    }

    /// Simulates the user picking `label` in a control.
    pub fn select(&mut self, control: ControlId, label: &str) -> Result<(), HostError> {
        self.workbook.select(control, label)
    }

    /// Reads back a whole range of a sheet.
    pub fn region(&self, sheet_name: &str, address: &str) -> Vec<Vec<CellValue>> {
        let sheet = self.workbook.sheet_by_name(sheet_name).expect("sheet exists");
        let range = parse_range(address).expect("valid address");
        sheet.grid.read_block(&range)
    }
}

impl GridSurface for RecordingHost {
    fn get_or_create_sheet(&mut self, name: &str) -> Result<SheetId, HostError> {
        self.workbook.get_or_create_sheet(name)
    }

    fn write_range(
        &mut self,
        sheet: SheetId,
        address: &str,
        values: &[Vec<CellValue>],
    ) -> Result<(), HostError> {
        self.write_calls += 1;
        if self.reject_block_writes && address.contains(':') {
            return Err(HostError::WriteRejected(address.to_string()));
        }
        self.workbook.write_range(sheet, address, values)?;
        if let Some(control) = self.notify_on_write {
            self.workbook.notify(control)?;
        }
        Ok(())
    }

    fn read_cell(&self, sheet: SheetId, row: u32, col: u32) -> Result<CellValue, HostError> {
        self.workbook.read_cell(sheet, row, col)
    }

    fn autofit_column(&mut self, sheet: SheetId, col: u32) -> Result<(), HostError> {
        self.workbook.autofit_column(sheet, col)
    }

    fn column_width(&self, sheet: SheetId, col: u32) -> Result<f64, HostError> {
        self.workbook.column_width(sheet, col)
    }

    fn clear_cell(&mut self, sheet: SheetId, row: u32, col: u32) -> Result<(), HostError> {
        self.workbook.clear_cell(sheet, row, col)
    }

    fn max_rows(&self) -> u32 {
        self.workbook.max_rows()
    }
}

impl ControlHost for RecordingHost {
    fn create_control(
        &mut self,
        sheet: SheetId,
        kind: ControlKind,
        geometry: &ControlGeometry,
    ) -> Result<ControlId, HostError> {
        self.create_calls += 1;
        self.workbook.create_control(sheet, kind, geometry)
    }

    fn delete_control(&mut self, control: ControlId) -> Result<(), HostError> {
        self.workbook.delete_control(control)
    }

    fn set_property(
        &mut self,
        control: ControlId,
        name: &str,
        value: PropertyValue,
    ) -> Result<(), HostError> {
        self.workbook.set_property(control, name, value)
    }

    fn get_property(&self, control: ControlId, name: &str) -> Result<PropertyValue, HostError> {
        self.workbook.get_property(control, name)
    }

    fn subscribe(&mut self, control: ControlId, hook: ChangeHook) -> Result<(), HostError> {
        self.workbook.subscribe(control, hook)
    }
}

// ============================================================================
// FIXTURES
// ============================================================================

pub const AUTO_REPORTED_2020_24: f64 = 150.0;
pub const PROPERTY_PAID_2019_12: f64 = 7.0;

/// Line x Type with measures Paid and Reported over 2019-2020 x 12-24.
/// Auto/Paid/Paid has no observation at (2020, 24); Auto/Paid/Reported and
/// Property/Paid/Paid do.
pub fn scenario_dataset() -> Triangle {
    let mut builder = TriangleBuilder::new(["Line", "Type"])
        .measures(["Paid", "Reported"])
        .origins(["2019", "2020"])
        .developments(["12", "24"])
        .cumulative(true);

    let rows: [(&str, &str, &str, &str, &str, f64); 14] = [
        ("Auto", "Paid", "Paid", "2019", "12", 100.0),
        ("Auto", "Paid", "Paid", "2019", "24", 180.0),
        ("Auto", "Paid", "Paid", "2020", "12", 110.0),
        ("Auto", "Paid", "Reported", "2019", "12", 120.0),
        ("Auto", "Paid", "Reported", "2019", "24", 200.0),
        ("Auto", "Paid", "Reported", "2020", "12", 130.0),
        ("Auto", "Paid", "Reported", "2020", "24", AUTO_REPORTED_2020_24),
        ("Property", "Paid", "Paid", "2019", "12", PROPERTY_PAID_2019_12),
        ("Property", "Paid", "Paid", "2019", "24", 9.0),
        ("Property", "Paid", "Paid", "2020", "12", 8.0),
        ("Property", "Paid", "Paid", "2020", "24", 10.0),
        ("Property", "Paid", "Reported", "2019", "12", 11.0),
        ("Auto", "Incurred", "Paid", "2019", "12", 300.0),
        ("Property", "Incurred", "Paid", "2019", "12", 30.0),
    ];
    for (line, kind, measure, origin, dev, value) in rows {
        builder.record(&[line, kind], measure, origin, dev, value).expect("fixture record");
    }
    builder.build().expect("fixture triangle")
}

pub fn loaded_exhibit() -> LossDevelopmentExhibit<Triangle, RecordingHost> {
    let mut exhibit = LossDevelopmentExhibit::new(
        scenario_dataset(),
        RecordingHost::new(),
        ExhibitConfig::default(),
    );
    exhibit.load().expect("exhibit loads");
    exhibit
}
