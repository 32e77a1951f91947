//! FILENAME: core/exhibit-engine/src/config.rs
//! PURPOSE: Exhibit configuration: target sheet, filter column, slice anchor.
//! CONTEXT: Every field has a default, so a partial JSON document is valid.

use std::path::Path;

use engine::column_number;
use serde::{Deserialize, Serialize};

use crate::error::ExhibitError;

pub const DEFAULT_SHEET_NAME: &str = "LossDevelopment";
pub const DEFAULT_MEASURE_DIMENSION: &str = "Amount";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExhibitConfig {
    /// Sheet the exhibit renders into; created when missing.
    pub sheet_name: String,

    /// Name of the synthetic filter dimension over the measure axis.
    pub measure_dimension: String,

    /// 1-based column holding the stacked filter controls.
    pub filter_column: u32,

    /// Rows left free above the first control.
    pub control_row_offset: u32,

    /// Minimum probe length, in characters, used to size the filter column.
    pub min_probe_chars: usize,

    /// Top-left cell of the rendered block (headers included).
    pub slice_anchor_row: u32,
    pub slice_anchor_col: String,
}

impl Default for ExhibitConfig {
    fn default() -> Self {
        ExhibitConfig {
            sheet_name: DEFAULT_SHEET_NAME.to_string(),
            measure_dimension: DEFAULT_MEASURE_DIMENSION.to_string(),
            filter_column: 1,
            control_row_offset: 0,
            min_probe_chars: 30,
            slice_anchor_row: 2,
            slice_anchor_col: "C".to_string(),
        }
    }
}

impl ExhibitConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ExhibitError> {
        let config: ExhibitConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ExhibitError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ExhibitError> {
        if self.sheet_name.trim().is_empty() {
            return Err(ExhibitError::Config("sheet_name is empty".into()));
        }
        if self.measure_dimension.trim().is_empty() {
            return Err(ExhibitError::Config("measure_dimension is empty".into()));
        }
        if self.filter_column == 0 {
            return Err(ExhibitError::Config("filter_column is 1-based".into()));
        }
        if self.slice_anchor_row == 0 {
            return Err(ExhibitError::Config("slice_anchor_row is 1-based".into()));
        }
        self.slice_anchor_col_number()?;
        Ok(())
    }

    pub fn slice_anchor_col_number(&self) -> Result<u32, ExhibitError> {
        column_number(&self.slice_anchor_col)
            .map_err(|e| ExhibitError::Config(format!("slice_anchor_col: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ExhibitConfig::default();
        assert_eq!(config.sheet_name, "LossDevelopment");
        assert_eq!(config.measure_dimension, "Amount");
        assert_eq!(config.slice_anchor_col_number().unwrap(), 3);
        config.validate().unwrap();
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let json = r#"{"sheet_name": "Triangles", "slice_anchor_col": "E"}"#;
        let config = ExhibitConfig::from_json_str(json).unwrap();
        assert_eq!(config.sheet_name, "Triangles");
        assert_eq!(config.slice_anchor_col_number().unwrap(), 5);
        assert_eq!(config.filter_column, 1);
        assert_eq!(config.min_probe_chars, 30);
    }

    #[test]
    fn test_invalid_values_are_rejected() {
        assert!(matches!(
            ExhibitConfig::from_json_str(r#"{"filter_column": 0}"#),
            Err(ExhibitError::Config(_))
        ));
        assert!(matches!(
            ExhibitConfig::from_json_str(r#"{"slice_anchor_col": "C3"}"#),
            Err(ExhibitError::Config(_))
        ));
        assert!(matches!(
            ExhibitConfig::from_json_str(r#"{"filter_column": "one"}"#),
            Err(ExhibitError::Json(_))
        ));
    }

    #[test]
    fn test_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"measure_dimension": "Measure", "control_row_offset": 2}}"#).unwrap();
        let config = ExhibitConfig::from_path(file.path()).unwrap();
        assert_eq!(config.measure_dimension, "Measure");
        assert_eq!(config.control_row_offset, 2);

        let missing = ExhibitConfig::from_path(file.path().with_extension("missing"));
        assert!(matches!(missing, Err(ExhibitError::Io(_))));
    }
}
