//! FILENAME: core/engine/src/cell.rs
//! PURPOSE: Defines the value held by a single grid cell.
//! CONTEXT: Values written by an exhibit are numbers, labels or the
//! "not available" marker for cells that have no observation. The marker is
//! an error value, never an empty cell or zero, so it survives a round trip
//! through the grid.

use serde::{Deserialize, Serialize};

/// Represents the errors a cell can hold (e.g., #N/A)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellError {
    NotAvailable, // No observation for this position
    Value,        // Wrong type of value
    Ref,          // Invalid reference
}

impl CellError {
    pub fn code(&self) -> &'static str {
        match self {
            CellError::NotAvailable => "#N/A",
            CellError::Value => "#VALUE!",
            CellError::Ref => "#REF!",
        }
    }
}

/// The content of one cell.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub enum CellValue {
    #[default]
    Empty,
    Number(f64),
    Text(String),
    Boolean(bool),
    Error(CellError),
}

impl CellValue {
    pub fn text(s: impl Into<String>) -> Self {
        CellValue::Text(s.into())
    }

    /// The marker written where a dataset has no observation.
    pub fn not_available() -> Self {
        CellValue::Error(CellError::NotAvailable)
    }

    /// Numeric-looking labels become numbers, everything else text.
    /// Development periods such as "12" or "24" are stored this way.
    pub fn from_label(label: &str) -> Self {
        match label.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => CellValue::Number(n),
            _ => CellValue::Text(label.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, CellValue::Empty)
    }

    pub fn is_not_available(&self) -> bool {
        matches!(self, CellValue::Error(CellError::NotAvailable))
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            CellValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Returns the display value of the cell as a String.
    pub fn display_value(&self) -> String {
        match self {
            CellValue::Empty => String::new(),
            CellValue::Number(n) => {
                // Format without unnecessary decimal places
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{:.0}", n)
                } else {
                    format!("{}", n)
                }
            }
            CellValue::Text(s) => s.clone(),
            CellValue::Boolean(b) => if *b { "TRUE" } else { "FALSE" }.to_string(),
            CellValue::Error(e) => e.code().to_string(),
        }
    }
}

impl From<f64> for CellValue {
    fn from(value: f64) -> Self {
        CellValue::Number(value)
    }
}

/// `None` maps to the not-available marker, not to an empty cell.
impl From<Option<f64>> for CellValue {
    fn from(value: Option<f64>) -> Self {
        match value {
            Some(n) => CellValue::Number(n),
            None => CellValue::not_available(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(value: &str) -> Self {
        CellValue::Text(value.to_string())
    }
}
