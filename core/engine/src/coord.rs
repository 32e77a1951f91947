//! FILENAME: core/engine/src/coord.rs
//! PURPOSE: Conversions between A1-style addresses and numeric grid positions.
//! CONTEXT: Hosts address cells with 1-based rows and alphabetic column labels.
//! Column labels use bijective base-26: "A" = 1, ..., "Z" = 26, "AA" = 27,
//! "AZ" = 52, "BA" = 53, ..., "ZZ" = 702, "AAA" = 703.
//! Every function in this module is pure.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// A grid position as (row, col), both 1-based.
pub type CellCoord = (u32, u32);

/// Errors raised while building or decoding grid addresses.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("Column label is empty")]
    EmptyColumn,

    #[error("Invalid column label: {0}")]
    InvalidColumn(String),

    #[error("Address out of range: {0}")]
    Overflow(String),

    #[error("A range must span at least one row and one column (got {rows}x{cols})")]
    EmptyShape { rows: u32, cols: u32 },

    #[error("Rows and columns are 1-based, got row {row} col {col}")]
    ZeroIndex { row: u32, col: u32 },

    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

/// Converts a column label (e.g. "A", "AA", "xfd") to its 1-based number.
/// Lowercase letters are accepted.
pub fn column_number(label: &str) -> Result<u32, CoordError> {
    if label.is_empty() {
        return Err(CoordError::EmptyColumn);
    }
    let mut result: u32 = 0;
    for c in label.chars() {
        if !c.is_ascii_alphabetic() {
            return Err(CoordError::InvalidColumn(label.to_string()));
        }
        let digit = (c.to_ascii_uppercase() as u32) - ('A' as u32) + 1;
        result = result
            .checked_mul(26)
            .and_then(|r| r.checked_add(digit))
            .ok_or_else(|| CoordError::Overflow(label.to_string()))?;
    }
    Ok(result)
}

/// Converts a 1-based column number to its label.
/// 1 -> "A", 26 -> "Z", 27 -> "AA", 703 -> "AAA". Column 0 has no label and
/// yields an empty string.
pub fn column_label(mut col: u32) -> String {
    let mut letters = Vec::new();
    while col > 0 {
        let remainder = (col - 1) % 26;
        letters.push((b'A' + remainder as u8) as char);
        col = (col - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// Formats a single cell address, e.g. (5, 1) -> "A5".
pub fn cell_address(row: u32, col: u32) -> String {
    format!("{}{}", column_label(col), row)
}

/// Splits "AB12" into ("AB", 12).
pub fn parse_cell(address: &str) -> Result<CellCoord, CoordError> {
    let address = address.trim();
    let split = address
        .find(|c: char| c.is_ascii_digit())
        .ok_or_else(|| CoordError::InvalidAddress(address.to_string()))?;
    let (letters, digits) = address.split_at(split);
    let col = column_number(letters)
        .map_err(|_| CoordError::InvalidAddress(address.to_string()))?;
    let row: u32 = digits
        .parse()
        .map_err(|_| CoordError::InvalidAddress(address.to_string()))?;
    if row == 0 {
        return Err(CoordError::ZeroIndex { row, col });
    }
    Ok((row, col))
}

// ============================================================================
// RECTANGULAR RANGES
// ============================================================================

/// An inclusive rectangle of cells, all bounds 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct RangeRef {
    pub first_row: u32,
    pub first_col: u32,
    pub last_row: u32,
    pub last_col: u32,
}

impl RangeRef {
    /// Builds the rectangle spanning `num_rows` x `num_cols` from the given origin.
    pub fn from_shape(
        num_rows: u32,
        num_cols: u32,
        first_row: u32,
        first_col: u32,
    ) -> Result<Self, CoordError> {
        if num_rows == 0 || num_cols == 0 {
            return Err(CoordError::EmptyShape { rows: num_rows, cols: num_cols });
        }
        if first_row == 0 || first_col == 0 {
            return Err(CoordError::ZeroIndex { row: first_row, col: first_col });
        }
        let overflow = || {
            CoordError::Overflow(format!(
                "{}x{} at row {} col {}",
                num_rows, num_cols, first_row, first_col
            ))
        };
        let last_row = first_row.checked_add(num_rows - 1).ok_or_else(overflow)?;
        let last_col = first_col.checked_add(num_cols - 1).ok_or_else(overflow)?;
        Ok(RangeRef { first_row, first_col, last_row, last_col })
    }

    pub fn rows(&self) -> u32 {
        self.last_row - self.first_row + 1
    }

    pub fn cols(&self) -> u32 {
        self.last_col - self.first_col + 1
    }

    pub fn contains(&self, row: u32, col: u32) -> bool {
        (self.first_row..=self.last_row).contains(&row)
            && (self.first_col..=self.last_col).contains(&col)
    }
}

impl fmt::Display for RangeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            cell_address(self.first_row, self.first_col),
            cell_address(self.last_row, self.last_col)
        )
    }
}

/// Returns the address of the `num_rows` x `num_cols` rectangle whose top-left
/// cell is `first_col` + `first_row`.
///
/// `rect_address(3, 2, 5, "A")` -> `"A5:B7"`.
pub fn rect_address(
    num_rows: u32,
    num_cols: u32,
    first_row: u32,
    first_col: &str,
) -> Result<String, CoordError> {
    let col = column_number(first_col)?;
    rect_address_at(num_rows, num_cols, first_row, col)
}

/// Same as [`rect_address`] with a numeric first column.
pub fn rect_address_at(
    num_rows: u32,
    num_cols: u32,
    first_row: u32,
    first_col: u32,
) -> Result<String, CoordError> {
    Ok(RangeRef::from_shape(num_rows, num_cols, first_row, first_col)?.to_string())
}

/// Parses "A5:B7" (or a single cell "C3") into a [`RangeRef`].
/// Corners may be given in any order; the result is normalized.
pub fn parse_range(address: &str) -> Result<RangeRef, CoordError> {
    let mut parts = address.split(':');
    let first = parts
        .next()
        .ok_or_else(|| CoordError::InvalidAddress(address.to_string()))?;
    let (r1, c1) = parse_cell(first)?;
    let (r2, c2) = match parts.next() {
        Some(second) => parse_cell(second)?,
        None => (r1, c1),
    };
    if parts.next().is_some() {
        return Err(CoordError::InvalidAddress(address.to_string()));
    }
    Ok(RangeRef {
        first_row: r1.min(r2),
        first_col: c1.min(c2),
        last_row: r1.max(r2),
        last_col: c1.max(c2),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_column_number() {
        assert_eq!(column_number("A").unwrap(), 1);
        assert_eq!(column_number("Z").unwrap(), 26);
        assert_eq!(column_number("AA").unwrap(), 27);
        assert_eq!(column_number("AZ").unwrap(), 52);
        assert_eq!(column_number("BA").unwrap(), 53);
        assert_eq!(column_number("ZZ").unwrap(), 702);
        assert_eq!(column_number("AAA").unwrap(), 703);
        assert_eq!(column_number("xfd").unwrap(), 16384);
    }

    #[test]
    fn test_column_number_rejects_garbage() {
        assert_eq!(column_number(""), Err(CoordError::EmptyColumn));
        assert!(matches!(column_number("A1"), Err(CoordError::InvalidColumn(_))));
        assert!(matches!(column_number("["), Err(CoordError::InvalidColumn(_))));
        assert!(matches!(column_number("ZZZZZZZZ"), Err(CoordError::Overflow(_))));
    }

    #[test]
    fn test_column_label() {
        assert_eq!(column_label(1), "A");
        assert_eq!(column_label(26), "Z");
        assert_eq!(column_label(27), "AA");
        assert_eq!(column_label(52), "AZ");
        assert_eq!(column_label(53), "BA");
        assert_eq!(column_label(702), "ZZ");
        assert_eq!(column_label(703), "AAA");
        assert_eq!(column_label(0), "");
    }

    #[test]
    fn test_roundtrip() {
        for i in 1..2000 {
            let label = column_label(i);
            assert_eq!(column_number(&label).unwrap(), i, "Roundtrip failed for {}", i);
        }
    }

    #[test]
    fn test_rect_address_basic() {
        assert_eq!(rect_address(3, 2, 5, "A").unwrap(), "A5:B7");
        assert_eq!(rect_address(1, 1, 1, "A").unwrap(), "A1:A1");
        assert_eq!(rect_address(4, 4, 2, "C").unwrap(), "C2:F5");
    }

    #[test]
    fn test_rect_address_carries_past_z() {
        assert_eq!(rect_address(1, 1, 1, "Z").unwrap(), "Z1:Z1");
        assert_eq!(rect_address(1, 2, 1, "Z").unwrap(), "Z1:AA1");
        assert_eq!(rect_address(2, 3, 10, "AY").unwrap(), "AY10:BA11");
        assert_eq!(rect_address(1, 2, 1, "ZZ").unwrap(), "ZZ1:AAA1");
    }

    #[test]
    fn test_rect_address_spans_exact_shape() {
        for rows in 1..12 {
            for cols in 1..40 {
                for first_col in ["A", "Y", "Z", "AZ"] {
                    let addr = rect_address(rows, cols, 7, first_col).unwrap();
                    let range = parse_range(&addr).unwrap();
                    assert_eq!(range.rows(), rows, "{}", addr);
                    assert_eq!(range.cols(), cols, "{}", addr);
                    assert_eq!(range.first_row, 7);
                    assert_eq!(range.first_col, column_number(first_col).unwrap());
                }
            }
        }
    }

    #[test]
    fn test_rect_address_rejects_empty_shape() {
        assert_eq!(
            rect_address(0, 2, 1, "A"),
            Err(CoordError::EmptyShape { rows: 0, cols: 2 })
        );
        assert!(matches!(rect_address(2, 2, 0, "A"), Err(CoordError::ZeroIndex { .. })));
    }

    #[test]
    fn test_parse_range() {
        let range = parse_range("B2:D9").unwrap();
        assert_eq!(range, RangeRef { first_row: 2, first_col: 2, last_row: 9, last_col: 4 });
        assert_eq!(parse_range("D9:B2").unwrap(), range);

        let single = parse_range("C3").unwrap();
        assert_eq!(single.rows(), 1);
        assert_eq!(single.cols(), 1);
        assert!(single.contains(3, 3));

        assert!(parse_range("A0:B2").is_err());
        assert!(parse_range("12").is_err());
        assert!(parse_range("A1:B2:C3").is_err());
    }

    #[test]
    fn test_cell_address() {
        assert_eq!(cell_address(1, 1), "A1");
        assert_eq!(cell_address(100, 27), "AA100");
        assert_eq!(parse_cell("AA100").unwrap(), (100, 27));
    }
}
