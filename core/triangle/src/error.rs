//! FILENAME: core/triangle/src/error.rs

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TriangleError {
    #[error("Shape {shape:?} needs {expected} values, got {actual}")]
    ShapeMismatch {
        shape: [usize; 4],
        expected: usize,
        actual: usize,
    },

    #[error("Index key has {actual} labels, expected {expected}")]
    KeyLength { expected: usize, actual: usize },

    #[error("Duplicate index row: {0:?}")]
    DuplicateRow(Vec<String>),

    #[error("Duplicate label {label:?} on axis {axis}")]
    DuplicateLabel { axis: String, label: String },

    #[error("Unknown axis: {0}")]
    UnknownAxis(String),

    #[error("Label {label:?} not found on axis {axis}")]
    UnknownLabel { axis: String, label: String },

    #[error("Unknown measure: {0}")]
    UnknownMeasure(String),

    #[error("Unknown origin period: {0}")]
    UnknownOrigin(String),

    #[error("Unknown development period: {0}")]
    UnknownDevelopment(String),
}
