//! FILENAME: core/exhibit-engine/src/error.rs

use engine::{CoordError, HostError};
use thiserror::Error;
use triangle::TriangleError;

#[derive(Error, Debug)]
pub enum ExhibitError {
    #[error("Filter dimension {dimension} has no selectable values")]
    EmptyDomain { dimension: String },

    #[error("Filter dimension {0} is defined twice")]
    DuplicateDimension(String),

    #[error("Selection {label:?} for {dimension} does not resolve against the dataset")]
    SelectionNotFound { dimension: String, label: String },

    #[error("No selection for dataset axis {0}")]
    MissingSelection(String),

    #[error("Controls need {required_rows} rows but the surface only has {max_rows}")]
    LayoutOverflow { required_rows: u64, max_rows: u32 },

    #[error("Host operation failed: {0}")]
    HostWrite(#[from] HostError),

    #[error("Exhibit is already bound to sheet {0}")]
    AlreadyBound(String),

    #[error("Invalid address: {0}")]
    Coord(#[from] CoordError),

    #[error("Dataset error: {0}")]
    Dataset(#[from] TriangleError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Config parse error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ExhibitError {
    /// Errors raised while building that must abort the exhibit.
    pub fn is_build_fatal(&self) -> bool {
        matches!(
            self,
            ExhibitError::EmptyDomain { .. }
                | ExhibitError::DuplicateDimension(_)
                | ExhibitError::LayoutOverflow { .. }
                | ExhibitError::AlreadyBound(_)
                | ExhibitError::Config(_)
        )
    }
}
