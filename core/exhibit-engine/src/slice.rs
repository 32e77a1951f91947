//! FILENAME: core/exhibit-engine/src/slice.rs
//! PURPOSE: Reduces the dataset to the origin x development matrix implied by
//! the current filter selection.
//! CONTEXT: The lookup key follows the dataset's own axis order, looking each
//! selection up by axis name. Registry order is not used: the registry
//! appends the measure dimension and may not mirror the dataset.

use engine::{CellValue, CoordError, RangeRef};
use smallvec::SmallVec;
use triangle::TriangleError;

use crate::dataset::Dataset;
use crate::error::ExhibitError;
use crate::registry::FilterRegistry;
use crate::selection::FilterSelection;

/// A rendered cross-section, ready to be written.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedSlice {
    pub measure: String,
    pub origins: Vec<String>,
    pub developments: Vec<String>,
    /// One row per origin. Missing observations are `#N/A`.
    pub values: Vec<Vec<CellValue>>,
}

impl RenderedSlice {
    /// (origins, developments)
    pub fn shape(&self) -> (usize, usize) {
        (self.origins.len(), self.developments.len())
    }

    /// The whole write, headers included: an empty corner, development labels
    /// across the top, origin labels down the left.
    pub fn to_block(&self) -> Vec<Vec<CellValue>> {
        let mut block = Vec::with_capacity(self.origins.len() + 1);

        let mut header = Vec::with_capacity(self.developments.len() + 1);
        header.push(CellValue::Empty);
        header.extend(self.developments.iter().map(|d| CellValue::from_label(d)));
        block.push(header);

        for (origin, row) in self.origins.iter().zip(&self.values) {
            let mut line = Vec::with_capacity(row.len() + 1);
            line.push(CellValue::text(origin.as_str()));
            line.extend(row.iter().cloned());
            block.push(line);
        }
        block
    }

    /// Range covered by `to_block` when anchored at (`row`, `col`).
    pub fn block_range(&self, row: u32, col: u32) -> Result<RangeRef, CoordError> {
        let (origins, developments) = self.shape();
        RangeRef::from_shape(origins as u32 + 1, developments as u32 + 1, row, col)
    }
}

/// Cuts the slice selected by `selection` out of `dataset`.
pub fn slice<D: Dataset>(
    dataset: &D,
    registry: &FilterRegistry,
    selection: &FilterSelection,
) -> Result<RenderedSlice, ExhibitError> {
    let key: SmallVec<[&str; 4]> = dataset
        .index_names()
        .iter()
        .map(|axis| selection.get(axis).ok_or_else(|| ExhibitError::MissingSelection(axis.clone())))
        .collect::<Result<_, _>>()?;

    let measure_dim = registry
        .measure()
        .ok_or_else(|| ExhibitError::MissingSelection("measure".to_string()))?;
    let measure = selection
        .get(measure_dim.name())
        .ok_or_else(|| ExhibitError::MissingSelection(measure_dim.name().to_string()))?;

    let xs = dataset.cross_section(&key, measure).map_err(|e| match e {
        TriangleError::UnknownLabel { axis, label } => {
            ExhibitError::SelectionNotFound { dimension: axis, label }
        }
        TriangleError::UnknownMeasure(label) => ExhibitError::SelectionNotFound {
            dimension: measure_dim.name().to_string(),
            label,
        },
        other => ExhibitError::Dataset(other),
    })?;

    let values = xs
        .values
        .iter()
        .map(|row| {
            row.iter()
                .map(|v| match v {
                    Some(n) if !n.is_nan() => CellValue::Number(*n),
                    _ => CellValue::not_available(),
                })
                .collect()
        })
        .collect();

    Ok(RenderedSlice {
        measure: measure.to_string(),
        origins: xs.origins,
        developments: xs.developments,
        values,
    })
}
