//! FILENAME: core/exhibit-engine/src/selection.rs
//! PURPOSE: Current label per filter dimension.

use rustc_hash::FxHashMap;

use crate::error::ExhibitError;
use crate::registry::FilterDimension;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    selected: FxHashMap<String, String>,
}

impl FilterSelection {
    pub(crate) fn insert(&mut self, dimension: &str, label: &str) {
        self.selected.insert(dimension.to_string(), label.to_string());
    }

    pub fn get(&self, dimension: &str) -> Option<&str> {
        self.selected.get(dimension).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.selected.len()
    }

    pub fn is_empty(&self) -> bool {
        self.selected.is_empty()
    }

    /// Selects `label` on one dimension, leaving every other dimension alone.
    /// Returns the previous label. Labels outside the domain are refused.
    pub fn select(
        &mut self,
        dimension: &FilterDimension,
        label: &str,
    ) -> Result<Option<String>, ExhibitError> {
        if !dimension.contains(label) {
            return Err(ExhibitError::SelectionNotFound {
                dimension: dimension.name().to_string(),
                label: label.to_string(),
            });
        }
        Ok(self.selected.insert(dimension.name().to_string(), label.to_string()))
    }
}
