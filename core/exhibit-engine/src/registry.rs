//! FILENAME: core/exhibit-engine/src/registry.rs
//! PURPOSE: The ordered set of filter dimensions an exhibit exposes.
//! CONTEXT: One dimension per categorical axis of the dataset, in dataset
//! order, followed by one synthetic dimension over the measures. Built once
//! per exhibit and never mutated afterwards.

use serde::Serialize;

use crate::dataset::Dataset;
use crate::error::ExhibitError;
use crate::logging::log_debug;
use crate::selection::FilterSelection;

/// Where a dimension's labels come from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DimensionKind {
    /// Categorical axis at this position of the dataset's index.
    Index { axis: usize },
    /// The measure axis.
    Measure,
}

/// A filter the user picks exactly one label from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterDimension {
    name: String,
    domain: Vec<String>,
    kind: DimensionKind,
}

impl FilterDimension {
    /// Fails with `EmptyDomain` when there is nothing to select.
    pub fn new(
        name: impl Into<String>,
        domain: Vec<String>,
        kind: DimensionKind,
    ) -> Result<Self, ExhibitError> {
        let name = name.into();
        if domain.is_empty() {
            return Err(ExhibitError::EmptyDomain { dimension: name });
        }
        Ok(FilterDimension { name, domain, kind })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn domain(&self) -> &[String] {
        &self.domain
    }

    pub fn kind(&self) -> DimensionKind {
        self.kind
    }

    /// First label of the domain, the initial selection.
    pub fn default_label(&self) -> &str {
        // Construction guarantees a non-empty domain.
        &self.domain[0]
    }

    pub fn contains(&self, label: &str) -> bool {
        self.domain.iter().any(|l| l == label)
    }

    /// Rows a list control needs to show every label.
    pub fn height(&self) -> u32 {
        self.domain.len() as u32
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FilterRegistry {
    dimensions: Vec<FilterDimension>,
}

impl FilterRegistry {
    /// Derives the filter dimensions of a dataset. The measure dimension is
    /// named `measure_dimension` and comes last.
    pub fn from_dataset<D: Dataset>(
        dataset: &D,
        measure_dimension: &str,
    ) -> Result<Self, ExhibitError> {
        let mut dimensions = Vec::with_capacity(dataset.index_names().len() + 1);
        for (axis, name) in dataset.index_names().iter().enumerate() {
            let domain = dataset.index_labels(axis).into_iter().map(str::to_string).collect();
            let kind = DimensionKind::Index { axis };
            dimensions.push(FilterDimension::new(name.clone(), domain, kind)?);
        }
        dimensions.push(FilterDimension::new(
            measure_dimension,
            dataset.measures().to_vec(),
            DimensionKind::Measure,
        )?);
        Self::new(dimensions)
    }

    pub fn new(dimensions: Vec<FilterDimension>) -> Result<Self, ExhibitError> {
        for (i, dim) in dimensions.iter().enumerate() {
            if dimensions[..i].iter().any(|d| d.name == dim.name) {
                return Err(ExhibitError::DuplicateDimension(dim.name.clone()));
            }
        }
        for dim in &dimensions {
            log_debug!("REGISTRY", "dimension {} with {} labels", dim.name, dim.domain.len());
        }
        Ok(FilterRegistry { dimensions })
    }

    pub fn dimensions(&self) -> &[FilterDimension] {
        &self.dimensions
    }

    pub fn len(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&FilterDimension> {
        self.dimensions.get(index)
    }

    pub fn by_name(&self, name: &str) -> Option<&FilterDimension> {
        self.dimensions.iter().find(|d| d.name == name)
    }

    pub fn measure(&self) -> Option<&FilterDimension> {
        self.dimensions.iter().find(|d| d.kind == DimensionKind::Measure)
    }

    /// Character length of the longest label over all domains.
    pub fn longest_label(&self) -> usize {
        self.dimensions
            .iter()
            .flat_map(|d| d.domain.iter())
            .map(|label| label.chars().count())
            .max()
            .unwrap_or(0)
    }

    /// Every dimension at its first label.
    pub fn initial_selection(&self) -> FilterSelection {
        let mut selection = FilterSelection::default();
        for dim in &self.dimensions {
            selection.insert(dim.name(), dim.default_label());
        }
        selection
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use triangle::{sample, Triangle};

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_from_dataset_orders_index_then_measure() {
        let tri = sample::loss_sample().unwrap();
        let registry = FilterRegistry::from_dataset(&tri, "Amount").unwrap();

        let names: Vec<&str> = registry.dimensions().iter().map(|d| d.name()).collect();
        assert_eq!(names, vec!["Line", "Type", "Amount"]);
        assert_eq!(registry.get(0).unwrap().domain(), strings(&["Auto", "Property"]).as_slice());
        assert_eq!(registry.get(1).unwrap().domain(), strings(&["Paid", "Incurred"]).as_slice());
        assert_eq!(registry.measure().unwrap().domain(), strings(&["Reported", "Paid"]).as_slice());
        assert_eq!(registry.get(1).unwrap().kind(), DimensionKind::Index { axis: 1 });
        assert_eq!(registry.longest_label(), 8);
    }

    #[test]
    fn test_domain_keeps_dataset_order_not_sorted() {
        let tri = Triangle::from_parts(
            strings(&["Line"]),
            vec![strings(&["Property"]), strings(&["Auto"]), strings(&["Marine"])],
            strings(&["Paid"]),
            strings(&["2020"]),
            strings(&["12"]),
            vec![Some(1.0), Some(2.0), Some(3.0)],
            true,
        )
        .unwrap();
        let registry = FilterRegistry::from_dataset(&tri, "Amount").unwrap();
        assert_eq!(
            registry.get(0).unwrap().domain(),
            strings(&["Property", "Auto", "Marine"]).as_slice()
        );
    }

    #[test]
    fn test_empty_axis_fails() {
        let tri = Triangle::from_parts(
            strings(&["Line"]),
            Vec::new(),
            strings(&["Paid"]),
            strings(&["2020"]),
            strings(&["12"]),
            Vec::new(),
            true,
        )
        .unwrap();
        let err = FilterRegistry::from_dataset(&tri, "Amount").unwrap_err();
        assert!(matches!(err, ExhibitError::EmptyDomain { ref dimension } if dimension == "Line"));
    }

    #[test]
    fn test_measure_name_clash_fails() {
        let tri = sample::loss_sample().unwrap();
        let err = FilterRegistry::from_dataset(&tri, "Line").unwrap_err();
        assert!(matches!(err, ExhibitError::DuplicateDimension(ref name) if name == "Line"));
    }

    #[test]
    fn test_initial_selection_is_first_label() {
        let tri = sample::loss_sample().unwrap();
        let registry = FilterRegistry::from_dataset(&tri, "Amount").unwrap();
        let selection = registry.initial_selection();
        assert_eq!(selection.get("Line"), Some("Auto"));
        assert_eq!(selection.get("Type"), Some("Paid"));
        assert_eq!(selection.get("Amount"), Some("Reported"));
    }
}
