//! FILENAME: core/exhibit-engine/src/dataset.rs
//! PURPOSE: What the exhibit needs from a labeled dataset.

use triangle::{CrossSection, Triangle, TriangleError};

pub trait Dataset {
    fn is_cumulative(&self) -> bool;

    fn to_cumulative(&self) -> Self
    where
        Self: Sized;

    /// Categorical axis names, in the dataset's own order.
    fn index_names(&self) -> &[String];

    /// Distinct labels of one categorical axis, in natural order.
    fn index_labels(&self, axis: usize) -> Vec<&str>;

    fn measures(&self) -> &[String];

    fn origins(&self) -> &[String];

    fn developments(&self) -> &[String];

    /// Origin x development matrix at one label per categorical axis (in
    /// `index_names` order) and one measure.
    fn cross_section(&self, key: &[&str], measure: &str) -> Result<CrossSection, TriangleError>;
}

impl Dataset for Triangle {
    fn is_cumulative(&self) -> bool {
        Triangle::is_cumulative(self)
    }

    fn to_cumulative(&self) -> Self {
        Triangle::to_cumulative(self)
    }

    fn index_names(&self) -> &[String] {
        Triangle::index_names(self)
    }

    fn index_labels(&self, axis: usize) -> Vec<&str> {
        Triangle::index_labels(self, axis)
    }

    fn measures(&self) -> &[String] {
        Triangle::measures(self)
    }

    fn origins(&self) -> &[String] {
        Triangle::origins(self)
    }

    fn developments(&self) -> &[String] {
        Triangle::developments(self)
    }

    fn cross_section(&self, key: &[&str], measure: &str) -> Result<CrossSection, TriangleError> {
        self.xs(key, measure)
    }
}
