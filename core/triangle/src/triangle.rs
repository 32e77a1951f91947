//! FILENAME: core/triangle/src/triangle.rs
//! PURPOSE: The labeled N-dimensional triangle and its query operations.
//! CONTEXT: Layout is dense, row-major over
//! [index row, measure, origin, development]. Index rows are unique label
//! tuples over the categorical axes. A missing observation is `None`.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::error::TriangleError;

/// An origin x development matrix cut out of a triangle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub origins: Vec<String>,
    pub developments: Vec<String>,
    /// One row per origin, one column per development.
    pub values: Vec<Vec<Option<f64>>>,
}

impl CrossSection {
    pub fn shape(&self) -> (usize, usize) {
        (self.origins.len(), self.developments.len())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Triangle {
    index_names: Vec<String>,
    index: Vec<Vec<String>>,
    measures: Vec<String>,
    origins: Vec<String>,
    developments: Vec<String>,
    values: Vec<Option<f64>>,
    cumulative: bool,
    row_lookup: FxHashMap<Vec<String>, usize>,
}

impl Triangle {
    /// Assembles a triangle from its parts, validating the dense layout.
    pub fn from_parts(
        index_names: Vec<String>,
        index: Vec<Vec<String>>,
        measures: Vec<String>,
        origins: Vec<String>,
        developments: Vec<String>,
        values: Vec<Option<f64>>,
        cumulative: bool,
    ) -> Result<Self, TriangleError> {
        check_unique("measure", &measures)?;
        check_unique("origin", &origins)?;
        check_unique("development", &developments)?;

        let mut row_lookup = FxHashMap::default();
        for (i, row) in index.iter().enumerate() {
            if row.len() != index_names.len() {
                return Err(TriangleError::KeyLength {
                    expected: index_names.len(),
                    actual: row.len(),
                });
            }
            if row_lookup.insert(row.clone(), i).is_some() {
                return Err(TriangleError::DuplicateRow(row.clone()));
            }
        }

        let shape = [index.len(), measures.len(), origins.len(), developments.len()];
        let expected = shape.iter().product();
        if values.len() != expected {
            return Err(TriangleError::ShapeMismatch { shape, expected, actual: values.len() });
        }

        Ok(Triangle {
            index_names,
            index,
            measures,
            origins,
            developments,
            values,
            cumulative,
            row_lookup,
        })
    }

    pub fn is_cumulative(&self) -> bool {
        self.cumulative
    }

    pub fn index_names(&self) -> &[String] {
        &self.index_names
    }

    pub fn index_rows(&self) -> &[Vec<String>] {
        &self.index
    }

    pub fn measures(&self) -> &[String] {
        &self.measures
    }

    pub fn origins(&self) -> &[String] {
        &self.origins
    }

    pub fn developments(&self) -> &[String] {
        &self.developments
    }

    /// [index rows, measures, origins, developments]
    pub fn shape(&self) -> [usize; 4] {
        [self.index.len(), self.measures.len(), self.origins.len(), self.developments.len()]
    }

    pub fn axis_position(&self, name: &str) -> Result<usize, TriangleError> {
        self.index_names
            .iter()
            .position(|n| n == name)
            .ok_or_else(|| TriangleError::UnknownAxis(name.to_string()))
    }

    /// Distinct labels of an index axis, in order of first appearance.
    pub fn index_labels(&self, axis: usize) -> Vec<&str> {
        let mut seen: Vec<&str> = Vec::new();
        for row in &self.index {
            if let Some(label) = row.get(axis) {
                if !seen.contains(&label.as_str()) {
                    seen.push(label);
                }
            }
        }
        seen
    }

    fn offset(&self, row: usize, measure: usize, origin: usize, development: usize) -> usize {
        let [_, m, o, d] = self.shape();
        ((row * m + measure) * o + origin) * d + development
    }

    /// The cell at the given positions, or `None` when it is missing or any
    /// position is outside its axis.
    pub fn value(
        &self,
        row: usize,
        measure: usize,
        origin: usize,
        development: usize,
    ) -> Option<f64> {
        let [r, m, o, d] = self.shape();
        if row >= r || measure >= m || origin >= o || development >= d {
            return None;
        }
        self.values
            .get(self.offset(row, measure, origin, development))
            .copied()
            .flatten()
    }

    /// Running totals along the development axis. Missing cells stay missing
    /// and do not break the running total of later periods.
    pub fn to_cumulative(&self) -> Triangle {
        if self.cumulative {
            return self.clone();
        }
        let mut values = self.values.clone();
        let dev = self.developments.len();
        if dev > 0 {
            for chunk in values.chunks_mut(dev) {
                let mut running = 0.0;
                for cell in chunk.iter_mut() {
                    if let Some(v) = cell {
                        running += *v;
                        *cell = Some(running);
                    }
                }
            }
        }
        Triangle {
            values,
            cumulative: true,
            ..self.clone()
        }
    }

    /// Sums the triangle over every index axis not listed in `keep`. The kept
    /// axes appear in the order given. A cell stays missing only if it is
    /// missing in every row that folds into it.
    pub fn group_by(&self, keep: &[&str]) -> Result<Triangle, TriangleError> {
        let positions: SmallVec<[usize; 4]> = keep
            .iter()
            .map(|name| self.axis_position(name))
            .collect::<Result<_, _>>()?;

        let mut groups: Vec<Vec<String>> = Vec::new();
        let mut group_of_row = Vec::with_capacity(self.index.len());
        let mut lookup: FxHashMap<Vec<String>, usize> = FxHashMap::default();
        for row in &self.index {
            let key: Vec<String> = positions.iter().map(|&p| row[p].clone()).collect();
            let next = groups.len();
            let group = *lookup.entry(key.clone()).or_insert(next);
            if group == next {
                groups.push(key);
            }
            group_of_row.push(group);
        }

        let [_, m, o, d] = self.shape();
        let block = m * o * d;
        let mut values: Vec<Option<f64>> = vec![None; groups.len() * block];
        for (row, &group) in group_of_row.iter().enumerate() {
            let src = &self.values[row * block..(row + 1) * block];
            let dst = &mut values[group * block..(group + 1) * block];
            for (out, cell) in dst.iter_mut().zip(src) {
                if let Some(v) = cell {
                    *out = Some(out.unwrap_or(0.0) + v);
                }
            }
        }

        Triangle::from_parts(
            keep.iter().map(|s| s.to_string()).collect(),
            groups,
            self.measures.clone(),
            self.origins.clone(),
            self.developments.clone(),
            values,
            self.cumulative,
        )
    }

    /// Cross-section at one label per index axis (in this triangle's axis
    /// order) and one measure.
    ///
    /// Every label must exist on its axis. A combination of existing labels
    /// that has no row yields an all-missing matrix.
    pub fn xs(&self, key: &[&str], measure: &str) -> Result<CrossSection, TriangleError> {
        if key.len() != self.index_names.len() {
            return Err(TriangleError::KeyLength {
                expected: self.index_names.len(),
                actual: key.len(),
            });
        }
        for (axis, label) in key.iter().enumerate() {
            if !self.index.iter().any(|row| row[axis] == *label) {
                return Err(TriangleError::UnknownLabel {
                    axis: self.index_names[axis].clone(),
                    label: label.to_string(),
                });
            }
        }
        let measure_idx = self
            .measures
            .iter()
            .position(|m| m == measure)
            .ok_or_else(|| TriangleError::UnknownMeasure(measure.to_string()))?;

        let owned: Vec<String> = key.iter().map(|s| s.to_string()).collect();
        let row = self.row_lookup.get(&owned).copied();
        let values = (0..self.origins.len())
            .map(|o| {
                (0..self.developments.len())
                    .map(|d| row.and_then(|r| self.value(r, measure_idx, o, d)))
                    .collect()
            })
            .collect();

        Ok(CrossSection {
            origins: self.origins.clone(),
            developments: self.developments.clone(),
            values,
        })
    }
}

fn check_unique(axis: &str, labels: &[String]) -> Result<(), TriangleError> {
    for (i, label) in labels.iter().enumerate() {
        if labels[..i].contains(label) {
            return Err(TriangleError::DuplicateLabel {
                axis: axis.to_string(),
                label: label.clone(),
            });
        }
    }
    Ok(())
}
