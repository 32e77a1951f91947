//! FILENAME: core/triangle/src/builder.rs
//! PURPOSE: Builds triangles from long-format records.
//! CONTEXT: Axes for measures, origins and developments are declared up
//! front; index rows appear in the order their first record arrives.
//! Records hitting the same cell are summed.

use rustc_hash::FxHashMap;

use crate::error::TriangleError;
use crate::triangle::Triangle;

#[derive(Debug, Clone, Default)]
pub struct TriangleBuilder {
    index_names: Vec<String>,
    measures: Vec<String>,
    origins: Vec<String>,
    developments: Vec<String>,
    cumulative: bool,
    rows: Vec<Vec<String>>,
    row_lookup: FxHashMap<Vec<String>, usize>,
    cells: FxHashMap<(usize, usize, usize, usize), f64>,
}

fn owned<I, S>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items.into_iter().map(Into::into).collect()
}

impl TriangleBuilder {
    pub fn new<I, S>(index_names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        TriangleBuilder {
            index_names: owned(index_names),
            ..Default::default()
        }
    }

    pub fn measures<I, S>(mut self, measures: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.measures = owned(measures);
        self
    }

    pub fn origins<I, S>(mut self, origins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.origins = owned(origins);
        self
    }

    pub fn developments<I, S>(mut self, developments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.developments = owned(developments);
        self
    }

    /// Marks the records as already cumulative. Records are incremental by default.
    pub fn cumulative(mut self, cumulative: bool) -> Self {
        self.cumulative = cumulative;
        self
    }

    /// Adds one observation.
    pub fn record(
        &mut self,
        key: &[&str],
        measure: &str,
        origin: &str,
        development: &str,
        value: f64,
    ) -> Result<&mut Self, TriangleError> {
        if key.len() != self.index_names.len() {
            return Err(TriangleError::KeyLength {
                expected: self.index_names.len(),
                actual: key.len(),
            });
        }
        let m = position(&self.measures, measure)
            .ok_or_else(|| TriangleError::UnknownMeasure(measure.to_string()))?;
        let o = position(&self.origins, origin)
            .ok_or_else(|| TriangleError::UnknownOrigin(origin.to_string()))?;
        let d = position(&self.developments, development)
            .ok_or_else(|| TriangleError::UnknownDevelopment(development.to_string()))?;

        let key: Vec<String> = key.iter().map(|s| s.to_string()).collect();
        let row = match self.row_lookup.get(&key) {
            Some(&row) => row,
            None => {
                self.rows.push(key.clone());
                self.row_lookup.insert(key, self.rows.len() - 1);
                self.rows.len() - 1
            }
        };
        *self.cells.entry((row, m, o, d)).or_insert(0.0) += value;
        Ok(self)
    }

    pub fn build(self) -> Result<Triangle, TriangleError> {
        let (m, o, d) = (self.measures.len(), self.origins.len(), self.developments.len());
        let mut values = vec![None; self.rows.len() * m * o * d];
        for ((row, mi, oi, di), v) in self.cells {
            values[((row * m + mi) * o + oi) * d + di] = Some(v);
        }
        Triangle::from_parts(
            self.index_names,
            self.rows,
            self.measures,
            self.origins,
            self.developments,
            values,
            self.cumulative,
        )
    }
}

fn position(labels: &[String], label: &str) -> Option<usize> {
    labels.iter().position(|l| l == label)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn builder() -> TriangleBuilder {
        TriangleBuilder::new(["Line"])
            .measures(["Paid"])
            .origins(["2020", "2021"])
            .developments(["12", "24"])
    }

    #[test]
    fn test_build_from_records() {
        let mut b = builder();
        b.record(&["Auto"], "Paid", "2020", "12", 10.0).unwrap();
        b.record(&["Auto"], "Paid", "2020", "24", 5.0).unwrap();
        b.record(&["Property"], "Paid", "2021", "12", 7.0).unwrap();
        let tri = b.build().unwrap();

        assert!(!tri.is_cumulative());
        assert_eq!(tri.shape(), [2, 1, 2, 2]);
        assert_eq!(tri.index_labels(0), vec!["Auto", "Property"]);
        assert_eq!(tri.value(0, 0, 0, 1), Some(5.0));
        assert_eq!(tri.value(0, 0, 1, 0), None);
        assert_eq!(tri.value(1, 0, 1, 0), Some(7.0));
    }

    #[test]
    fn test_duplicate_records_are_summed() {
        let mut b = builder();
        b.record(&["Auto"], "Paid", "2020", "12", 10.0)
            .unwrap()
            .record(&["Auto"], "Paid", "2020", "12", 2.5)
            .unwrap();
        let tri = b.build().unwrap();
        assert_eq!(tri.value(0, 0, 0, 0), Some(12.5));
    }

    #[test]
    fn test_record_rejects_unknown_axes() {
        let mut b = builder();
        assert_eq!(
            b.record(&["Auto"], "Reported", "2020", "12", 1.0).err(),
            Some(TriangleError::UnknownMeasure("Reported".into()))
        );
        assert_eq!(
            b.record(&["Auto"], "Paid", "1999", "12", 1.0).err(),
            Some(TriangleError::UnknownOrigin("1999".into()))
        );
        assert_eq!(
            b.record(&["Auto"], "Paid", "2020", "36", 1.0).err(),
            Some(TriangleError::UnknownDevelopment("36".into()))
        );
        assert_eq!(
            b.record(&["Auto", "Paid"], "Paid", "2020", "12", 1.0).err(),
            Some(TriangleError::KeyLength { expected: 1, actual: 2 })
        );
    }

    #[test]
    fn test_empty_builder_has_no_rows() {
        let tri = builder().build().unwrap();
        assert_eq!(tri.shape(), [0, 1, 2, 2]);
        assert!(tri.index_labels(0).is_empty());
    }
}
