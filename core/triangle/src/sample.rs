//! FILENAME: core/triangle/src/sample.rs
//! PURPOSE: Small deterministic datasets for demos, benches and tests.

use crate::builder::TriangleBuilder;
use crate::error::TriangleError;
use crate::triangle::Triangle;

pub const LINES: [&str; 2] = ["Auto", "Property"];
pub const TYPES: [&str; 2] = ["Paid", "Incurred"];
pub const MEASURES: [&str; 2] = ["Reported", "Paid"];
pub const ORIGINS: [&str; 3] = ["2019", "2020", "2021"];
pub const DEVELOPMENTS: [&str; 3] = ["12", "24", "36"];
pub const REGIONS: [&str; 3] = ["East", "Central", "West"];

/// Incremental amount for one cell. Distinct per coordinate so a wrong
/// lookup shows up in a test.
fn incremental(line: usize, kind: usize, measure: usize, origin: usize, dev: usize) -> f64 {
    let base = 1000.0 * (line + 1) as f64 + 100.0 * (kind + 1) as f64 + 10.0 * (measure + 1) as f64;
    (base + origin as f64) / (dev + 1) as f64
}

/// Cumulative triangle over Line x Type with measures Reported and Paid.
/// Only the observed upper-left triangle is populated: origin `i` has
/// `3 - i` development periods, the rest are missing.
pub fn loss_sample() -> Result<Triangle, TriangleError> {
    build_loss_sample(1)
}

/// Incremental claims by Line, Type and Region, as raw records arrive before
/// being grouped down to Line x Type.
pub fn claims_by_region() -> Result<Triangle, TriangleError> {
    build_loss_sample(REGIONS.len())
}

fn build_loss_sample(regions: usize) -> Result<Triangle, TriangleError> {
    let index: &[&str] = if regions > 1 { &["Line", "Type", "Region"] } else { &["Line", "Type"] };
    let mut builder = TriangleBuilder::new(index.iter().copied())
        .measures(MEASURES)
        .origins(ORIGINS)
        .developments(DEVELOPMENTS)
        .cumulative(regions == 1);

    for (li, line) in LINES.iter().enumerate() {
        for (ti, kind) in TYPES.iter().enumerate() {
            for region in REGIONS.iter().take(regions) {
                let mut key = vec![*line, *kind];
                if regions > 1 {
                    key.push(*region);
                }
                for (mi, measure) in MEASURES.iter().enumerate() {
                    for (oi, origin) in ORIGINS.iter().enumerate() {
                        let mut running = 0.0;
                        for (di, dev) in DEVELOPMENTS.iter().enumerate().take(ORIGINS.len() - oi) {
                            let step = incremental(li, ti, mi, oi, di);
                            let value = if regions == 1 {
                                running += step;
                                running
                            } else {
                                step / regions as f64
                            };
                            builder.record(&key, measure, origin, dev, value)?;
                        }
                    }
                }
            }
        }
    }
    builder.build()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loss_sample_shape() {
        let tri = loss_sample().unwrap();
        assert!(tri.is_cumulative());
        assert_eq!(tri.shape(), [4, 2, 3, 3]);
        assert_eq!(tri.index_labels(0), LINES.to_vec());
        assert_eq!(tri.index_labels(1), TYPES.to_vec());

        let xs = tri.xs(&["Auto", "Paid"], "Reported").unwrap();
        assert!(xs.values[0].iter().all(Option::is_some));
        assert_eq!(xs.values[2][1], None);
        assert_eq!(xs.values[2][2], None);
        assert!(xs.values[1][1].is_some());
    }

    #[test]
    fn test_grouped_regions_match_cumulative_sample() {
        let grouped = claims_by_region().unwrap().group_by(&["Line", "Type"]).unwrap();
        assert!(!grouped.is_cumulative());
        let cum = grouped.to_cumulative();
        let reference = loss_sample().unwrap();

        for line in LINES {
            for kind in TYPES {
                for measure in MEASURES {
                    let a = cum.xs(&[line, kind], measure).unwrap();
                    let b = reference.xs(&[line, kind], measure).unwrap();
                    for (ra, rb) in a.values.iter().zip(&b.values) {
                        for (va, vb) in ra.iter().zip(rb) {
                            match (va, vb) {
                                (Some(x), Some(y)) => assert!((x - y).abs() < 1e-9),
                                (None, None) => {}
                                other => panic!("mismatch {:?}", other),
                            }
                        }
                    }
                }
            }
        }
    }
}
