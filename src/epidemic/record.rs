//! Death Record and the region × quarter death matrix

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::core::error::{MetapopError, Result};
use crate::core::types::{Quarter, QuarterSlot, Year};

/// Per-region death counts for every simulated (year, quarter)
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeathRecord {
    entries: BTreeMap<Year, BTreeMap<Quarter, Vec<u64>>>,
}

impl DeathRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, year: Year, quarter: Quarter, deaths: Vec<u64>) {
        self.entries.entry(year).or_default().insert(quarter, deaths);
    }

    pub fn get(&self, year: Year, quarter: Quarter) -> Option<&[u64]> {
        self.entries
            .get(&year)
            .and_then(|quarters| quarters.get(&quarter))
            .map(Vec::as_slice)
    }

    /// Recorded slots in chronological order
    pub fn slots(&self) -> Vec<QuarterSlot> {
        self.entries
            .iter()
            .flat_map(|(&year, quarters)| {
                quarters.keys().map(move |&quarter| QuarterSlot::new(year, quarter))
            })
            .collect()
    }

    pub fn quarter_count(&self) -> usize {
        self.entries.values().map(BTreeMap::len).sum()
    }

    pub fn total_deaths(&self) -> u64 {
        self.entries
            .values()
            .flat_map(BTreeMap::values)
            .flat_map(|deaths| deaths.iter())
            .sum()
    }

    /// Reshape into a (regions × quarters) matrix, columns chronological
    pub fn to_matrix(&self, regions: usize) -> Result<DeathMatrix> {
        let columns = self.slots();
        let mut matrix = DeathMatrix::zeros(regions, columns.clone());

        for (col, slot) in columns.iter().enumerate() {
            let deaths = self.get(slot.year, slot.quarter).unwrap_or(&[]);
            if deaths.len() != regions {
                return Err(MetapopError::RegionCountMismatch {
                    context: format!("death record {}", slot),
                    expected: regions,
                    actual: deaths.len(),
                });
            }
            for (row, &count) in deaths.iter().enumerate() {
                matrix.set(row, col, count as f64);
            }
        }

        Ok(matrix)
    }
}

/// Dense row-major matrix: rows are regions, columns are quarter slots
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DeathMatrix {
    rows: usize,
    columns: Vec<QuarterSlot>,
    values: Vec<f64>,
}

impl DeathMatrix {
    pub fn zeros(rows: usize, columns: Vec<QuarterSlot>) -> Self {
        let values = vec![0.0; rows * columns.len()];
        Self {
            rows,
            columns,
            values,
        }
    }

    /// Build from a row-major list of rows
    pub fn from_rows(rows: Vec<Vec<f64>>, columns: Vec<QuarterSlot>) -> Result<Self> {
        let n_rows = rows.len();
        let n_cols = columns.len();
        let mut values = Vec::with_capacity(n_rows * n_cols);
        for row in rows {
            if row.len() != n_cols {
                return Err(MetapopError::ShapeMismatch {
                    expected: (n_rows, n_cols),
                    actual: (n_rows, row.len()),
                });
            }
            values.extend(row);
        }
        Ok(Self {
            rows: n_rows,
            columns,
            values,
        })
    }

    pub fn shape(&self) -> (usize, usize) {
        (self.rows, self.columns.len())
    }

    pub fn columns(&self) -> &[QuarterSlot] {
        &self.columns
    }

    pub fn get(&self, row: usize, col: usize) -> f64 {
        self.values[row * self.columns.len() + col]
    }

    pub fn set(&mut self, row: usize, col: usize, value: f64) {
        let n_cols = self.columns.len();
        self.values[row * n_cols + col] = value;
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Same shape and labels, every cell multiplied by `factor`
    pub fn scaled(&self, factor: f64) -> Self {
        Self {
            rows: self.rows,
            columns: self.columns.clone(),
            values: self.values.iter().map(|v| v * factor).collect(),
        }
    }

    pub fn column_total(&self, col: usize) -> f64 {
        (0..self.rows).map(|row| self.get(row, col)).sum()
    }

    pub fn frobenius_norm(&self) -> f64 {
        self.values.iter().map(|v| v * v).sum::<f64>().sqrt()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_matrix_columns_follow_chronology() {
        let mut record = DeathRecord::new();
        // Insert out of order; the matrix must still be chronological
        record.record(2010, Quarter::Q1, vec![3, 4]);
        record.record(2009, Quarter::Q4, vec![1, 2]);

        let matrix = record.to_matrix(2).unwrap();
        assert_eq!(matrix.shape(), (2, 2));
        assert_eq!(matrix.columns()[0], QuarterSlot::new(2009, Quarter::Q4));
        assert_eq!(matrix.get(0, 0), 1.0);
        assert_eq!(matrix.get(1, 0), 2.0);
        assert_eq!(matrix.get(0, 1), 3.0);
        assert_eq!(matrix.get(1, 1), 4.0);
        assert_eq!(record.total_deaths(), 10);
    }

    #[test]
    fn test_matrix_rejects_wrong_region_count() {
        let mut record = DeathRecord::new();
        record.record(2009, Quarter::Q4, vec![1, 2, 3]);
        assert!(record.to_matrix(2).is_err());
    }

    #[test]
    fn test_frobenius_norm() {
        let slots = vec![QuarterSlot::new(2009, Quarter::Q4)];
        let m = DeathMatrix::from_rows(vec![vec![3.0], vec![4.0]], slots).unwrap();
        assert!((m.frobenius_norm() - 5.0).abs() < 1e-12);
        assert!((m.scaled(2.0).frobenius_norm() - 10.0).abs() < 1e-12);
    }
}
