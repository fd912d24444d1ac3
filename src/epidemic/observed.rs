//! Observed death table, keyed by region code and quarter slot

use std::collections::BTreeMap;

use crate::core::error::{MetapopError, Result};
use crate::core::types::{Quarter, QuarterSlot, Year};
use crate::epidemic::ordering::RegionOrdering;
use crate::epidemic::record::DeathMatrix;

#[derive(Clone, Debug, Default)]
pub struct ObservedDeaths {
    cells: BTreeMap<String, BTreeMap<QuarterSlot, f64>>,
}

impl ObservedDeaths {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add deaths for a region and quarter. Repeated entries for the same
    /// cell are summed.
    pub fn add(&mut self, region: &str, year: Year, quarter: Quarter, deaths: f64) {
        *self
            .cells
            .entry(region.to_string())
            .or_default()
            .entry(QuarterSlot::new(year, quarter))
            .or_insert(0.0) += deaths;
    }

    pub fn get(&self, region: &str, year: Year, quarter: Quarter) -> Option<f64> {
        self.cells
            .get(region)
            .and_then(|slots| slots.get(&QuarterSlot::new(year, quarter)))
            .copied()
    }

    /// Arrange into a matrix with one row per region in `ordering` and one
    /// column per slot in `columns`. Regions outside the ordering are ignored.
    pub fn to_matrix(
        &self,
        ordering: &RegionOrdering,
        columns: &[QuarterSlot],
    ) -> Result<DeathMatrix> {
        let mut matrix = DeathMatrix::zeros(ordering.len(), columns.to_vec());

        for (row, code) in ordering.codes().iter().enumerate() {
            for (col, slot) in columns.iter().enumerate() {
                let deaths = self.get(code, slot.year, slot.quarter).ok_or_else(|| {
                    MetapopError::MissingObservation {
                        region: code.clone(),
                        year: slot.year,
                        quarter: slot.quarter,
                    }
                })?;
                matrix.set(row, col, deaths);
            }
        }

        Ok(matrix)
    }
}
