//! Travel network - weighted directed flows between regions

use std::collections::BTreeMap;

use serde::Serialize;

use crate::core::error::{MetapopError, Result};
use crate::core::types::{Quarter, QuarterSlot, Year};

/// Square matrix of travel volume, `weight(i, j)` flowing from i to j.
/// Weights arrive pre-scaled; self loops are dropped.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TravelMatrix {
    size: usize,
    weights: Vec<f64>,
}

impl TravelMatrix {
    pub fn new(rows: Vec<Vec<f64>>) -> Result<Self> {
        let size = rows.len();
        let mut weights = Vec::with_capacity(size * size);

        for (i, row) in rows.into_iter().enumerate() {
            if row.len() != size {
                return Err(MetapopError::ShapeMismatch {
                    expected: (size, size),
                    actual: (size, row.len()),
                });
            }
            for (j, value) in row.into_iter().enumerate() {
                if !value.is_finite() || value < 0.0 {
                    return Err(MetapopError::InvalidTravelWeight {
                        row: i,
                        col: j,
                        value,
                    });
                }
                weights.push(if i == j { 0.0 } else { value });
            }
        }

        Ok(Self { size, weights })
    }

    /// Matrix with no travel at all
    pub fn zeros(size: usize) -> Self {
        Self {
            size,
            weights: vec![0.0; size * size],
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn weight(&self, from: usize, to: usize) -> f64 {
        self.weights[from * self.size + to]
    }

    /// Expected infected arrivals at `dest`: sum over origins of travel
    /// volume times the origin's infected fraction
    pub fn expected_infected_arrivals(&self, dest: usize, infected_fractions: &[f64]) -> f64 {
        (0..self.size)
            .map(|origin| self.weight(origin, dest) * infected_fractions[origin])
            .sum()
    }
}

/// One travel matrix per simulated (year, quarter)
#[derive(Clone, Debug, Default)]
pub struct TravelNetwork {
    matrices: BTreeMap<QuarterSlot, TravelMatrix>,
}

impl TravelNetwork {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, year: Year, quarter: Quarter, matrix: TravelMatrix) {
        self.matrices.insert(QuarterSlot::new(year, quarter), matrix);
    }

    pub fn get(&self, year: Year, quarter: Quarter) -> Option<&TravelMatrix> {
        self.matrices.get(&QuarterSlot::new(year, quarter))
    }

    pub fn require(&self, year: Year, quarter: Quarter) -> Result<&TravelMatrix> {
        self.get(year, quarter)
            .ok_or(MetapopError::MissingTravelMatrix { year, quarter })
    }

    pub fn len(&self) -> usize {
        self.matrices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matrices.is_empty()
    }
}
