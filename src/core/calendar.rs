//! Simulation calendar with partial first and last years
//!
//! The horizon starts in the fourth quarter of its first year and ends in
//! the first quarter of its last year. Every year in between runs all four
//! quarters. An optional single-quarter restriction filters every year
//! down to one quarter index for ablation runs.

use serde::Serialize;

use crate::core::error::{MetapopError, Result};
use crate::core::types::{Quarter, QuarterSlot, Year};

#[derive(Debug, Clone, Serialize)]
pub struct SimulationCalendar {
    first_year: Year,
    last_year: Year,
    sim_quarter: Option<Quarter>,
}

impl SimulationCalendar {
    pub fn new(first_year: Year, last_year: Year, sim_quarter: Option<Quarter>) -> Result<Self> {
        let calendar = Self {
            first_year,
            last_year,
            sim_quarter,
        };
        if last_year < first_year || calendar.schedule().is_empty() {
            return Err(MetapopError::EmptyHorizon {
                first_year,
                last_year,
            });
        }
        Ok(calendar)
    }

    pub fn first_year(&self) -> Year {
        self.first_year
    }

    pub fn last_year(&self) -> Year {
        self.last_year
    }

    /// All years of the horizon, including years that run no quarters
    pub fn years(&self) -> impl Iterator<Item = Year> {
        self.first_year..=self.last_year
    }

    /// Quarters simulated in `year`, in order
    pub fn quarters_in(&self, year: Year) -> Vec<Quarter> {
        if year < self.first_year || year > self.last_year {
            return Vec::new();
        }
        Quarter::ALL
            .iter()
            .copied()
            .filter(|&q| year != self.first_year || q == Quarter::Q4)
            .filter(|&q| year != self.last_year || q == Quarter::Q1)
            .filter(|&q| self.sim_quarter.map_or(true, |only| q == only))
            .collect()
    }

    /// Chronological list of every simulated slot
    pub fn schedule(&self) -> Vec<QuarterSlot> {
        self.years()
            .flat_map(|year| {
                self.quarters_in(year)
                    .into_iter()
                    .map(move |quarter| QuarterSlot::new(year, quarter))
            })
            .collect()
    }

    pub fn quarter_count(&self) -> usize {
        self.schedule().len()
    }
}
