//! Region-State Store - per-region population, infected and deceased counters

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::epidemic::sampling::binomial;

/// Disease state of one region at one simulated instant
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionState {
    pub total_population: u64,
    pub infected_count: u64,
    /// Deaths accumulated since the last extraction, not lifetime deaths
    pub deceased_count: u64,
}

impl RegionState {
    pub fn new(total_population: u64) -> Self {
        Self {
            total_population,
            infected_count: 0,
            deceased_count: 0,
        }
    }

    pub fn susceptible(&self) -> u64 {
        self.total_population.saturating_sub(self.infected_count)
    }

    /// Share of the population currently infected. An empty region reports 0.
    pub fn infected_fraction(&self) -> f64 {
        if self.total_population == 0 {
            return 0.0;
        }
        self.infected_count as f64 / self.total_population as f64
    }

    pub fn is_consistent(&self) -> bool {
        self.infected_count <= self.total_population
    }
}

/// Snapshot of every region's state, indexed by region ordering
///
/// Kernels take a snapshot by reference and return a new one; only the
/// orchestrator holds the current snapshot.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegionStates {
    states: Vec<RegionState>,
}

impl RegionStates {
    pub fn new(states: Vec<RegionState>) -> Self {
        Self { states }
    }

    /// Regions with the given populations and a binomial draw of initial
    /// infections at probability `p_inf`
    pub fn seeded<R: Rng + ?Sized>(populations: &[u64], p_inf: f64, rng: &mut R) -> Self {
        let states = populations
            .iter()
            .map(|&population| RegionState {
                total_population: population,
                infected_count: binomial(rng, population, p_inf),
                deceased_count: 0,
            })
            .collect();
        Self { states }
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&RegionState> {
        self.states.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &RegionState> {
        self.states.iter()
    }

    /// Infected fraction of every region, taken before any update
    pub fn infected_fractions(&self) -> Vec<f64> {
        self.states.iter().map(RegionState::infected_fraction).collect()
    }

    pub fn total_infected(&self) -> u64 {
        self.states.iter().map(|s| s.infected_count).sum()
    }

    pub fn total_population(&self) -> u64 {
        self.states.iter().map(|s| s.total_population).sum()
    }

    /// Indices of regions with more infected than people
    pub fn inconsistent_regions(&self) -> Vec<usize> {
        self.states
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.is_consistent())
            .map(|(i, _)| i)
            .collect()
    }

    /// Build the next snapshot by transforming each region in turn
    pub(crate) fn map_regions<F>(&self, mut f: F) -> Self
    where
        F: FnMut(usize, &RegionState) -> RegionState,
    {
        Self {
            states: self
                .states
                .iter()
                .enumerate()
                .map(|(i, s)| f(i, s))
                .collect(),
        }
    }
}
