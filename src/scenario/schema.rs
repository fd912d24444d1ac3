//! Serialized scenario layout

use serde::{Deserialize, Serialize};

use crate::core::types::{Quarter, Year};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    /// Region codes in index order
    pub regions: Vec<String>,
    #[serde(default)]
    pub population: Vec<PopulationEntry>,
    #[serde(default)]
    pub travel: Vec<TravelEntry>,
    #[serde(default)]
    pub observed: Vec<ObservedEntry>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopulationEntry {
    pub year: Year,
    /// One count per region, in `regions` order
    pub counts: Vec<u64>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TravelEntry {
    pub year: Year,
    pub quarter: Quarter,
    /// `matrix[i][j]` is scaled travel volume from region i to region j
    pub matrix: Vec<Vec<f64>>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ObservedEntry {
    pub region: String,
    pub year: Year,
    pub quarter: Quarter,
    pub deaths: f64,
}
