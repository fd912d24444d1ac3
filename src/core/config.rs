//! Simulation configuration with documented constants
//!
//! Everything the engine needs besides the calibrated parameter vector and
//! the input tables lives here, including the fixed death probability.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::calendar::SimulationCalendar;
use crate::core::error::{MetapopError, Result};
use crate::core::types::{Quarter, Year};

/// Per-quarter death probability of an infected individual
pub const DEFAULT_P_DIE: f64 = 7.540044190323758e-05;

/// Configuration for a simulation run
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    /// First year of the horizon (only its fourth quarter runs)
    pub first_year: Year,

    /// Last year of the horizon (only its first quarter runs)
    pub last_year: Year,

    /// Restrict every year to this quarter index
    ///
    /// Used for controlled runs that isolate one season's travel matrix.
    pub sim_quarter: Option<Quarter>,

    /// Fraction of a destination's susceptible pool exposed to arriving
    /// travelers per quarter
    pub touch_fraction: f64,

    /// Death probability of an infected individual per recovery step
    ///
    /// Fixed, not calibrated. The stay-infected probability is derived as
    /// `1 - p_rec - p_die`.
    pub p_die: f64,

    /// Local infection/recovery cycles per quarter after the travel step
    pub local_cycles: u32,

    /// Seed for the run's ChaCha8 generator
    pub seed: u64,

    /// Cost reported to an optimizer for an out-of-domain parameter vector
    pub out_of_domain_cost: f64,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            first_year: 2009,
            last_year: 2019,
            sim_quarter: None,
            touch_fraction: 0.5,
            p_die: DEFAULT_P_DIE,
            local_cycles: 8,
            seed: 12345,
            out_of_domain_cost: 10.0,
        }
    }
}

impl SimulationConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SimulationConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load and validate a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.touch_fraction) {
            return Err(MetapopError::InvalidConfig(format!(
                "touch_fraction ({}) must be in [0, 1]",
                self.touch_fraction
            )));
        }

        if !(0.0..=1.0).contains(&self.p_die) {
            return Err(MetapopError::InvalidConfig(format!(
                "p_die ({}) must be in [0, 1]",
                self.p_die
            )));
        }

        if self.last_year < self.first_year {
            return Err(MetapopError::InvalidConfig(format!(
                "last_year ({}) precedes first_year ({})",
                self.last_year, self.first_year
            )));
        }

        Ok(())
    }

    pub fn calendar(&self) -> Result<SimulationCalendar> {
        SimulationCalendar::new(self.first_year, self.last_year, self.sim_quarter)
    }
}
