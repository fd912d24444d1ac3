//! Simulation outcome and serialization

use serde::Serialize;

use crate::epidemic::params::DomainViolation;
use crate::epidemic::record::{DeathMatrix, DeathRecord};

/// Result of one simulation run
///
/// An out-of-domain parameter vector is a normal outcome for optimizer
/// callers, distinct from a malformed-input error.
#[derive(Clone, Debug, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SimulationOutcome {
    Completed(SimulationOutput),
    OutOfDomain(DomainViolation),
}

impl SimulationOutcome {
    pub fn is_completed(&self) -> bool {
        matches!(self, SimulationOutcome::Completed(_))
    }

    pub fn output(&self) -> Option<&SimulationOutput> {
        match self {
            SimulationOutcome::Completed(output) => Some(output),
            SimulationOutcome::OutOfDomain(_) => None,
        }
    }

    pub fn deaths(&self) -> Option<&DeathMatrix> {
        self.output().map(|o| &o.deaths)
    }
}

/// Complete output of a finished run
#[derive(Clone, Debug, Serialize)]
pub struct SimulationOutput {
    pub deaths: DeathMatrix,
    pub record: DeathRecord,
    pub statistics: SimulationStats,
}

#[derive(Clone, Debug, Default, Serialize)]
pub struct SimulationStats {
    pub regions: usize,
    pub quarters_simulated: usize,
    pub total_deaths: u64,
    pub peak_infected: u64,
    pub final_population: u64,
    pub simulation_time_ms: u64,
}

impl SimulationOutput {
    pub fn summary(&self) -> String {
        format!(
            "Simulated {} quarters across {} regions in {}ms\n{} deaths, peak {} infected, final population {}",
            self.statistics.quarters_simulated,
            self.statistics.regions,
            self.statistics.simulation_time_ms,
            self.statistics.total_deaths,
            self.statistics.peak_infected,
            self.statistics.final_population,
        )
    }
}
