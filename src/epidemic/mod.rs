//! Metapopulation Epidemic Engine
//!
//! Stochastic spread, recovery and death of one disease across regions
//! coupled by quarterly travel flows. Produces a region × quarter death
//! matrix and scores it against observed deaths for calibration.

pub mod calibration;
pub mod kernels;
pub mod network;
pub mod observed;
pub mod ordering;
pub mod output;
pub mod params;
pub mod population;
pub mod record;
pub mod region;
pub mod sampling;
pub mod simulation;

pub use calibration::{get_cost, CalibrationObjective};
pub use network::{TravelMatrix, TravelNetwork};
pub use observed::ObservedDeaths;
pub use ordering::RegionOrdering;
pub use output::{SimulationOutcome, SimulationOutput, SimulationStats};
pub use params::{DomainViolation, OutcomeProbabilities, Parameter, ParameterVector};
pub use population::PopulationTable;
pub use record::{DeathMatrix, DeathRecord};
pub use region::{RegionState, RegionStates};
pub use simulation::{run_full_simulation, run_full_simulation_with_rng, EpidemicInputs};
