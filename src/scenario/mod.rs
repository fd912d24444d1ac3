//! Scenario documents - prepared inputs for a simulation run
//!
//! A scenario carries the tables the data-preparation step produces:
//! region codes, scaled travel matrices, populations by year and,
//! optionally, observed deaths. TOML and JSON are both accepted.

pub mod loader;
pub mod schema;

pub use loader::{load_scenario, LoadedScenario};
pub use schema::{ObservedEntry, PopulationEntry, Scenario, TravelEntry};
