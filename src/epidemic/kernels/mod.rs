//! Stochastic state-transition kernels
//!
//! Every kernel takes the current snapshot by reference and returns the
//! next one. All regions are transformed on every call.

mod background;
mod deceased;
mod injection;
mod local;
mod recovery;
mod travel;

pub use background::background_infection;
pub use deceased::extract_deceased;
pub use injection::{inject_population, reconcile_region};
pub use local::local_infection;
pub use recovery::{recover_and_die, split_outcomes, OutcomeSplit};
pub use travel::{transmission_probability, travel_infection};
