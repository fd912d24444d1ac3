//! Metapop - Stochastic Metapopulation Epidemic Simulator

pub mod core;
pub mod epidemic;
pub mod scenario;
