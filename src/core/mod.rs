pub mod calendar;
pub mod config;
pub mod error;
pub mod types;

pub use calendar::SimulationCalendar;
pub use config::SimulationConfig;
pub use error::{MetapopError, Result};
